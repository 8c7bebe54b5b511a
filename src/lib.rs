//! Renames `lesson<N>.mp4` files to `"<N> <title>.mp4"` using an ordered list of titles.

pub mod config;
pub mod discovery;
pub mod error;
pub mod name_list;
pub mod rename_engine;
pub mod video;

pub use config::{ConfigBuilder, RenameConfig};
pub use error::RenameError;
pub use name_list::NameList;
pub use rename_engine::{FileRename, RenameEngine, RenameResult, RenameSummary};
pub use video::{LessonPattern, Video};
