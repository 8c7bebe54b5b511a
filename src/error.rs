//! Error type shared by every stage of the rename pipeline.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenameError {
    #[error("required environment variable {name} is not set")]
    MissingVariable { name: &'static str },

    #[error("failed to load .env file: {0}")]
    EnvFile(#[from] dotenvy::Error),

    #[error("failed to {action} {path:?}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no title for lesson {number}: the name list has {available} entries")]
    TitleLookup { number: u32, available: usize },

    #[error("title {title:?} for lesson {number} contains a path separator")]
    InvalidTitle { number: u32, title: String },

    #[error("refusing to overwrite existing file {path:?}")]
    TargetExists { path: PathBuf },

    #[error("more than one video would be renamed to {path:?}")]
    DuplicateTarget { path: PathBuf },

    #[error("lesson pattern matched {name:?} without a usable number")]
    PatternInvariant { name: String },

    #[error("invalid lesson pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl RenameError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        RenameError::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// The underlying I/O error kind, if this is an I/O failure.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            RenameError::Io { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RenameError>;
