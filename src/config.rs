use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{RenameError, Result};

pub const VIDEOS_FOLDER_VAR: &str = "VIDEOS_FOLDER";
pub const VIDEO_NAMES_VAR: &str = "VIDEO_NAMES";

#[derive(Debug, Clone, PartialEq)]
pub struct RenameConfig {
    pub videos_folder: PathBuf,
    pub video_names: PathBuf,
}

impl RenameConfig {
    /// Reads both settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var_os(name))
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let videos_folder = lookup(VIDEOS_FOLDER_VAR).ok_or(RenameError::MissingVariable {
            name: VIDEOS_FOLDER_VAR,
        })?;
        let video_names = lookup(VIDEO_NAMES_VAR).ok_or(RenameError::MissingVariable {
            name: VIDEO_NAMES_VAR,
        })?;

        ConfigBuilder::new()
            .videos_folder(videos_folder)
            .video_names(video_names)
            .build()
    }

    /// Location of the title list. Relative names resolve against the videos folder.
    pub fn names_file(&self) -> PathBuf {
        self.videos_folder.join(&self.video_names)
    }
}

/// Loads `.env` from the working directory into the environment.
///
/// Variables that are already set are left alone. A missing file is not an error.
pub fn load_env_file() -> Result<()> {
    match dotenvy::dotenv() {
        Ok(path) => {
            debug!("Loaded environment from {}", path.display());
            Ok(())
        }
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[derive(Debug, Default)]
pub struct ConfigBuilder {
    videos_folder: Option<PathBuf>,
    video_names: Option<PathBuf>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn videos_folder<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.videos_folder = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn video_names<P: AsRef<Path>>(mut self, file: P) -> Self {
        self.video_names = Some(file.as_ref().to_path_buf());
        self
    }

    /// An empty videos folder means the working directory.
    pub fn build(self) -> Result<RenameConfig> {
        let videos_folder = self
            .videos_folder
            .map(|dir| {
                if dir.as_os_str().is_empty() {
                    PathBuf::from(".")
                } else {
                    dir
                }
            })
            .ok_or(RenameError::MissingVariable {
                name: VIDEOS_FOLDER_VAR,
            })?;
        let video_names = self.video_names.ok_or(RenameError::MissingVariable {
            name: VIDEO_NAMES_VAR,
        })?;

        Ok(RenameConfig {
            videos_folder,
            video_names,
        })
    }
}
