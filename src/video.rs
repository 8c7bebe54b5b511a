use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::{RenameError, Result};

/// A discovered path classified by its file name.
#[derive(Debug, Clone, PartialEq)]
pub enum Video {
    Recognized {
        path: PathBuf,
        name: String,
        number: u32,
    },
    Unrecognized {
        path: PathBuf,
        name: String,
    },
}

impl Video {
    pub fn path(&self) -> &Path {
        match self {
            Video::Recognized { path, .. } | Video::Unrecognized { path, .. } => path,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Video::Recognized { name, .. } | Video::Unrecognized { name, .. } => name,
        }
    }

    pub fn number(&self) -> Option<u32> {
        match self {
            Video::Recognized { number, .. } => Some(*number),
            Video::Unrecognized { .. } => None,
        }
    }
}

/// Matches `lesson<1-3 digits>.mp4`, nothing more.
#[derive(Debug, Clone)]
pub struct LessonPattern {
    regex: Regex,
}

impl LessonPattern {
    pub fn new() -> Result<Self> {
        let regex = Regex::new(r"^lesson(?P<number>[0-9]{1,3})\.mp4$")?;
        Ok(Self { regex })
    }

    pub fn lesson_number(&self, name: &str) -> Result<Option<u32>> {
        let Some(captures) = self.regex.captures(name) else {
            return Ok(None);
        };

        let number = captures
            .name("number")
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .ok_or_else(|| RenameError::PatternInvariant {
                name: name.to_string(),
            })?;

        Ok(Some(number))
    }

    pub fn classify(&self, path: PathBuf) -> Result<Video> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        // Lossy names carry U+FFFD and can never match, so they fall through as unrecognized.
        Ok(match self.lesson_number(&name)? {
            Some(number) => Video::Recognized { path, name, number },
            None => Video::Unrecognized { path, name },
        })
    }
}
