use std::path::Path;

use tokio::fs;
use tracing::debug;

use crate::error::{RenameError, Result};

/// Lesson titles in file order. Entry 0 belongs to lesson 1.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NameList {
    titles: Vec<String>,
}

impl NameList {
    pub async fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .await
            .map_err(|e| RenameError::io("read name list", path, e))?;
        let list = Self::from_text(&text);
        debug!("Loaded {} titles from {}", list.len(), path.display());
        Ok(list)
    }

    /// Splits on `\n` and trims every line. Blank lines are kept so numbering stays aligned.
    pub fn from_text(text: &str) -> Self {
        Self {
            titles: text.split('\n').map(|line| line.trim().to_string()).collect(),
        }
    }

    pub fn title(&self, number: u32) -> Result<&str> {
        (number as usize)
            .checked_sub(1)
            .and_then(|index| self.titles.get(index))
            .map(String::as_str)
            .ok_or(RenameError::TitleLookup {
                number,
                available: self.titles.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }
}
