//! Two-level directory walk: every entry inside each subfolder of the videos folder.

use std::path::{Path, PathBuf};

use futures::future::try_join_all;
use tokio::fs;
use tracing::debug;

use crate::error::{RenameError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveredPath {
    pub path: PathBuf,
    pub is_dir: bool,
}

impl DiscoveredPath {
    pub async fn stat(path: PathBuf) -> Result<Self> {
        let metadata = fs::metadata(&path)
            .await
            .map_err(|e| RenameError::io("stat", &path, e))?;
        Ok(Self {
            is_dir: metadata.is_dir(),
            path,
        })
    }
}

/// Returns the direct children of every first-level subdirectory of `root`.
///
/// Files sitting directly in `root` are skipped. Any failed listing or stat fails the
/// whole walk.
pub async fn discover(root: &Path) -> Result<Vec<PathBuf>> {
    let root = std::path::absolute(root).map_err(|e| RenameError::io("resolve", root, e))?;

    let top_level = list_entries(&root).await?;
    let stats = try_join_all(top_level.into_iter().map(DiscoveredPath::stat)).await?;
    let folders: Vec<PathBuf> = stats
        .into_iter()
        .filter(|entry| entry.is_dir)
        .map(|entry| entry.path)
        .collect();

    debug!("Scanning {} folders under {}", folders.len(), root.display());

    let nested = try_join_all(folders.iter().map(|folder| list_entries(folder))).await?;
    Ok(nested.into_iter().flatten().collect())
}

async fn list_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut reader = fs::read_dir(dir)
        .await
        .map_err(|e| RenameError::io("read directory", dir, e))?;

    let mut entries = Vec::new();
    while let Some(entry) = reader
        .next_entry()
        .await
        .map_err(|e| RenameError::io("read directory", dir, e))?
    {
        entries.push(entry.path());
    }
    entries.sort();
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_skips_root_files_and_collects_nested_entries() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        std_fs::write(root.join("titles.txt"), "Intro").unwrap();
        std_fs::create_dir(root.join("A")).unwrap();
        std_fs::write(root.join("A/lesson1.mp4"), "").unwrap();
        std_fs::create_dir(root.join("A/extras")).unwrap();
        std_fs::write(root.join("A/extras/lesson9.mp4"), "").unwrap();

        let found = discover(root).await.unwrap();
        let root = std::path::absolute(root).unwrap();
        assert_eq!(found, vec![root.join("A/extras"), root.join("A/lesson1.mp4")]);
    }

    #[tokio::test]
    async fn test_missing_root_fails() {
        let temp = TempDir::new().unwrap();
        let err = discover(&temp.path().join("nope")).await.unwrap_err();
        assert_eq!(err.io_kind(), Some(std::io::ErrorKind::NotFound));
    }
}
