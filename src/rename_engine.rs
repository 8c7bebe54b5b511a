use std::collections::HashSet;
use std::path::{Path, PathBuf};

use futures::future::join_all;
use tokio::fs;
use tracing::{debug, error, info};

use crate::config::RenameConfig;
use crate::discovery::discover;
use crate::error::{RenameError, Result};
use crate::name_list::NameList;
use crate::video::{LessonPattern, Video};

#[derive(Debug, Clone, PartialEq)]
pub struct FileRename {
    pub original_path: PathBuf,
    pub new_path: PathBuf,
    pub new_name: String,
    pub lesson_number: u32,
    pub lesson_title: String,
}

#[derive(Debug)]
pub struct RenameResult {
    pub original_path: PathBuf,
    pub lesson_number: u32,
    /// Destination path on success.
    pub outcome: Result<PathBuf>,
}

impl RenameResult {
    pub fn success(&self) -> bool {
        self.outcome.is_ok()
    }
}

#[derive(Debug, Default)]
pub struct RenameSummary {
    /// One entry per recognized video, in discovery order.
    pub results: Vec<RenameResult>,
    pub unrecognized: usize,
}

impl RenameSummary {
    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn renamed(&self) -> usize {
        self.results.iter().filter(|r| r.success()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.renamed()
    }

    pub fn log(&self) {
        let mut ordered: Vec<&RenameResult> = self.results.iter().collect();
        ordered.sort_by_key(|r| r.lesson_number);

        for result in ordered {
            match &result.outcome {
                Ok(new_path) => info!(
                    "Renamed {} -> {}",
                    result.original_path.display(),
                    new_path.display()
                ),
                Err(e) => error!("Lesson {}: {}", result.lesson_number, e),
            }
        }

        info!(
            "{} of {} videos renamed ({} other files ignored)",
            self.renamed(),
            self.total(),
            self.unrecognized
        );
    }

    /// Number of renamed videos, or the first failure in discovery order.
    pub fn into_result(self) -> Result<usize> {
        let renamed = self.renamed();
        match self.results.into_iter().find_map(|r| r.outcome.err()) {
            Some(e) => Err(e),
            None => Ok(renamed),
        }
    }
}

/// Builds the target name `"<number> <title>.mp4"` next to the original file.
///
/// Titles containing a path separator are rejected so the file stays in its folder.
pub fn plan_rename(original_path: &Path, lesson_number: u32, names: &NameList) -> Result<FileRename> {
    let lesson_title = names.title(lesson_number)?.to_string();
    if lesson_title.chars().any(std::path::is_separator) {
        return Err(RenameError::InvalidTitle {
            number: lesson_number,
            title: lesson_title,
        });
    }
    let new_name = format!("{} {}.mp4", lesson_number, lesson_title);
    let new_path = original_path
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(&new_name);

    Ok(FileRename {
        original_path: original_path.to_path_buf(),
        new_path,
        new_name,
        lesson_number,
        lesson_title,
    })
}

/// Moves one file, refusing when anything (including a dangling symlink) sits at the target.
///
/// The target check runs before the move, so it is best-effort: a file created in
/// between can still be replaced.
pub async fn rename_file(file: &FileRename) -> Result<PathBuf> {
    fs::symlink_metadata(&file.original_path)
        .await
        .map_err(|e| RenameError::io("rename", &file.original_path, e))?;

    match fs::symlink_metadata(&file.new_path).await {
        Ok(_) => {
            return Err(RenameError::TargetExists {
                path: file.new_path.clone(),
            });
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(RenameError::io("check", &file.new_path, e)),
    }

    fs::rename(&file.original_path, &file.new_path)
        .await
        .map_err(|e| RenameError::io("rename", &file.original_path, e))?;

    debug!("Moved {} to {}", file.original_path.display(), file.new_name);
    Ok(file.new_path.clone())
}

#[derive(Debug)]
pub struct RenameEngine {
    config: RenameConfig,
    lesson_pattern: LessonPattern,
}

impl RenameEngine {
    pub fn new(config: RenameConfig) -> Result<Self> {
        Ok(Self {
            config,
            lesson_pattern: LessonPattern::new()?,
        })
    }

    pub async fn scan_directory(&self) -> Result<Vec<Video>> {
        let paths = discover(&self.config.videos_folder).await?;

        let videos = paths
            .into_iter()
            .map(|path| self.lesson_pattern.classify(path))
            .collect::<Result<Vec<_>>>()?;

        for video in &videos {
            if let Video::Unrecognized { path, .. } = video {
                debug!("Ignoring {}", path.display());
            }
        }

        Ok(videos)
    }

    /// Renames every recognized video concurrently.
    ///
    /// A failing item does not stop the others. Items whose targets collide with each
    /// other all fail with `DuplicateTarget`.
    pub async fn rename_files(&self, videos: &[Video], names: &NameList) -> Vec<RenameResult> {
        let planned: Vec<(PathBuf, u32, Result<FileRename>)> = videos
            .iter()
            .filter_map(|video| match video {
                Video::Recognized { path, number, .. } => {
                    Some((path.clone(), *number, plan_rename(path, *number, names)))
                }
                Video::Unrecognized { .. } => None,
            })
            .collect();

        let mut seen = HashSet::new();
        let collisions: HashSet<PathBuf> = planned
            .iter()
            .filter_map(|(_, _, plan)| plan.as_ref().ok())
            .filter(|file| !seen.insert(file.new_path.clone()))
            .map(|file| file.new_path.clone())
            .collect();

        let tasks = planned.into_iter().map(|(original_path, lesson_number, plan)| {
            let collisions = &collisions;
            async move {
                let outcome = match plan {
                    Ok(file) if collisions.contains(&file.new_path) => {
                        Err(RenameError::DuplicateTarget {
                            path: file.new_path,
                        })
                    }
                    Ok(file) => rename_file(&file).await,
                    Err(e) => Err(e),
                };
                RenameResult {
                    original_path,
                    lesson_number,
                    outcome,
                }
            }
        });

        join_all(tasks).await
    }

    /// Loads the name list and scans the videos folder concurrently, then renames.
    pub async fn run(&self) -> Result<RenameSummary> {
        let names_file = self.config.names_file();
        let (names, videos) =
            tokio::try_join!(NameList::load(&names_file), self.scan_directory())?;

        info!(
            "Found {} titles and {} files under {}",
            names.len(),
            videos.len(),
            self.config.videos_folder.display()
        );

        let unrecognized = videos.iter().filter(|v| v.number().is_none()).count();
        let results = self.rename_files(&videos, &names).await;

        Ok(RenameSummary {
            results,
            unrecognized,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;
    use tempfile::TempDir;

    #[test]
    fn test_plan_rename() {
        let names = NameList::from_text("Intro\nSetup\nDeep Dive");
        let plan = plan_rename(Path::new("/videos/A/lesson3.mp4"), 3, &names).unwrap();

        assert_eq!(plan.new_name, "3 Deep Dive.mp4");
        assert_eq!(plan.new_path, PathBuf::from("/videos/A/3 Deep Dive.mp4"));
        assert_eq!(plan.lesson_title, "Deep Dive");
    }

    #[test]
    fn test_plan_rename_out_of_range() {
        let names = NameList::from_text("Intro\nSetup");
        for number in [0, 3, 999] {
            let err = plan_rename(Path::new("/videos/A/lesson.mp4"), number, &names).unwrap_err();
            assert!(matches!(err, RenameError::TitleLookup { available: 2, .. }));
        }
    }

    #[test]
    fn test_plan_rename_rejects_separator_in_title() {
        let names = NameList::from_text("Part 1/2");
        let err = plan_rename(Path::new("/videos/A/lesson1.mp4"), 1, &names).unwrap_err();
        assert!(matches!(
            err,
            RenameError::InvalidTitle { number: 1, ref title } if title == "Part 1/2"
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_rename_file_refuses_dangling_symlink_target() {
        let temp = TempDir::new().unwrap();
        let original = temp.path().join("lesson1.mp4");
        std_fs::write(&original, "video").unwrap();
        let target = temp.path().join("1 Intro.mp4");
        std::os::unix::fs::symlink(temp.path().join("gone"), &target).unwrap();

        let names = NameList::from_text("Intro");
        let plan = plan_rename(&original, 1, &names).unwrap();
        let err = rename_file(&plan).await.unwrap_err();

        assert!(matches!(err, RenameError::TargetExists { .. }));
        assert!(original.exists());
        assert!(std_fs::symlink_metadata(&target).unwrap().file_type().is_symlink());
    }

    #[tokio::test]
    async fn test_rename_file_refuses_to_overwrite() {
        let temp = TempDir::new().unwrap();
        let original = temp.path().join("lesson1.mp4");
        std_fs::write(&original, "video").unwrap();
        std_fs::write(temp.path().join("1 Intro.mp4"), "existing").unwrap();

        let names = NameList::from_text("Intro");
        let plan = plan_rename(&original, 1, &names).unwrap();
        let err = rename_file(&plan).await.unwrap_err();

        assert!(matches!(err, RenameError::TargetExists { .. }));
        assert!(original.exists());
        assert_eq!(std_fs::read_to_string(&plan.new_path).unwrap(), "existing");
    }

    #[tokio::test]
    async fn test_duplicate_targets_fail_together() {
        let temp = TempDir::new().unwrap();
        std_fs::write(temp.path().join("titles.txt"), "Intro\nSetup").unwrap();
        let folder = temp.path().join("A");
        std_fs::create_dir(&folder).unwrap();
        std_fs::write(folder.join("lesson2.mp4"), "").unwrap();
        std_fs::write(folder.join("lesson02.mp4"), "").unwrap();
        std_fs::write(folder.join("lesson1.mp4"), "").unwrap();

        let config = crate::config::ConfigBuilder::new()
            .videos_folder(temp.path())
            .video_names("titles.txt")
            .build()
            .unwrap();
        let summary = RenameEngine::new(config).unwrap().run().await.unwrap();

        assert_eq!(summary.renamed(), 1);
        assert_eq!(summary.failed(), 2);
        assert!(folder.join("1 Intro.mp4").exists());
        assert!(folder.join("lesson2.mp4").exists());
        assert!(folder.join("lesson02.mp4").exists());
        assert!(matches!(
            summary.into_result(),
            Err(RenameError::DuplicateTarget { .. })
        ));
    }
}
