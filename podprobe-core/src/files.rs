//! Listing and writing probe files in the working directory

use crate::error::FilesystemError;
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{error, info};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileList {
    pub file_count: usize,
    pub files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WrittenFile {
    pub file_name: String,
    pub message: String,
}

/// `{error, details?}`; `details` is absent when there is no underlying I/O error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilesystemFailure {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DirectoryListing {
    Listed(FileList),
    Unavailable(FilesystemFailure),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ProbeWrite {
    Written(WrittenFile),
    Failed(FilesystemFailure),
}

#[derive(Debug, Clone)]
pub struct FilesystemProbe {
    working_dir: PathBuf,
}

impl FilesystemProbe {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
        }
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Entry names in the working directory, sorted
    pub async fn list_working_directory(&self) -> DirectoryListing {
        if !self.working_dir_exists().await {
            return DirectoryListing::Unavailable(self.missing_directory());
        }

        self.listing_from(read_names(&self.working_dir).await)
    }

    fn listing_from(&self, names: io::Result<Vec<String>>) -> DirectoryListing {
        match names {
            Ok(files) => DirectoryListing::Listed(FileList {
                file_count: files.len(),
                files,
            }),
            Err(source) => {
                let err = FilesystemError::Io(source);
                error!(dir = %self.working_dir.display(), "Failed to list directory: {}: {}", err, err.details());
                DirectoryListing::Unavailable(FilesystemFailure {
                    error: err.classification(),
                    details: Some(err.details()),
                })
            }
        }
    }

    /// Create `probe-<millis>.txt`. An existing file is never overwritten.
    pub async fn write_probe_file(&self) -> ProbeWrite {
        if !self.working_dir_exists().await {
            let failure = self.missing_directory();
            error!("{}", failure.error);
            return ProbeWrite::Failed(failure);
        }

        let millis = chrono::Utc::now().timestamp_millis();
        let file_name = format!("probe-{}.txt", millis);
        let path = self.working_dir.join(&file_name);

        match write_new(&path, format!("Probe file created at {}", millis)).await {
            Ok(()) => {
                info!(path = %path.display(), "Wrote probe file");
                ProbeWrite::Written(WrittenFile {
                    file_name,
                    message: "File written successfully".to_string(),
                })
            }
            Err(source) => {
                let err = classify_write_error(&path, source).await;
                error!(path = %path.display(), "Failed to write probe file: {}: {}", err, err.details());
                ProbeWrite::Failed(FilesystemFailure {
                    error: err.classification(),
                    details: Some(err.details()),
                })
            }
        }
    }

    /// Whether the working directory exists and is a directory
    pub async fn working_dir_exists(&self) -> bool {
        fs::metadata(&self.working_dir)
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false)
    }

    fn missing_directory(&self) -> FilesystemFailure {
        FilesystemFailure {
            error: format!(
                "{} does not exist or is not a directory",
                self.working_dir.display()
            ),
            details: None,
        }
    }
}

async fn read_names(dir: &Path) -> io::Result<Vec<String>> {
    let mut entries = fs::read_dir(dir).await?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}

async fn write_new(path: &Path, content: String) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await?;
    file.write_all(content.as_bytes()).await?;
    file.flush().await
}

/// Read-only only when the target exists and is not writable
async fn classify_write_error(path: &Path, source: io::Error) -> FilesystemError {
    match fs::metadata(path).await {
        Ok(meta) if meta.permissions().readonly() => FilesystemError::ReadOnly(source),
        _ => FilesystemError::Io(source),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_listing_is_sorted_and_counted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), "b").unwrap();
        std::fs::write(dir.path().join("a.txt"), "a").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();

        let listing = FilesystemProbe::new(dir.path()).list_working_directory().await;

        assert_eq!(
            listing,
            DirectoryListing::Listed(FileList {
                file_count: 3,
                files: vec!["a.txt".into(), "b.txt".into(), "nested".into()],
            })
        );
    }

    #[tokio::test]
    async fn test_missing_directory_listing() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent");

        let listing = FilesystemProbe::new(&missing).list_working_directory().await;

        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(
            json["error"],
            format!("{} does not exist or is not a directory", missing.display())
        );
        assert!(json.get("details").is_none());
        assert!(json.get("fileCount").is_none());
    }

    #[test]
    fn test_unreadable_directory_is_an_io_failure() {
        let probe = FilesystemProbe::new("/srv/probe");
        let denied = io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied");

        let json = serde_json::to_value(probe.listing_from(Err(denied))).unwrap();

        assert_eq!(json["error"], "I/O error occurred");
        assert_eq!(json["details"], "Permission denied");
        assert!(json.get("fileCount").is_none());
    }

    #[tokio::test]
    async fn test_file_path_is_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain");
        std::fs::write(&file, "x").unwrap();

        let probe = FilesystemProbe::new(&file);
        assert!(matches!(
            probe.list_working_directory().await,
            DirectoryListing::Unavailable(_)
        ));
        assert!(matches!(probe.write_probe_file().await, ProbeWrite::Failed(_)));
    }

    #[tokio::test]
    async fn test_write_creates_timestamped_file() {
        let dir = tempfile::tempdir().unwrap();
        let probe = FilesystemProbe::new(dir.path());

        let ProbeWrite::Written(written) = probe.write_probe_file().await else {
            panic!("expected a written file");
        };

        assert!(written.file_name.starts_with("probe-"));
        assert!(written.file_name.ends_with(".txt"));
        assert_eq!(written.message, "File written successfully");

        let millis = written
            .file_name
            .trim_start_matches("probe-")
            .trim_end_matches(".txt");
        let content = std::fs::read_to_string(dir.path().join(&written.file_name)).unwrap();
        assert_eq!(content, format!("Probe file created at {}", millis));
    }

    #[tokio::test]
    async fn test_writes_in_distinct_milliseconds_keep_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let probe = FilesystemProbe::new(dir.path());

        let first = probe.write_probe_file().await;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = probe.write_probe_file().await;

        assert!(matches!(first, ProbeWrite::Written(_)));
        assert!(matches!(second, ProbeWrite::Written(_)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[tokio::test]
    async fn test_missing_directory_write_has_no_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let write = FilesystemProbe::new(dir.path().join("absent"))
            .write_probe_file()
            .await;

        let json = serde_json::to_value(&write).unwrap();
        assert!(json["error"]
            .as_str()
            .unwrap()
            .ends_with("does not exist or is not a directory"));
        assert!(json.get("fileName").is_none());
    }

    #[tokio::test]
    async fn test_existing_read_only_target_is_classified() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("probe-1.txt");
        std::fs::write(&path, "x").unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_readonly(true);
        std::fs::set_permissions(&path, perms).unwrap();

        let denied = io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied");
        let err = classify_write_error(&path, denied).await;

        assert_eq!(err.classification(), "File exists but is read-only");
        assert_eq!(err.details(), "Permission denied");
    }

    #[tokio::test]
    async fn test_other_failures_are_generic_io() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("never-created.txt");

        let err = classify_write_error(&path, io::Error::other("disk full")).await;

        assert_eq!(err.classification(), "I/O error occurred");
    }
}
