use crate::core::seo::{self, SeoPackage};
use crate::core::transcript;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs as std_fs;
use std::path::{Path, PathBuf};

use tokio::fs;

const TRANSCRIPTS_DIR: &str = "transcripts";
const PACKAGES_DIR: &str = "packages";
const TRANSCRIPT_PREFIX: &str = "transcript_";
const TRANSCRIPT_SUFFIX: &str = ".txt";
const SUMMARY_FILE: &str = "summary.md";
const PACKAGE_FILE: &str = "package.json";

/// YouTube rejects tag fields longer than this, commas included.
const MAX_TAGS_FIELD_CHARS: usize = 500;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    pub path: PathBuf,
    pub name: String,
    pub file_type: FileType,
    pub size: u64,
    pub modified: std::time::SystemTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FileType {
    Transcript,
    Package,
}

pub struct StorageService;

impl StorageService {
    fn ensure_directories() -> Result<()> {
        ensure_directory(Path::new(TRANSCRIPTS_DIR))?;
        ensure_directory(Path::new(PACKAGES_DIR))?;
        Ok(())
    }

    fn transcript_path(video_id: &str) -> Result<PathBuf> {
        let sanitized = transcript::sanitize_video_id(video_id)?;
        Ok(Path::new(TRANSCRIPTS_DIR)
            .join(format!("{TRANSCRIPT_PREFIX}{sanitized}{TRANSCRIPT_SUFFIX}")))
    }

    fn package_dir(video_id: &str) -> Result<PathBuf> {
        let sanitized = transcript::sanitize_video_id(video_id)?;
        Ok(Path::new(PACKAGES_DIR).join(sanitized))
    }

    pub fn transcript_exists(video_id: &str) -> bool {
        if Self::ensure_directories().is_err() {
            return false;
        }
        Self::transcript_path(video_id)
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    pub fn package_exists(video_id: &str) -> bool {
        if Self::ensure_directories().is_err() {
            return false;
        }
        Self::package_dir(video_id)
            .map(|dir| dir.join(PACKAGE_FILE).exists())
            .unwrap_or(false)
    }

    pub async fn save_transcript(video_id: &str, content: &str) -> Result<PathBuf> {
        Self::ensure_directories()?;
        let path = Self::transcript_path(video_id)?;
        fs::write(&path, content).await?;
        log::info!("transcript saved to {}", path.display());
        Ok(path)
    }

    pub async fn load_transcript(video_id: &str) -> Result<String> {
        let path = Self::transcript_path(video_id)?;
        let content = fs::read_to_string(path).await?;
        Ok(content)
    }

    /// Writes the upload package as the separate files the YouTube form
    /// expects, plus the full record and a readable summary:
    /// `title.txt`, `description.txt`, `tags.txt`, `metadata.txt`,
    /// `package.json`, `summary.md`.
    pub async fn save_package(package: &SeoPackage) -> Result<PathBuf> {
        Self::ensure_directories()?;
        let dir = Self::package_dir(&package.video_id)?;
        ensure_directory(&dir)?;

        fs::write(dir.join("title.txt"), &package.title.primary).await?;
        fs::write(dir.join("description.txt"), &package.description).await?;
        fs::write(dir.join("tags.txt"), tags_field(&package.tags)).await?;
        fs::write(dir.join("metadata.txt"), &package.metadata.keywords).await?;

        let json = serde_json::to_string_pretty(package)?;
        fs::write(dir.join(PACKAGE_FILE), json).await?;
        fs::write(dir.join(SUMMARY_FILE), seo::render_summary(package)).await?;

        log::info!("upload package saved to {}", dir.display());
        Ok(dir)
    }

    pub async fn load_package(video_id: &str) -> Result<SeoPackage> {
        let path = Self::package_dir(video_id)?.join(PACKAGE_FILE);
        let json = fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn list_files() -> Result<Vec<FileEntry>> {
        Self::ensure_directories()?;
        let mut files = Vec::new();

        if let Ok(entries) = std_fs::read_dir(TRANSCRIPTS_DIR) {
            for entry in entries {
                let entry = entry?;
                let path = entry.path();

                if let Some(name) = path.file_name().and_then(|n| n.to_str())
                    && name.starts_with(TRANSCRIPT_PREFIX)
                    && name.ends_with(TRANSCRIPT_SUFFIX)
                {
                    let metadata = entry.metadata()?;
                    files.push(FileEntry {
                        path: path.clone(),
                        name: name.to_string(),
                        file_type: FileType::Transcript,
                        size: metadata.len(),
                        modified: metadata.modified()?,
                    });
                }
            }
        }

        // Each package is a directory; the entry points at its summary so
        // the viewer can open it directly.
        if let Ok(entries) = std_fs::read_dir(PACKAGES_DIR) {
            for entry in entries {
                let entry = entry?;
                let dir = entry.path();
                let summary = dir.join(SUMMARY_FILE);

                if dir.is_dir()
                    && summary.exists()
                    && let Some(name) = dir.file_name().and_then(|n| n.to_str())
                {
                    let metadata = std_fs::metadata(&summary)?;
                    files.push(FileEntry {
                        path: summary.clone(),
                        name: name.to_string(),
                        file_type: FileType::Package,
                        size: metadata.len(),
                        modified: metadata.modified()?,
                    });
                }
            }
        }

        // Newest first.
        files.sort_by(|a, b| b.modified.cmp(&a.modified));

        Ok(files)
    }

    /// Deletes a managed entry: the transcript file itself, or the whole
    /// package directory when the entry is a package summary.
    pub fn delete_entry(entry: &FileEntry) -> Result<()> {
        Self::ensure_directories()?;
        match entry.file_type {
            FileType::Transcript => {
                ensure_managed_path(&entry.path, Path::new(TRANSCRIPTS_DIR))?;
                std_fs::remove_file(&entry.path)?;
            }
            FileType::Package => {
                let dir = entry
                    .path
                    .parent()
                    .ok_or_else(|| Error::custom("Package summary has no parent directory"))?;
                ensure_managed_path(dir, Path::new(PACKAGES_DIR))?;
                std_fs::remove_dir_all(dir)?;
            }
        }
        Ok(())
    }
}

impl FileEntry {
    pub fn video_id(&self) -> Option<String> {
        match self.file_type {
            FileType::Transcript => Some(
                self.name
                    .trim_start_matches(TRANSCRIPT_PREFIX)
                    .trim_end_matches(TRANSCRIPT_SUFFIX)
                    .to_string(),
            ),
            FileType::Package => Some(self.name.clone()),
        }
    }
}

/// Joins tags with commas and trims the list to YouTube's field budget
/// without ever splitting a tag.
pub fn tags_field(tags: &[String]) -> String {
    let joined = tags.join(", ");
    if joined.chars().count() <= MAX_TAGS_FIELD_CHARS {
        return joined;
    }

    let mut kept: Vec<&str> = Vec::new();
    let mut length = 0usize;
    for tag in tags {
        let tag_len = tag.chars().count() + if kept.is_empty() { 0 } else { 2 };
        if length + tag_len > MAX_TAGS_FIELD_CHARS {
            break;
        }
        kept.push(tag);
        length += tag_len;
    }
    kept.join(", ")
}

fn ensure_directory(path: &Path) -> Result<()> {
    std_fs::create_dir_all(path)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let metadata = std_fs::metadata(path)?;
        let mut permissions = metadata.permissions();
        if permissions.mode() & 0o777 != 0o700 {
            permissions.set_mode(0o700);
            std_fs::set_permissions(path, permissions)?;
        }
    }

    Ok(())
}

fn ensure_managed_path(path: &Path, base: &Path) -> Result<()> {
    let canonical = path
        .canonicalize()
        .map_err(|_| Error::custom("Target does not exist or cannot be resolved"))?;

    let allowed = base
        .canonicalize()
        .map(|base| canonical.starts_with(base))
        .unwrap_or(false);

    if !allowed {
        return Err(Error::custom(
            "Refusing to operate on files outside managed transcript/package directories",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tags_field_joins_with_commas() {
        let tags = vec!["um".to_string(), "dois".to_string(), "três".to_string()];
        assert_eq!(tags_field(&tags), "um, dois, três");
    }

    #[test]
    fn tags_field_never_splits_a_tag_at_the_budget() {
        let tags: Vec<String> = (0..60).map(|i| format!("tag-numero-{i:02}")).collect();
        let field = tags_field(&tags);
        assert!(field.chars().count() <= 500);
        // Every piece must be a complete tag from the input.
        assert!(field.split(", ").all(|t| tags.contains(&t.to_string())));
    }

    #[test]
    fn transcript_entry_reports_its_video_id() {
        let entry = FileEntry {
            path: PathBuf::from("transcripts/transcript_abc123.txt"),
            name: "transcript_abc123.txt".to_string(),
            file_type: FileType::Transcript,
            size: 0,
            modified: std::time::SystemTime::UNIX_EPOCH,
        };
        assert_eq!(entry.video_id(), Some("abc123".to_string()));
    }

    #[test]
    fn package_entry_reports_its_directory_name() {
        let entry = FileEntry {
            path: PathBuf::from("packages/abc123/summary.md"),
            name: "abc123".to_string(),
            file_type: FileType::Package,
            size: 0,
            modified: std::time::SystemTime::UNIX_EPOCH,
        };
        assert_eq!(entry.video_id(), Some("abc123".to_string()));
    }
}
