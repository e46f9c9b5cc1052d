// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};
use crate::report::ExtractionResult;
use crate::utils::error::StorageError;

pub struct StorageManager {
    base_dir: PathBuf,
    overwrite: bool,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P, overwrite: bool) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path, overwrite })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn target(&self, filename: String) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(filename);
        if !self.overwrite && file_path.exists() {
            return Err(StorageError::FileExists(file_path.display().to_string()));
        }
        Ok(file_path)
    }

    /// Saves the full snapshot as `<name>.json`
    pub fn save_snapshot(&self, result: &ExtractionResult, name: &str) -> Result<PathBuf, StorageError> {
        let file_path = self.target(snapshot_file(name))?;

        let json = serde_json::to_string_pretty(result)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, json)
            .map_err(StorageError::IoError)?;

        tracing::info!("Saved snapshot to {}", file_path.display());

        Ok(file_path)
    }

    /// Saves the unmodified program output as `<name>_output.txt`
    pub fn save_raw_output(&self, result: &ExtractionResult, name: &str) -> Result<PathBuf, StorageError> {
        let file_path = self.target(raw_output_file(name))?;

        fs::write(&file_path, result.raw_text.as_bytes())
            .map_err(StorageError::IoError)?;

        tracing::info!("Saved raw output to {}", file_path.display());

        Ok(file_path)
    }

    /// Saves record counts and the extraction time as `<name>_meta.json`
    pub fn save_metadata(&self, result: &ExtractionResult, name: &str) -> Result<PathBuf, StorageError> {
        let file_path = self.target(metadata_file(name))?;

        let metadata = serde_json::json!({
            "snapshot": snapshot_file(name),
            "people": result.followers.people.len(),
            "organizations": result.followers.organizations.len(),
            "reactions": result.reactions.len(),
            "most_liked": result.top_posts.most_liked.len(),
            "least_liked": result.top_posts.least_liked.len(),
            "hashtags": result.hashtags.counts.len(),
            "has_most_used_hashtag": result.hashtags.most_used.is_some(),
            "blocked": result.blocked.len(),
            "recommendations": result.recommendations.len(),
            "raw_text_length": result.raw_text.len(),
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, metadata_str)
            .map_err(StorageError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());

        Ok(file_path)
    }

    /// Saves snapshot, raw output and metadata together.
    /// Nothing is written if any of the three files would be refused.
    pub fn save_all(&self, result: &ExtractionResult, name: &str) -> Result<Vec<PathBuf>, StorageError> {
        for filename in [snapshot_file(name), raw_output_file(name), metadata_file(name)] {
            self.target(filename)?;
        }

        Ok(vec![
            self.save_snapshot(result, name)?,
            self.save_raw_output(result, name)?,
            self.save_metadata(result, name)?,
        ])
    }
}

fn snapshot_file(name: &str) -> String {
    format!("{}.json", name)
}

fn raw_output_file(name: &str) -> String {
    format!("{}_output.txt", name)
}

fn metadata_file(name: &str) -> String {
    format!("{}_meta.json", name)
}

/// Reads a snapshot written by [`StorageManager::save_snapshot`] (or by the
/// older Spanish-keyed tooling).
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<ExtractionResult, StorageError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(StorageError::IoError)?;

    let result: ExtractionResult = serde_json::from_str(&content)
        .map_err(|e| StorageError::SerializationError(format!("{}: {}", path.display(), e)))?;

    tracing::info!("Loaded snapshot from {} ({} records)", path.display(), result.record_count());
    Ok(result)
}
