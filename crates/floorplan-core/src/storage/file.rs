//! JSON files on disk, one per plan.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use crate::scene::SceneFile;
use std::fs;
use std::path::{Path, PathBuf};

/// File-based storage for native platforms.
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    /// Store plans under `base_path`, creating it if needed.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {e}"))
            })?;
        }
        Ok(Self { base_path })
    }

    /// File storage in the platform data directory.
    ///
    /// On Linux: `~/.local/share/floorplan/plans/`
    /// On Windows: `%LOCALAPPDATA%\floorplan\plans\`
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;
        Self::new(base.join("floorplan").join("plans"))
    }

    /// Path for a plan id. Characters unsafe in file names become `_`.
    fn plan_path(&self, id: &str) -> PathBuf {
        let safe_id: String = id
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.base_path.join(format!("{safe_id}.json"))
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl Storage for FileStorage {
    fn save(&self, id: &str, plan: &SceneFile) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.plan_path(id);
        let json = plan.to_json();
        Box::pin(async move {
            let json = json.map_err(|e| StorageError::Serialization(e.to_string()))?;
            fs::write(&path, json).map_err(|e| {
                log::warn!("saving {} failed: {e}", path.display());
                StorageError::Io(format!("Failed to write {}: {e}", path.display()))
            })?;
            log::info!("saved plan to {}", path.display());
            Ok(())
        })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<SceneFile>> {
        let path = self.plan_path(id);
        let id = id.to_string();
        Box::pin(async move {
            if !path.exists() {
                return Err(StorageError::NotFound(id));
            }
            let json = fs::read_to_string(&path).map_err(|e| {
                StorageError::Io(format!("Failed to read {}: {e}", path.display()))
            })?;
            let plan = SceneFile::from_json(&json).map_err(|e| {
                log::warn!("rejected {}: {e}", path.display());
                StorageError::Serialization(format!("Failed to parse {}: {e}", path.display()))
            })?;
            log::info!("loaded plan from {}", path.display());
            Ok(plan)
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.plan_path(id);
        Box::pin(async move {
            if path.exists() {
                fs::remove_file(&path).map_err(|e| {
                    StorageError::Io(format!("Failed to delete {}: {e}", path.display()))
                })?;
            }
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        let base = self.base_path.clone();
        Box::pin(async move {
            if !base.exists() {
                return Ok(Vec::new());
            }
            let entries = fs::read_dir(&base)
                .map_err(|e| StorageError::Io(format!("Failed to read directory: {e}")))?;
            let ids = entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
                .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(String::from))
                .collect();
            Ok(ids)
        })
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let path = self.plan_path(id);
        Box::pin(async move { Ok(path.exists()) })
    }
}
