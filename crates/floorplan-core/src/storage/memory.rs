//! In-memory plan storage.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use crate::scene::SceneFile;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Plans kept in a map, for tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryStorage {
    plans: RwLock<HashMap<String, SceneFile>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StorageResult<RwLockReadGuard<'_, HashMap<String, SceneFile>>> {
        self.plans
            .read()
            .map_err(|e| StorageError::Other(format!("Lock error: {e}")))
    }

    fn write(&self) -> StorageResult<RwLockWriteGuard<'_, HashMap<String, SceneFile>>> {
        self.plans
            .write()
            .map_err(|e| StorageError::Other(format!("Lock error: {e}")))
    }
}

impl Storage for MemoryStorage {
    fn save(&self, id: &str, plan: &SceneFile) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        let plan = plan.clone();
        Box::pin(async move {
            self.write()?.insert(id, plan);
            Ok(())
        })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<SceneFile>> {
        let id = id.to_string();
        Box::pin(async move {
            self.read()?
                .get(&id)
                .cloned()
                .ok_or(StorageError::NotFound(id))
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        Box::pin(async move {
            self.write()?.remove(&id);
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move { Ok(self.read()?.keys().cloned().collect()) })
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let id = id.to_string();
        Box::pin(async move { Ok(self.read()?.contains_key(&id)) })
    }
}
