use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use pizza_types::Pizza;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::PizzaStore;

/// A collection persisted as one pretty-printed JSON array.
///
/// Saves go to a temporary file in the target's directory, which is synced
/// and then renamed over the target, so a crash mid-write leaves the
/// previous collection intact.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Point at `path` without touching the filesystem.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Point at `path`, creating an empty collection there if no file exists.
    pub async fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let store = Self::new(path);
        let exists = tokio::fs::try_exists(&store.path)
            .await
            .map_err(|e| StoreError::io(&store.path, e))?;
        if !exists {
            debug!(path = %store.path.display(), "creating empty pizza collection");
            store.save(&[]).await?;
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PizzaStore for JsonFileStore {
    async fn load(&self) -> StoreResult<Vec<Pizza>> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| StoreError::io(&self.path, e))?;
        let pizzas: Vec<Pizza> =
            serde_json::from_slice(&bytes).map_err(|e| StoreError::Corrupt {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;
        debug!(path = %self.path.display(), count = pizzas.len(), "loaded pizza collection");
        Ok(pizzas)
    }

    async fn save(&self, pizzas: &[Pizza]) -> StoreResult<()> {
        // serde_json's pretty printer indents with two spaces.
        let text = serde_json::to_string_pretty(pizzas)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_atomically(&path, text.as_bytes()))
            .await
            .map_err(|e| StoreError::Task(e.to_string()))??;
        debug!(path = %self.path.display(), count = pizzas.len(), "saved pizza collection");
        Ok(())
    }
}

fn write_atomically(path: &Path, data: &[u8]) -> StoreResult<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&parent).map_err(|e| StoreError::io(&parent, e))?;

    let mut tmp = NamedTempFile::new_in(&parent).map_err(|e| StoreError::io(&parent, e))?;
    tmp.write_all(data).map_err(|e| StoreError::io(path, e))?;
    tmp.flush().map_err(|e| StoreError::io(path, e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| StoreError::io(path, e))?;
    tmp.persist(path).map_err(|e| StoreError::io(path, e.error))?;
    Ok(())
}
