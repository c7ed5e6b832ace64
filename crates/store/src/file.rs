//! JSON-file token cache.
//!
//! The token is read once on open and kept in a [`MemoryTokenStore`]; every
//! save writes a sibling temp file and renames it over the cache so the file
//! on disk is never half-written either.

use async_trait::async_trait;
use meowseek_types::{MeowError, OAuthToken, TokenStore, traits::Result};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::MemoryTokenStore;

/// A [`TokenStore`] that persists the token to a JSON file.
pub struct FileTokenStore {
    path: PathBuf,
    memory: MemoryTokenStore,
    /// Held across write + rename; concurrent saves share one temp path.
    write_lock: Mutex<()>,
}

impl FileTokenStore {
    /// Opens the cache at `path`.
    ///
    /// A missing file yields an empty store. An unreadable or malformed file
    /// is logged and also treated as empty; the next save overwrites it.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let memory = match read_token(&path).await {
            Ok(Some(token)) => {
                tracing::debug!(path = %path.display(), "loaded cached token");
                MemoryTokenStore::with_token(token)
            }
            Ok(None) => MemoryTokenStore::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable token cache");
                MemoryTokenStore::new()
            }
        };
        Self {
            path,
            memory,
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

async fn read_token(path: &Path) -> Result<Option<OAuthToken>> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(MeowError::Storage(e.to_string())),
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<Option<OAuthToken>> {
        self.memory.load().await
    }

    async fn save(&self, token: &OAuthToken) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(token)?;
        let _guard = self.write_lock.lock().await;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| MeowError::Storage(e.to_string()))?;
        }
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, bytes)
            .await
            .map_err(|e| MeowError::Storage(e.to_string()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| MeowError::Storage(e.to_string()))?;
        self.memory.replace(token.clone());
        Ok(())
    }
}
