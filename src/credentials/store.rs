//! Credential slot persistence
//!
//! A single get/set pair. The file store keeps the slot as one JSON object;
//! the memory store backs tests and embedded use.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::CredentialSet;
use crate::error::{RelayError, RelayResult};

/// One slot holding the current Credential Set
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Replace whatever is stored
    async fn set(&self, credentials: &CredentialSet) -> RelayResult<()>;

    /// `CredentialsMissing` when nothing was ever stored
    async fn get(&self) -> RelayResult<CredentialSet>;
}

/// JSON file slot
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn set(&self, credentials: &CredentialSet) -> RelayResult<()> {
        let json = serde_json::to_string(credentials)
            .map_err(|e| RelayError::Storage(format!("serialize credentials: {}", e)))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                RelayError::Storage(format!("create {}: {}", parent.display(), e))
            })?;
        }

        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| RelayError::Storage(format!("write {}: {}", self.path.display(), e)))?;

        info!(
            "💾 Saved {} headers to {}",
            credentials.len(),
            self.path.display()
        );
        Ok(())
    }

    async fn get(&self) -> RelayResult<CredentialSet> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(RelayError::CredentialsMissing)
            }
            Err(e) => {
                return Err(RelayError::Storage(format!(
                    "read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        let credentials: CredentialSet = serde_json::from_str(&raw)
            .map_err(|e| RelayError::Parse(format!("{}: {}", self.path.display(), e)))?;
        debug!(
            "📂 Loaded {} headers from {}",
            credentials.len(),
            self.path.display()
        );
        Ok(credentials)
    }
}

/// In-process slot
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    slot: RwLock<Option<CredentialSet>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(credentials: CredentialSet) -> Self {
        Self {
            slot: RwLock::new(Some(credentials)),
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn set(&self, credentials: &CredentialSet) -> RelayResult<()> {
        *self.slot.write().await = Some(credentials.clone());
        Ok(())
    }

    async fn get(&self) -> RelayResult<CredentialSet> {
        self.slot
            .read()
            .await
            .clone()
            .ok_or(RelayError::CredentialsMissing)
    }
}
