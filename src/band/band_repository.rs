use super::model::{Band, BandSchedule, StoredUser};
use crate::{event, warn};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use strum_macros::Display;
use tokio::sync::RwLock;

/// Everything the band features persist, stored as one document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BandStore {
    #[serde(default)]
    pub users: Vec<StoredUser>,
    #[serde(default)]
    pub bands: Vec<Band>,
    #[serde(default)]
    pub schedules: Vec<BandSchedule>,
}

/// Storage backend for accounts, bands and band schedules.
///
/// Callers perform read-modify-write cycles and are responsible for
/// serializing them.
#[async_trait]
pub trait BandRepository: Send + Sync {
    async fn load(&self) -> Result<BandStore, RepositoryError>;
    async fn store(&self, store: &BandStore) -> Result<(), RepositoryError>;
}

/// Volatile repository, used for tests and when no data file is configured.
#[derive(Default)]
pub struct InMemoryBandRepository {
    store: RwLock<BandStore>,
}

impl InMemoryBandRepository {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl BandRepository for InMemoryBandRepository {
    async fn load(&self) -> Result<BandStore, RepositoryError> { Ok(self.store.read().await.clone()) }

    async fn store(&self, store: &BandStore) -> Result<(), RepositoryError> {
        *self.store.write().await = store.clone();
        Ok(())
    }
}

/// Repository persisting the whole [`BandStore`] as one JSON document.
///
/// A missing file is an empty store. An unreadable document is reported and
/// treated as empty; it is overwritten by the next successful store.
pub struct JsonFileBandRepository {
    path: PathBuf,
}

impl JsonFileBandRepository {
    pub fn new(path: PathBuf) -> Self { Self { path } }
}

#[async_trait]
impl BandRepository for JsonFileBandRepository {
    async fn load(&self) -> Result<BandStore, RepositoryError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BandStore::default()),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_slice(&raw) {
            Ok(store) => Ok(store),
            Err(e) => {
                warn!("Discarding corrupt band data in {}: {e}", self.path.display());
                Ok(BandStore::default())
            }
        }
    }

    async fn store(&self, store: &BandStore) -> Result<(), RepositoryError> {
        let raw = serde_json::to_vec_pretty(store)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, raw).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        event!("Stored band data to {}", self.path.display());
        Ok(())
    }
}

#[derive(Debug, Display)]
pub enum RepositoryError {
    Io(std::io::Error),
    Serialization(serde_json::Error),
}

impl std::error::Error for RepositoryError {}

impl From<std::io::Error> for RepositoryError {
    fn from(value: std::io::Error) -> Self { RepositoryError::Io(value) }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(value: serde_json::Error) -> Self { RepositoryError::Serialization(value) }
}
