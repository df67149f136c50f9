//! Shared dataset snapshot with atomic reload

use super::types::Dataset;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info};

/// When the dataset file is read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReloadPolicy {
    /// Read once at startup and serve that snapshot for the process lifetime
    #[default]
    Once,
    /// Re-read the file on every request
    PerRequest,
}

/// Holds the current dataset snapshot
#[derive(Debug)]
pub struct DatasetStore {
    path: Option<PathBuf>,
    policy: ReloadPolicy,
    current: RwLock<Arc<Dataset>>,
}

impl DatasetStore {
    /// Create a store backed by `path` without reading it yet
    pub fn new(path: impl Into<PathBuf>, policy: ReloadPolicy) -> Self {
        Self {
            path: Some(path.into()),
            policy,
            current: RwLock::new(Arc::new(Dataset::default())),
        }
    }

    /// Create a store and perform the initial load
    pub async fn open(path: impl Into<PathBuf>, policy: ReloadPolicy) -> Result<Self> {
        let store = Self::new(path, policy);
        store.reload().await?;
        Ok(store)
    }

    /// Create a store serving a fixed in-memory dataset
    pub fn from_dataset(dataset: Dataset) -> Self {
        Self {
            path: None,
            policy: ReloadPolicy::Once,
            current: RwLock::new(Arc::new(dataset)),
        }
    }

    /// Backing file, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Configured reload policy
    pub fn policy(&self) -> ReloadPolicy {
        self.policy
    }

    /// The snapshot currently being served
    pub fn snapshot(&self) -> Arc<Dataset> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Re-read the backing file and swap in the new snapshot
    ///
    /// On failure the previous snapshot stays in place.
    pub async fn reload(&self) -> Result<Arc<Dataset>> {
        let path = self
            .path
            .as_deref()
            .ok_or_else(|| Error::config("Dataset store has no backing file"))?;

        let dataset = Arc::new(Dataset::load(path).await?);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&dataset);

        match self.policy {
            ReloadPolicy::Once => info!(
                path = %path.display(),
                records = dataset.len(),
                "Loaded dataset"
            ),
            ReloadPolicy::PerRequest => debug!(
                path = %path.display(),
                records = dataset.len(),
                "Reloaded dataset"
            ),
        }

        Ok(dataset)
    }

    /// Snapshot to serve the current request from, honouring the reload policy
    pub async fn current(&self) -> Result<Arc<Dataset>> {
        match (self.policy, self.path.is_some()) {
            (ReloadPolicy::PerRequest, true) => self.reload().await,
            _ => Ok(self.snapshot()),
        }
    }
}
