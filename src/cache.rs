// src/cache.rs

use once_cell::sync::OnceCell;
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::info;

use crate::config::Policy;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::process;

/// Lazily loads and normalizes one source file, once per process.
///
/// The file is assumed static for the life of the process, so there is no
/// invalidation. A failed load is not cached; the next `get` retries.
pub struct DatasetCache {
    path: PathBuf,
    policy: Policy,
    cell: OnceCell<Arc<Dataset>>,
}

impl DatasetCache {
    pub fn new(path: impl Into<PathBuf>, policy: Policy) -> Self {
        Self {
            path: path.into(),
            policy,
            cell: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    pub fn get(&self) -> Result<Arc<Dataset>> {
        let ds = self.cell.get_or_try_init(|| {
            let raw = process::load(&self.path)?;
            let ds = process::normalize(&raw, &self.policy);
            info!(path = %self.path.display(), observations = ds.len(), "dataset cached");
            Ok::<_, crate::error::PriceError>(Arc::new(ds))
        })?;
        Ok(Arc::clone(ds))
    }
}
