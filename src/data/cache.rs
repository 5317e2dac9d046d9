use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::error::DataError;
use super::loader;
use super::model::OrderDataset;

/// Process-wide memoization of the dataset load.
///
/// The extract is read at most once per cache instance: the first
/// `get_or_load` hits the disk, every later call returns the shared dataset.
/// Failures are not memoized, so a fixed file can be retried without
/// restarting. `invalidate` forces the next call to re-read.
///
/// The app owns exactly one instance (load once, reuse until exit); tests
/// inject a fresh instance each.
#[derive(Debug)]
pub struct DatasetCache {
    path: PathBuf,
    slot: Option<Arc<OrderDataset>>,
}

impl DatasetCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DatasetCache {
            path: path.into(),
            slot: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The memoized dataset, if a load already succeeded.
    pub fn loaded(&self) -> Option<&Arc<OrderDataset>> {
        self.slot.as_ref()
    }

    /// Return the dataset, reading the file only on the first call.
    pub fn get_or_load(&mut self) -> Result<Arc<OrderDataset>, DataError> {
        if let Some(ds) = &self.slot {
            return Ok(Arc::clone(ds));
        }
        let dataset = Arc::new(loader::load_file(&self.path)?);
        log::info!(
            "Loaded {} orders from {}",
            dataset.len(),
            self.path.display()
        );
        self.slot = Some(Arc::clone(&dataset));
        Ok(dataset)
    }

    /// Drop the memoized dataset; the next `get_or_load` re-reads the file.
    pub fn invalidate(&mut self) {
        self.slot = None;
    }

    /// A cache whose slot is already filled, bypassing the filesystem.
    #[cfg(test)]
    pub(crate) fn preloaded(dataset: OrderDataset) -> Self {
        DatasetCache {
            path: PathBuf::new(),
            slot: Some(Arc::new(dataset)),
        }
    }
}
