use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use datadrift_protocol::metric::SnapshotSeries;

use crate::error::HistoryError;

/// Read-only accessor over the persisted keyed snapshot store.
///
/// The store is a JSON object mapping metric key → observation key →
/// snapshot, as written by the upstream history extraction step. Loading
/// never mutates the file.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
    metrics: BTreeMap<String, SnapshotSeries>,
}

impl SnapshotStore {
    /// Loads the store from disk, parsing the full keyed structure.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, HistoryError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|err| HistoryError::from_io(path, err))?;
        let metrics: BTreeMap<String, SnapshotSeries> =
            serde_json::from_str(&raw).map_err(|err| HistoryError::corrupt(path, err.to_string()))?;
        debug!(path = %path.display(), metrics = metrics.len(), "snapshot store loaded");

        Ok(Self {
            path: path.to_path_buf(),
            metrics,
        })
    }

    /// Path this store was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Metric keys present in the store, in key order.
    pub fn metric_keys(&self) -> impl Iterator<Item = &str> {
        self.metrics.keys().map(String::as_str)
    }

    /// Returns the snapshot series recorded for the given metric key.
    pub fn series(&self, metric_key: &str) -> Result<&SnapshotSeries, HistoryError> {
        self.metrics
            .get(metric_key)
            .ok_or_else(|| HistoryError::NotFound(metric_key.to_string()))
    }
}
