//! Append-only snapshot store with pluggable persistence backends

use crate::data::{ChannelMetrics, Snapshot, VideoStats};
use crate::error::{GrowthError, Result};
use chrono::{DateTime, Utc};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Maximum number of snapshots retained across all channels (FIFO)
pub const MAX_SNAPSHOTS: usize = 100;

/// Persistence seam for the snapshot store
///
/// The contract is whole-history read/write: `save_all` replaces the stored
/// sequence wholesale. Backends do not get incremental appends.
pub trait SnapshotBackend {
    /// Load the full stored snapshot sequence
    fn load_all(&self) -> Result<Vec<Snapshot>>;

    /// Replace the full stored snapshot sequence
    fn save_all(&self, snapshots: &[Snapshot]) -> Result<()>;
}

/// Backend persisting the history as a single JSON file
#[derive(Debug)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    /// Create a backend for the given file path
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The file path this backend reads and writes
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotBackend for JsonFileBackend {
    fn load_all(&self) -> Result<Vec<Snapshot>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path)?;
        let snapshots = serde_json::from_str(&contents)?;
        Ok(snapshots)
    }

    fn save_all(&self, snapshots: &[Snapshot]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Write a sibling file first and rename it over the target, so a
        // failed write never truncates the previously persisted history.
        let contents = serde_json::to_string_pretty(snapshots)?;
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(&tmp_path, &self.path)?;
        debug!(
            "persisted {} snapshots to {}",
            snapshots.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// In-memory backend for tests and embedded use
#[derive(Debug, Default)]
pub struct MemoryBackend {
    snapshots: Mutex<Vec<Snapshot>>,
}

impl MemoryBackend {
    /// Create an empty in-memory backend
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotBackend for MemoryBackend {
    fn load_all(&self) -> Result<Vec<Snapshot>> {
        let snapshots = self
            .snapshots
            .lock()
            .map_err(|e| GrowthError::PersistenceError(e.to_string()))?;
        Ok(snapshots.clone())
    }

    fn save_all(&self, snapshots: &[Snapshot]) -> Result<()> {
        let mut stored = self
            .snapshots
            .lock()
            .map_err(|e| GrowthError::PersistenceError(e.to_string()))?;
        *stored = snapshots.to_vec();
        Ok(())
    }
}

/// Append-only record of metric observations per channel
///
/// Retention is a global FIFO cap of [`MAX_SNAPSHOTS`]: once the stored count
/// exceeds the cap, the oldest snapshots are silently discarded. Callers must
/// not assume unbounded history.
pub struct SnapshotStore {
    backend: Box<dyn SnapshotBackend + Send + Sync>,
    // Serializes the read-modify-write append path; queries stay lock-free.
    append_lock: Mutex<()>,
}

impl SnapshotStore {
    /// Create a store over the given backend
    pub fn new(backend: Box<dyn SnapshotBackend + Send + Sync>) -> Self {
        Self {
            backend,
            append_lock: Mutex::new(()),
        }
    }

    /// Create a store backed by a JSON file
    pub fn with_json_file<P: AsRef<Path>>(path: P) -> Self {
        Self::new(Box::new(JsonFileBackend::new(path)))
    }

    /// Create a store backed by process memory
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryBackend::new()))
    }

    /// Append a new observation, timestamped at call time
    ///
    /// Persists the full updated history before returning. On persistence
    /// failure nothing is appended and the prior stored state remains
    /// visible to later queries.
    pub fn append(
        &self,
        channel_handle: &str,
        metrics: ChannelMetrics,
        recent_videos: Vec<VideoStats>,
    ) -> Result<Snapshot> {
        let _guard = self
            .append_lock
            .lock()
            .map_err(|e| GrowthError::PersistenceError(e.to_string()))?;

        let snapshot = Snapshot::new(channel_handle, Utc::now(), metrics, recent_videos);

        let mut history = self.backend.load_all()?;
        history.push(snapshot.clone());

        if history.len() > MAX_SNAPSHOTS {
            // FIFO retention: oldest observations across all channels go first.
            history.sort_by_key(|s| s.timestamp);
            let evicted = history.len() - MAX_SNAPSHOTS;
            history.drain(..evicted);
            warn!("snapshot cap reached, evicted {} oldest snapshots", evicted);
        }

        self.backend.save_all(&history)?;
        Ok(snapshot)
    }

    /// All snapshots for a channel, ascending by timestamp
    ///
    /// With `since` set, only snapshots at or after that instant are
    /// returned. Insertion order is not trusted; results are re-sorted.
    pub fn query(
        &self,
        channel_handle: &str,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<Snapshot>> {
        let mut snapshots: Vec<Snapshot> = self
            .backend
            .load_all()?
            .into_iter()
            .filter(|s| s.channel_handle == channel_handle)
            .filter(|s| since.map_or(true, |cutoff| s.timestamp >= cutoff))
            .collect();

        snapshots.sort_by_key(|s| s.timestamp);
        Ok(snapshots)
    }

    /// Total number of stored snapshots across all channels
    pub fn len(&self) -> Result<usize> {
        Ok(self.backend.load_all()?.len())
    }

    /// Check whether the store holds no snapshots
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}
