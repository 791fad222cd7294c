//! Database struct and open/close logic
//!
//! A [`Database`] is the one shared handle to the document store. It is
//! constructed once at process start and passed by `Arc` to every component
//! that needs storage; nothing in the engine reaches for a global.
//!
//! ## Persistence
//!
//! | Constructor | Disk files | Snapshot |
//! |-------------|------------|----------|
//! | `ephemeral()` / `with_store()` | None | Never |
//! | `open(path)` | `qatrack.toml`, `<name>.json`, `.lock` | Loaded on open, written on flush/close (and per write under `always`) |

pub mod config;

pub use config::{DurabilityMode, TrackerConfig, CONFIG_FILE_NAME};

use parking_lot::{Mutex, RwLock};
use qatrack_core::{DocumentStore, Error, Result};
use qatrack_storage::{read_snapshot, write_snapshot, ShardedStore};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Controls where data is stored (orthogonal to durability)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PersistenceMode {
    /// No disk files at all; data is lost when the database is dropped
    Ephemeral,
    /// Snapshot file in the data directory
    Disk,
}

/// Shared handle to the document store
///
/// # Example
///
/// ```text
/// use qatrack_engine::Database;
///
/// let db = Database::open("/path/to/data")?;
/// let engine = CollectionEngine::<Project>::new(&db);
/// ```
pub struct Database {
    /// Data directory path (empty for ephemeral databases)
    data_dir: PathBuf,

    /// Backing store, shared by every adapter built on this database
    store: Arc<dyn DocumentStore>,

    /// Persistence mode (ephemeral vs disk-backed)
    persistence_mode: PersistenceMode,

    /// Current durability mode
    durability_mode: DurabilityMode,

    /// Configuration (mirrors qatrack.toml)
    config: RwLock<TrackerConfig>,

    /// Set by writes, cleared by a successful snapshot
    dirty: AtomicBool,

    /// Serializes snapshot writers: one export-and-write at a time, so a
    /// later export is never replaced on disk by an earlier one
    flush_lock: Mutex<()>,

    /// Set to false during shutdown to reject new writes
    accepting_writes: AtomicBool,

    /// Exclusive lock file preventing concurrent process access.
    /// None for ephemeral databases.
    _lock_file: Option<std::fs::File>,
}

impl Database {
    /// Open database at given path
    ///
    /// Reads `qatrack.toml` from the data directory, creating it with defaults
    /// if missing, then loads the snapshot if one exists.
    ///
    /// # Errors
    ///
    /// Fails if the config is invalid, the directory cannot be created, the
    /// database is locked by another process, or the snapshot is corrupt.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Arc<Self>> {
        let data_dir = path.as_ref().to_path_buf();
        std::fs::create_dir_all(&data_dir)?;

        let config_path = data_dir.join(CONFIG_FILE_NAME);
        TrackerConfig::write_default_if_missing(&config_path)?;
        let cfg = TrackerConfig::from_file(&config_path)?;

        Self::open_with_config(path, cfg)
    }

    /// Open database at the given path with an explicit configuration.
    ///
    /// The supplied config is written to `qatrack.toml` so that subsequent
    /// `Database::open()` calls pick up the same settings.
    pub fn open_with_config<P: AsRef<Path>>(path: P, cfg: TrackerConfig) -> Result<Arc<Self>> {
        cfg.validate()?;
        let durability_mode = cfg.durability_mode()?;

        let data_dir = path.as_ref().to_path_buf();
        std::fs::create_dir_all(&data_dir)?;
        let data_dir = data_dir.canonicalize()?;

        let lock_path = data_dir.join(".lock");
        let lock_file = std::fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(&lock_path)
            .map_err(|e| Error::storage(format!("failed to open lock file: {}", e)))?;
        fs2::FileExt::try_lock_exclusive(&lock_file).map_err(|_| {
            Error::storage(format!(
                "database at '{}' is already in use by another process",
                data_dir.display()
            ))
        })?;

        cfg.write_to_file(&data_dir.join(CONFIG_FILE_NAME))?;

        let snapshot_path = data_dir.join(format!("{}.json", cfg.database_name));
        let store = match read_snapshot(&snapshot_path)? {
            Some(snapshot) => {
                info!(
                    target: "qatrack::db",
                    path = ?snapshot_path,
                    collections = snapshot.collections.len(),
                    documents = snapshot.document_count(),
                    "Snapshot loaded"
                );
                ShardedStore::from_snapshot(snapshot)
            }
            None => {
                info!(target: "qatrack::db", path = ?snapshot_path, "No snapshot, starting empty");
                ShardedStore::new()
            }
        };

        info!(
            target: "qatrack::db",
            path = ?data_dir,
            database = %cfg.database_name,
            durability = %cfg.durability,
            "Database opened"
        );

        Ok(Arc::new(Self {
            data_dir,
            store: Arc::new(store),
            persistence_mode: PersistenceMode::Disk,
            durability_mode,
            config: RwLock::new(cfg),
            dirty: AtomicBool::new(false),
            flush_lock: Mutex::new(()),
            accepting_writes: AtomicBool::new(true),
            _lock_file: Some(lock_file),
        }))
    }

    /// Create an in-memory database with default configuration
    ///
    /// Nothing touches disk; data is lost when the last handle is dropped.
    pub fn ephemeral() -> Result<Arc<Self>> {
        Self::ephemeral_with_config(TrackerConfig::default())
    }

    /// Create an in-memory database with the given configuration
    pub fn ephemeral_with_config(cfg: TrackerConfig) -> Result<Arc<Self>> {
        Self::with_store(Arc::new(ShardedStore::new()), cfg)
    }

    /// Wrap an existing store
    ///
    /// The database never persists a store it was handed; the owner of the
    /// store is responsible for its durability.
    pub fn with_store(store: Arc<dyn DocumentStore>, cfg: TrackerConfig) -> Result<Arc<Self>> {
        cfg.validate()?;
        let durability_mode = cfg.durability_mode()?;
        Ok(Arc::new(Self {
            data_dir: PathBuf::new(),
            store,
            persistence_mode: PersistenceMode::Ephemeral,
            durability_mode,
            config: RwLock::new(cfg),
            dirty: AtomicBool::new(false),
            flush_lock: Mutex::new(()),
            accepting_writes: AtomicBool::new(true),
            _lock_file: None,
        }))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Backing store (internal use only)
    pub(crate) fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// Check if this is an ephemeral (no-disk) database
    pub fn is_ephemeral(&self) -> bool {
        self.persistence_mode == PersistenceMode::Ephemeral
    }

    /// Get the data directory path.
    ///
    /// Returns an empty path for ephemeral databases.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the snapshot file; `None` for ephemeral databases
    pub fn snapshot_path(&self) -> Option<PathBuf> {
        match self.persistence_mode {
            PersistenceMode::Ephemeral => None,
            PersistenceMode::Disk => Some(
                self.data_dir
                    .join(format!("{}.json", self.config.read().database_name)),
            ),
        }
    }

    /// Logical database name
    pub fn name(&self) -> String {
        self.config.read().database_name.clone()
    }

    /// Return a clone of the current configuration.
    pub fn config(&self) -> TrackerConfig {
        self.config.read().clone()
    }

    /// Current durability mode
    pub fn durability_mode(&self) -> DurabilityMode {
        self.durability_mode
    }

    /// Check if the database is open and accepting writes
    pub fn is_open(&self) -> bool {
        self.accepting_writes.load(Ordering::SeqCst)
    }

    /// Check if there are writes not yet in the snapshot
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    // ========================================================================
    // Write bookkeeping
    // ========================================================================

    /// Reject writes after shutdown
    pub(crate) fn check_accepting(&self) -> Result<()> {
        if self.is_open() {
            Ok(())
        } else {
            Err(Error::internal("database is shut down"))
        }
    }

    /// Record that a write happened
    ///
    /// Under `always` durability this persists the snapshot before returning.
    /// The write itself has already landed in the store, so a failed snapshot
    /// is logged and left dirty for the next flush rather than reported as a
    /// failed write.
    pub(crate) fn after_write(&self) {
        self.dirty.store(true, Ordering::SeqCst);
        if self.durability_mode == DurabilityMode::Always {
            if let Err(e) = self.flush() {
                warn!(target: "qatrack::db", error = %e, "Snapshot after write failed");
            }
        }
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Write the snapshot if anything changed since the last one.
    ///
    /// For ephemeral databases, this is a no-op.
    pub fn flush(&self) -> Result<()> {
        let Some(path) = self.snapshot_path() else {
            return Ok(());
        };
        let _guard = self.flush_lock.lock();
        if !self.dirty.swap(false, Ordering::SeqCst) {
            return Ok(());
        }
        let result = self
            .store
            .export()
            .and_then(|snapshot| write_snapshot(&path, &snapshot));
        if let Err(e) = result {
            self.dirty.store(true, Ordering::SeqCst);
            return Err(e);
        }
        debug!(target: "qatrack::db", path = ?path, "Flushed");
        Ok(())
    }

    /// Stop accepting writes and persist.
    ///
    /// Idempotent. Reads keep working after shutdown.
    pub fn shutdown(&self) -> Result<()> {
        self.accepting_writes.store(false, Ordering::SeqCst);
        self.flush()?;
        info!(target: "qatrack::db", path = ?self.data_dir, "Database shut down");
        Ok(())
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            warn!(target: "qatrack::db", error = %e, "Final flush failed, recent writes lost");
        }
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("data_dir", &self.data_dir)
            .field("persistence_mode", &self.persistence_mode)
            .field("durability_mode", &self.durability_mode)
            .field("open", &self.is_open())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
