//! Persistent snapshot store adapter.
//!
//! A single fixed slot holding the serialized cart. The adapter is pure
//! load/save with no business logic; deciding whether stored bytes are a
//! valid cart is the caller's job, so a corrupt slot can fail soft to an
//! empty cart.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use thiserror::Error;

/// File name of the cart snapshot slot.
///
/// Matches the original storage key of the web storefront
/// (`shopsphere-cart`).
pub const SNAPSHOT_SLOT: &str = "shopsphere-cart.json";

/// Errors from the snapshot store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the slot failed.
    #[error("snapshot I/O error: {0}")]
    Io(#[from] io::Error),
}

/// A single-slot byte store for the cart snapshot.
///
/// Methods take `&self` so implementations may use interior mutability and
/// sit behind shared state.
pub trait SnapshotStore: Send {
    /// Read the stored snapshot.
    ///
    /// Returns `Ok(None)` when no snapshot has ever been written.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the slot exists but cannot be read.
    fn load(&self) -> Result<Option<Vec<u8>>, StoreError>;

    /// Overwrite the slot with a new snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the slot cannot be written.
    fn save(&self, snapshot: &[u8]) -> Result<(), StoreError>;
}

// =============================================================================
// File-backed store
// =============================================================================

/// Snapshot store backed by a JSON file under a data directory.
#[derive(Debug)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    /// Create a store writing to `<data_dir>/shopsphere-cart.json`.
    ///
    /// The directory is created lazily on the first save.
    #[must_use]
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(SNAPSHOT_SLOT),
        }
    }

    /// The path of the snapshot slot.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self) -> Result<Option<Vec<u8>>, StoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, snapshot: &[u8]) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }

        // Write-then-rename so a crash mid-write never leaves a torn slot
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, snapshot)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

// =============================================================================
// In-memory store
// =============================================================================

/// Snapshot store holding the slot in memory.
///
/// For tests and embedders that do not want disk persistence.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    slot: Mutex<Option<Vec<u8>>>,
}

impl MemorySnapshotStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> Result<Option<Vec<u8>>, StoreError> {
        let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(slot.clone())
    }

    fn save(&self, snapshot: &[u8]) -> Result<(), StoreError> {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(snapshot.to_vec());
        Ok(())
    }
}
