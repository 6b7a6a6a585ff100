#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

use tracing::debug;

use crate::errors::CoreError;
use crate::models::trade::Trade;

use super::format;
#[cfg(not(target_arch = "wasm32"))]
use super::manager::StorageManager;

/// Persistence boundary for the journal.
///
/// A store holds one blob: the whole trade collection. It is loaded once
/// when the journal opens and overwritten after every mutation. If the
/// storage backend changes, only the implementation is replaced.
pub trait TradeStore {
    /// Read the stored collection. `Ok(None)` means nothing has been
    /// saved yet.
    fn load(&self) -> Result<Option<Vec<Trade>>, CoreError>;

    /// Overwrite the stored collection.
    fn save(&mut self, trades: &[Trade]) -> Result<(), CoreError>;
}

/// JSON file on disk. A missing file reads as an empty journal.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl TradeStore for JsonFileStore {
    fn load(&self) -> Result<Option<Vec<Trade>>, CoreError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no journal file yet");
            return Ok(None);
        }
        StorageManager::load_from_file(&self.path).map(Some)
    }

    fn save(&mut self, trades: &[Trade]) -> Result<(), CoreError> {
        StorageManager::save_to_file(trades, &self.path)
    }
}

/// In-memory store keeping the serialized blob, like a single key in a
/// browser's local storage. Used by tests and by hosts that move the
/// blob themselves.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blob: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing blob.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Some(blob.into()),
        }
    }

    /// The last saved blob, if any.
    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }
}

impl TradeStore for MemoryStore {
    fn load(&self) -> Result<Option<Vec<Trade>>, CoreError> {
        self.blob.as_deref().map(format::decode_trades).transpose()
    }

    fn save(&mut self, trades: &[Trade]) -> Result<(), CoreError> {
        self.blob = Some(format::encode_trades(trades)?);
        Ok(())
    }
}
