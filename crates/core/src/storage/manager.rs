use tracing::debug;

use crate::errors::CoreError;
use crate::models::trade::Trade;

use super::format;

/// High-level storage operations: save/load the trade collection to/from
/// bytes or files. Always the whole collection, overwritten in place.
pub struct StorageManager;

impl StorageManager {
    /// Serialize trades to raw bytes (UTF-8 JSON).
    pub fn save_to_bytes(trades: &[Trade]) -> Result<Vec<u8>, CoreError> {
        let blob = format::encode_trades(trades)?;
        Ok(blob.into_bytes())
    }

    /// Deserialize trades from raw bytes.
    pub fn load_from_bytes(data: &[u8]) -> Result<Vec<Trade>, CoreError> {
        let blob = std::str::from_utf8(data)
            .map_err(|e| CoreError::Deserialization(format!("Journal is not valid UTF-8: {e}")))?;
        format::decode_trades(blob)
    }

    /// Save trades to a file on disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_file(trades: &[Trade], path: &std::path::Path) -> Result<(), CoreError> {
        let bytes = Self::save_to_bytes(trades)?;
        std::fs::write(path, &bytes)?;
        debug!(path = %path.display(), trades = trades.len(), bytes = bytes.len(), "journal written");
        Ok(())
    }

    /// Load trades from a file on disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: &std::path::Path) -> Result<Vec<Trade>, CoreError> {
        let bytes = std::fs::read(path)?;
        let trades = Self::load_from_bytes(&bytes)?;
        debug!(path = %path.display(), trades = trades.len(), "journal read");
        Ok(trades)
    }
}
