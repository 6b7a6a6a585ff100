use thiserror::Error;

/// Unified error type for the entire trading-journal-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
///
/// The P&L builder and the statistics functions are total and never
/// produce one of these; only storage and journal mutations do.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Storage / File ──────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("File I/O error: {0}")]
    FileIO(String),

    // ── Business Logic ──────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Trade not found: {0}")]
    TradeNotFound(String),

    #[error("Trade already exists: {0}")]
    DuplicateTrade(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
