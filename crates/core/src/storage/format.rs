use crate::errors::CoreError;
use crate::models::trade::Trade;

/// Serialize the whole trade collection to the journal blob: a pretty
/// JSON array of trade records with camelCase field names.
///
/// Non-finite numbers (a NaN pnl from non-numeric input) are written as
/// `null` and read back as NaN.
pub fn encode_trades(trades: &[Trade]) -> Result<String, CoreError> {
    serde_json::to_string_pretty(trades)
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize trades: {e}")))
}

/// Parse a journal blob back into trades.
///
/// There is no version header and no migration: the blob must be a JSON
/// array of trade records. Unknown fields are ignored.
pub fn decode_trades(blob: &str) -> Result<Vec<Trade>, CoreError> {
    serde_json::from_str(blob)
        .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize trades: {e}")))
}
