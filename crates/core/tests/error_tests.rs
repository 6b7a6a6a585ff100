// ═══════════════════════════════════════════════════════════════════
// Error Tests — CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use trading_journal_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn serialization() {
        let err = CoreError::Serialization("bad value".into());
        assert_eq!(err.to_string(), "Serialization error: bad value");
    }

    #[test]
    fn deserialization() {
        let err = CoreError::Deserialization("unexpected end".into());
        assert_eq!(err.to_string(), "Deserialization error: unexpected end");
    }

    #[test]
    fn file_io() {
        let err = CoreError::FileIO("permission denied".into());
        assert_eq!(err.to_string(), "File I/O error: permission denied");
    }

    #[test]
    fn validation() {
        let err = CoreError::ValidationError("bad currency".into());
        assert_eq!(err.to_string(), "Validation failed: bad currency");
    }

    #[test]
    fn trade_not_found() {
        let err = CoreError::TradeNotFound("abc-123".into());
        assert_eq!(err.to_string(), "Trade not found: abc-123");
    }

    #[test]
    fn duplicate_trade() {
        let err = CoreError::DuplicateTrade("t1".into());
        assert_eq!(err.to_string(), "Trade already exists: t1");
    }
}

// ── From conversions ────────────────────────────────────────────────

mod conversions {
    use super::*;

    #[test]
    fn from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: CoreError = io.into();
        assert!(matches!(err, CoreError::FileIO(ref m) if m.contains("no such file")));
    }

    #[test]
    fn from_serde_json_error() {
        let json_err = serde_json::from_str::<Vec<u32>>("not json").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn question_mark_propagates_io() {
        fn read_missing() -> Result<Vec<u8>, CoreError> {
            Ok(std::fs::read("/definitely/not/a/real/path/journal.json")?)
        }
        assert!(matches!(read_missing(), Err(CoreError::FileIO(_))));
    }

    #[test]
    fn debug_format_names_variant() {
        let err = CoreError::TradeNotFound("x".into());
        assert!(format!("{err:?}").contains("TradeNotFound"));
    }
}
