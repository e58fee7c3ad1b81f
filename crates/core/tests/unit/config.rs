//! # Configuration Tests
//!
//! Tests for configuration defaults, JSON deserialization, and geometry
//! validation.

use bpsim_core::common::ConfigError;
use bpsim_core::config::*;
use std::io::Write;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.predictor.kind, PredictorKind::Static);
    assert!(config.predictor.validate().is_ok());
}

#[test]
fn test_gshare_config_defaults() {
    assert_eq!(GShareConfig::default().history_bits, 17);
}

#[test]
fn test_tournament_config_defaults() {
    let t = TournamentConfig::default();
    assert_eq!(t.choice_bits, 14);
    assert_eq!(t.global_bits, 16);
    assert_eq!(t.local_hist_bits, 14);
    assert_eq!(t.pc_bits, 10);
}

#[test]
fn test_custom_config_defaults() {
    let c = CustomConfig::default();
    assert_eq!(c.pc_bits, 10);
    assert_eq!(c.local_hist_bits, 12);
    assert_eq!(c.cache_history_bits, 14);
    assert_eq!(c.cache_set_bits, 8);
}

#[test]
fn test_empty_document_is_default() {
    let config = Config::from_json("{}").unwrap();
    assert_eq!(config.predictor.kind, PredictorKind::Static);
    assert_eq!(config.predictor.gshare.history_bits, 17);
}

#[test]
fn test_partial_document_keeps_other_defaults() {
    let json = r#"{ "predictor": { "kind": "Custom", "custom": { "cache_set_bits": 6 } } }"#;
    let config = Config::from_json(json).unwrap();
    assert_eq!(config.predictor.kind, PredictorKind::Custom);
    assert_eq!(config.predictor.custom.cache_set_bits, 6);
    assert_eq!(config.predictor.custom.cache_history_bits, 14);
}

#[test]
fn test_kind_accepts_gshare_spelling() {
    for spelling in ["GShare", "Gshare"] {
        let json = format!(r#"{{ "predictor": {{ "kind": "{spelling}" }} }}"#);
        assert_eq!(
            Config::from_json(&json).unwrap().predictor.kind,
            PredictorKind::GShare
        );
    }
}

#[test]
fn test_unknown_kind_is_parse_error() {
    let err = Config::from_json(r#"{ "predictor": { "kind": "Perceptron" } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_oversized_table_rejected() {
    let json = r#"{ "predictor": { "kind": "Tournament", "tournament": { "global_bits": 31 } } }"#;
    let err = Config::from_json(json).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::TableTooLarge {
            table: "tournament global table",
            bits: 31,
            max: MAX_TABLE_BITS,
        }
    ));
    assert!(err.to_string().contains("tournament global table"));
}

#[test]
fn test_cache_sets_wider_than_index_rejected() {
    let json = r#"{ "predictor": { "kind": "Custom", "custom": { "cache_history_bits": 6, "cache_set_bits": 7 } } }"#;
    let err = Config::from_json(json).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::CacheSetsExceedIndex {
            set_bits: 7,
            history_bits: 6,
        }
    ));
}

#[test]
fn test_unselected_geometry_not_validated() {
    let json = r#"{ "predictor": { "kind": "Static", "gshare": { "history_bits": 64 } } }"#;
    assert!(Config::from_json(json).is_ok());
}

#[test]
fn test_config_loaded_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "predictor": {{ "kind": "Tournament" }} }}"#).unwrap();
    let text = std::fs::read_to_string(file.path()).unwrap();
    let config = Config::from_json(&text).unwrap();
    assert_eq!(config.predictor.kind, PredictorKind::Tournament);
}
