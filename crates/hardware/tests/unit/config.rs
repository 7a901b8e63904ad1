//! Configuration Tests.
//!
//! Verifies the baseline defaults, partial JSON overrides, enum spellings and
//! every validation rule.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rvpipe_core::common::error::ConfigError;
use rvpipe_core::config::{BranchPredictorKind, Config, DecodeFaultPolicy, MemoryTiming};

#[test]
fn defaults_match_the_baseline_design() {
    let c = Config::default();
    assert_eq!((c.cache.icache.lines, c.cache.icache.line_bytes), (512, 16));
    assert_eq!((c.cache.dcache.lines, c.cache.dcache.line_bytes), (2048, 8));
    assert_eq!(c.pipeline.btb_entries, 32);
    assert_eq!(c.pipeline.branch_predictor, BranchPredictorKind::Btb);
    assert_eq!(c.pipeline.decode_fault, DecodeFaultPolicy::Nop);
    assert_eq!(c.memory.base, 0x8000_0000);
    assert_eq!(c.memory.timing, MemoryTiming::Fixed);
    assert!(c.validate().is_ok());
}

#[test]
fn empty_document_yields_defaults() {
    let c = Config::from_json("{}").unwrap();
    assert_eq!(c.cache.dcache.lines, 2048);
    assert_eq!(c.general.max_cycles, Config::default().general.max_cycles);
}

#[test]
fn partial_sections_keep_other_defaults() {
    let c = Config::from_json(
        r#"{
            "pipeline": { "branch_predictor": "not_taken", "decode_fault": "halt" },
            "cache": { "dcache": { "lines": 64, "line_bytes": 8 } },
            "memory": { "timing": "dram", "t_cas": 2 }
        }"#,
    )
    .unwrap();
    assert_eq!(c.pipeline.branch_predictor, BranchPredictorKind::NotTaken);
    assert_eq!(c.pipeline.decode_fault, DecodeFaultPolicy::Halt);
    assert_eq!(c.pipeline.btb_entries, 32);
    assert_eq!(c.cache.dcache.lines, 64);
    assert_eq!(c.cache.icache.lines, 512);
    assert_eq!(c.memory.timing, MemoryTiming::Dram);
    assert_eq!(c.memory.t_cas, 2);
    assert_eq!(c.memory.row_miss_penalty, 12);
}

#[rstest]
#[case(r#"{ "cache": { "icache": { "lines": 500, "line_bytes": 16 } } }"#, "icache")]
#[case(r#"{ "cache": { "icache": { "lines": 0, "line_bytes": 16 } } }"#, "icache")]
#[case(r#"{ "cache": { "icache": { "lines": 512, "line_bytes": 32 } } }"#, "icache")]
#[case(r#"{ "cache": { "dcache": { "lines": 2048, "line_bytes": 16 } } }"#, "dcache")]
fn rejects_bad_geometry(#[case] json: &str, #[case] which: &str) {
    match Config::from_json(json) {
        Err(ConfigError::Geometry { cache, .. }) => assert_eq!(cache, which),
        other => panic!("expected a geometry error, got {other:?}"),
    }
}

#[test]
fn empty_btb_is_rejected_only_when_used() {
    let err = Config::from_json(r#"{ "pipeline": { "btb_entries": 0 } }"#);
    assert!(matches!(err, Err(ConfigError::EmptyBtb)));

    let ok = Config::from_json(
        r#"{ "pipeline": { "btb_entries": 0, "branch_predictor": "not_taken" } }"#,
    );
    assert!(ok.is_ok());
}

#[test]
fn malformed_json_is_a_parse_error() {
    assert!(matches!(Config::from_json("{ nope"), Err(ConfigError::Parse(_))));
    assert!(matches!(
        Config::from_json(r#"{ "pipeline": { "decode_fault": "explode" } }"#),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn serializes_with_lowercase_enums() {
    let json = serde_json::to_value(Config::default()).unwrap();
    assert_eq!(json["pipeline"]["branch_predictor"], "btb");
    assert_eq!(json["pipeline"]["decode_fault"], "nop");
    assert_eq!(json["memory"]["timing"], "fixed");
}
