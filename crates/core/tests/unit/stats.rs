//! Statistics Tests.

use bpsim_core::PredictionStats;
use pretty_assertions::assert_eq;

#[test]
fn record_counts_only_wrong_predictions_as_misses() {
    let mut stats = PredictionStats::default();
    stats.record(true);
    stats.record(false);
    stats.record(true);
    assert_eq!(stats.branches, 3);
    assert_eq!(stats.mispredictions, 1);
    assert_eq!(stats.skipped, 0);
}

/// The rate is per thousand branches, not per hundred.
#[test]
fn misprediction_rate_is_per_mille() {
    let stats = PredictionStats {
        branches: 8000,
        mispredictions: 123,
        skipped: 0,
    };
    assert!((stats.misprediction_rate() - 15.375).abs() < 1e-9);
}

#[test]
fn misprediction_rate_of_empty_run_is_zero() {
    assert_eq!(PredictionStats::default().misprediction_rate(), 0.0);
}

#[test]
fn report_matches_harness_layout() {
    let stats = PredictionStats {
        branches: 8000,
        mispredictions: 123,
        skipped: 2,
    };
    assert_eq!(
        stats.to_string(),
        "Branches:              8000\n\
         Incorrect:              123\n\
         Misprediction Rate:  15.375\n"
    );
}
