//! Simulator Tests.
//!
//! The predictor is mocked to check the call protocol: `predict` only for
//! conditional records, always before the record trains the predictor, and
//! no training at all for unconditional records.

use std::io::{self, Cursor};

use bpsim_core::common::{Error, TraceError};
use bpsim_core::config::PredictorKind;
use bpsim_core::{
    BranchPredictor, BranchRecord, Config, MalformedPolicy, Outcome, Simulator, TraceReader,
};
use mockall::{Sequence, mock, predicate::eq};
use pretty_assertions::assert_eq;

use crate::common::{cond, init_tracing, jump, trace_text};

mock! {
    Predictor {}

    impl BranchPredictor for Predictor {
        fn name(&self) -> &'static str;
        fn predict(&self, pc: u32) -> Outcome;
        fn update(&mut self, pc: u32, outcome: Outcome);
        fn storage_bits(&self) -> usize;
    }
}

/// A mock that answers the reporting queries the driver logs.
fn reporting_mock() -> MockPredictor {
    let mut mock = MockPredictor::new();
    let _ = mock.expect_name().return_const("Mock");
    let _ = mock.expect_storage_bits().return_const(0usize);
    mock
}

// ══════════════════════════════════════════════════════════
// 1. Call protocol
// ══════════════════════════════════════════════════════════

/// A conditional record is predicted, then trained, in that order.
#[test]
fn step_predicts_before_training() {
    init_tracing();
    let mut seq = Sequence::new();
    let mut mock = reporting_mock();
    let _ = mock
        .expect_predict()
        .with(eq(0x40))
        .times(1)
        .in_sequence(&mut seq)
        .return_const(Outcome::Taken);
    let _ = mock
        .expect_update()
        .with(eq(0x40), eq(Outcome::NotTaken))
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());

    let mut sim = Simulator::with_predictor(mock);
    assert_eq!(sim.step(&cond(0x40, Outcome::NotTaken)), Some(Outcome::Taken));
    assert_eq!(sim.stats().branches, 1);
    assert_eq!(sim.stats().mispredictions, 1);
}

/// An unconditional record is neither predicted nor trained.
#[test]
fn step_skips_prediction_for_unconditional_records() {
    let mut mock = reporting_mock();
    let _ = mock.expect_predict().never();
    let _ = mock.expect_update().never();

    let mut sim = Simulator::with_predictor(mock);
    assert_eq!(sim.step(&jump(0x40, 0x80)), None);
    assert_eq!(sim.stats().branches, 0);
}

/// `run` hands each prediction to the callback before the record trains.
#[test]
fn run_reports_predictions_in_trace_order() {
    let mut mock = reporting_mock();
    let _ = mock.expect_predict().returning(|pc| Outcome::from(pc & 1 == 1));
    let _ = mock.expect_update().times(2).return_const(());

    let records = [cond(0x11, Outcome::Taken), jump(0x20, 0x40), cond(0x30, Outcome::Taken)];
    let mut seen = Vec::new();
    let stats = Simulator::with_predictor(mock)
        .run(records.into_iter().map(Ok), MalformedPolicy::Abort, |r, p| {
            seen.push((r.pc, p));
            Ok(())
        })
        .unwrap();

    assert_eq!(seen, vec![(0x11, Outcome::Taken), (0x30, Outcome::NotTaken)]);
    assert_eq!(stats.branches, 2);
    assert_eq!(stats.mispredictions, 1);
}

/// Running a trace gives the same predictions and counts as stepping through
/// it record by record.
#[test]
fn run_matches_stepping() {
    let records: Vec<BranchRecord> = (0..200u32)
        .map(|i| {
            if i % 7 == 0 {
                jump(0x80, 0x100)
            } else {
                cond(0x40 + (i % 3) * 4, Outcome::from(i % 5 < 3))
            }
        })
        .collect();
    let mut config = Config::default();
    config.predictor.kind = PredictorKind::Custom;

    let mut stepped = Simulator::new(&config).unwrap();
    let expected: Vec<Outcome> = records.iter().filter_map(|r| stepped.step(r)).collect();

    let mut driven = Simulator::new(&config).unwrap();
    let mut seen = Vec::new();
    let stats = driven
        .run(records.iter().copied().map(Ok), MalformedPolicy::Abort, |_, p| {
            seen.push(p);
            Ok(())
        })
        .unwrap();

    assert_eq!(seen, expected);
    assert_eq!(stats, *stepped.stats());
    assert_eq!(driven.predictor(), stepped.predictor());
}

// ══════════════════════════════════════════════════════════
// 2. Malformed input and errors
// ══════════════════════════════════════════════════════════

fn trace_with_garbage() -> TraceReader<Cursor<String>> {
    let mut text = trace_text(&[cond(0x10, Outcome::Taken)]);
    text.push_str("0x10 not a record\n");
    text.push_str(&trace_text(&[cond(0x10, Outcome::Taken)]));
    TraceReader::new(Cursor::new(text))
}

#[test]
fn skip_policy_counts_and_continues() {
    init_tracing();
    let mut sim = Simulator::new(&Config::default()).unwrap();
    let stats = sim
        .run(trace_with_garbage(), MalformedPolicy::Skip, |_, _| Ok(()))
        .unwrap();
    assert_eq!(stats.branches, 2);
    assert_eq!(stats.skipped, 1);
    assert_eq!(sim.shutdown(), stats);
}

#[test]
fn abort_policy_returns_the_malformed_line() {
    let mut sim = Simulator::new(&Config::default()).unwrap();
    let err = sim
        .run(trace_with_garbage(), MalformedPolicy::Abort, |_, _| Ok(()))
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Trace(TraceError::Malformed { line: 2, .. })
    ));
    assert_eq!(sim.stats().branches, 1);
}

/// I/O failures stop the run under either policy.
#[test]
fn io_errors_always_abort() {
    let items: Vec<Result<BranchRecord, TraceError>> = vec![
        Ok(cond(0x10, Outcome::Taken)),
        Err(io::Error::other("disk gone").into()),
        Ok(cond(0x10, Outcome::Taken)),
    ];
    let mut sim = Simulator::new(&Config::default()).unwrap();
    let err = sim
        .run(items, MalformedPolicy::Skip, |_, _| Ok(()))
        .unwrap_err();
    assert!(matches!(err, Error::Trace(TraceError::Io(_))));
    assert_eq!(sim.stats().branches, 1);
}

/// A failing prediction sink stops the run.
#[test]
fn sink_errors_propagate() {
    let mut sim = Simulator::new(&Config::default()).unwrap();
    let err = sim
        .run(
            vec![Ok(cond(0x10, Outcome::Taken))],
            MalformedPolicy::Skip,
            |_, _| Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed")),
        )
        .unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

// ══════════════════════════════════════════════════════════
// 3. Configuration
// ══════════════════════════════════════════════════════════

#[test]
fn new_rejects_invalid_geometry() {
    let mut config = Config::default();
    config.predictor.kind = PredictorKind::Custom;
    config.predictor.custom.cache_set_bits = 20;
    assert!(Simulator::new(&config).is_err());
}

#[test]
fn new_builds_configured_scheme() {
    let mut config = Config::default();
    config.predictor.kind = PredictorKind::Tournament;
    config.predictor.tournament.global_bits = 10;
    let sim = Simulator::new(&config).unwrap();
    assert_eq!(sim.predictor().name(), "Tournament");
    assert_eq!(sim.predictor().kind(), PredictorKind::Tournament);
}
