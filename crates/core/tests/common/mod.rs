//! Shared builders for branch records and synthetic traces.

use std::io;
use std::sync::{Arc, Mutex};

use bpsim_core::{BranchPredictor, BranchRecord, Outcome};

/// Installs a test-writer `tracing` subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("bpsim_core=trace")
        .try_init();
}

/// Runs `f` under a subscriber that records every event and returns the
/// formatted log text.
pub fn capture_logs(f: impl FnOnce()) -> String {
    let buf = Arc::new(Mutex::new(Vec::new()));
    let writer = Arc::clone(&buf);
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || SharedBuf(Arc::clone(&writer)))
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    let bytes = buf.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

/// `io::Write` handle appending to a shared buffer.
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedBuf {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A conditional branch at `pc` resolving `outcome`.
pub fn cond(pc: u32, outcome: Outcome) -> BranchRecord {
    BranchRecord::conditional(pc, outcome)
}

/// An unconditional direct jump at `pc`.
pub fn jump(pc: u32, target: u32) -> BranchRecord {
    BranchRecord {
        pc,
        target,
        outcome: Outcome::Taken,
        conditional: false,
        call: false,
        ret: false,
        direct: true,
    }
}

/// `n` records alternating Taken, NotTaken, ... at one PC.
pub fn alternating(pc: u32, n: usize) -> Vec<BranchRecord> {
    (0..n)
        .map(|i| cond(pc, Outcome::from(i % 2 == 0)))
        .collect()
}

/// A two-branch loop body repeated `iterations` times.
///
/// Branch `b` is Taken except on every `period`-th iteration. Branch `c`
/// executes just before it and is Taken only on those same iterations, so
/// the global history at `b` identifies the exception while `b`'s own
/// history does not.
pub fn rare_exception(b: u32, c: u32, period: usize, iterations: usize) -> Vec<BranchRecord> {
    let mut records = Vec::with_capacity(iterations * 2);
    for i in 0..iterations {
        let exception = i % period == period - 1;
        records.push(cond(c, Outcome::from(exception)));
        records.push(cond(b, Outcome::from(!exception)));
    }
    records
}

/// Replays `records` predict-then-train and returns the misprediction count.
pub fn replay<P: BranchPredictor>(bp: &mut P, records: &[BranchRecord]) -> u64 {
    let mut misses = 0;
    for r in records {
        if r.conditional && bp.predict(r.pc) != r.outcome {
            misses += 1;
        }
        bp.train(r);
    }
    misses
}

/// Renders `records` as trace text, one line each.
pub fn trace_text(records: &[BranchRecord]) -> String {
    records.iter().map(|r| format!("{r}\n")).collect()
}
