//! Branch predictor simulator CLI.
//!
//! This binary runs one prediction scheme over a branch trace. It performs:
//! 1. **Scheme selection:** `--static` (default), `--gshare`, `--tournament`, or `--custom`.
//! 2. **Trace input:** A trace file path, or stdin when none is given.
//! 3. **Report:** Branch count, misprediction count, and the per-mille misprediction rate.
//!
//! Log output goes to stderr and is controlled with `RUST_LOG` (default `warn`).

use std::fs;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use clap::{ArgGroup, Parser};
use tracing::info;
use tracing_subscriber::EnvFilter;

use bpsim_core::common::Result;
use bpsim_core::config::{Config, PredictorKind};
use bpsim_core::{MalformedPolicy, Simulator, TraceReader};

#[derive(Parser, Debug)]
#[command(
    name = "predictor",
    author,
    version,
    about = "Trace-driven branch direction predictor simulator",
    long_about = "Predicts every conditional branch of a trace before its outcome is known, then trains on the outcome.\n\nEach trace line is: <pc> <target> <taken> <conditional> <call> <return> <direct>, addresses in hex.\n\nExamples:\n  predictor --gshare trace.txt\n  bunzip2 -kc trace.bz2 | predictor --tournament\n  predictor --custom --config predictor.json trace.txt"
)]
#[command(group(ArgGroup::new("scheme").args(["static_bp", "gshare", "tournament", "custom"])))]
struct Cli {
    /// Always predict taken.
    #[arg(long = "static")]
    static_bp: bool,

    /// Global history XOR PC indexed counters.
    #[arg(long)]
    gshare: bool,

    /// Local/global tournament with a choice table.
    #[arg(long)]
    tournament: bool,

    /// Local base predictor with tagged override caches.
    #[arg(long)]
    custom: bool,

    /// Print each conditional prediction (0/1) on its own line.
    #[arg(short, long)]
    verbose: bool,

    /// Stop at the first malformed trace line instead of skipping it.
    #[arg(long)]
    strict: bool,

    /// JSON predictor configuration (table sizes and scheme).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Trace file; reads stdin when omitted.
    trace: Option<PathBuf>,
}

impl Cli {
    /// Returns the scheme chosen on the command line, if any.
    fn scheme(&self) -> Option<PredictorKind> {
        if self.static_bp {
            Some(PredictorKind::Static)
        } else if self.gshare {
            Some(PredictorKind::GShare)
        } else if self.tournament {
            Some(PredictorKind::Tournament)
        } else if self.custom {
            Some(PredictorKind::Custom)
        } else {
            None
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Builds the simulator from the flags, drives the trace through it and
/// prints the report.
fn run(cli: &Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::from_json(&fs::read_to_string(path)?)?,
        None => Config::default(),
    };
    if let Some(kind) = cli.scheme() {
        config.predictor.kind = kind;
    }

    let policy = if cli.strict {
        MalformedPolicy::Abort
    } else {
        MalformedPolicy::Skip
    };

    let sim = Simulator::new(&config)?;
    info!(
        scheme = config.predictor.kind.name(),
        trace = ?cli.trace,
        "starting trace run"
    );
    match &cli.trace {
        Some(path) => simulate(sim, TraceReader::open(path)?, policy, cli.verbose),
        None => simulate(
            sim,
            TraceReader::new(io::stdin().lock()),
            policy,
            cli.verbose,
        ),
    }
}

/// Runs `trace` to completion and prints the report to stdout.
fn simulate<R: BufRead>(
    mut sim: Simulator,
    trace: TraceReader<R>,
    policy: MalformedPolicy,
    verbose: bool,
) -> Result<()> {
    let mut out = BufWriter::new(io::stdout().lock());
    let _ = sim.run(trace, policy, |_, prediction| {
        if verbose {
            writeln!(out, "{prediction}")?;
        }
        Ok(())
    })?;

    let stats = sim.shutdown();
    if stats.skipped > 0 {
        eprintln!("Skipped {} malformed trace lines", stats.skipped);
    }
    write!(out, "{stats}")?;
    out.flush()?;
    Ok(())
}
