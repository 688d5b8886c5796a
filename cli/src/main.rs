//! rotor CLI
//!
//! Runs the five-stage rotating-substitution pipeline from an input file to
//! an output file and prints both letter histograms.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use rotor_core::histogram::{render_json, render_text};
use rotor_core::stream::{transform_stream, InputSource, OutputSink, PaddingMode, PipelineConfig};
use rotor_core::transform::{Direction, RotationPhase};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReportFormat {
    /// Framed two-column table
    Text,
    /// Both histograms with totals as JSON
    Json,
}

#[derive(Parser)]
#[command(name = "rotor")]
#[command(about = "Rotating-substitution stream pipeline with letter histograms", long_about = None)]
struct Args {
    /// File to read; must exist
    input: PathBuf,

    /// File to write; created or truncated
    output: PathBuf,

    /// Cycle capacity in bytes (prompted for when omitted)
    #[arg(short = 'n', long)]
    buffer_size: Option<usize>,

    /// Apply the inverse rotation
    #[arg(long)]
    decrypt: bool,

    /// Write only source bytes, not the zero padding of the last cycle
    #[arg(long)]
    trim_padding: bool,

    /// Phase applied to the first letter (increment, decrement, identity)
    #[arg(long, default_value = "increment")]
    phase: RotationPhase,

    /// Histogram report format
    #[arg(long, value_enum, default_value = "text")]
    format: ReportFormat,

    /// Print run telemetry as JSON after the report
    #[arg(long)]
    stats: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(err) = run(args) {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

impl Args {
    /// Pipeline settings selected by the flags, for a cycle of `capacity` bytes.
    fn pipeline_config(&self, capacity: usize) -> PipelineConfig {
        PipelineConfig::new(capacity)
            .with_direction(if self.decrypt { Direction::Inverse } else { Direction::Forward })
            .with_padding(if self.trim_padding { PaddingMode::Trim } else { PaddingMode::Emit })
            .with_initial_phase(self.phase)
    }
}

fn run(args: Args) -> Result<()> {
    let capacity = match args.buffer_size {
        Some(n) => n,
        None => prompt_buffer_size(io::stdin().lock(), io::stdout())?,
    };

    let config = args.pipeline_config(capacity);
    debug!("config: {config:?}");

    let outcome = transform_stream(
        InputSource::File(args.input.clone()),
        OutputSink::File(args.output.clone()),
        config,
    )
    .with_context(|| {
        format!("failed to process {} into {}", args.input.display(), args.output.display())
    })?;

    info!(
        "{} cycles, {} bytes written",
        outcome.cycles, outcome.snapshot.bytes_written
    );

    let mut stdout = io::stdout().lock();
    match args.format {
        ReportFormat::Text => {
            write!(stdout, "{}", render_text(&outcome.input_histogram, &outcome.output_histogram))?
        }
        ReportFormat::Json => writeln!(
            stdout,
            "{}",
            render_json(&outcome.input_histogram, &outcome.output_histogram)
                .context("failed to encode report")?
        )?,
    }

    if args.stats {
        let stats = serde_json::to_string_pretty(&outcome.snapshot)
            .context("failed to encode telemetry")?;
        writeln!(stdout, "{stats}")?;
    }

    Ok(())
}

/// Ask for N on `prompt` and read it from `answer`.
fn prompt_buffer_size<R: BufRead, W: Write>(mut answer: R, mut prompt: W) -> Result<usize> {
    write!(prompt, "Enter buffer size: ")?;
    prompt.flush()?;

    let mut line = String::new();
    let read = answer.read_line(&mut line).context("failed to read buffer size")?;
    if read == 0 {
        bail!("no buffer size given");
    }

    line.trim()
        .parse::<usize>()
        .with_context(|| format!("buffer size must be a positive integer, got {:?}", line.trim()))
}
