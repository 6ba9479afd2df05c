use clap::Parser;
use parapi::aggregate::TimingSummary;
use parapi::config::{FileConfig, RunConfig};
use parapi::report::{FormatType, OutputFormatter};
use parapi::worker;
use std::path::PathBuf;
use tracing::{debug, error};

/// Estimate pi by parallel midpoint-rule integration of 4/(1+x²) over [0,1]
#[derive(Parser)]
#[command(name = "parapi")]
#[command(about = "Parallel midpoint-rule estimation of pi", long_about = None)]
struct Cli {
    /// Total number of integration intervals (default: 1000000)
    #[arg(short = 'n', long)]
    intervals: Option<u64>,

    /// Number of worker threads (default: available parallelism)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<FormatType>,

    /// Path to a TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(cli.verbose >= 2)
        .with_thread_names(cli.verbose >= 2)
        .init();

    if let Err(e) = run(cli) {
        error!("Fatal error: {}", e);
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let file = cli
        .config
        .as_deref()
        .map(FileConfig::load)
        .transpose()?;
    let config = RunConfig::resolve(cli.intervals, cli.workers, cli.format, file)?;
    debug!(
        intervals = config.intervals,
        workers = config.workers,
        "resolved configuration"
    );

    let result = worker::run(&config)?;
    let summary = TimingSummary::from_run(&result.worker_times(), result.total_elapsed_secs);

    let formatter = OutputFormatter::new(config.format);
    print!("{}", formatter.format(&result, &summary));

    Ok(())
}
