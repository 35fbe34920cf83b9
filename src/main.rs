//! diagsum - mark diagonal runs that sum to a target in a digit grid.
//!
//! Usage:
//!   diagsum scan <INPUT> --sum <S>     Write the marker grid
//!   diagsum report <INPUT> --sum <S>   Show scan statistics
//!   diagsum --help                     Show help

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result};
use itertools::Itertools;
use tracing_subscriber::EnvFilter;

use diagsum_core::{read_grid, write_markers, ScanConfig, ScanReport};
use diagsum_scan::DiagonalScanner;

#[derive(Parser)]
#[command(
    name = "diagsum",
    version,
    about = "Find diagonal runs in a digit grid that sum to a target",
    long_about = "diagsum reads a square grid of digits and marks every cell that lies on a \
                  diagonal run of two or more cells whose digits add up to the target sum.\n\n\
                  Runs start at the grid edge and extend down-left or down-right."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan a grid and write the marker grid
    Scan {
        #[command(flatten)]
        scan: ScanArgs,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Scan a grid and show statistics
    Report {
        #[command(flatten)]
        scan: ScanArgs,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Args)]
struct ScanArgs {
    /// Grid file: n lines of n digits
    input: PathBuf,

    /// Target sum for a diagonal run
    #[arg(short, long)]
    sum: u64,

    /// Number of worker threads (1-3)
    #[arg(short, long, default_value = "1")]
    threads: usize,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Scan { scan, output } => run_scan(&scan, output.as_deref())?,
        Command::Report { scan, format } => run_report(&scan, format)?,
    }

    Ok(())
}

/// Send logs to stderr. `RUST_LOG` overrides the verbosity flag.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Load the grid and run the scanner.
fn scan(args: &ScanArgs) -> Result<ScanReport> {
    let config = ScanConfig::builder()
        .target_sum(args.sum)
        .threads(args.threads)
        .build()
        .context("Invalid scan options")?;

    let grid = read_grid(&args.input)
        .with_context(|| format!("Failed to load grid from {}", args.input.display()))?;
    tracing::info!(path = %args.input.display(), size = grid.size(), "Loaded grid");

    DiagonalScanner::with_config(config)
        .scan(&grid)
        .context("Scan failed")
}

/// Scan and write the marker grid.
fn run_scan(args: &ScanArgs, output: Option<&Path>) -> Result<()> {
    let report = scan(args)?;

    match output {
        Some(path) => {
            write_markers(path, &report.markers)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => print!("{}", report.markers),
    }

    eprintln!(
        "{} of {} cells marked ({} matching runs) in {:.2}ms",
        report.stats.cells_marked,
        report.stats.grid_size * report.stats.grid_size,
        report.stats.runs_matched,
        report.scan_duration.as_secs_f64() * 1000.0
    );

    Ok(())
}

/// Scan and print statistics.
fn run_report(args: &ScanArgs, format: OutputFormat) -> Result<()> {
    let report = scan(args)?;

    match format {
        OutputFormat::Text => {
            let stats = &report.stats;
            println!();
            println!("{}", "─".repeat(60));
            println!(" {} - target {}", args.input.display(), report.config.target_sum);
            println!("{}", "─".repeat(60));
            println!(" Grid size:      {0}x{0}", stats.grid_size);
            println!(" Runs checked:   {}", stats.runs_checked);
            println!(" Runs matched:   {}", stats.runs_matched);
            println!(
                " Cells marked:   {} ({:.1}%)",
                stats.cells_marked,
                stats.marked_ratio() * 100.0
            );
            println!(" Scanned in {:.2}ms", report.scan_duration.as_secs_f64() * 1000.0);
            println!();

            println!(" Workers:");
            for worker in &report.workers {
                let mut families = vec!["rows"];
                if worker.top_edge {
                    families.push("top edge");
                }
                println!(
                    "   #{} rows {:>3}..{:<3} {:>8} checked {:>6} matched  [{}]",
                    worker.worker,
                    worker.rows.start,
                    worker.rows.end,
                    worker.runs_checked,
                    worker.runs_matched,
                    families.iter().join(", ")
                );
            }
            println!();
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
