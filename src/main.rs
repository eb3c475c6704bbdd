use std::error::Error;
use std::path::Path;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use flexi_logger::{Logger, LoggerHandle};
use log::info;

use lib::imageio::{self, annotate, difference_strip};
use lib::{match_report_with, signature_of, skeletonize_observed, FingerprintConfig, Signature, SnapshotCollector};

#[derive(Parser, Debug)]
#[command(name = "fingerprint", about = "Extract and compare fingerprint minutiae", version)]
struct Cli {
    /// Log level or flexi_logger spec, e.g. `debug` or `info, lib::matcher=trace`
    #[arg(long = "log-level", default_value = "info", global = true)]
    log_level: String,

    /// JSON file overriding the default thresholds
    #[arg(long = "config", short = 'c', global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Thin a ridge image and write the skeleton
    Skeleton {
        input: String,
        output: String,
        /// Write every thinning step side by side, removed pixels in red
        #[arg(long = "debug-strip")]
        debug_strip: Option<String>,
    },
    /// Extract minutiae from a ridge image
    Extract {
        input: String,
        /// Write the signature as JSON
        #[arg(long = "json")]
        json: Option<String>,
        /// Write the skeleton with every minutia drawn on it
        #[arg(long = "overlay")]
        overlay: Option<String>,
    },
    /// Decide whether two fingerprints come from the same finger
    Match {
        /// Ridge image or signature JSON
        first: String,
        /// Ridge image or signature JSON
        second: String,
    },
}

fn setup_logging(level: &str) -> Result<LoggerHandle, Box<dyn Error>> {
    Ok(Logger::try_with_str(level)?.log_to_stderr().start()?)
}

fn is_json(path: &str) -> bool {
    Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn read_signature(path: &str, config: &FingerprintConfig) -> Result<Signature, Box<dyn Error>> {
    if is_json(path) {
        return Ok(Signature::from_file(path)?);
    }
    let grid = imageio::load(path)?;
    Ok(signature_of(&grid, config))
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn Error>> {
    let config = match &cli.config {
        Some(path) => FingerprintConfig::from_file(path)?,
        None => FingerprintConfig::default(),
    };

    match cli.command {
        Command::Skeleton {
            input,
            output,
            debug_strip,
        } => {
            let grid = imageio::load(&input)?;
            let mut collector = SnapshotCollector::new();
            let skeleton = skeletonize_observed(&grid, &mut collector);
            imageio::save(&skeleton, &output)?;
            info!("wrote skeleton of {} to {}", input, output);

            if let Some(path) = debug_strip {
                if let Some(strip) = difference_strip(&collector)? {
                    strip.save(&path)?;
                    info!("wrote {} thinning steps to {}", collector.len(), path);
                }
            }
        }
        Command::Extract {
            input,
            json,
            overlay,
        } => {
            let grid = imageio::load(&input)?;
            let skeleton = lib::skeletonize(&grid);
            let signature = lib::extract_minutiae_with(&skeleton, &config);
            println!("{} minutiae", signature.len());

            if let Some(path) = json {
                signature.to_file(&path)?;
            }
            if let Some(path) = overlay {
                annotate(&skeleton, &signature).save(&path)?;
            }
        }
        Command::Match { first, second } => {
            let a = read_signature(&first, &config)?;
            let b = read_signature(&second, &config)?;
            let report = match_report_with(&a, &b, &config);

            println!("{}", if report.matched { "MATCH" } else { "NO MATCH" });
            println!(
                "best overlap {} of {} needed after {} trials",
                report.best_count, config.found_threshold, report.trials
            );
            if let Some(alignment) = report.best_alignment {
                println!(
                    "anchor ({}, {}) -> ({}, {}), rotation {} degrees",
                    alignment.anchor_b.row(),
                    alignment.anchor_b.col(),
                    alignment.anchor_a.row(),
                    alignment.anchor_a.col(),
                    alignment.rotation
                );
            }
            if report.budget_exhausted {
                println!("search stopped early: trial budget exhausted");
            }
            if !report.matched {
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _logger = setup_logging(&cli.log_level)
        .map_err(|e| eprintln!("Logger initialization failed with {}", e))
        .ok();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(2)
        }
    }
}
