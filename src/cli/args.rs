use clap::{Parser, ValueEnum};
use anyhow::Result;
use std::path::PathBuf;
use log::debug;

/// How the status report is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusFormat {
    /// Fixed-layout text, as returned by a channel read
    Text,
    /// Snapshot counts as a JSON object
    Json,
}

/// Two-level priority message queue host
#[derive(Parser, Debug)]
#[command(name = "pmq")]
#[command(about = "A two-level priority message queue served through a single textual command channel")]
#[command(version)]
pub struct Args {
    /// Read command lines from FILE instead of standard input
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Print the status report after all commands are processed
    #[arg(short, long)]
    pub status: bool,

    /// Status output format
    #[arg(long, value_enum, value_name = "FORMAT", default_value = "text")]
    pub status_format: StatusFormat,

    /// Priority threshold (type values at or above it are high priority)
    #[arg(short = 't', long, value_name = "N", allow_hyphen_values = true)]
    pub threshold: Option<i32>,

    /// Verbose output (debug level logging)
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet output (error level logging only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Debug output (trace level logging)
    #[arg(long)]
    pub debug: bool,

    /// Log format: text or json
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub log_format: String,

    /// Log file path for file output
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log level for file output (independent of console level)
    #[arg(long, value_name = "LEVEL")]
    pub log_file_level: Option<String>,

    /// Configuration file path
    #[arg(long, value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Configuration section name
    #[arg(long, value_name = "SECTION")]
    pub config_name: Option<String>,
}

/// Parse command line arguments
pub fn parse_args() -> Args {
    let args = Args::parse();
    debug!("Parsed CLI arguments: {:?}", args);
    args
}

/// Validate CLI argument combinations
pub fn validate_args(args: &Args) -> Result<()> {
    let log_flags_count = [args.verbose, args.quiet, args.debug]
        .iter()
        .filter(|&&flag| flag)
        .count();

    if log_flags_count > 1 {
        return Err(anyhow::anyhow!(
            "Conflicting log level flags: only one of --verbose, --quiet, or --debug may be specified"
        ));
    }

    match args.log_format.to_lowercase().as_str() {
        "text" | "json" => {},
        _ => return Err(anyhow::anyhow!(
            "Invalid log format '{}'. Valid options: text, json", args.log_format
        )),
    }

    if let Some(ref level) = args.log_file_level {
        match level.to_lowercase().as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {},
            _ => return Err(anyhow::anyhow!(
                "Invalid log file level '{}'. Valid levels: error, warn, info, debug, trace", level
            )),
        }
    }

    if args.log_file_level.is_some() && args.log_file.is_none() {
        return Err(anyhow::anyhow!(
            "--log-file-level requires --log-file to be specified"
        ));
    }

    if let Some(ref input) = args.input {
        if !input.is_file() {
            return Err(anyhow::anyhow!("Input file does not exist: {}", input.display()));
        }
    }

    debug!("CLI arguments validated successfully");
    Ok(())
}
