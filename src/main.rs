use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::process;
use log::{debug, error};

use pmq::app::{self, ChannelHost};
use pmq::cli::{self, StatusFormat};
use pmq::gateway::{ChannelHandle, Effect};
use pmq::logging;

fn main() {
    if let Err(e) = run() {
        error!("Application error: {:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = cli::parse_args();

    cli::validate_args(&args)?;

    let config_manager = app::load_configuration(&args)?;

    let log_config = app::configure_logging(&args, &config_manager)?;
    logging::init_logger(log_config)?;

    if let Some(path) = config_manager.config_file_path() {
        debug!("Configuration loaded from {}", path.display());
    }

    let queue_config = app::configure_queue(&args, &config_manager)?;
    let host = ChannelHost::register(queue_config)?;
    let mut handle = host.open();

    let input: Box<dyn BufRead> = match &args.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input file: {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(io::stdin())),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let processed = process_commands(input, &mut handle, &mut out)?;
    debug!("Processed {} command lines", processed);

    if args.status {
        match args.status_format {
            StatusFormat::Text => write!(out, "{}", handle.status())?,
            StatusFormat::Json => {
                let snapshot = host.gateway().snapshot();
                writeln!(out, "{}", serde_json::to_string_pretty(&snapshot)?)?;
            }
        }
    }
    out.flush()?;

    drop(handle);
    host.teardown();

    Ok(())
}

/// Feed each input line to the channel as one write, printing received
/// messages. Rejected writes are logged and skipped.
fn process_commands<R: BufRead, W: Write>(
    mut input: R,
    handle: &mut ChannelHandle,
    out: &mut W,
) -> Result<usize> {
    let mut line = Vec::new();
    let mut processed = 0;

    loop {
        line.clear();
        let read = input
            .read_until(b'\n', &mut line)
            .context("Failed to read command input")?;
        if read == 0 {
            break;
        }
        if line.iter().all(|b| b.is_ascii_whitespace()) {
            continue;
        }
        processed += 1;

        match handle.write_command(&line) {
            Ok(outcome) => match outcome.effect {
                Effect::Received(message) => writeln!(out, "Received: {}", message)?,
                Effect::Empty => writeln!(out, "No messages available")?,
                Effect::Sent(_) | Effect::Malformed(_) | Effect::Unrecognized => {}
            },
            Err(e) => error!("Command rejected: {}", e),
        }
    }

    Ok(processed)
}
