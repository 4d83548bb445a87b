//! Command Parsing
//!
//! Turns one write into a [`Command`]. The grammar is:
//!
//! ```text
//! S <pid> <type> <text>    send; pid and type are signed 32-bit integers,
//!                          text is the rest of the line (leading blanks skipped)
//! R...                     receive; only the first byte is checked
//! ```
//!
//! `SEND` is accepted as a long form of `S`. Parsing never fails: input that
//! is neither grammar becomes `Malformed` or `Unrecognized`.

use thiserror::Error;
use crate::queue::message::truncate;

/// Reason a send command was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedSend {
    #[error("missing sender id")]
    MissingSenderId,
    #[error("sender id '{0}' is not an integer")]
    InvalidSenderId(String),
    #[error("missing priority type")]
    MissingPriorityType,
    #[error("priority type '{0}' is not an integer")]
    InvalidPriorityType(String),
    #[error("missing message text")]
    MissingText,
}

/// A parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    Send {
        sender_id: i32,
        priority_type: i32,
        text: &'a str,
    },
    Receive,
    Malformed(MalformedSend),
    Unrecognized,
}

/// Parse a command line, cutting send text to `max_text` bytes
pub fn parse(input: &str, max_text: usize) -> Command<'_> {
    let keyword_end = input.find(char::is_whitespace).unwrap_or(input.len());

    match &input[..keyword_end] {
        "S" | "SEND" => match parse_send(&input[keyword_end..], max_text) {
            Ok(command) => command,
            Err(reason) => Command::Malformed(reason),
        },
        _ if input.starts_with('R') => Command::Receive,
        _ => Command::Unrecognized,
    }
}

fn parse_send(args: &str, max_text: usize) -> Result<Command<'_>, MalformedSend> {
    let (sender, rest) = next_token(args).ok_or(MalformedSend::MissingSenderId)?;
    let sender_id = sender
        .parse::<i32>()
        .map_err(|_| MalformedSend::InvalidSenderId(sender.to_string()))?;

    let (priority, rest) = next_token(rest).ok_or(MalformedSend::MissingPriorityType)?;
    let priority_type = priority
        .parse::<i32>()
        .map_err(|_| MalformedSend::InvalidPriorityType(priority.to_string()))?;

    let line = rest.trim_start().split('\n').next().unwrap_or_default();
    if line.is_empty() {
        return Err(MalformedSend::MissingText);
    }

    Ok(Command::Send {
        sender_id,
        priority_type,
        text: truncate(line, max_text),
    })
}

/// Split off the next whitespace-delimited token
fn next_token(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }
    let end = input.find(char::is_whitespace).unwrap_or(input.len());
    Some(input.split_at(end))
}
