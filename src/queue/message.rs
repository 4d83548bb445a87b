//! Message Types
//!
//! A message is created exactly once per successful send and is never mutated
//! afterwards. The text payload is a bounded, NUL-free string with a
//! deterministic truncation policy.

use std::fmt;
use serde::Serialize;
use crate::queue::error::{QueueError, QueueResult};

/// Size of a message record's text buffer, terminator included
pub const MESSAGE_SIZE: usize = 256;

/// Maximum number of payload bytes a message can carry
pub const MAX_PAYLOAD_LEN: usize = MESSAGE_SIZE - 1;

/// Type value at or above which a message is high priority
pub const DEFAULT_HIGH_THRESHOLD: i32 = 5;

/// Priority level a message was filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityLevel {
    High,
    Normal,
}

impl PriorityLevel {
    /// Classify a priority type against the threshold
    pub fn classify(priority_type: i32, threshold: i32) -> Self {
        if priority_type >= threshold {
            PriorityLevel::High
        } else {
            PriorityLevel::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityLevel::High => "high",
            PriorityLevel::Normal => "normal",
        }
    }
}

impl fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bounded, NUL-free message text
///
/// The input is cut at the first NUL byte and then to at most `max` bytes.
/// A cut that would split a UTF-8 character moves back to the preceding
/// character boundary, so ASCII input always keeps exactly `max` bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MessageText(String);

impl MessageText {
    /// Build a bounded text, reporting allocation failure instead of aborting
    pub fn new(text: &str, max: usize) -> QueueResult<Self> {
        let bounded = truncate(text, max);
        let mut owned = String::new();
        owned
            .try_reserve_exact(bounded.len())
            .map_err(|_| QueueError::AllocationFailure)?;
        owned.push_str(bounded);
        Ok(Self(owned))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for MessageText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Cut `text` at the first NUL, then to at most `max` bytes on a char boundary
pub fn truncate(text: &str, max: usize) -> &str {
    let text = match text.find('\0') {
        Some(nul) => &text[..nul],
        None => text,
    };
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// A queued IPC message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    sender_id: i32,
    priority_type: i32,
    level: PriorityLevel,
    text: MessageText,
}

impl Message {
    /// Create a message, classifying it once against `threshold`
    pub fn new(
        sender_id: i32,
        priority_type: i32,
        text: &str,
        threshold: i32,
        max_payload: usize,
    ) -> QueueResult<Self> {
        Ok(Self {
            sender_id,
            priority_type,
            level: PriorityLevel::classify(priority_type, threshold),
            text: MessageText::new(text, max_payload)?,
        })
    }

    pub fn sender_id(&self) -> i32 {
        self.sender_id
    }

    pub fn priority_type(&self) -> i32 {
        self.priority_type
    }

    /// Level chosen at enqueue time
    pub fn level(&self) -> PriorityLevel {
        self.level
    }

    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    pub fn is_high_priority(&self) -> bool {
        self.level == PriorityLevel::High
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PID={}, Type={}, Text={}", self.sender_id, self.priority_type, self.text)
    }
}
