//! Command Gateway
//!
//! Translates textual commands into engine operations. A write is checked
//! against the command size limit, parsed, and dispatched; malformed and
//! unknown commands are logged and otherwise ignored, so the write still
//! reports the bytes it consumed.

use std::sync::Arc;
use log::{debug, info, warn};

use crate::gateway::command::{self, Command, MalformedSend};
use crate::gateway::error::{GatewayError, GatewayResult};
use crate::gateway::status::render_status;
use crate::queue::{Message, PriorityLevel, PriorityMessageQueue, QueueConfig, QueueError, QueueSnapshot};

/// What a successful write did to the queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// A message was enqueued at the given level
    Sent(PriorityLevel),
    /// A message was dequeued and handed to the writer
    Received(Message),
    /// Receive found the queue empty
    Empty,
    /// A send command could not be parsed
    Malformed(MalformedSend),
    /// Neither grammar matched
    Unrecognized,
}

/// Result of a successful write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    /// Bytes consumed from the write, always the full input
    pub consumed: usize,
    pub effect: Effect,
}

/// Gateway between the textual channel and the queue engine
#[derive(Debug)]
pub struct CommandGateway {
    queue: Arc<PriorityMessageQueue>,
    channel_name: String,
    max_text: usize,
    max_command: usize,
    status_buffer: usize,
}

impl CommandGateway {
    pub fn new(queue: Arc<PriorityMessageQueue>, config: &QueueConfig) -> Self {
        Self {
            queue,
            channel_name: config.channel_name.clone(),
            max_text: config.max_text,
            max_command: config.max_command,
            status_buffer: config.status_buffer,
        }
    }

    /// The engine behind this gateway
    pub fn queue(&self) -> &Arc<PriorityMessageQueue> {
        &self.queue
    }

    pub fn channel_name(&self) -> &str {
        &self.channel_name
    }

    /// Largest status report this gateway renders
    pub fn status_capacity(&self) -> usize {
        self.status_buffer
    }

    /// Handle one write and report what it did
    pub fn write_command(&self, input: &[u8]) -> GatewayResult<WriteOutcome> {
        if input.len() > self.max_command {
            warn!("Rejected command of {} bytes (limit {})", input.len(), self.max_command);
            return Err(GatewayError::InvalidArgument {
                len: input.len(),
                max: self.max_command,
            });
        }

        // Invalid bytes become U+FFFD; keyword and integer fields are ASCII
        let line = String::from_utf8_lossy(input);
        let effect = self.dispatch(&line)?;

        Ok(WriteOutcome {
            consumed: input.len(),
            effect,
        })
    }

    /// Handle one write, returning the number of bytes consumed
    pub fn write(&self, input: &[u8]) -> GatewayResult<usize> {
        self.write_command(input).map(|outcome| outcome.consumed)
    }

    fn dispatch(&self, line: &str) -> GatewayResult<Effect> {
        match command::parse(line, self.max_text) {
            Command::Send { sender_id, priority_type, text } => {
                debug!("Send from PID {} with type {}: {}", sender_id, priority_type, text);
                let level = self.queue.enqueue(sender_id, priority_type, text)?;
                Ok(Effect::Sent(level))
            }
            Command::Receive => match self.queue.dequeue() {
                Ok(message) => {
                    info!("User received: {}", message);
                    Ok(Effect::Received(message))
                }
                Err(QueueError::EmptyQueue) => Ok(Effect::Empty),
                Err(e) => Err(e.into()),
            },
            Command::Malformed(reason) => {
                warn!("Malformed send command '{}': {}", line.trim_end(), reason);
                Ok(Effect::Malformed(reason))
            }
            Command::Unrecognized => {
                warn!("Unknown command: {}", line.trim_end());
                info!("Valid commands: S <pid> <type> <msg> or R");
                Ok(Effect::Unrecognized)
            }
        }
    }

    /// Consistent counts for a status query
    pub fn snapshot(&self) -> QueueSnapshot {
        self.queue.snapshot()
    }

    /// Render the status report from a single snapshot
    pub fn status_report(&self) -> String {
        let snapshot = self.queue.snapshot();
        render_status(&snapshot, self.queue.threshold(), &self.channel_name, self.status_buffer)
    }
}
