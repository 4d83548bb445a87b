//! Queue Error Types
//!
//! Defines error types specific to the priority queue engine.

use thiserror::Error;

/// Result type for queue operations
pub type QueueResult<T> = Result<T, QueueError>;

/// Errors that can occur during queue operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueueError {
    /// A message record could not be allocated; nothing was enqueued
    #[error("Failed to allocate message")]
    AllocationFailure,

    /// Receive found both priority levels empty
    #[error("No messages available")]
    EmptyQueue,
}

impl QueueError {
    /// Whether the error must be reported to the caller as a failure.
    ///
    /// An empty queue is an expected idle state and is only logged.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::AllocationFailure)
    }
}
