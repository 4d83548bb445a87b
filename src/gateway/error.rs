//! Gateway Error Types
//!
//! Only two conditions fail a write: an oversized command and a message
//! that could not be allocated. Everything else is absorbed and logged.

use std::io;
use thiserror::Error;
use crate::queue::QueueError;

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors reported to the writer of a command
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Command exceeded the maximum write size and was not parsed
    #[error("Invalid argument: command of {len} bytes exceeds the {max} byte limit")]
    InvalidArgument { len: usize, max: usize },

    /// The queue engine rejected the operation
    #[error(transparent)]
    Queue(#[from] QueueError),
}

impl From<GatewayError> for io::Error {
    fn from(error: GatewayError) -> Self {
        let kind = match error {
            GatewayError::InvalidArgument { .. } => io::ErrorKind::InvalidInput,
            GatewayError::Queue(QueueError::AllocationFailure) => io::ErrorKind::OutOfMemory,
            GatewayError::Queue(QueueError::EmptyQueue) => io::ErrorKind::Other,
        };
        io::Error::new(kind, error)
    }
}
