//! Priority Message Queue
//!
//! The queue engine behind the command channel: message records, the
//! two-level FIFO engine and the single lock that guards it.
//!
//! # Architecture
//!
//! - **Message**: immutable record with sender id, priority type and bounded text
//! - **PriorityMessageQueue**: `high` and `normal` FIFO sequences plus a total
//!   count, all behind one `parking_lot::Mutex`
//! - **QueueSnapshot**: counts read in a single critical section
//!
//! # Usage
//!
//! ```rust
//! use pmq::queue::{PriorityMessageQueue, QueueError};
//!
//! let queue = PriorityMessageQueue::default();
//! queue.enqueue(1001, 3, "HelloNormal").unwrap();
//! queue.enqueue(1002, 10, "HelloHigh").unwrap();
//!
//! assert_eq!(queue.dequeue().unwrap().text(), "HelloHigh");
//! assert_eq!(queue.dequeue().unwrap().text(), "HelloNormal");
//! assert_eq!(queue.dequeue(), Err(QueueError::EmptyQueue));
//! ```

pub mod config;
pub mod error;
pub mod message;
pub mod priority_queue;
pub mod statistics;

// Re-export main types for convenience
pub use config::{ConfigError, QueueConfig, QueueConfigBuilder};
pub use error::{QueueError, QueueResult};
pub use message::{Message, MessageText, PriorityLevel, DEFAULT_HIGH_THRESHOLD, MAX_PAYLOAD_LEN, MESSAGE_SIZE};
pub use priority_queue::PriorityMessageQueue;
pub use statistics::QueueSnapshot;
