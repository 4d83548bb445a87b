//! Command Gateway
//!
//! The textual channel in front of the queue engine. Writes carry commands,
//! reads return a status report.
//!
//! ```text
//! write "S <pid> <type> <text>"  -> enqueue
//! write "R"                      -> dequeue
//! read                           -> status report (single shot)
//! ```
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use pmq::gateway::{ChannelHandle, CommandGateway, Effect};
//! use pmq::queue::{PriorityMessageQueue, QueueConfig};
//!
//! let config = QueueConfig::default();
//! let queue = Arc::new(PriorityMessageQueue::from_config(&config));
//! let mut channel = ChannelHandle::new(Arc::new(CommandGateway::new(queue, &config)));
//!
//! channel.write_command(b"S 1002 10 Urgent").unwrap();
//! let outcome = channel.write_command(b"R").unwrap();
//! assert!(matches!(outcome.effect, Effect::Received(_)));
//! assert!(channel.status().contains("Total messages: 0"));
//! ```

pub mod channel;
pub mod command;
pub mod command_gateway;
pub mod error;
pub mod status;

pub use channel::ChannelHandle;
pub use command::{Command, MalformedSend};
pub use command_gateway::{CommandGateway, Effect, WriteOutcome};
pub use error::{GatewayError, GatewayResult};
pub use status::render_status;
