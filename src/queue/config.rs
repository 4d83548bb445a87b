//! Queue and Channel Configuration
//!
//! Static parameters for the priority queue engine and the command channel
//! in front of it: the classification threshold, the payload and command
//! bounds, the status buffer size and the name the channel is exposed under.
//!
//! ```rust
//! use pmq::queue::QueueConfig;
//!
//! let config = QueueConfig::builder()
//!     .with_high_threshold(7)
//!     .with_channel_name("ipc".to_string())
//!     .build()?;
//! assert_eq!(config.high_threshold, 7);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};
use crate::queue::message::{DEFAULT_HIGH_THRESHOLD, MAX_PAYLOAD_LEN, MESSAGE_SIZE};

/// Longest text a single send command may carry
pub const MAX_TEXT_FIELD_LEN: usize = 63;

/// Longest command accepted by one write
pub const MAX_COMMAND_LEN: usize = 128;

/// Capacity of the rendered status report
pub const STATUS_BUFFER_SIZE: usize = 512;

/// Default name the channel is registered under
pub const DEFAULT_CHANNEL_NAME: &str = "pmq";

/// Queue and channel configuration parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Type value at or above which a message is high priority
    pub high_threshold: i32,
    /// Payload bound applied by the engine
    pub max_payload: usize,
    /// Text bound applied by the send command
    pub max_text: usize,
    /// Longest accepted write, in bytes
    pub max_command: usize,
    /// Status report capacity, in bytes
    pub status_buffer: usize,
    /// Name the channel is exposed under
    pub channel_name: String,
}

/// Configuration validation error
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Maximum payload must be greater than zero")]
    InvalidMaxPayload,
    #[error("Maximum payload must be less than the message size ({MESSAGE_SIZE})")]
    PayloadTooLarge,
    #[error("Maximum text length must be between 1 and the maximum payload")]
    InvalidMaxText,
    #[error("Maximum command length must be greater than zero")]
    InvalidMaxCommand,
    #[error("Status buffer size must be greater than zero")]
    InvalidStatusBuffer,
    #[error("Channel name must not be empty")]
    EmptyChannelName,
}

/// Configuration builder for fluent API
#[derive(Debug)]
pub struct QueueConfigBuilder {
    config: QueueConfig,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            high_threshold: DEFAULT_HIGH_THRESHOLD,
            max_payload: MAX_PAYLOAD_LEN,
            max_text: MAX_TEXT_FIELD_LEN,
            max_command: MAX_COMMAND_LEN,
            status_buffer: STATUS_BUFFER_SIZE,
            channel_name: DEFAULT_CHANNEL_NAME.to_string(),
        }
    }
}

impl QueueConfig {
    /// Create a new configuration builder
    pub fn builder() -> QueueConfigBuilder {
        QueueConfigBuilder {
            config: QueueConfig::default(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_payload == 0 {
            return Err(ConfigError::InvalidMaxPayload);
        }

        if self.max_payload >= MESSAGE_SIZE {
            return Err(ConfigError::PayloadTooLarge);
        }

        if self.max_text == 0 || self.max_text > self.max_payload {
            return Err(ConfigError::InvalidMaxText);
        }

        if self.max_command == 0 {
            return Err(ConfigError::InvalidMaxCommand);
        }

        if self.status_buffer == 0 {
            return Err(ConfigError::InvalidStatusBuffer);
        }

        if self.channel_name.trim().is_empty() {
            return Err(ConfigError::EmptyChannelName);
        }

        Ok(())
    }
}

impl QueueConfigBuilder {
    pub fn with_high_threshold(mut self, threshold: i32) -> Self {
        self.config.high_threshold = threshold;
        self
    }

    pub fn with_max_payload(mut self, bytes: usize) -> Self {
        self.config.max_payload = bytes;
        self
    }

    pub fn with_max_text(mut self, bytes: usize) -> Self {
        self.config.max_text = bytes;
        self
    }

    pub fn with_max_command(mut self, bytes: usize) -> Self {
        self.config.max_command = bytes;
        self
    }

    pub fn with_status_buffer(mut self, bytes: usize) -> Self {
        self.config.status_buffer = bytes;
        self
    }

    pub fn with_channel_name(mut self, name: String) -> Self {
        self.config.channel_name = name;
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<QueueConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
