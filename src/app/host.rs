//! Channel host lifecycle: registration, handle hand-out and teardown

use anyhow::{Context, Result};
use log::{debug, info};
use std::sync::Arc;
use crate::gateway::{ChannelHandle, CommandGateway};
use crate::queue::{PriorityMessageQueue, QueueConfig};

/// Owns the engine and the gateway for the lifetime of the channel.
///
/// `teardown` consumes the host, so the drain-then-withdraw sequence runs at
/// most once. Handles opened earlier keep their own `Arc` to the gateway but
/// only ever see the drained queue afterwards.
pub struct ChannelHost {
    gateway: Arc<CommandGateway>,
}

impl ChannelHost {
    /// Validate the configuration, create the engine and expose the channel
    pub fn register(config: QueueConfig) -> Result<Self> {
        config
            .validate()
            .with_context(|| format!("Invalid queue configuration for channel '{}'", config.channel_name))?;

        let queue = Arc::new(PriorityMessageQueue::from_config(&config));
        let gateway = Arc::new(CommandGateway::new(queue, &config));

        debug!(
            "Channel '{}' limits: payload={} text={} command={} status={}",
            config.channel_name, config.max_payload, config.max_text, config.max_command, config.status_buffer
        );
        info!("IPC Priority Message Queue loaded");
        info!("Use: S <pid> <type> <msg> > {}", config.channel_name);
        info!("Use: R > {}", config.channel_name);
        info!("View status: read {}", config.channel_name);
        info!("Priority threshold: {} (>= HIGH, < NORMAL)", config.high_threshold);

        Ok(Self { gateway })
    }

    /// Open a new handle on the channel
    pub fn open(&self) -> ChannelHandle {
        ChannelHandle::new(Arc::clone(&self.gateway))
    }

    pub fn gateway(&self) -> &Arc<CommandGateway> {
        &self.gateway
    }

    pub fn queue(&self) -> &Arc<PriorityMessageQueue> {
        self.gateway.queue()
    }

    pub fn channel_name(&self) -> &str {
        self.gateway.channel_name()
    }

    /// Free every remaining message, then withdraw the channel.
    /// Returns the number of messages freed.
    pub fn teardown(self) -> usize {
        let freed = self.gateway.queue().drain();
        debug!("Withdrawing channel '{}'", self.gateway.channel_name());
        drop(self.gateway);
        info!("IPC Priority Message Queue unloaded");
        freed
    }
}
