//! Application orchestration module

pub mod host;
pub mod initialization;

pub use host::ChannelHost;
pub use initialization::{
    load_configuration,
    configure_logging,
    configure_queue
};
