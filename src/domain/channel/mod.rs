pub mod error;
pub mod model;
pub mod service;
pub mod store;

pub use error::ChannelServiceError;
pub use model::Channel;
pub use service::ChannelService;
pub use store::ChannelStore;

use serde::{Deserialize, Serialize};

/// Request to create a new channel
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateChannelRequest {
    pub name: String,
}
