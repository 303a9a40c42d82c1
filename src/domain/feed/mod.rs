pub mod error;
pub mod materializer;
pub mod model;
pub mod service;
pub mod store;

pub use error::FeedServiceError;
pub use materializer::FeedMaterializer;
pub use model::{Feed, FeedFilter};
pub use service::{FeedService, FeedServiceApi};
pub use store::FeedStore;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Response for feed endpoints; the owner id is replaced by the username
#[derive(Debug, Serialize)]
pub struct FeedResponse {
    pub id: Uuid,
    pub owner: String,
    pub active_filter: FeedFilter,
    pub freets: Vec<Uuid>,
    pub last_refresh: DateTime<Utc>,
}

/// Envelope returned by the feed endpoints
#[derive(Debug, Serialize)]
pub struct FeedEnvelope {
    pub message: String,
    pub feed: FeedResponse,
}
