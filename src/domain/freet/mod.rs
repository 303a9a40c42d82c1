pub mod error;
pub mod model;
pub mod service;
pub mod store;

pub use error::FreetServiceError;
pub use model::Freet;
pub use service::FreetService;
pub use store::FreetStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Response for freet endpoints; the author id is replaced by the username
#[derive(Debug, Serialize, Deserialize)]
pub struct FreetResponse {
    pub id: Uuid,
    pub author: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Request to publish a new freet
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateFreetRequest {
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}
