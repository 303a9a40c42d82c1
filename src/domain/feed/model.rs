use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The selection rule currently applied to a feed.
///
/// Parsed exactly once, at the boundary where the filter is assigned.
/// Anything that is not `latest` or `following` is a content tag,
/// lowercased to line up with how freet tags are stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FeedFilter {
    Latest,
    Following,
    Tag(String),
}

#[derive(Debug, thiserror::Error)]
#[error("active filter must not be empty")]
pub struct EmptyFilterError;

impl FeedFilter {
    pub fn parse(raw: &str) -> Result<Self, EmptyFilterError> {
        let raw = raw.trim().to_lowercase();
        if raw.is_empty() {
            return Err(EmptyFilterError);
        }
        Ok(match raw.as_str() {
            "latest" => FeedFilter::Latest,
            "following" => FeedFilter::Following,
            _ => FeedFilter::Tag(raw),
        })
    }

    pub fn as_str(&self) -> &str {
        match self {
            FeedFilter::Latest => "latest",
            FeedFilter::Following => "following",
            FeedFilter::Tag(tag) => tag,
        }
    }
}

impl std::fmt::Display for FeedFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for FeedFilter {
    type Error = EmptyFilterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        FeedFilter::parse(&value)
    }
}

impl From<FeedFilter> for String {
    fn from(filter: FeedFilter) -> Self {
        filter.to_string()
    }
}

/// The persisted per-user feed record. `posts` is always a complete
/// materialization for `active_filter` as of `last_refresh`; it is replaced
/// wholesale on every refresh, never merged.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Feed {
    pub id: Uuid,
    pub owner_id: Uuid,
    #[sqlx(try_from = "String")]
    pub active_filter: FeedFilter,
    pub posts: Vec<Uuid>,
    pub last_refresh: DateTime<Utc>,
}
