use super::error::FreetServiceError;
use super::store::FreetStore;
use super::{Freet, FreetResponse};
use crate::domain::user::UserStore;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

const MAX_CONTENT_LENGTH: usize = 140;

pub struct FreetService {
    freet_store: Arc<dyn FreetStore>,
    user_store: Arc<dyn UserStore>,
}

impl FreetService {
    pub fn new(freet_store: Arc<dyn FreetStore>, user_store: Arc<dyn UserStore>) -> Self {
        Self {
            freet_store,
            user_store,
        }
    }

    pub async fn create(
        &self,
        author_id: Uuid,
        content: &str,
        tags: Vec<String>,
    ) -> Result<FreetResponse, FreetServiceError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(FreetServiceError::Invalid(
                "Freet content must not be empty".to_string(),
            ));
        }
        if content.chars().count() > MAX_CONTENT_LENGTH {
            return Err(FreetServiceError::Invalid(format!(
                "Freet content must be at most {} characters",
                MAX_CONTENT_LENGTH
            )));
        }

        let tags = normalize_tags(tags)?;

        let freet = self.freet_store.create(author_id, content, &tags).await?;

        tracing::debug!(freet_id = %freet.id, author_id = %author_id, "Freet created");

        self.to_responses(vec![freet])
            .await?
            .pop()
            .ok_or_else(|| FreetServiceError::Dependency("missing freet author".to_string()))
    }

    pub async fn list_all(&self) -> Result<Vec<FreetResponse>, FreetServiceError> {
        let freets = self.freet_store.find_all().await?;
        self.to_responses(freets).await
    }

    pub async fn list_by_author(
        &self,
        author_username: &str,
    ) -> Result<Vec<FreetResponse>, FreetServiceError> {
        let author = self
            .user_store
            .find_by_username(author_username)
            .await?
            .ok_or(FreetServiceError::NotFound)?;

        let freets = self.freet_store.find_by_author(author.id).await?;
        self.to_responses(freets).await
    }

    pub async fn list_by_tag(&self, tag: &str) -> Result<Vec<FreetResponse>, FreetServiceError> {
        let freets = self.freet_store.find_by_tag(tag).await?;
        self.to_responses(freets).await
    }

    /// Only the author may delete a freet. A freet owned by someone else
    /// is reported as not found, same as an absent one.
    pub async fn delete(&self, author_id: Uuid, freet_id: Uuid) -> Result<(), FreetServiceError> {
        let freet = self
            .freet_store
            .find_by_id(freet_id)
            .await?
            .ok_or(FreetServiceError::NotFound)?;

        if freet.author_id != author_id {
            return Err(FreetServiceError::NotFound);
        }

        self.freet_store.delete(freet_id).await?;
        Ok(())
    }

    /// Replace author ids with usernames, resolving each author once.
    async fn to_responses(
        &self,
        freets: Vec<Freet>,
    ) -> Result<Vec<FreetResponse>, FreetServiceError> {
        let mut usernames: HashMap<Uuid, String> = HashMap::new();
        for freet in &freets {
            if !usernames.contains_key(&freet.author_id) {
                let username = self
                    .user_store
                    .find_by_id(freet.author_id)
                    .await?
                    .map(|u| u.username)
                    .unwrap_or_else(|| "[deleted]".to_string());
                usernames.insert(freet.author_id, username);
            }
        }

        Ok(freets
            .into_iter()
            .map(|freet| {
                let author = usernames
                    .get(&freet.author_id)
                    .cloned()
                    .unwrap_or_else(|| "[deleted]".to_string());
                FreetResponse {
                    id: freet.id,
                    author,
                    content: freet.content,
                    tags: freet.tags,
                    created_at: freet.created_at,
                }
            })
            .collect())
    }
}

fn normalize_tags(tags: Vec<String>) -> Result<Vec<String>, FreetServiceError> {
    let mut normalized: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.trim().to_lowercase();
        if tag.is_empty() {
            return Err(FreetServiceError::Invalid(
                "Tags must not be empty".to_string(),
            ));
        }
        if !normalized.contains(&tag) {
            normalized.push(tag);
        }
    }
    Ok(normalized)
}
