use crate::domain::feed::FeedFilter;
use crate::domain::freet::FreetStore;
use crate::domain::user::UserStore;
use crate::error::AppResult;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

/// Computes the ordered post-id list for a feed from its active filter.
///
/// Selection is mutually exclusive: latest takes everything, following keeps
/// posts whose author is in the owner's following set, anything else selects
/// by tag. Store order (insertion order) is preserved in all branches.
pub struct FeedMaterializer {
    freet_store: Arc<dyn FreetStore>,
    user_store: Arc<dyn UserStore>,
}

impl FeedMaterializer {
    pub fn new(freet_store: Arc<dyn FreetStore>, user_store: Arc<dyn UserStore>) -> Self {
        Self {
            freet_store,
            user_store,
        }
    }

    pub async fn materialize(
        &self,
        owner_id: Uuid,
        filter: &FeedFilter,
    ) -> AppResult<Vec<Uuid>> {
        match filter {
            FeedFilter::Latest => {
                let freets = self.freet_store.find_all().await?;
                Ok(freets.into_iter().map(|f| f.id).collect())
            }
            FeedFilter::Following => {
                let following: HashSet<Uuid> = self
                    .user_store
                    .following_ids(owner_id)
                    .await?
                    .into_iter()
                    .collect();

                let freets = self.freet_store.find_all().await?;
                Ok(freets
                    .into_iter()
                    .filter(|f| following.contains(&f.author_id))
                    .map(|f| f.id)
                    .collect())
            }
            FeedFilter::Tag(tag) => {
                let freets = self.freet_store.find_by_tag(tag).await?;
                Ok(freets.into_iter().map(|f| f.id).collect())
            }
        }
    }
}
