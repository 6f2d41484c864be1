use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::errors::ServiceError;
use crate::wish::repository::WishRepository;
use crate::wish::{UpsertOutcome, Wish};

/// Wish business service independent of transport.
pub struct WishStore<R: WishRepository> {
    repo: Arc<R>,
}

impl<R: WishRepository> WishStore<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn list(&self) -> Result<Vec<Wish>, ServiceError> {
        let wishes = self.repo.list().await?;
        info!(count = wishes.len(), "list wishes");
        Ok(wishes)
    }

    pub async fn exists(&self, id: i32) -> Result<bool, ServiceError> { self.repo.exists(id).await }

    /// Insert a new wish or move an existing one to the incoming status.
    ///
    /// An existing row whose `calendar_id` or `owner` differ is left as is and
    /// reported as [`UpsertOutcome::Skipped`]; callers treat that as success.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::wish::{repository::memory::MemoryWishRepository, UpsertOutcome, Wish, WishStore};
    /// let store = WishStore::new(Arc::new(MemoryWishRepository::default()));
    /// let wish = Wish { id: 1, calendar_id: 3, owner: "ana".into(), status: "open".into(), description: "kite".into(), title: "kite".into() };
    /// assert_eq!(tokio_test::block_on(store.upsert(wish.clone())).unwrap(), UpsertOutcome::Applied);
    /// let thief = Wish { owner: "bo".into(), status: "taken".into(), ..wish };
    /// assert_eq!(tokio_test::block_on(store.upsert(thief)).unwrap(), UpsertOutcome::Skipped);
    /// ```
    #[instrument(skip(self, wish), fields(id = wish.id, calendar_id = wish.calendar_id, owner = %wish.owner))]
    pub async fn upsert(&self, wish: Wish) -> Result<UpsertOutcome, ServiceError> {
        let outcome = self.repo.upsert(wish).await?;
        match outcome {
            UpsertOutcome::Applied => info!(event = "wish_upserted", "wish written"),
            UpsertOutcome::Skipped => {
                warn!(event = "wish_upsert_skipped", "calendar_id or owner differ from stored row; nothing written")
            }
        }
        Ok(outcome)
    }
}
