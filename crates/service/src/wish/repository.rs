use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::wish::{UpsertOutcome, Wish};

/// Repository abstraction for wish persistence.
#[async_trait]
pub trait WishRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Wish>, ServiceError>;
    async fn exists(&self, id: i32) -> Result<bool, ServiceError>;
    /// Insert when `wish.id` is absent, otherwise write `status` if
    /// `calendar_id` and `owner` match the stored row.
    async fn upsert(&self, wish: Wish) -> Result<UpsertOutcome, ServiceError>;
}

/// In-memory repository with the same upsert rules as the SQL backend.
pub mod memory {
    use super::*;
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    pub struct MemoryWishRepository {
        rows: Mutex<Vec<Wish>>, // insertion order stands in for storage order
        fail_with: Option<String>,
    }

    impl MemoryWishRepository {
        pub fn with_rows(rows: Vec<Wish>) -> Self {
            Self { rows: Mutex::new(rows), fail_with: None }
        }

        /// Every call fails with `ServiceError::Storage(message)`.
        pub fn failing(message: &str) -> Self {
            Self { rows: Mutex::default(), fail_with: Some(message.to_string()) }
        }

        fn rows(&self) -> Result<MutexGuard<'_, Vec<Wish>>, ServiceError> {
            if let Some(msg) = &self.fail_with {
                return Err(ServiceError::Storage(msg.clone()));
            }
            self.rows
                .lock()
                .map_err(|_| ServiceError::Storage("wish rows lock poisoned".into()))
        }
    }

    #[async_trait]
    impl WishRepository for MemoryWishRepository {
        async fn list(&self) -> Result<Vec<Wish>, ServiceError> {
            Ok(self.rows()?.clone())
        }

        async fn exists(&self, id: i32) -> Result<bool, ServiceError> {
            Ok(self.rows()?.iter().any(|w| w.id == id))
        }

        async fn upsert(&self, wish: Wish) -> Result<UpsertOutcome, ServiceError> {
            let mut rows = self.rows()?;
            match rows.iter_mut().find(|w| w.id == wish.id) {
                None => {
                    rows.push(wish);
                    Ok(UpsertOutcome::Applied)
                }
                Some(stored) if stored.calendar_id == wish.calendar_id && stored.owner == wish.owner => {
                    stored.status = wish.status;
                    Ok(UpsertOutcome::Applied)
                }
                Some(_) => Ok(UpsertOutcome::Skipped),
            }
        }
    }
}
