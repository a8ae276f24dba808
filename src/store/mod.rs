//! Persistence of subscribers
//!
//! Services only see the [`SubscriberStore`] trait; [`SqliteSubscriberStore`] is the
//! implementation wired up at startup.

mod sqlite;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{NewSubscriber, Sort, Subscriber, SubscriberId};

pub use sqlite::SqliteSubscriberStore;

/// Store error type
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Failed to access the subscribers table")]
    Database(#[from] sqlx::Error),
}

/// Window of the subscriber list to fetch
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PageQuery {
    pub limit: u32,
    pub offset: u64,
    /// `None` keeps the store's natural (insertion) order
    pub sort: Option<Sort>,
}

/// Outcome of a best-effort bulk delete
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BulkDeleteReport {
    pub deleted: Vec<SubscriberId>,
    pub missing: Vec<SubscriberId>,
    pub failed: Vec<SubscriberId>,
}

/// Repository of subscribers, backed by a single relational table
#[async_trait]
pub trait SubscriberStore: Send + Sync {
    /// Create the subscribers table if it does not exist yet
    async fn ensure_schema(&self) -> Result<(), StoreError>;

    /// Insert a new subscriber and return its id
    async fn insert(
        &self,
        subscriber: &NewSubscriber,
        created_at: DateTime<Utc>,
    ) -> Result<SubscriberId, StoreError>;

    /// Fetch a window of subscribers
    async fn fetch_page(&self, query: &PageQuery) -> Result<Vec<Subscriber>, StoreError>;

    /// Fetch every subscriber in natural order
    async fn fetch_all(&self) -> Result<Vec<Subscriber>, StoreError>;

    /// Delete a subscriber, returning whether it existed
    async fn delete(&self, id: SubscriberId) -> Result<bool, StoreError>;

    /// Delete a set of subscribers one by one
    ///
    /// A failure on one id is logged and does not stop the others from being deleted.
    async fn delete_many(&self, ids: &[SubscriberId]) -> BulkDeleteReport {
        let mut report = BulkDeleteReport::default();
        for &id in ids {
            match self.delete(id).await {
                Ok(true) => report.deleted.push(id),
                Ok(false) => report.missing.push(id),
                Err(e) => {
                    tracing::error!(
                        error.cause_chain = ?e,
                        error.message = %e,
                        subscriber_id = %id,
                        "Failed to delete subscriber, continuing with the rest of the batch"
                    );
                    report.failed.push(id);
                }
            }
        }
        report
    }

    /// Count stored subscribers
    async fn count(&self) -> Result<u64, StoreError>;
}
