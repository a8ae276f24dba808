use std::sync::Arc;

use crate::domain::{Sort, Subscriber, SubscriberId};
use crate::store::{BulkDeleteReport, PageQuery, StoreError, SubscriberStore};

/// Rows shown per admin page unless configured otherwise
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Requested admin page
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
    sort: Option<Sort>,
}

impl PageRequest {
    /// Build a page request, pages are numbered from 1
    pub fn new(page: u32, page_size: u32, sort: Option<Sort>) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
            sort,
        }
    }

    pub const fn page(&self) -> u32 {
        self.page
    }

    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    pub const fn sort(&self) -> Option<Sort> {
        self.sort
    }

    fn query(&self) -> PageQuery {
        PageQuery {
            limit: self.page_size,
            offset: u64::from(self.page - 1) * u64::from(self.page_size),
            sort: self.sort,
        }
    }
}

/// One page of the admin list
#[derive(Debug)]
pub struct SubscriberPage {
    pub rows: Vec<Subscriber>,
    pub total_count: u64,
    pub page: u32,
    pub page_size: u32,
}

impl SubscriberPage {
    /// Number of pages needed to show every subscriber
    pub fn total_pages(&self) -> u64 {
        self.total_count.div_ceil(u64::from(self.page_size))
    }
}

/// Admin view over stored subscribers
pub struct AdminListingService {
    store: Arc<dyn SubscriberStore>,
}

impl AdminListingService {
    pub fn new(store: Arc<dyn SubscriberStore>) -> Self {
        Self { store }
    }

    /// Fetch one page of subscribers together with the total count
    #[tracing::instrument(name = "List subscribers", skip(self))]
    pub async fn list_page(&self, request: &PageRequest) -> Result<SubscriberPage, StoreError> {
        let total_count = self.store.count().await?;
        let rows = self.store.fetch_page(&request.query()).await?;
        Ok(SubscriberPage {
            rows,
            total_count,
            page: request.page,
            page_size: request.page_size,
        })
    }

    /// Delete a single subscriber
    ///
    /// The caller is responsible for checking the `email_delete` action token beforehand.
    #[tracing::instrument(name = "Delete subscriber", skip(self))]
    pub async fn delete_one(&self, id: SubscriberId) -> Result<bool, StoreError> {
        self.store.delete(id).await
    }

    /// Delete every listed subscriber, skipping over failures
    #[tracing::instrument(name = "Bulk delete subscribers", skip(self, ids), fields(count = ids.len()))]
    pub async fn delete_bulk(&self, ids: &[SubscriberId]) -> BulkDeleteReport {
        let report = self.store.delete_many(ids).await;
        tracing::info!(
            deleted = report.deleted.len(),
            missing = report.missing.len(),
            failed = report.failed.len(),
            "Bulk delete completed"
        );
        report
    }
}
