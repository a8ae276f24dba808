use std::fmt;
use std::sync::Arc;

use anyhow::Context;
use csv::{QuoteStyle, WriterBuilder};

use crate::domain::{escape_html, SiteTimezone, Subscriber};
use crate::store::SubscriberStore;
use crate::utils::error_chain_fmt;

/// Name of the downloaded file
pub const CSV_FILENAME: &str = "cloeve_mail_list.csv";

/// Export error type
#[derive(thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl fmt::Debug for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// CSV export of the whole subscriber list
pub struct CsvExporter {
    store: Arc<dyn SubscriberStore>,
    timezone: SiteTimezone,
}

impl CsvExporter {
    pub fn new(store: Arc<dyn SubscriberStore>, timezone: SiteTimezone) -> Self {
        Self { store, timezone }
    }

    /// Render every stored subscriber as CSV
    #[tracing::instrument(name = "Export subscribers as CSV", skip(self))]
    pub async fn export(&self) -> Result<Vec<u8>, ExportError> {
        let subscribers = self
            .store
            .fetch_all()
            .await
            .context("Failed to fetch subscribers to export")?;
        Ok(write_csv(&subscribers, &self.timezone)?)
    }
}

/// Write the header and one row per exportable subscriber, in the given order
///
/// Fields are HTML-escaped before being quoted, the same way they are shown in the admin list.
pub fn write_csv(subscribers: &[Subscriber], timezone: &SiteTimezone) -> anyhow::Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer
        .write_record(["Email", "Source", "Date"])
        .context("Failed to write CSV header")?;
    for subscriber in subscribers.iter().filter(|s| is_exportable(&s.email)) {
        writer
            .write_record([
                escape_html(&subscriber.email),
                escape_html(&subscriber.source),
                escape_html(&timezone.format(subscriber.created_at)),
            ])
            .with_context(|| format!("Failed to write CSV row for subscriber {}", subscriber.id))?;
    }

    writer
        .into_inner()
        .map_err(|e| e.into_error())
        .context("Failed to flush CSV output")
}

/// Rows with a blank or literally `null` email are left out
fn is_exportable(email: &str) -> bool {
    let email = email.trim();
    !email.is_empty() && email != "null"
}
