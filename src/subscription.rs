use std::fmt;
use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;

use crate::domain::{EmailError, NewSubscriber, SubscriberEmail, SubscriberId, SubscriberSource};
use crate::store::SubscriberStore;
use crate::utils::error_chain_fmt;

/// Subscription error type
#[derive(thiserror::Error)]
pub enum SubscribeError {
    #[error(transparent)]
    InvalidEmail(#[from] EmailError),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl fmt::Debug for SubscribeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Intake of new subscriptions
pub struct SubscriptionService {
    store: Arc<dyn SubscriberStore>,
}

impl SubscriptionService {
    pub fn new(store: Arc<dyn SubscriberStore>) -> Self {
        Self { store }
    }

    /// Sanitize, validate and store a submitted email address
    ///
    /// The same address can subscribe any number of times, each submission gets its own record.
    #[tracing::instrument(
        name = "Adding a new subscriber",
        skip(self, email, source),
        fields(subscriber_email = tracing::field::Empty, subscriber_source = tracing::field::Empty)
    )]
    pub async fn subscribe(
        &self,
        email: Option<&str>,
        source: Option<&str>,
    ) -> Result<SubscriberId, SubscribeError> {
        let email = SubscriberEmail::parse(email.unwrap_or_default())?;
        let source = SubscriberSource::parse(source);
        tracing::Span::current()
            .record("subscriber_email", tracing::field::display(email.as_ref()))
            .record("subscriber_source", tracing::field::display(source.as_ref()));

        let new_subscriber = NewSubscriber { email, source };
        let subscriber_id = self
            .store
            .insert(&new_subscriber, Utc::now())
            .await
            .context("Failed to insert new subscriber in the database")?;

        tracing::info!(%subscriber_id, "New subscriber has been saved");
        Ok(subscriber_id)
    }
}
