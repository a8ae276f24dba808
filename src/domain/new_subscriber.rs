use crate::domain::{SubscriberEmail, SubscriberSource};

/// New subscriber
pub struct NewSubscriber {
    pub email: SubscriberEmail,
    pub source: SubscriberSource,
}
