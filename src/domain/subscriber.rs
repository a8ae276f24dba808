use std::fmt;
use std::ops::Deref;

use chrono::{DateTime, Utc};

/// Subscriber identifier, assigned by the store and never reused
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(i64);

impl SubscriberId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Parse an identifier coming from a request parameter
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse().ok().filter(|id| *id > 0).map(Self)
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Deref for SubscriberId {
    type Target = i64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Stored subscriber
///
/// Email and source were sanitized when the record was created and are not validated again.
#[derive(Clone, Debug)]
pub struct Subscriber {
    pub id: SubscriberId,
    pub email: String,
    pub source: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
