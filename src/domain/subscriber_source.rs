use crate::domain::{contains_forbidden, escape_html, truncate_escaped};

/// Source recorded when the originating page is missing or untrustworthy
pub const UNKNOWN_SOURCE: &str = "UNKNOWN";

/// Maximum length of the stored source column, in characters
const MAX_LEN: usize = 255;

/// Page a subscription was submitted from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriberSource(String);

impl SubscriberSource {
    /// Sanitize a raw source page path
    ///
    /// Never fails: anything that cannot be trusted becomes [`UNKNOWN_SOURCE`].
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::unknown();
        };
        if contains_forbidden(raw) {
            return Self::unknown();
        }

        // Collapse line breaks, tabs and repeated spaces, escape, then cap the stored length
        let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        let source = truncate_escaped(&escape_html(&collapsed), MAX_LEN);

        if source.is_empty() || contains_forbidden(&source) {
            Self::unknown()
        } else {
            Self(source)
        }
    }

    /// Placeholder source
    pub fn unknown() -> Self {
        Self(UNKNOWN_SOURCE.to_string())
    }
}

impl AsRef<str> for SubscriberSource {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
