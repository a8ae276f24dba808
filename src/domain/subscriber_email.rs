use validator::ValidateEmail;

use crate::domain::{contains_forbidden, escape_html};

/// Characters allowed in the local part, besides ASCII alphanumerics
const LOCAL_PART_SPECIALS: &str = "!#$%&'*+/=?^_`{|}~.-";

/// Maximum length of the stored email column
const MAX_LEN: usize = 255;

/// Email parsing error type
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum EmailError {
    #[error("{0:?} is not a valid subscriber email")]
    Malformed(String),
    #[error("{0:?} contains forbidden content")]
    Forbidden(String),
}

/// Subscriber email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriberEmail(String);

impl SubscriberEmail {
    /// Sanitize and validate a raw subscriber email
    pub fn parse(raw: &str) -> Result<Self, EmailError> {
        let email = escape_html(&strip_invalid_chars(raw));

        let has_qualified_domain = email
            .rsplit_once('@')
            .is_some_and(|(_, domain)| domain.contains('.'));
        if email.is_empty()
            || email.len() > MAX_LEN
            || !has_qualified_domain
            || !ValidateEmail::validate_email(&email)
        {
            return Err(EmailError::Malformed(raw.to_string()));
        }

        // Markup is gone at this point, but code fragments are only caught here
        if contains_forbidden(&email) {
            return Err(EmailError::Forbidden(raw.to_string()));
        }

        Ok(Self(email))
    }
}

impl AsRef<str> for SubscriberEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Remove characters that cannot appear in an email address
///
/// Returns an empty string when the input cannot be turned into `local@domain.tld`.
fn strip_invalid_chars(raw: &str) -> String {
    let raw = raw.trim();

    // An `@` is required, and it cannot be the first character
    let Some(at) = raw.get(1..).and_then(|rest| rest.find('@')).map(|i| i + 1) else {
        return String::new();
    };
    let (local, domain) = (&raw[..at], &raw[at + 1..]);

    let local: String = local
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || LOCAL_PART_SPECIALS.contains(*c))
        .collect();
    if local.is_empty() {
        return String::new();
    }

    let domain = domain.trim_matches(|c: char| c.is_whitespace() || c == '.');
    if domain.contains("..") {
        return String::new();
    }
    let labels: Vec<String> = domain
        .split('.')
        .map(|label| {
            label
                .chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
                .collect::<String>()
                .trim_matches('-')
                .to_string()
        })
        .filter(|label| !label.is_empty())
        .collect();
    if labels.len() < 2 {
        return String::new();
    }

    format!("{local}@{}", labels.join("."))
}
