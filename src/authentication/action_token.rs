use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

/// Action guarded by the single-delete token
pub const DELETE_ACTION: &str = "email_delete";

/// Action guarded by the bulk-delete token
pub const BULK_DELETE_ACTION: &str = "bulk-emails";

/// Tokens are valid for the tick they were issued in and the following one
const TICK_SECONDS: i64 = 12 * 60 * 60;

type HmacSha256 = Hmac<Sha256>;

/// Issuer and verifier of anti-forgery tokens for admin actions
///
/// A token is bound to an action name, an admin username and a 12-hour time window, so it
/// expires after 12 to 24 hours.
pub struct ActionTokens {
    secret: SecretString,
}

impl ActionTokens {
    pub const fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    /// Issue a token for `action` performed by `username`
    pub fn issue(&self, action: &str, username: &str, now: DateTime<Utc>) -> String {
        hex::encode(self.mac(action, username, tick(now)).finalize().into_bytes())
    }

    /// Check a token for `action` performed by `username`
    pub fn verify(&self, action: &str, username: &str, token: &str, now: DateTime<Utc>) -> bool {
        let Ok(tag) = hex::decode(token.trim()) else {
            return false;
        };
        let current = tick(now);
        [current, current - 1]
            .into_iter()
            .any(|t| self.mac(action, username, t).verify_slice(&tag).is_ok())
    }

    fn mac(&self, action: &str, username: &str, tick: i64) -> HmacSha256 {
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .expect("HMAC can take a key of any size");
        mac.update(format!("{action}|{username}|{tick}").as_bytes());
        mac
    }
}

/// Index of the time window `now` falls in
fn tick(now: DateTime<Utc>) -> i64 {
    now.timestamp().div_euclid(TICK_SECONDS) + 1
}
