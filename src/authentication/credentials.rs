use actix_web::http::header::{HeaderMap, AUTHORIZATION};
use anyhow::Context;
use argon2::{Argon2, PasswordHash, PasswordVerifier};
use base64::Engine;
use secrecy::{ExposeSecret, SecretString};

use crate::configuration::AdminSettings;
use crate::telemetry::spawn_blocking_with_tracing;

/// Fallback hash in case an invalid username is provided during authentication
const FALLBACK_HASH: &str =
    "$argon2id$v=19$m=15000,t=2,p=1$gZiV/M1gPc22ElAH/Jh1Hw$CWOrkoo7oJBQ/iyh7uJ0LO2aLEfrHwTWllSAxT0zRno";

/// Authentication credentials data
#[derive(Debug)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

/// Authenticated administrator
#[derive(Clone, Debug)]
pub struct AdminUser(String);

impl AdminUser {
    pub fn username(&self) -> &str {
        &self.0
    }
}

/// Authentication error type
#[derive(thiserror::Error, Debug)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials(#[source] anyhow::Error),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

/// Extract credentials from the `Authorization` header, using the Basic scheme
pub fn basic_authentication(headers: &HeaderMap) -> anyhow::Result<Credentials> {
    let header_value = headers
        .get(AUTHORIZATION)
        .context("The 'Authorization' header was missing")?
        .to_str()
        .context("The 'Authorization' header was not a valid UTF8 string")?;
    let encoded_segment = header_value
        .strip_prefix("Basic ")
        .context("The authorization scheme was not 'Basic'")?;
    let decoded_bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded_segment)
        .context("Failed to base64-decode 'Basic' credentials")?;
    let decoded_credentials =
        String::from_utf8(decoded_bytes).context("The decoded credential string is not valid UTF8")?;

    let (username, password) = decoded_credentials
        .split_once(':')
        .context("A username and a password must be provided in 'Basic' auth")?;
    Ok(Credentials {
        username: username.to_string(),
        password: SecretString::from(password.to_string()),
    })
}

/// Check that an administrator password hash was configured before serving requests
///
/// The hash must be a PHC string other than the fallback hash.
pub fn ensure_admin_configured(settings: &AdminSettings) -> anyhow::Result<()> {
    let password_hash = settings.password_hash.expose_secret();
    if password_hash.trim().is_empty() {
        anyhow::bail!(
            "No admin password hash configured, set `admin.password_hash` or CLOEVE_MAIL__ADMIN__PASSWORD_HASH"
        );
    }
    if password_hash == FALLBACK_HASH {
        anyhow::bail!("The admin password hash must not be the built-in fallback hash");
    }
    PasswordHash::new(password_hash)
        .map_err(|e| anyhow::anyhow!("{e}"))
        .context("The admin password hash is not a valid PHC string")?;
    Ok(())
}

/// Validate provided credentials against the configured administrator
#[tracing::instrument(name = "Validate admin credentials", skip(creds, settings))]
pub async fn validate_admin(
    creds: Credentials,
    settings: &AdminSettings,
) -> Result<AdminUser, AuthError> {
    // Hash against a fallback for unknown usernames too, to prevent timing attacks
    let known_user = creds.username == settings.username;
    let expected_password_hash = if known_user {
        settings.password_hash.clone()
    } else {
        SecretString::from(FALLBACK_HASH.to_string())
    };

    // Verify provided password against stored password hash
    spawn_blocking_with_tracing(move || {
        verify_password_hash(&expected_password_hash, &creds.password)
    })
    .await
    .context("Failed to spawn blocking task")??;

    if known_user {
        Ok(AdminUser(settings.username.clone()))
    } else {
        Err(AuthError::InvalidCredentials(anyhow::anyhow!(
            "Unknown username"
        )))
    }
}

/// Compare computed and stored password hashes
#[tracing::instrument(name = "Verify password hash", skip(password_hash, password))]
fn verify_password_hash(
    password_hash: &SecretString,
    password: &SecretString,
) -> Result<(), AuthError> {
    // Parse stored password hash from PHC string format
    let password_hash =
        PasswordHash::new(password_hash.expose_secret()).context("Invalid stored password hash")?;

    // Compare computed and stored password hashes
    Argon2::default()
        .verify_password(password.expose_secret().as_bytes(), &password_hash)
        .context("Invalid password")
        .map_err(AuthError::InvalidCredentials)
}
