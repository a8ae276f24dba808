use std::{env, time};

use config::{Config, ConfigError, Environment, File};
use secrecy::SecretString;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::ConnectOptions;
use tracing::log::LevelFilter;

use crate::domain::SiteTimezone;
use crate::listing::DEFAULT_PAGE_SIZE;

/// Settings
#[derive(Clone, serde::Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub site: SiteSettings,
    pub admin: AdminSettings,
}

impl Settings {
    /// Get settings from configuration files
    pub fn get_config() -> Result<Self, ConfigError> {
        let path = env::current_dir().map_err(|e| {
            ConfigError::Message(format!("Failed to determine the current directory: {e}"))
        })?;
        let config_dir = path.join("config");

        // Detect the running environment (default: `dev`)
        let env: Env = env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "dev".into())
            .try_into()
            .map_err(ConfigError::Message)?;

        // Read the configuration from files and environment variables
        Config::builder()
            // Base configuration file
            .add_source(File::from(config_dir.join("base.yaml")).required(true))
            // Environment-specific configuration file
            .add_source(File::from(config_dir.join(format!("{}.yaml", env.as_str()))).required(true))
            // Environment variables (e.g., `CLOEVE_MAIL__APPLICATION__APP_PORT=8888`
            // would set Settings.application.app_port to 8888)
            .add_source(Environment::with_prefix("CLOEVE_MAIL").separator("__"))
            .build()?
            .try_deserialize()
    }
}

/// Application settings
#[derive(Clone, serde::Deserialize)]
pub struct ApplicationSettings {
    pub app_host: String,
    pub app_port: u16,
    pub hmac_secret: SecretString,
}

/// Database settings
#[derive(Clone, serde::Deserialize)]
pub struct DatabaseSettings {
    pub filename: String,
    pub create_if_missing: bool,
    pub acquire_timeout_millis: u64,
}

impl DatabaseSettings {
    /// Generate options and flags that can be used to configure a database connection
    pub fn db_options(&self) -> SqliteConnectOptions {
        SqliteConnectOptions::new()
            .filename(&self.filename)
            .create_if_missing(self.create_if_missing)
            .log_statements(LevelFilter::Trace)
    }

    /// Get configured pool acquire timeout
    pub const fn acquire_timeout(&self) -> time::Duration {
        time::Duration::from_millis(self.acquire_timeout_millis)
    }
}

/// Site settings, used to present stored subscribers
#[derive(Clone, serde::Deserialize)]
pub struct SiteSettings {
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl SiteSettings {
    /// Resolve the configured display timezone
    pub fn timezone(&self) -> SiteTimezone {
        SiteTimezone::from_setting(self.timezone.as_deref())
    }
}

const fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// Admin credentials settings
#[derive(Clone, serde::Deserialize)]
pub struct AdminSettings {
    pub username: String,
    /// PHC string of the admin password
    pub password_hash: SecretString,
}

/// Available runtime environments
pub enum Env {
    Development,
    Production,
}

impl Env {
    /// Represent environment as a string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "dev",
            Self::Production => "prd",
        }
    }
}

impl TryFrom<String> for Env {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "dev" => Ok(Self::Development),
            "prd" => Ok(Self::Production),
            other => Err(format!(
                "`{other}` is not a supported environment. Use either `dev` or `prd`"
            )),
        }
    }
}
