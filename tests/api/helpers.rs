use std::{env, io, sync};

use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHasher, Version};
use chrono::Utc;
use fake::faker::internet::en::{Password, Username};
use fake::Fake;
use secrecy::SecretString;
use sqlx::SqlitePool;

use cloeve_mail::authentication::ActionTokens;
use cloeve_mail::configuration::Settings;
use cloeve_mail::domain::{Subscriber, SubscriberId};
use cloeve_mail::startup::Application;
use cloeve_mail::store::{SqliteSubscriberStore, SubscriberStore};
use cloeve_mail::telemetry::{get_subscriber, init_subscriber};

/// Ensure the tracing stack is initialized only once
static TRACING: sync::LazyLock<()> = sync::LazyLock::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    if env::var("TEST_LOG").is_ok() {
        init_subscriber(get_subscriber(
            subscriber_name,
            default_filter_level,
            io::stdout,
        ));
    } else {
        init_subscriber(get_subscriber(
            subscriber_name,
            default_filter_level,
            io::sink,
        ));
    };
});

/// Test application data
pub struct TestApp {
    pub address: String,
    pub store: SqliteSubscriberStore,
    pub test_admin: TestAdmin,
    pub tokens: ActionTokens,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spin up a test application on a private in-memory database and return its data
    pub async fn spawn() -> Self {
        // Initialize logging
        sync::LazyLock::force(&TRACING);

        let db_pool = SqliteSubscriberStore::in_memory_pool()
            .await
            .expect("Failed to open in-memory database");

        // Get settings and modify them for testing
        let test_admin = TestAdmin::generate();
        let config = {
            let mut c = Settings::get_config().expect("Failed to read configuration");
            // Listen on a random TCP port
            c.application.app_port = 0;
            // Display dates in a fixed timezone
            c.site.timezone = Some("UTC".into());
            c.admin.username.clone_from(&test_admin.username);
            c.admin.password_hash = SecretString::from(test_admin.password_hash());
            c
        };
        let tokens = ActionTokens::new(config.application.hmac_secret.clone());

        // Build the application and get its address
        let app = Application::build_with_db_pool(config, &db_pool)
            .await
            .expect("Failed to build application");
        let address = format!("http://127.0.0.1:{}", app.port());

        // Run the application and return its data
        #[allow(clippy::let_underscore_future)]
        let _ = tokio::spawn(app.run_until_stopped());
        Self {
            address,
            store: SqliteSubscriberStore::new(db_pool),
            test_admin,
            tokens,
            api_client: reqwest::Client::new(),
        }
    }

    /// POST a form-urlencoded body to the public subscription endpoint
    pub async fn post_subscribe_email(&self, body: &str) -> reqwest::Response {
        self.api_client
            .post(format!("{}/subscribe_email", &self.address))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body.to_string())
            .send()
            .await
            .expect("Failed to send request")
    }

    /// Subscribe an email from a page using the public API, return its id
    pub async fn create_subscriber(&self, email: &str, source: &str) -> SubscriberId {
        self.api_client
            .post(format!("{}/subscribe_email", &self.address))
            .form(&[("email", email), ("source", source)])
            .send()
            .await
            .expect("Failed to send request")
            .error_for_status()
            .unwrap();
        self.stored_subscribers().await.last().unwrap().id
    }

    /// Every stored subscriber, in insertion order
    pub async fn stored_subscribers(&self) -> Vec<Subscriber> {
        self.store
            .fetch_all()
            .await
            .expect("Failed to fetch stored subscribers")
    }

    /// GET an admin path with the test admin credentials
    pub async fn get_as_admin(&self, path_and_query: &str) -> reqwest::Response {
        self.api_client
            .get(format!("{}{path_and_query}", &self.address))
            .basic_auth(&self.test_admin.username, Some(&self.test_admin.password))
            .send()
            .await
            .expect("Failed to send request")
    }

    /// POST a form to the admin list with the test admin credentials
    pub async fn post_admin_subscribers(&self, form: &[(&str, &str)]) -> reqwest::Response {
        self.api_client
            .post(format!("{}/admin/subscribers", &self.address))
            .basic_auth(&self.test_admin.username, Some(&self.test_admin.password))
            .form(form)
            .send()
            .await
            .expect("Failed to send request")
    }

    /// Issue an action token for the test admin
    pub fn action_token(&self, action: &str) -> String {
        self.tokens.issue(action, &self.test_admin.username, Utc::now())
    }
}

/// Test administrator credentials
pub struct TestAdmin {
    pub username: String,
    pub password: String,
}

impl TestAdmin {
    /// Generate new test authentication credentials
    pub fn generate() -> Self {
        Self {
            username: Username().fake(),
            password: Password(32..33).fake(),
        }
    }

    /// Return PHC string for the test password and a random salt
    fn password_hash(&self) -> String {
        let salt = SaltString::generate(&mut rand::thread_rng());
        Argon2::new(
            Algorithm::Argon2id,
            Version::V0x13,
            Params::new(15000, 2, 1, None).unwrap(),
        )
        .hash_password(self.password.as_bytes(), &salt)
        .unwrap()
        .to_string()
    }
}

/// Assert: response is an authentication challenge
pub fn assert_is_auth_challenge(response: &reqwest::Response) {
    assert_eq!(response.status(), 401);
    assert_eq!(
        response.headers()["WWW-Authenticate"],
        r#"Basic realm="cloeve-mail""#
    );
}
