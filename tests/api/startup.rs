use secrecy::SecretString;

use cloeve_mail::configuration::Settings;
use cloeve_mail::startup::Application;
use cloeve_mail::store::SqliteSubscriberStore;

#[tokio::test]
async fn the_application_refuses_to_start_without_an_admin_password_hash() {
    let db_pool = SqliteSubscriberStore::in_memory_pool()
        .await
        .expect("Failed to open in-memory database");

    for password_hash in ["", "not-a-phc-string"] {
        let mut config = Settings::get_config().expect("Failed to read configuration");
        config.application.app_port = 0;
        config.admin.password_hash = SecretString::from(password_hash.to_string());

        let result = Application::build_with_db_pool(config, &db_pool).await;

        assert!(result.is_err(), "The application started with password hash {password_hash:?}");
    }
}
