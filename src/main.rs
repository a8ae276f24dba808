use std::io;

use cloeve_mail::configuration::Settings;
use cloeve_mail::startup::Application;
use cloeve_mail::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = get_subscriber("cloeve-mail".into(), "info".into(), io::stdout);
    init_subscriber(subscriber);

    // Retrieve settings
    let config = Settings::get_config()?;

    // Build and run the application
    Application::build(config).await?.run_until_stopped().await?;

    Ok(())
}
