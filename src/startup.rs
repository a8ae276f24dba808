use std::sync::Arc;
use std::{io, net};

use actix_web::dev::Server;
use actix_web::middleware::from_fn;
use actix_web::{web, App, HttpServer};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing_actix_web::TracingLogger;

use crate::authentication::{ensure_admin_configured, reject_unauthorized_admins, ActionTokens};
use crate::configuration::Settings;
use crate::export::CsvExporter;
use crate::listing::AdminListingService;
use crate::routes::{
    bulk_delete, embed_form, embed_script, export_csv, healthcheck, subscribe_email,
    subscribe_form_config, subscribers_page, ListSettings,
};
use crate::store::{SqliteSubscriberStore, SubscriberStore};
use crate::subscription::SubscriptionService;

/// Application
pub struct Application {
    server: Server,
    port: u16,
}

impl Application {
    /// Build an application based on settings
    pub async fn build(config: Settings) -> anyhow::Result<Self> {
        // Connect to the database
        let db_pool = SqlitePoolOptions::new()
            .acquire_timeout(config.database.acquire_timeout())
            .connect_lazy_with(config.database.db_options());

        // Run the HTTP server and return its data
        Self::build_with_db_pool(config, &db_pool).await
    }

    /// Build an application based on settings and database pool
    pub async fn build_with_db_pool(config: Settings, db_pool: &SqlitePool) -> anyhow::Result<Self> {
        // Refuse to serve the admin pages without a configured password
        ensure_admin_configured(&config.admin)?;

        // Create the subscribers table on first start
        let store: Arc<dyn SubscriberStore> = Arc::new(SqliteSubscriberStore::new(db_pool.clone()));
        store.ensure_schema().await?;

        // Run the HTTP server and return its data
        let listener = net::TcpListener::bind(format!(
            "{}:{}",
            config.application.app_host, config.application.app_port
        ))?;
        let port = listener.local_addr()?.port();
        let server = run_server(listener, store, config)?;
        Ok(Self { server, port })
    }

    /// Get application port
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Run application until it is stopped
    pub async fn run_until_stopped(self) -> io::Result<()> {
        self.server.await
    }
}

/// Run the HTTP server
pub fn run_server(
    listener: net::TcpListener,
    store: Arc<dyn SubscriberStore>,
    config: Settings,
) -> anyhow::Result<Server> {
    let timezone = config.site.timezone();

    // Prepare data to be added the application context
    let subscriptions = web::Data::new(SubscriptionService::new(Arc::clone(&store)));
    let listing = web::Data::new(AdminListingService::new(Arc::clone(&store)));
    let exporter = web::Data::new(CsvExporter::new(store, timezone));
    let tokens = web::Data::new(ActionTokens::new(config.application.hmac_secret));
    let list_settings = web::Data::new(ListSettings {
        timezone,
        page_size: config.site.page_size,
    });
    let admin_settings = web::Data::new(config.admin);

    // Start the HTTP server
    Ok(HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/healthcheck", web::get().to(healthcheck))
            .service(
                web::resource("/subscribe_email")
                    .app_data(subscribe_form_config())
                    .route(web::post().to(subscribe_email)),
            )
            .route("/embed", web::get().to(embed_form))
            .route("/cloeve-mail.js", web::get().to(embed_script))
            .service(
                web::resource("/export_csv")
                    .wrap(from_fn(reject_unauthorized_admins))
                    .route(web::get().to(export_csv)),
            )
            .service(
                web::scope("/admin")
                    .wrap(from_fn(reject_unauthorized_admins))
                    .route("/subscribers", web::get().to(subscribers_page))
                    .route("/subscribers", web::post().to(bulk_delete)),
            )
            .app_data(subscriptions.clone())
            .app_data(listing.clone())
            .app_data(exporter.clone())
            .app_data(tokens.clone())
            .app_data(list_settings.clone())
            .app_data(admin_settings.clone())
    })
    .listen(listener)?
    .run())
}
