//! # Microblog Web Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use migration::{Migrator, MigratorTrait};
use tracing_actix_web::TracingLogger;

use microblog_infra::database::connect;
use web_server::telemetry::{TelemetryConfig, init_telemetry};
use web_server::{AppConfig, AppState, handlers};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    let db = connect(&config.database).await?;
    if config.auto_migrate {
        Migrator::up(&db, None).await?;
        tracing::info!("Database schema is up to date");
    }

    let state = AppState::new(db, &config);

    tracing::info!(
        "Starting microblog on http://{}:{} ({} posts per page)",
        config.host,
        config.port,
        config.posts_per_page
    );

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
