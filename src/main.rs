//! Nuqta marketplace backend
//!
//! Main application entry point: loads configuration, connects the store,
//! runs migrations, wires the services and drives the periodic maintenance
//! sweep that expires unpaid pending bookings.

use std::time::Duration;

use tracing::{error, info};

use nuqta::{
    config::Settings,
    database::{connection::create_pool, run_migrations, DatabaseService},
    i18n::I18n,
    services::{Mailer, ServiceFactory},
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard must outlive the process
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting Nuqta marketplace backend...");

    // Initialize database connection
    info!("Connecting to database...");
    let db_config = nuqta::database::DatabaseConfig::from_settings(&settings.database);
    let db_pool = create_pool(&db_config).await?;

    // Run database migrations
    run_migrations(&db_pool).await?;

    // Initialize database service
    let database_service = DatabaseService::new(db_pool);

    // Initialize i18n system
    info!("Loading translations...");
    let mut i18n = I18n::new(&settings.i18n);
    i18n.load_translations().await?;

    // Start the mail delivery worker
    let (mailer, mailer_handle) = Mailer::spawn(settings.email.clone())?;

    // Initialize services
    info!("Initializing services...");
    let services = ServiceFactory::new(database_service, settings.clone(), i18n, mailer);

    info!("Nuqta backend is ready");

    // Periodic maintenance: sweep unpaid pending bookings past their TTL
    let sweep_interval = Duration::from_secs(settings.booking.cleanup_interval_minutes * 60);
    let mut interval = tokio::time::interval(sweep_interval);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match services.booking_service.expire_stale().await {
                    Ok(swept) if swept > 0 => {
                        info!(swept = swept, "Maintenance sweep completed");
                    }
                    Ok(_) => {}
                    Err(e) => {
                        error!(error = %e, "Maintenance sweep failed");
                    }
                }
            }
            result = tokio::signal::ctrl_c() => {
                if let Err(e) = result {
                    error!(error = %e, "Failed to listen for shutdown signal");
                }
                break;
            }
        }
    }

    info!("Shutting down...");

    // Dropping the services closes the mail channel; the worker drains
    // whatever is still queued and exits.
    drop(services);
    let _ = mailer_handle.await;

    info!("Nuqta backend has been shut down.");
    Ok(())
}
