//! Reservation service entry-point: loads settings, wires adapters, starts
//! the HTTP server, then seeds sample data in the background.

mod server;

use std::ffi::OsString;
use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use mockable::{DefaultClock, DefaultEnv};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use reservation_service::domain::ports::ReservationRepository;
use reservation_service::domain::{GreetingService, ReservationService, SampleDataInitializer};
use reservation_service::inbound::http::health::HealthState;
use reservation_service::outbound::memory::InMemoryReservationRepository;
use reservation_service::outbound::persistence::{
    DbPool, DieselReservationRepository, PoolConfig, run_pending_migrations,
};
use reservation_service::sample_data::{SampleDataSettings, seed_sample_data_on_startup};
use reservation_service::settings::ServiceSettings;

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let settings = ServiceSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load service settings: {err}"))?;
    let sample_data =
        SampleDataSettings::load_from_iter([OsString::from(env!("CARGO_PKG_NAME"))])
            .map_err(|err| eyre!("failed to load sample data settings: {err}"))?;

    let bind_addr = settings.bind_addr()?;
    let repository = build_repository(&settings).await?;
    let service = ReservationService::with_mode(repository.clone(), settings.transaction_mode());
    let greetings = GreetingService::new(Arc::new(DefaultClock));

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(bind_addr, repository.clone(), greetings);
    let server = create_server(health_state, config)
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    info!(%bind_addr, mode = ?service.mode(), "reservation service listening");

    let initializer = SampleDataInitializer::new(service, repository);
    actix_web::rt::spawn(async move {
        seed_sample_data_on_startup(&sample_data, initializer).await;
    });

    server.await.wrap_err("HTTP server terminated with an error")
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt().with_env_filter(filter).json().try_init() {
        warn!(error = %e, "tracing init failed");
    }
}

async fn build_repository(settings: &ServiceSettings) -> Result<Arc<dyn ReservationRepository>> {
    let Some(database_url) = settings.database_url_from(&DefaultEnv::new()) else {
        warn!("no database configured; reservations are kept in memory");
        return Ok(Arc::new(InMemoryReservationRepository::new()));
    };

    let applied = run_pending_migrations(&database_url)
        .await
        .wrap_err("failed to apply database migrations")?;
    info!(applied, "database schema up to date");

    let pool_config = PoolConfig::new(database_url).with_max_size(settings.db_max_connections()?);
    let pool = DbPool::new(pool_config)
        .await
        .wrap_err("failed to build database connection pool")?;
    Ok(Arc::new(DieselReservationRepository::new(pool)))
}
