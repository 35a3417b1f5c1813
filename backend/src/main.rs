//! Service entry-point: loads settings, initialises logging and storage, and
//! runs the HTTP server.

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use casetrack::inbound::http::health::HealthState;
use casetrack::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use casetrack::server::{LogFormat, ServerConfig, ServerSettings, create_server};

fn init_tracing(format: LogFormat) {
    let builder = fmt().with_env_filter(EnvFilter::from_default_env());
    let result = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let settings = ServerSettings::load().map_err(std::io::Error::other)?;
    let log_format = settings.log_format().map_err(std::io::Error::other)?;
    init_tracing(log_format);

    let mut config = ServerConfig::new(settings.bind_addr());
    if let Some(database_url) = settings.database_url.as_deref() {
        run_migrations(database_url)
            .await
            .map_err(std::io::Error::other)?;
        let pool = DbPool::new(
            PoolConfig::new(database_url).with_max_size(settings.pool_max_size()),
        )
        .await
        .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    } else {
        warn!("no database configured; running on the in-memory repository");
    }

    info!(bind_addr = %config.bind_addr(), "starting HTTP server");
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}
