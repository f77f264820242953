use std::sync::Arc;
use std::time::Duration;

use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use log::{info, warn};

use kloom_api::app::{configure, AppState};
use kloom_api::config::Config;
use kloom_api::middleware::cors::create_cors;
use kloom_core::services::UserServiceConfig;
use kloom_infra::{MySqlPropertyRepository, MySqlPropertyRequestRepository, MySqlUserRepository};
use kloom_shared::config::{LogFormat, LoggingConfig};

type State =
    AppState<MySqlUserRepository, MySqlPropertyRepository, MySqlPropertyRequestRepository>;

fn init_logger(logging: &LoggingConfig) {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::new().default_filter_or(logging.level.as_str()),
    );
    if !logging.timestamp {
        builder.format_timestamp(None);
    }
    if logging.format == LogFormat::Compact {
        builder.format_module_path(false).format_target(false);
    }
    builder.init();
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::load().context("failed to load configuration")?;
    init_logger(&config.logging);

    info!("Starting Kloom API Server ({})", config.environment);

    if config.auth.jwt.is_using_default_secret() {
        if config.is_production() {
            anyhow::bail!("JWT_SECRET must be set in production");
        }
        warn!("JWT_SECRET is not set; using the development secret");
    }

    let pool = kloom_infra::initialize(config.database.clone())
        .await
        .context("failed to initialize the database")?;
    if !pool
        .health_check()
        .await
        .context("database health check failed")?
    {
        warn!("Database health check returned an unexpected result");
    }
    let stats = pool.get_statistics();
    info!(
        "Database pool ready: {} connections ({} idle, max {})",
        stats.connections, stats.idle_connections, stats.max_connections
    );

    let users = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));
    let properties = Arc::new(MySqlPropertyRepository::new(pool.get_pool().clone()));
    let requests = Arc::new(MySqlPropertyRequestRepository::new(pool.get_pool().clone()));
    let state: web::Data<State> = web::Data::new(AppState::new(
        users,
        properties,
        requests,
        UserServiceConfig::with_bcrypt_cost(config.auth.bcrypt_cost),
    ));

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let jwt = config.auth.jwt.clone();
    let cors = config.cors.clone();
    let max_payload_size = config.server.max_payload_size;

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .wrap(create_cors(&cors))
            .configure(|cfg| {
                configure::<
                    MySqlUserRepository,
                    MySqlPropertyRepository,
                    MySqlPropertyRequestRepository,
                >(cfg, &jwt, max_payload_size)
            })
    })
    .keep_alive(Duration::from_secs(config.server.keep_alive));

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    let result = server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await;

    pool.close().await;
    result.context("server terminated with an error")
}
