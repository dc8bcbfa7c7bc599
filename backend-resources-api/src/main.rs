use backend_resources_api::{build_router, AppState};
use backend_resources_domain::{
    application::ports::config::{ConfigurationPort, LogFormat, LoggingConfig},
    infrastructure::adapters::EnvConfigurationAdapter,
};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = EnvConfigurationAdapter::new()?;
    init_tracing(config.get_logging_config());

    let state = AppState::new(&config)?;
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.get_http_config().port));
    info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "backend_resources_api={level},backend_resources_domain={level},tower_http=debug",
            level = logging.level
        )
        .into()
    });

    let format = &logging.format;
    tracing_subscriber::registry()
        .with(filter)
        .with((*format == LogFormat::Json).then(|| fmt::layer().json()))
        .with((*format == LogFormat::Pretty).then(|| fmt::layer().pretty()))
        .with((*format == LogFormat::Compact).then(|| fmt::layer().compact()))
        .init();
}
