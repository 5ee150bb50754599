use car_configurator_api::{create_router, AppState, Config};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("car_configurator_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let state = AppState::new(&config);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        address = %addr,
        recency_window_days = config.recency_window_days,
        default_car_limit = config.default_car_limit,
        "Server running"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
