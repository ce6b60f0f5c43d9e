use saju::api::router;
use saju::config::config;
use saju::state::AppState;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_target(true).init();

    let conf = config();
    tracing::info!(
        port = conf.port,
        reading_delay_ms = conf.reading_delay.as_millis() as u64,
        outlook_year = conf.outlook_year,
        "Starting saju fortune service"
    );

    let state = AppState::from_config(conf);

    let app = router(state);
    let addr = conf.listen_addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server bound");

    axum::serve(listener, app).await?;

    Ok(())
}
