mod app;
mod config;
mod errors;
mod logging;
mod models;
mod routes;
mod services;
mod state;

use anyhow::Context;
use tokio::net::TcpListener;

use crate::config::{DataConfig, ServerConfig};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let server = ServerConfig::from_env().map_err(anyhow::Error::msg)?;
    logging::init_logging(&server)?;

    let data = DataConfig::from_env();
    tracing::info!("📂 Loading data using {:?}", data);

    // Refuse to serve without prices; there is nothing meaningful to answer.
    let dataset = services::loader::load_dataset(&data).context("failed to load dataset")?;

    let overview = services::query_service::get_overview(&dataset);
    tracing::info!(
        "📈 Price data: {} records, events: {}, range: {:?}",
        overview.price_records,
        overview.events,
        overview.date_range
    );

    let app = app::create_app(AppState::new(dataset));

    let addr = server.addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("🚀 Oil dashboard backend running at http://{}/", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
