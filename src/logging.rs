use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ServerConfig;

/// Value of the `service` label attached to shipped logs.
pub const SERVICE_NAME: &str = "oil-dashboard";

/// Install the global subscriber: console output always, plus Loki when
/// `LOKI_URL` is configured.
pub fn init_logging(config: &ServerConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(&config.log_level)
        .with_context(|| format!("invalid log filter '{}'", config.log_level))?;
    let loki = loki_layer(config)?;
    let shipping = loki.is_some();

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(loki)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    if shipping {
        tracing::info!("✅ Logging to console and Loki ({})", config.environment);
    } else {
        tracing::info!("📊 Logging to console");
    }
    Ok(())
}

#[cfg(feature = "loki")]
fn loki_layer(config: &ServerConfig) -> anyhow::Result<Option<tracing_loki::Layer>> {
    let Some(raw) = config.loki_url.as_deref() else {
        return Ok(None);
    };
    let url = url::Url::parse(raw).with_context(|| format!("LOKI_URL is not a valid URL: {}", raw))?;

    let (layer, task) = tracing_loki::builder()
        .label("service", SERVICE_NAME)?
        .label("environment", config.environment.as_str())?
        .build_url(url)?;

    // Ships batches for the lifetime of the runtime
    tokio::spawn(task);
    Ok(Some(layer))
}

#[cfg(not(feature = "loki"))]
fn loki_layer(
    config: &ServerConfig,
) -> anyhow::Result<Option<tracing_subscriber::layer::Identity>> {
    if config.loki_url.is_some() {
        eprintln!("LOKI_URL is set but the binary was built without the `loki` feature");
    }
    Ok(None)
}
