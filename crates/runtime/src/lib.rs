use std::sync::Arc;

use anyhow::{Context, Result};
use eduassist_config::AppConfig;
use eduassist_orchestrator::Orchestrator;
use tracing::info;

pub mod telemetry {
    use anyhow::Result;
    use tracing::Level;
    use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

    pub fn init_tracing() -> Result<()> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = SubscriberBuilder::default()
            .with_max_level(Level::DEBUG)
            .with_env_filter(env_filter)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))
    }
}

#[derive(Clone)]
pub struct RelayServices {
    pub orchestrator: Arc<Orchestrator>,
    pub access_token: Option<String>,
    pub max_body_bytes: usize,
}

impl RelayServices {
    pub fn initialise(config: &AppConfig) -> Result<Self> {
        let orchestrator = Arc::new(
            Orchestrator::new(config)
                .bootstrap()
                .context("failed to bootstrap orchestrator")?,
        );

        let access_token = config
            .http
            .access_token
            .clone()
            .filter(|token| !token.trim().is_empty());

        let max_body_bytes = config.http.max_body_bytes;

        info!(
            model = orchestrator.active_model(),
            access_token = access_token.is_some(),
            max_body_bytes,
            "relay services ready"
        );

        Ok(Self {
            orchestrator,
            access_token,
            max_body_bytes,
        })
    }
}

pub async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(?error, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
