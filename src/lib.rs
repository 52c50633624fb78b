pub mod api;
pub mod config;
pub mod export;
pub mod form;
pub mod models;
pub mod pipeline;
pub mod validation;

use std::sync::Arc;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use api::{ApiContext, ExtractorKind};
use config::AppConfig;
use pipeline::extraction::{DocumentExtractor, ExtractionError, RemoteExtractor, VisionGatewayExtractor};

#[derive(Error, Debug)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error("Failed to create extractor: {0}")]
    Extractor(#[from] ExtractionError),
    #[error(transparent)]
    Server(#[from] api::ServerError),
}

/// Pick the OCR backend. A remote endpoint wins over the in-process gateway.
pub fn build_extractor(
    config: &AppConfig,
) -> Result<(Arc<dyn DocumentExtractor>, ExtractorKind), StartupError> {
    if let Some(url) = &config.extractor_url {
        tracing::info!(%url, "Using remote extraction endpoint");
        let extractor = RemoteExtractor::new(url.clone(), config.timeout_secs)?;
        return Ok((Arc::new(extractor), ExtractorKind::Remote));
    }

    let gateway = config.gateway()?;
    tracing::info!(url = %gateway.url, model = %gateway.model, "Using vision gateway");
    let extractor = VisionGatewayExtractor::new(&gateway)?;
    Ok((Arc::new(extractor), ExtractorKind::Gateway))
}

/// Binary entry point: logging, configuration, server until Ctrl-C.
pub async fn run() -> Result<(), StartupError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = Arc::new(AppConfig::from_env()?);
    let (extractor, kind) = build_extractor(&config)?;
    let ctx = ApiContext::new(config.clone(), extractor, kind);

    let mut server = api::start_server(ctx, config.bind_addr).await?;
    tracing::info!(addr = %server.addr, "Listening");

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {e}");
    }
    server.shutdown();
    server.stopped().await;
    Ok(())
}
