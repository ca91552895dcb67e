use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::net::TcpListener;

use medigate::application::ports::InferenceGateway;
use medigate::application::services::{ImagePredictionService, SignalPredictionService};
use medigate::infrastructure::encoding::SignalEncoderFactory;
use medigate::infrastructure::gateway::HttpInferenceGateway;
use medigate::infrastructure::observability::{TracingConfig, init_tracing};
use medigate::infrastructure::staging::ScratchStaging;
use medigate::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;

    let settings = Settings::load(environment)?;

    let tracing_config = TracingConfig::from_settings(&settings.logging, environment);
    init_tracing(&tracing_config)?;
    tracing::info!(
        port = settings.server.port,
        environment = %tracing_config.environment,
        json_format = tracing_config.json_format,
        gateway = %settings.gateway.base_url,
        "Server initialized"
    );

    let gateway: Arc<dyn InferenceGateway> =
        Arc::new(HttpInferenceGateway::connect(&settings.gateway)?);

    if settings.gateway.warm_up_on_start {
        let gateway = Arc::clone(&gateway);
        tokio::spawn(async move {
            match gateway.warm_up().await {
                Ok(()) => tracing::info!("Inference gateway reachable"),
                Err(e) => tracing::warn!(error = %e, "Inference gateway warm-up failed"),
            }
        });
    }

    let staging = Arc::new(ScratchStaging::new(PathBuf::from(
        &settings.staging.scratch_dir,
    ))?);
    tracing::info!(scratch_dir = %staging.root().display(), "Upload staging ready");

    let encoder = SignalEncoderFactory::create(&settings.encoder)?;
    tracing::info!(provider = ?settings.encoder.provider, "Signal encoder ready");

    let state = AppState {
        image_service: Arc::new(ImagePredictionService::new(Arc::clone(&gateway))),
        signal_service: Arc::new(SignalPredictionService::new(
            staging,
            encoder,
            gateway,
            settings.signal.pipeline_options(),
        )),
        settings: settings.clone(),
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
