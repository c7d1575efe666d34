//! Fruitcam Server
//!
//! Main entry point for the camera streaming and classification service.

use fruitcam_server::{
    camera,
    classification_config::ClassificationConfig,
    classification_worker::ClassificationWorker,
    classifier,
    frame_buffer::FrameBuffer,
    frame_source::FrameSource,
    fruit_info::FruitInfo,
    result_slot::ResultSlot,
    state::{AppConfig, AppState},
    web_api,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Resolve when SIGINT or SIGTERM arrives
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fruitcam_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Fruitcam Server v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = AppConfig::default();
    tracing::info!(
        host = %config.host,
        port = config.port,
        camera_source = %config.camera_source,
        camera_width = config.camera_width,
        camera_height = config.camera_height,
        capture_fps = config.capture_fps,
        worker_hz = config.worker_hz,
        stream_fps = config.stream_fps,
        confidence_threshold = config.confidence_threshold,
        "Configuration loaded"
    );

    // Open the camera; acquisition failures abort startup
    let camera = camera::open_camera(
        &config.camera_source,
        &config.camera_device,
        config.camera_width,
        config.camera_height,
        config.capture_fps,
    )?;

    // Initialize components
    let frame_buffer = Arc::new(FrameBuffer::new());
    let mut frame_source = FrameSource::spawn(camera, frame_buffer.clone(), config.capture_fps);
    tracing::info!("FrameSource started");

    let result_slot = Arc::new(ResultSlot::new());
    let classification = Arc::new(ClassificationConfig::new(config.confidence_threshold));

    let engine = classifier::build_classifier(config.model_path.as_deref())?;
    let fruit_info = Arc::new(FruitInfo::new());
    tracing::info!("Classifier initialized");

    let worker = ClassificationWorker::new(
        frame_buffer.clone(),
        result_slot.clone(),
        classification.clone(),
        engine,
        fruit_info,
        config.worker_hz,
    );

    // Create application state
    let state = AppState {
        config: config.clone(),
        frame_buffer,
        result_slot,
        classification,
    };

    // Start classification worker (idle until /start enables it)
    worker.start().await;
    tracing::info!("ClassificationWorker started");

    // Create router
    let app = web_api::create_router(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Stop inference before capture so the worker never sees a dead camera
    tracing::info!("Shutting down");
    worker.stop().await;
    frame_source.stop();

    Ok(())
}
