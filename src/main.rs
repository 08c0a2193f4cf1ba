use anyhow::{Context, Result};
use callscribe::{
    create_router, AppState, CallCoordinator, Config, NotificationHub, RemoteAnalyzer,
    SentimentCache, TranscriptStore, WebSocketStt,
};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "callscribe", about = "Live phone call transcription service")]
struct Args {
    /// Path to the configuration file (without extension)
    #[arg(long, default_value = "config/callscribe")]
    config: String,

    /// Override the HTTP port from the configuration file
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;
    let port = args.port.unwrap_or(cfg.service.http.port);

    info!("{} starting", cfg.service.name);

    let store = Arc::new(TranscriptStore::new());
    let hub = Arc::new(NotificationHub::new());
    let stt = Arc::new(WebSocketStt::new(cfg.stt));
    let analyzer = Arc::new(RemoteAnalyzer::new(cfg.sentiment.analyzer));
    let sentiment = Arc::new(SentimentCache::new(
        Arc::clone(&store),
        analyzer,
        Duration::from_secs(cfg.sentiment.cache_time_secs),
    ));
    let coordinator = Arc::new(CallCoordinator::new(
        Arc::clone(&store),
        Arc::clone(&hub),
        stt,
    ));

    let state = AppState {
        store,
        sentiment,
        hub,
        coordinator,
    };
    let router = create_router(state);

    let addr = format!("{}:{}", cfg.service.http.bind, port);
    info!("server will listen on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shutting down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
}
