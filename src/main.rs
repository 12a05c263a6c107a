use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use newsdesk::api::{self, AppState};
use newsdesk::news::{NewsClient, RefreshCoordinator};
use newsdesk::storage::{ArticleStore, MemoryStore};
use newsdesk::Config;

#[derive(Parser)]
#[command(name = "newsdesk")]
#[command(about = "News aggregation backend")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    #[arg(short, long, default_value = "3000")]
    port: u16,

    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let filter_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("newsdesk={filter_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    dotenvy::dotenv().ok();

    let config = Config::from_env().unwrap_or_else(|e| panic!("Invalid configuration: {e}"));
    if config.api_key.is_none() {
        warn!("No News API key configured; POST /api/articles/fetch will return 400");
    }

    let store: Arc<dyn ArticleStore> = Arc::new(MemoryStore::new());
    let client = config.api_key.clone().map(|key| {
        NewsClient::new(key)
            .with_timeout(Duration::from_secs(config.fetch_timeout))
            .with_page_size(config.page_size)
    });
    let coordinator = Arc::new(RefreshCoordinator::new(
        Arc::clone(&store),
        client,
        config.country.clone(),
    ));

    let app = api::router(AppState { store, coordinator });

    let bind_addr = format!("{}:{}", args.host, args.port);
    let listener = TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind to {bind_addr}: {e}"));

    info!("newsdesk listening on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap_or_else(|e| panic!("server error: {e}"));
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received terminate signal");
        },
    }
}
