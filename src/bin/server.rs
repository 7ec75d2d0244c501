//! Coupon Hub REST server
//!
//! Run with: couponhub-server

use std::net::SocketAddr;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use couponhub::http::{router, AppState};
use couponhub::storage::Storage;
use couponhub::types::StorageConfig;

#[derive(Parser, Debug)]
#[command(name = "couponhub-server")]
#[command(about = "Coupon Hub REST API server")]
struct Args {
    /// Database path
    #[arg(
        long,
        env = "COUPONHUB_DB_PATH",
        default_value = "~/.local/share/couponhub/coupons.db"
    )]
    db_path: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value = "3000")]
    port: u16,

    /// Shared API key; requests to /api/* must present it when set
    #[arg(long, env = "COUPONHUB_API_KEY")]
    api_key: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    // Expand ~ in path
    let db_path = shellexpand::tilde(&args.db_path).to_string();

    let storage = Storage::open(StorageConfig { db_path })?;

    // Fail fast if the database is unusable
    storage.ping()?;
    tracing::info!("database ready at {}", storage.db_path());

    if args.api_key.is_none() {
        tracing::warn!("no API key configured; /api/* endpoints are open");
    }

    let state = AppState {
        storage,
        api_key: args.api_key,
    };
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    tracing::info!("Coupon Hub API listening on http://{}", addr);
    tracing::info!("API documentation at http://localhost:{}/docs", args.port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
