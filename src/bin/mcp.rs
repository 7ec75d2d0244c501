//! Coupon Hub MCP server
//!
//! Run with: couponhub-mcp

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use couponhub::mcp::{CouponHubHandler, McpServer};
use couponhub::storage::Storage;
use couponhub::types::StorageConfig;

#[derive(Parser, Debug)]
#[command(name = "couponhub-mcp")]
#[command(about = "Coupon Hub MCP server (stdio)")]
struct Args {
    /// Database path
    #[arg(
        long,
        env = "COUPONHUB_DB_PATH",
        default_value = "~/.local/share/couponhub/coupons.db"
    )]
    db_path: String,
}

fn main() -> anyhow::Result<()> {
    // Logging to stderr: stdout carries the MCP protocol
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    // Expand ~ in path
    let db_path = shellexpand::tilde(&args.db_path).to_string();

    let storage = Storage::open(StorageConfig { db_path })?;
    storage.ping()?;

    let handler = CouponHubHandler::new(storage);
    let server = McpServer::new(handler);

    tracing::info!("Coupon Hub MCP server running on stdio");
    server.run()?;

    Ok(())
}
