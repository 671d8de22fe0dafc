//! Room-scoped WebSocket chat relay.
//!
//! Messages sent to `/chat/{room}` are broadcast to every member of the room,
//! with near-duplicate resends suppressed.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin roomcast-server
//! cargo run --bin roomcast-server -- --host 127.0.0.1 --http-host 0.0.0.0 --chat-port 9000 --dedup-scope global
//! ```

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use roomcast_server::{
    app::build_server,
    config::{
        DEFAULT_CHAT_HOST, DEFAULT_CHAT_PORT, DEFAULT_HTTP_HOST, DEFAULT_HTTP_PORT, ServerConfig,
    },
    domain::{DEFAULT_DEDUP_WINDOW_MILLIS, DedupScope},
};
use roomcast_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "roomcast-server")]
#[command(about = "Room-scoped WebSocket chat relay with duplicate suppression", long_about = None)]
struct Args {
    /// Host address the chat listener binds to
    #[arg(short = 'H', long, default_value = DEFAULT_CHAT_HOST)]
    host: String,

    /// Port of the WebSocket chat endpoint
    #[arg(short = 'p', long, default_value_t = DEFAULT_CHAT_PORT)]
    chat_port: u16,

    /// Host address the static asset / HTTP API listener binds to
    #[arg(long, default_value = DEFAULT_HTTP_HOST)]
    http_host: String,

    /// Port of the static asset / HTTP API endpoint
    #[arg(long, default_value_t = DEFAULT_HTTP_PORT)]
    http_port: u16,

    /// Directory with display.html and the .css / .js assets
    #[arg(long, default_value = "web")]
    asset_dir: PathBuf,

    /// Window in which an identical message is treated as a duplicate (ms)
    #[arg(long, default_value_t = DEFAULT_DEDUP_WINDOW_MILLIS)]
    dedup_window_ms: i64,

    /// Whether duplicates are tracked per room or across all rooms ("room" or "global")
    #[arg(long, default_value_t = DedupScope::PerRoom)]
    dedup_scope: DedupScope,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "debug")]
    log_level: String,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            chat_port: args.chat_port,
            http_host: args.http_host,
            http_port: args.http_port,
            asset_dir: args.asset_dir,
            dedup_window_millis: args.dedup_window_ms,
            dedup_scope: args.dedup_scope,
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(
        &[env!("CARGO_CRATE_NAME"), "tower_http"],
        &args.log_level,
    );

    let config = ServerConfig::from(args);
    let server = build_server(&config, Arc::new(SystemClock));

    if let Err(e) = server.run(&config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
