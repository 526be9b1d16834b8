//! Terminal chat client for the hiroba room relay.
//!
//! Type `/join <name> <room>` to enter a room, then plain lines to talk.
//! Automatically reconnects on disconnection (max 5 attempts with 5 second interval)
//! and enters the last room again.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-client
//! cargo run --bin hiroba-client -- --name Alice --room lobby
//! ```

use clap::Parser;
use hiroba_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hiroba-client")]
#[command(about = "Terminal client for the room-based chat relay", long_about = None)]
struct Args {
    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:3500/ws")]
    url: String,

    /// Display name used when joining at startup
    #[arg(short = 'n', long)]
    name: Option<String>,

    /// Room to join at startup (requires --name)
    #[arg(short = 'r', long, requires = "name")]
    room: Option<String>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Run the client
    if let Err(e) = hiroba_client::run_client(args.url, args.name, args.room).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
