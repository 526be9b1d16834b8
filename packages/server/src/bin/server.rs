//! Room-based chat relay server.
//!
//! Clients connect over WebSocket, enter named rooms and exchange messages,
//! private messages and typing notifications.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-server
//! cargo run --bin hiroba-server -- --host 0.0.0.0 --port 3500 --history-capacity 20
//! ```

use std::{collections::HashMap, sync::Arc};

use clap::Parser;
use hiroba_server::{
    domain::{ConnectionRegistry, DEFAULT_HISTORY_CAPACITY, MessageHistory},
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryConnectionRepository, InMemoryMessageHistoryRepository},
    },
    ui::Server,
    usecase::{EventDispatcher, GetRoomDetailUseCase, GetRoomsUseCase},
};
use hiroba_shared::{logger::setup_logger, time::SystemClock};
use tokio::sync::Mutex;

#[derive(Parser, Debug)]
#[command(name = "hiroba-server")]
#[command(about = "Room-based WebSocket chat relay server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "3500")]
    port: u16,

    /// Number of recent messages kept per room
    #[arg(long, default_value_t = DEFAULT_HISTORY_CAPACITY)]
    history_capacity: usize,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Repositories
    // 2. MessagePusher
    // 3. UseCases
    // 4. Server

    // 1. Create Repositories (in-memory)
    let history = match MessageHistory::with_capacity(args.history_capacity) {
        Ok(history) => history,
        Err(e) => {
            tracing::error!("Invalid --history-capacity: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!("History buffer keeps {} messages per room", history.capacity());
    let connections = Arc::new(InMemoryConnectionRepository::new(Arc::new(Mutex::new(
        ConnectionRegistry::new(),
    ))));
    let history = Arc::new(InMemoryMessageHistoryRepository::new(Arc::new(Mutex::new(
        history,
    ))));

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher_clients = Arc::new(Mutex::new(HashMap::new()));
    let message_pusher = Arc::new(WebSocketMessagePusher::new(message_pusher_clients));

    // 3. Create UseCases
    let dispatcher = Arc::new(EventDispatcher::from_dependencies(
        connections.clone(),
        history.clone(),
        message_pusher,
        Arc::new(SystemClock),
    ));
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(connections.clone()));
    let get_room_detail_usecase = Arc::new(GetRoomDetailUseCase::new(connections, history));

    // 4. Create and run the server
    let server = Server::new(dispatcher, get_rooms_usecase, get_room_detail_usecase);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
