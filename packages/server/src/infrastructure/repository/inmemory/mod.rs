//! InMemory Repository 実装

mod connection;
mod history;

pub use connection::InMemoryConnectionRepository;
pub use history::InMemoryMessageHistoryRepository;
