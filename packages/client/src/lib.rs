//! Terminal client for the hiroba chat relay.
//!
//! Reads lines with rustyline, turns them into protocol frames and renders whatever the
//! server pushes back. Reconnects automatically and re-enters the last room.

mod domain;
pub mod error;
mod formatter;
mod runner;
mod session;
mod ui;

pub use runner::run_client;
