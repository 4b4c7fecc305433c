//! HTTP and WebSocket surface of the room server.

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
