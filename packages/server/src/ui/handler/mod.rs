//! Axum handlers.

mod http;
mod websocket;

pub use http::{generate_room, get_room_detail, get_rooms, health_check, user_join, verify_token};
pub use websocket::websocket_handler;
