//! Collaborative code room server library.
//!
//! Rooms hold one shared text buffer and a participant list; every change is
//! fanned out to the room's live WebSocket connections.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
