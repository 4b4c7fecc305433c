//! In-memory room registry.

mod room;

pub use room::InMemoryRoomRepository;
