//! Domain layer for the collaborative code room server.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod event;
pub mod message_pusher;
pub mod repository;
pub mod session;
pub mod token;
pub mod value_object;

pub use entity::{DEFAULT_AVATAR, DEFAULT_BUFFER, Participant, Room};
pub use error::{AuthError, MessagePushError, RepositoryError, RoomError, ValueObjectError};
pub use event::{RoomEvent, SessionCommand};
pub use message_pusher::{MessagePusher, PusherChannel};
#[cfg(test)]
pub use message_pusher::MockMessagePusher;
pub use repository::{RoomRepository, SharedRoom};
pub use session::{Session, SessionBinding, SessionState};
pub use token::{TokenClaims, TokenService};
pub use value_object::{ConnectionId, ParticipantName, RoomId, Timestamp};
