//! UseCase error types.

use thiserror::Error;

use crate::domain::{AuthError, RepositoryError, ValueObjectError};

/// Room creation failure (request/response surface)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateRoomError {
    #[error("Invalid request: {0}")]
    InvalidInput(#[from] ValueObjectError),

    #[error("Room ID already exists")]
    RoomAlreadyExists,

    #[error("Registry error: {0}")]
    Registry(RepositoryError),

    #[error(transparent)]
    TokenIssueFailed(#[from] AuthError),
}

/// Room join failure (request/response surface)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinRoomError {
    #[error("Invalid request: {0}")]
    InvalidInput(#[from] ValueObjectError),

    #[error("Room not found")]
    RoomNotFound,

    #[error("Name already taken in this room")]
    NameTaken(String),

    #[error("Registry error: {0}")]
    Registry(RepositoryError),

    #[error(transparent)]
    TokenIssueFailed(#[from] AuthError),
}

/// Live `join-room` failure; the message is sent back to the joiner
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error("Invalid join request: {0}")]
    InvalidInput(#[from] ValueObjectError),

    #[error("Token does not grant access to this room")]
    Unauthorized,

    #[error("Room not found")]
    RoomNotFound,

    #[error("Name already in use in this room")]
    NameInUse(String),

    #[error("Connection has already joined a room")]
    AlreadyJoined,
}

/// Failure of a best-effort event on a joined session.
///
/// These are logged and swallowed; they never reach the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionEventError {
    #[error("Room not found")]
    RoomNotFound,

    #[error("Event targets room '{0}' but the connection is bound to another room")]
    RoomMismatch(String),

    #[error("Participant '{0}' not found in room")]
    ParticipantNotFound(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomDetailError {
    #[error("Room not found")]
    RoomNotFound,
}
