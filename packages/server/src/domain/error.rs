//! Domain error types.

use thiserror::Error;

/// Validation failure of a value object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{field} must be at most {max} characters (got {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
}

/// Errors raised by operations on a single room.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    #[error("Participant '{0}' already exists in this room")]
    ParticipantNameTaken(String),

    #[error("Participant '{0}' not found in this room")]
    ParticipantNotFound(String),
}

/// Errors raised by the room registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Room ID already exists")]
    RoomAlreadyExists,

    #[error("Room not found")]
    RoomNotFound,

    #[error("Name '{0}' already taken in this room")]
    ParticipantNameTaken(String),
}

/// Errors raised while pushing events to connections.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("Connection '{0}' not found")]
    ClientNotFound(String),

    #[error("Failed to push message: {0}")]
    PushFailed(String),
}

/// Errors raised by the authentication collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Token is missing")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Failed to issue token: {0}")]
    TokenIssueFailed(String),
}
