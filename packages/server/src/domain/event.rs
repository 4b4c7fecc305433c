//! Events flowing in and out of a room session.

use super::entity::Participant;

/// A room-facing command issued by a connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Bind the connection to a room under a name
    JoinRoom { room_id: String, name: String },
    /// Replace the shared buffer
    ChangeCode(String),
    /// Toggle a participant's typing indicator
    Typing {
        room_id: String,
        name: String,
        typing: bool,
    },
    /// Relay code execution output
    RunOutput(String),
}

/// An event delivered to room members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomEvent {
    /// Notification text announcing a new member
    UserJoined(String),
    /// Current buffer content
    ReflectCode(String),
    /// Full participant list
    UpdateUsers(Vec<Participant>),
    UserTyping { name: String, typing: bool },
    ReflectOutputCode(String),
    /// Rejection reason sent back to a single connection
    Error(String),
}

impl RoomEvent {
    /// Wire name of the event.
    pub fn name(&self) -> &'static str {
        match self {
            Self::UserJoined(_) => "user-joined",
            Self::ReflectCode(_) => "reflect-code",
            Self::UpdateUsers(_) => "update-users",
            Self::UserTyping { .. } => "user-typing",
            Self::ReflectOutputCode(_) => "reflect-output-code",
            Self::Error(_) => "error",
        }
    }
}
