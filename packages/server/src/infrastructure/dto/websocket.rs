//! WebSocket event DTOs.
//!
//! Every frame is a JSON text message of the form
//! `{"event": "<event-name>", "data": <payload>}`.

use serde::{Deserialize, Serialize};

/// Event sent by a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientMessage {
    JoinRoom(JoinRoomPayload),
    ChangeCode(String),
    UserTyping(UserTypingPayload),
    RunCodeOutput(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRoomPayload {
    pub room_id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTypingPayload {
    pub room_id: String,
    pub name: String,
    pub typing: bool,
}

/// Event sent by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerMessage {
    UserJoined(String),
    ReflectCode(String),
    UpdateUsers(Vec<ParticipantInfo>),
    UserTyping(TypingInfo),
    ReflectOutputCode(String),
    Error(ErrorInfo),
}

/// Participant information shown to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantInfo {
    pub name: String,
    pub image: String,
    pub typing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypingInfo {
    pub name: String,
    pub typing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub message: String,
}
