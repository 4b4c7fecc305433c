//! Conversion logic between DTOs and domain entities.

use sharepad_shared::time::millis_to_rfc3339;

use crate::domain::{Participant, Room, RoomEvent, SessionCommand};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// DTO → Domain
// ========================================

impl From<dto::ClientMessage> for SessionCommand {
    fn from(message: dto::ClientMessage) -> Self {
        match message {
            dto::ClientMessage::JoinRoom(payload) => Self::JoinRoom {
                room_id: payload.room_id,
                name: payload.name,
            },
            dto::ClientMessage::ChangeCode(code) => Self::ChangeCode(code),
            dto::ClientMessage::UserTyping(payload) => Self::Typing {
                room_id: payload.room_id,
                name: payload.name,
                typing: payload.typing,
            },
            dto::ClientMessage::RunCodeOutput(output) => Self::RunOutput(output),
        }
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<&Participant> for dto::ParticipantInfo {
    fn from(participant: &Participant) -> Self {
        Self {
            name: participant.name.as_str().to_string(),
            image: participant.avatar.clone(),
            typing: participant.typing,
        }
    }
}

impl From<&RoomEvent> for dto::ServerMessage {
    fn from(event: &RoomEvent) -> Self {
        match event {
            RoomEvent::UserJoined(text) => Self::UserJoined(text.clone()),
            RoomEvent::ReflectCode(code) => Self::ReflectCode(code.clone()),
            RoomEvent::UpdateUsers(participants) => {
                Self::UpdateUsers(participants.iter().map(Into::into).collect())
            }
            RoomEvent::UserTyping { name, typing } => Self::UserTyping(dto::TypingInfo {
                name: name.clone(),
                typing: *typing,
            }),
            RoomEvent::ReflectOutputCode(output) => Self::ReflectOutputCode(output.clone()),
            RoomEvent::Error(message) => Self::Error(dto::ErrorInfo {
                message: message.clone(),
            }),
        }
    }
}

impl From<&Room> for http::RoomStateDto {
    fn from(room: &Room) -> Self {
        Self {
            users: room.participants().iter().map(Into::into).collect(),
            code: room.buffer().to_string(),
        }
    }
}

impl From<&Room> for http::RoomDetailDto {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.as_str().to_string(),
            code: room.buffer().to_string(),
            users: room
                .participants()
                .iter()
                .map(|p| http::ParticipantDetailDto {
                    name: p.name.as_str().to_string(),
                    image: p.avatar.clone(),
                    typing: p.typing,
                    connected: p.connection.is_some(),
                    joined_at: millis_to_rfc3339(p.joined_at.value()),
                })
                .collect(),
            created_at: millis_to_rfc3339(room.created_at.value()),
        }
    }
}
