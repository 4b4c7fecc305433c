//! HTTP API request/response DTOs.

use serde::{Deserialize, Serialize};

use super::websocket::ParticipantInfo;

/// Body of room creation and join requests
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomRequest {
    pub room_id: String,
    pub name: String,
}

/// Successful creation/join response carrying the issued token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub message: String,
    pub token: String,
}

/// Plain message response (used for rejections)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyTokenResponse {
    pub valid: bool,
    pub name: String,
    pub room_id: String,
}

/// Room state as listed by `GET /api/rooms`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomStateDto {
    pub users: Vec<ParticipantInfo>,
    pub code: String,
}

/// Room detail as returned by `GET /api/rooms/{room_id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDetailDto {
    pub id: String,
    pub code: String,
    pub users: Vec<ParticipantDetailDto>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDetailDto {
    pub name: String,
    pub image: String,
    pub typing: bool,
    pub connected: bool,
    pub joined_at: String,
}
