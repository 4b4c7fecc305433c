//! HTTP API endpoint handlers.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
};

use crate::{
    domain::AuthError,
    infrastructure::dto::http::{
        MessageResponse, RoomDetailDto, RoomRequest, RoomStateDto, TokenResponse,
        VerifyTokenResponse,
    },
    ui::state::AppState,
    usecase::{CreateRoomError, GetRoomDetailError, JoinRoomError},
};

fn reject(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(MessageResponse::new(message))).into_response()
}

fn internal_error(error: impl std::fmt::Display) -> Response {
    tracing::error!("Request failed: {}", error);
    reject(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Create a room and issue a token for its creator
pub async fn generate_room(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RoomRequest>,
) -> Response {
    match state
        .create_room_usecase
        .execute(request.room_id, request.name)
        .await
    {
        Ok(token) => Json(TokenResponse {
            message: "Room created successfully".to_string(),
            token,
        })
        .into_response(),
        Err(CreateRoomError::RoomAlreadyExists) => {
            reject(StatusCode::FORBIDDEN, "Room ID already exists")
        }
        Err(e @ CreateRoomError::InvalidInput(_)) => reject(StatusCode::BAD_REQUEST, e.to_string()),
        Err(e) => internal_error(e),
    }
}

/// Register a participant in an existing room and issue a token
pub async fn user_join(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RoomRequest>,
) -> Response {
    let message = format!(
        "{} joined room {}",
        request.name.trim(),
        request.room_id.trim()
    );
    match state
        .join_room_usecase
        .execute(request.room_id, request.name)
        .await
    {
        Ok(token) => Json(TokenResponse { message, token }).into_response(),
        Err(e @ JoinRoomError::RoomNotFound) => reject(StatusCode::NOT_FOUND, e.to_string()),
        Err(e @ JoinRoomError::NameTaken(_)) => reject(StatusCode::CONFLICT, e.to_string()),
        Err(e @ JoinRoomError::InvalidInput(_)) => reject(StatusCode::BAD_REQUEST, e.to_string()),
        Err(e) => internal_error(e),
    }
}

/// Check a bearer token and return the identity it carries
pub async fn verify_token(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    // `<scheme> <token>`; the scheme itself is not checked
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split_whitespace().nth(1));

    match state.verify_token_usecase.execute(token) {
        Ok(claims) => Json(VerifyTokenResponse {
            valid: true,
            name: claims.name.into_string(),
            room_id: claims.room_id.into_string(),
        })
        .into_response(),
        Err(e @ (AuthError::MissingToken | AuthError::InvalidToken)) => {
            reject(StatusCode::UNAUTHORIZED, e.to_string())
        }
        Err(e) => internal_error(e),
    }
}

/// Get every room keyed by its ID
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<BTreeMap<String, RoomStateDto>> {
    let rooms = state.get_rooms_usecase.execute().await;

    // Domain Model から DTO への変換
    let rooms = rooms
        .iter()
        .map(|room| (room.id.as_str().to_string(), RoomStateDto::from(room)))
        .collect();

    Json(rooms)
}

/// Get room detail by ID
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Response {
    match state.get_room_detail_usecase.execute(room_id).await {
        Ok(room) => Json(RoomDetailDto::from(&room)).into_response(),
        Err(e @ GetRoomDetailError::RoomNotFound) => reject(StatusCode::NOT_FOUND, e.to_string()),
    }
}
