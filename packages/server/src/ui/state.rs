//! Shared application state.

use std::sync::Arc;

use crate::usecase::{
    CreateRoomUseCase, GetRoomDetailUseCase, GetRoomsUseCase, JoinRoomUseCase, SessionManager,
    VerifyTokenUseCase,
};

/// Shared application state
pub struct AppState {
    /// SessionManager（WebSocket 接続ごとのイベント処理）
    pub session_manager: Arc<SessionManager>,
    /// CreateRoomUseCase（ルーム作成のユースケース）
    pub create_room_usecase: Arc<CreateRoomUseCase>,
    /// JoinRoomUseCase（ルーム参加のユースケース）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// VerifyTokenUseCase（トークン検証のユースケース）
    pub verify_token_usecase: Arc<VerifyTokenUseCase>,
    /// GetRoomsUseCase（ルーム一覧取得のユースケース）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetRoomDetailUseCase（ルーム詳細取得のユースケース）
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
}
