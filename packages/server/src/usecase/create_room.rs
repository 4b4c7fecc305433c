//! UseCase: ルーム作成処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - CreateRoomUseCase::execute() メソッド
//! - 作成者 1 名とデフォルトのバッファを持つ Room が登録され、トークンが発行されること
//!
//! ### どのような状況を想定しているか
//! - 正常系：新しい ID での作成
//! - 異常系：既存の ID での作成（RoomAlreadyExists）、不正な入力

use std::sync::Arc;

use sharepad_shared::time::now_millis;

use crate::domain::{
    ParticipantName, RepositoryError, Room, RoomId, RoomRepository, Timestamp, TokenService,
};

use super::error::CreateRoomError;

/// ルーム作成のユースケース
pub struct CreateRoomUseCase {
    repository: Arc<dyn RoomRepository>,
    token_service: Arc<dyn TokenService>,
}

impl CreateRoomUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>, token_service: Arc<dyn TokenService>) -> Self {
        Self {
            repository,
            token_service,
        }
    }

    /// ルームを作成し、作成者用のトークンを返す
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - 作成者 (roomId, name) に紐付くトークン
    /// * `Err(CreateRoomError)` - 入力不正、または同じ ID の Room が既に存在する
    pub async fn execute(&self, room_id: String, name: String) -> Result<String, CreateRoomError> {
        let room_id = RoomId::new(room_id)?;
        let name = ParticipantName::new(name)?;

        // Room は登録前に完全に構築しておく
        let room = Room::new(room_id.clone(), name.clone(), Timestamp::new(now_millis()));
        self.repository
            .create_room(room)
            .await
            .map_err(|e| match e {
                RepositoryError::RoomAlreadyExists => CreateRoomError::RoomAlreadyExists,
                other => CreateRoomError::Registry(other),
            })?;

        let token = self.token_service.issue(&room_id, &name)?;
        tracing::info!("Room '{}' created by '{}'", room_id, name);
        Ok(token)
    }
}
