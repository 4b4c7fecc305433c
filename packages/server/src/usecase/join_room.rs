//! UseCase: ルーム参加（HTTP）処理
//!
//! 既存の Room に参加者を登録し、参加者用のトークンを発行する。
//! ライブ接続の紐付けは `join-room` イベント（ConnectParticipantUseCase）で行う。

use std::sync::Arc;

use sharepad_shared::time::now_millis;

use crate::domain::{
    Participant, ParticipantName, RepositoryError, RoomId, RoomRepository, Timestamp,
    TokenService,
};

use super::error::JoinRoomError;

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    repository: Arc<dyn RoomRepository>,
    token_service: Arc<dyn TokenService>,
}

impl JoinRoomUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>, token_service: Arc<dyn TokenService>) -> Self {
        Self {
            repository,
            token_service,
        }
    }

    /// 参加者を登録し、参加者用のトークンを返す
    pub async fn execute(&self, room_id: String, name: String) -> Result<String, JoinRoomError> {
        let room_id = RoomId::new(room_id)?;
        let name = ParticipantName::new(name)?;

        let participant = Participant::new(name.clone(), Timestamp::new(now_millis()));
        self.repository
            .add_participant(&room_id, participant)
            .await
            .map_err(|e| match e {
                RepositoryError::RoomNotFound => JoinRoomError::RoomNotFound,
                RepositoryError::ParticipantNameTaken(name) => JoinRoomError::NameTaken(name),
                other => JoinRoomError::Registry(other),
            })?;

        let token = self.token_service.issue(&room_id, &name)?;
        tracing::info!("'{}' registered to room '{}'", name, room_id);
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{infrastructure::auth::JwtTokenService, usecase::test_support::*};

    #[tokio::test]
    async fn test_join_room_success() {
        // テスト項目: 既存の Room に参加者が追加され、トークンが返される
        // given (前提条件):
        let repository = create_test_repository();
        let token_service = Arc::new(JwtTokenService::new("secret", 3600));
        let usecase = JoinRoomUseCase::new(repository.clone(), token_service.clone());
        create_room(&repository, "R1", "Alice").await;

        // when (操作):
        let result = usecase.execute("R1".to_string(), "Bob".to_string()).await;

        // then (期待する結果):
        let claims = token_service.verify(&result.unwrap()).unwrap();
        assert_eq!(claims.name, name("Bob"));
        let handle = repository.get_room(&room_id("R1")).await.unwrap();
        let room = handle.lock().await;
        let names: Vec<&str> = room.participants().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
    }

    #[tokio::test]
    async fn test_join_room_not_found() {
        // テスト項目: 存在しない Room への参加は RoomNotFound になる
        // given (前提条件):
        let repository = create_test_repository();
        let usecase =
            JoinRoomUseCase::new(repository, Arc::new(JwtTokenService::new("secret", 3600)));

        // when (操作):
        let result = usecase.execute("R1".to_string(), "Bob".to_string()).await;

        // then (期待する結果):
        assert_eq!(result, Err(JoinRoomError::RoomNotFound));
    }

    #[tokio::test]
    async fn test_join_room_duplicate_name() {
        // テスト項目: 既に使われている名前での参加は NameTaken になる
        // given (前提条件):
        let repository = create_test_repository();
        let usecase = JoinRoomUseCase::new(
            repository.clone(),
            Arc::new(JwtTokenService::new("secret", 3600)),
        );
        create_room(&repository, "R1", "Alice").await;

        // when (操作):
        let result = usecase.execute("R1".to_string(), "Alice".to_string()).await;

        // then (期待する結果):
        assert_eq!(result, Err(JoinRoomError::NameTaken("Alice".to_string())));
        let handle = repository.get_room(&room_id("R1")).await.unwrap();
        assert_eq!(handle.lock().await.participants().len(), 1);
    }
}
