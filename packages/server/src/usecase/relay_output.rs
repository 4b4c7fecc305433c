//! UseCase: 実行結果の共有（run-code-output）処理

use std::sync::Arc;

use crate::domain::{MessagePusher, RoomEvent, RoomRepository, SessionBinding};

use super::{error::SessionEventError, room_guard::lock_open_room};

/// 実行結果共有のユースケース
pub struct RelayOutputUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl RelayOutputUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 送信者を含む全員に `reflect-output-code` を配信する
    ///
    /// 状態は変更しないが、他の変更と配信順序を揃えるため Room のロックを取る。
    pub async fn execute(
        &self,
        binding: &SessionBinding,
        output: String,
    ) -> Result<(), SessionEventError> {
        let _room = lock_open_room(self.repository.as_ref(), &binding.room_id).await?;

        let event = RoomEvent::ReflectOutputCode(output);
        if let Err(e) = self
            .message_pusher
            .broadcast_to_all(&binding.room_id, &event)
            .await
        {
            tracing::warn!("Failed to broadcast reflect-output-code: {}", e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        infrastructure::dto::websocket::ServerMessage,
        usecase::{ConnectParticipantUseCase, test_support::*},
    };

    #[tokio::test]
    async fn test_output_reaches_everyone_including_sender() {
        // テスト項目: 実行結果は送信者を含む全員に届き、バッファは変わらない
        // given (前提条件):
        let repository = create_test_repository();
        let pusher = create_test_message_pusher();
        let connect = ConnectParticipantUseCase::new(repository.clone(), pusher.clone());
        let usecase = RelayOutputUseCase::new(repository.clone(), pusher.clone());
        create_room(&repository, "R1", "Alice").await;
        let mut alice = connect_client(&pusher, "R1", "Alice").await;
        let mut bob = connect_client(&pusher, "R1", "Bob").await;
        connect
            .execute(&mut alice.session, "R1".to_string(), "Alice".to_string())
            .await
            .unwrap();
        connect
            .execute(&mut bob.session, "R1".to_string(), "Bob".to_string())
            .await
            .unwrap();
        alice.drain();
        bob.drain();

        // when (操作):
        let result = usecase
            .execute(&binding("R1", "Bob"), "1\n".to_string())
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
        let expected = ServerMessage::ReflectOutputCode("1\n".to_string());
        assert_eq!(alice.drain(), vec![expected.clone()]);
        assert_eq!(bob.drain(), vec![expected]);
        let handle = repository.get_room(&room_id("R1")).await.unwrap();
        assert_eq!(handle.lock().await.buffer(), crate::domain::DEFAULT_BUFFER);
    }
}
