//! UseCase: バッファ更新（change-code）処理

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, RoomEvent, RoomRepository, SessionBinding};

use super::{error::SessionEventError, room_guard::lock_open_room};

/// バッファ更新のユースケース
pub struct ChangeCodeUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl ChangeCodeUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// バッファを置き換え（後勝ち）、送信者以外に `reflect-code` を配信する
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        binding: &SessionBinding,
        code: String,
    ) -> Result<(), SessionEventError> {
        let mut room = lock_open_room(self.repository.as_ref(), &binding.room_id).await?;
        room.set_buffer(code.clone());

        let event = RoomEvent::ReflectCode(code);
        if let Err(e) = self
            .message_pusher
            .broadcast_to_others(&binding.room_id, &connection_id, &event)
            .await
        {
            tracing::warn!("Failed to broadcast reflect-code: {}", e);
        }
        tracing::debug!(
            "'{}' updated buffer of room '{}' ({} bytes)",
            binding.name,
            binding.room_id,
            room.buffer().len()
        );
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
    async fn test_change_code_reaches_others_only() {
        // テスト項目: Bob のバッファ更新は Alice にだけ届き、Room のバッファが更新される
        // given (前提条件):
        let repository = create_test_repository();
        let pusher = create_test_message_pusher();
        let connect = ConnectParticipantUseCase::new(repository.clone(), pusher.clone());
        let usecase = ChangeCodeUseCase::new(repository.clone(), pusher.clone());
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
            .execute(
                bob.connection_id(),
                &binding("R1", "Bob"),
                "print(1)".to_string(),
            )
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(
            alice.drain(),
            vec![ServerMessage::ReflectCode("print(1)".to_string())]
        );
        assert!(bob.drain().is_empty());
        let handle = repository.get_room(&room_id("R1")).await.unwrap();
        assert_eq!(handle.lock().await.buffer(), "print(1)");
    }

    #[tokio::test]
    async fn test_concurrent_changes_last_completed_write_wins() {
        // テスト項目: 同時に更新しても最終的なバッファは最後に完了した書き込みと一致する
        // given (前提条件):
        let repository = create_test_repository();
        let pusher = create_test_message_pusher();
        let usecase = Arc::new(ChangeCodeUseCase::new(repository.clone(), pusher.clone()));
        create_room(&repository, "R1", "Alice").await;
        let mut alice = connect_client(&pusher, "R1", "Alice").await;
        ConnectParticipantUseCase::new(repository.clone(), pusher.clone())
            .execute(&mut alice.session, "R1".to_string(), "Alice".to_string())
            .await
            .unwrap();
        // 受信側は別の接続として購読する
        let mut observer = connect_client(&pusher, "R1", "Observer").await;
        pusher.subscribe(&room_id("R1"), &observer.connection_id()).await;
        alice.drain();

        // when (操作):
        let mut handles = Vec::new();
        for i in 0..20 {
            let usecase = usecase.clone();
            let connection_id = alice.connection_id();
            handles.push(tokio::spawn(async move {
                usecase
                    .execute(connection_id, &binding("R1", "Alice"), format!("v{}", i))
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        // then (期待する結果):
        // 配信はロック内で enqueue されるため、最後に届いた値が最終バッファと一致する
        let received = observer.drain();
        assert_eq!(received.len(), 20);
        let last = match received.last().unwrap() {
            ServerMessage::ReflectCode(code) => code.clone(),
            other => panic!("expected reflect-code, got {other:?}"),
        };
        let handle = repository.get_room(&room_id("R1")).await.unwrap();
        assert_eq!(handle.lock().await.buffer(), last);
    }

    #[tokio::test]
    async fn test_change_code_on_missing_room() {
        // テスト項目: 存在しない Room への更新は RoomNotFound になる（呼び出し元で無視される）
        // given (前提条件):
        let repository = create_test_repository();
        let pusher = create_test_message_pusher();
        let usecase = ChangeCodeUseCase::new(repository, pusher);

        // when (操作):
        let result = usecase
            .execute(ConnectionId::generate(), &binding("R1", "Bob"), "x".to_string())
            .await;

        // then (期待する結果):
        assert_eq!(result, Err(SessionEventError::RoomNotFound));
    }
}
