//! UseCase: 入力中表示（user-typing）処理

use std::sync::Arc;

use crate::domain::{MessagePusher, ParticipantName, RoomEvent, RoomRepository, SessionBinding};

use super::{error::SessionEventError, room_guard::lock_open_room};

/// 入力中表示更新のユースケース
pub struct UpdateTypingUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl UpdateTypingUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// `name` の入力中フラグを更新し、送信者を含む全員に `user-typing` を配信する
    ///
    /// 参加者が見つからない場合は何も配信せず `ParticipantNotFound` を返す
    /// （切断との競合として呼び出し元で無視される）。
    pub async fn execute(
        &self,
        binding: &SessionBinding,
        room_id: &str,
        name: String,
        typing: bool,
    ) -> Result<(), SessionEventError> {
        if binding.room_id.as_str() != room_id {
            return Err(SessionEventError::RoomMismatch(room_id.to_string()));
        }
        let participant = ParticipantName::new(name.clone())
            .map_err(|_| SessionEventError::ParticipantNotFound(name.clone()))?;

        let mut room = lock_open_room(self.repository.as_ref(), &binding.room_id).await?;
        if room.set_typing(&participant, typing).is_none() {
            return Err(SessionEventError::ParticipantNotFound(name));
        }

        let event = RoomEvent::UserTyping {
            name: participant.into_string(),
            typing,
        };
        if let Err(e) = self
            .message_pusher
            .broadcast_to_all(&binding.room_id, &event)
            .await
        {
            tracing::warn!("Failed to broadcast user-typing: {}", e);
        }
        Ok(())
    }
}
