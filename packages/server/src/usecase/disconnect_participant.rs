//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 参加者の削除、残りの参加者への `update-users` 配信、空になった Room の削除
//!
//! ### なぜこのテストが必要か
//! - 切断が 2 回届いても通知は 1 回だけであること（冪等性）を保証
//! - 古い接続が同じ名前の新しい接続の参加者を削除しないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加者の切断と通知
//! - エッジケース：最後の参加者の切断（Room の削除）、二重切断、古い接続の切断

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, RoomEvent, RoomRepository, SessionBinding};

use super::{error::SessionEventError, room_guard::lock_open_room};

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    /// Repository（ルームレジストリの抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// 参加者がいなくなった Room をレジストリから削除するか
    evict_empty_rooms: bool,
}

impl DisconnectParticipantUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        evict_empty_rooms: bool,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            evict_empty_rooms,
        }
    }

    /// 参加者切断を実行
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - 参加者を削除し、残りの参加者に通知した
    /// * `Ok(false)` - この接続に紐付く参加者はもういない（通知なし）
    /// * `Err(SessionEventError::RoomNotFound)` - Room が既に存在しない
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        binding: &SessionBinding,
    ) -> Result<bool, SessionEventError> {
        let remaining = {
            let mut room = lock_open_room(self.repository.as_ref(), &binding.room_id).await?;
            self.message_pusher
                .unsubscribe(&binding.room_id, &connection_id)
                .await;

            let Ok(remaining) = room.release_connection(&binding.name, connection_id) else {
                tracing::debug!(
                    "'{}' is no longer owned by connection '{}', nothing to remove",
                    binding.name,
                    connection_id
                );
                return Ok(false);
            };

            let event = RoomEvent::UpdateUsers(remaining.clone());
            if let Err(e) = self
                .message_pusher
                .broadcast_to_others(&binding.room_id, &connection_id, &event)
                .await
            {
                tracing::warn!("Failed to broadcast update-users: {}", e);
            }
            remaining
        };

        tracing::info!(
            "'{}' left room '{}' ({} remaining)",
            binding.name,
            binding.room_id,
            remaining.len()
        );

        if self.evict_empty_rooms && remaining.is_empty() {
            self.repository.remove_room_if_empty(&binding.room_id).await;
        }
        Ok(true)
    }
}
