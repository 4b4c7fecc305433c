//! UseCase: 参加者接続（join-room）処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - 接続とルーム参加者の紐付け、配信グループへの登録、参加時の通知
//!
//! ### なぜこのテストが必要か
//! - 参加者には現在のバッファ、他の参加者には参加通知、全員には参加者リストが届くことを保証
//! - 同じ名前を別の接続が使用中の場合に乗っ取られないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：HTTP で登録済みの参加者の接続、未登録の参加者の接続
//! - 異常系：存在しない Room、トークンと一致しないルーム、使用中の名前、二重参加

use std::sync::Arc;

use sharepad_shared::time::now_millis;

use crate::domain::{
    MessagePusher, ParticipantName, RoomError, RoomEvent, RoomId, RoomRepository, Session,
    SessionBinding, Timestamp,
};

use super::error::ConnectError;

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    /// Repository（ルームレジストリの抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectParticipantUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 接続を (roomId, name) に紐付ける
    ///
    /// 成功時は Room のロックを保持したまま以下を順に enqueue する:
    ///
    /// 1. `user-joined` を参加者以外に
    /// 2. `reflect-code`（現在のバッファ）を参加者に
    /// 3. `update-users` を全員に
    pub async fn execute(
        &self,
        session: &mut Session,
        room_id: String,
        name: String,
    ) -> Result<(), ConnectError> {
        if session.binding().is_some() || session.is_closed() {
            return Err(ConnectError::AlreadyJoined);
        }

        let room_id = RoomId::new(room_id)?;
        let name = ParticipantName::new(name)?;
        if !session.is_authorized_for(&room_id, &name) {
            return Err(ConnectError::Unauthorized);
        }

        let handle = self
            .repository
            .get_room(&room_id)
            .await
            .map_err(|_| ConnectError::RoomNotFound)?;
        let connection_id = session.connection_id();

        let mut room = handle.lock().await;
        if room.is_closed() {
            return Err(ConnectError::RoomNotFound);
        }
        room.bind_connection(&name, connection_id, Timestamp::new(now_millis()))
            .map_err(|e| match e {
                RoomError::ParticipantNameTaken(name) | RoomError::ParticipantNotFound(name) => {
                    ConnectError::NameInUse(name)
                }
            })?;

        self.message_pusher.subscribe(&room_id, &connection_id).await;
        session.join(SessionBinding {
            room_id: room_id.clone(),
            name: name.clone(),
        });

        let joined = RoomEvent::UserJoined(format!("{} joined the room", name));
        if let Err(e) = self
            .message_pusher
            .broadcast_to_others(&room_id, &connection_id, &joined)
            .await
        {
            tracing::warn!("Failed to broadcast user-joined: {}", e);
        }

        let code = RoomEvent::ReflectCode(room.buffer().to_string());
        if let Err(e) = self.message_pusher.push_to(&connection_id, &code).await {
            tracing::warn!("Failed to send current buffer to '{}': {}", name, e);
        }

        let users = RoomEvent::UpdateUsers(room.snapshot());
        if let Err(e) = self.message_pusher.broadcast_to_all(&room_id, &users).await {
            tracing::warn!("Failed to broadcast update-users: {}", e);
        }

        tracing::info!(
            "Connection '{}' joined room '{}' as '{}'",
            connection_id,
            room_id,
            name
        );
        Ok(())
    }
}
