//! MessagePusher trait 定義
//!
//! ルーム単位のブロードキャスト（Broadcast Router）のインターフェース。
//! 接続ごとの送信チャンネルとルームごとの購読者集合を管理します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError, RoomEvent, RoomId};

/// Outbound channel of one connection (serialized JSON frames).
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// MessagePusher trait
///
/// 送信はチャンネルへの enqueue のみでブロックしないため、ルームのロックを
/// 保持したまま呼び出してよい。実際のネットワーク送信は接続ごとの送信タスクが行う。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続の送信チャンネルを登録
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続の送信チャンネルを登録解除（全ての購読も解除される）
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// 接続をルームの配信グループに追加
    async fn subscribe(&self, room_id: &RoomId, connection_id: &ConnectionId);

    /// 接続をルームの配信グループから削除
    async fn unsubscribe(&self, room_id: &RoomId, connection_id: &ConnectionId);

    /// 特定の接続にイベントを送信
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError>;

    /// ルームの全員にイベントを送信
    async fn broadcast_to_all(
        &self,
        room_id: &RoomId,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError>;

    /// ルームの送信者以外の全員にイベントを送信
    async fn broadcast_to_others(
        &self,
        room_id: &RoomId,
        sender: &ConnectionId,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError>;
}
