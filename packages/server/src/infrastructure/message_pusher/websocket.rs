//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` を管理
//! - ルームごとの配信グループ（購読中の接続の集合）を管理
//! - イベントを一度だけ JSON にシリアライズし、各宛先のチャンネルに enqueue する
//!
//! ## 設計ノート
//!
//! WebSocket の生成と実際のネットワーク送信は UI 層（`src/ui/handler/websocket.rs`）で行われます。
//! ここでの送信は enqueue のみでブロックしないため、ルームのロックを保持した呼び出し元から
//! 使われても送信待ちでルームが止まることはありません。宛先ごとのチャンネルは FIFO なので、
//! 呼び出し順がそのまま配信順になります。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel, RoomEvent, RoomId},
    infrastructure::dto::websocket::ServerMessage,
};

/// WebSocket を使った MessagePusher 実装
#[derive(Default)]
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの送信チャンネル
    clients: RwLock<HashMap<ConnectionId, PusherChannel>>,
    /// ルームごとの配信グループ（購読順）
    groups: RwLock<HashMap<RoomId, Vec<ConnectionId>>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// ルームの購読者数を取得
    pub async fn subscriber_count(&self, room_id: &RoomId) -> usize {
        self.groups
            .read()
            .await
            .get(room_id)
            .map_or(0, |members| members.len())
    }

    fn encode(event: &RoomEvent) -> Result<String, MessagePushError> {
        serde_json::to_string(&ServerMessage::from(event))
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))
    }

    /// 宛先リストに送信する。一部の送信失敗は許容する
    async fn deliver(
        &self,
        targets: &[ConnectionId],
        event: &RoomEvent,
    ) -> Result<(), MessagePushError> {
        let content = Self::encode(event)?;
        let clients = self.clients.read().await;

        for target in targets {
            match clients.get(target) {
                Some(sender) => {
                    if let Err(e) = sender.send(content.clone()) {
                        tracing::warn!(
                            "Failed to push '{}' to connection '{}': {}",
                            event.name(),
                            target,
                            e
                        );
                    } else {
                        tracing::debug!("Pushed '{}' to connection '{}'", event.name(), target);
                    }
                }
                None => {
                    tracing::warn!(
                        "Connection '{}' not found during broadcast, skipping",
                        target
                    );
                }
            }
        }

        Ok(())
    }

    async fn members(&self, room_id: &RoomId) -> Vec<ConnectionId> {
        self.groups
            .read()
            .await
            .get(room_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        self.clients.write().await.insert(connection_id, sender);
        tracing::debug!("Connection '{}' registered to MessagePusher", connection_id);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        self.clients.write().await.remove(connection_id);

        let mut groups = self.groups.write().await;
        for members in groups.values_mut() {
            members.retain(|id| id != connection_id);
        }
        groups.retain(|_, members| !members.is_empty());
        tracing::debug!("Connection '{}' unregistered from MessagePusher", connection_id);
    }

    async fn subscribe(&self, room_id: &RoomId, connection_id: &ConnectionId) {
        let mut groups = self.groups.write().await;
        let members = groups.entry(room_id.clone()).or_default();
        if !members.contains(connection_id) {
            members.push(*connection_id);
        }
        tracing::debug!("Connection '{}' subscribed to room '{}'", connection_id, room_id);
    }

    async fn unsubscribe(&self, room_id: &RoomId, connection_id: &ConnectionId) {
        let mut groups = self.groups.write().await;
        if let Some(members) = groups.get_mut(room_id) {
            members.retain(|id| id != connection_id);
            if members.is_empty() {
                groups.remove(room_id);
            }
        }
        tracing::debug!(
            "Connection '{}' unsubscribed from room '{}'",
            connection_id,
            room_id
        );
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError> {
        let content = Self::encode(event)?;
        let clients = self.clients.read().await;

        let sender = clients
            .get(connection_id)
            .ok_or_else(|| MessagePushError::ClientNotFound(connection_id.to_string()))?;
        sender
            .send(content)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed '{}' to connection '{}'", event.name(), connection_id);
        Ok(())
    }

    async fn broadcast_to_all(
        &self,
        room_id: &RoomId,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError> {
        let targets = self.members(room_id).await;
        self.deliver(&targets, event).await
    }

    async fn broadcast_to_others(
        &self,
        room_id: &RoomId,
        sender: &ConnectionId,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError> {
        let targets: Vec<ConnectionId> = self
            .members(room_id)
            .await
            .into_iter()
            .filter(|id| id != sender)
            .collect();
        self.deliver(&targets, event).await
    }
}
