//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! ## ロック構成
//!
//! - `rooms`: RwLock。map の参照・挿入・削除の間だけ保持する
//! - 各 Room: Mutex。ルームの変更はこのロックの下で直列化される
//!
//! 両方を取るのは `remove_room_if_empty` だけで、順序は ルーム → レジストリ。
//! レジストリのロックを保持したままルームのロックを待つ経路はないため、
//! 異なるルームへの操作は互いにブロックしない。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use crate::domain::{
    Participant, RepositoryError, Room, RoomError, RoomId, RoomRepository, SharedRoom,
};

/// インメモリ Room Repository 実装
#[derive(Default)]
pub struct InMemoryRoomRepository {
    rooms: RwLock<HashMap<RoomId, SharedRoom>>,
}

impl InMemoryRoomRepository {
    /// 空の InMemoryRoomRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn create_room(&self, room: Room) -> Result<SharedRoom, RepositoryError> {
        let mut rooms = self.rooms.write().await;
        if rooms.contains_key(&room.id) {
            return Err(RepositoryError::RoomAlreadyExists);
        }
        let room_id = room.id.clone();
        let shared = Arc::new(Mutex::new(room));
        rooms.insert(room_id.clone(), shared.clone());
        tracing::debug!("Room '{}' inserted into registry", room_id);
        Ok(shared)
    }

    async fn get_room(&self, room_id: &RoomId) -> Result<SharedRoom, RepositoryError> {
        let rooms = self.rooms.read().await;
        rooms
            .get(room_id)
            .cloned()
            .ok_or(RepositoryError::RoomNotFound)
    }

    async fn list_rooms(&self) -> Vec<Room> {
        let handles: Vec<SharedRoom> = {
            let rooms = self.rooms.read().await;
            rooms.values().cloned().collect()
        };

        let mut snapshot = Vec::with_capacity(handles.len());
        for handle in handles {
            let room = handle.lock().await;
            if !room.is_closed() {
                snapshot.push(room.clone());
            }
        }
        snapshot.sort_by(|a, b| a.id.cmp(&b.id));
        snapshot
    }

    async fn add_participant(
        &self,
        room_id: &RoomId,
        participant: Participant,
    ) -> Result<Room, RepositoryError> {
        let handle = self.get_room(room_id).await?;
        let mut room = handle.lock().await;
        // Evicted between lookup and lock
        if room.is_closed() {
            return Err(RepositoryError::RoomNotFound);
        }
        room.add_participant(participant).map_err(|e| match e {
            RoomError::ParticipantNameTaken(name) => RepositoryError::ParticipantNameTaken(name),
            RoomError::ParticipantNotFound(_) => RepositoryError::RoomNotFound,
        })?;
        Ok(room.clone())
    }

    async fn remove_room_if_empty(&self, room_id: &RoomId) -> bool {
        let Ok(handle) = self.get_room(room_id).await else {
            return false;
        };
        let mut room = handle.lock().await;
        if room.is_closed() || !room.is_empty() {
            return false;
        }

        // Room lock is held so nobody can join between the check and the removal
        let mut rooms = self.rooms.write().await;
        match rooms.get(room_id) {
            Some(current) if Arc::ptr_eq(current, &handle) => {
                rooms.remove(room_id);
            }
            _ => return false,
        }
        room.close();
        tracing::info!("Room '{}' is empty and was removed from registry", room_id);
        true
    }

    async fn count_rooms(&self) -> usize {
        self.rooms.read().await.len()
    }
}
