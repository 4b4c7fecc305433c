//! Repository trait 定義
//!
//! ドメイン層が必要とするルームレジストリのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{Participant, RepositoryError, Room, RoomId};

/// Handle to one room; holding its lock linearizes every room mutation.
pub type SharedRoom = Arc<Mutex<Room>>;

/// Room Repository trait (room registry)
///
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
///
/// ## ロックの順序
///
/// 実装はレジストリ全体のロックを map 操作の間だけ保持し、ルームの変更は
/// 各 `SharedRoom` のロックで行う。レジストリのロックを保持したままルームのロックを
/// 待ってはならない。両方を取る場合（`remove_room_if_empty`）は ルーム → レジストリ の順。
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Room を登録する（同じ ID が既にあれば `RoomAlreadyExists`）
    async fn create_room(&self, room: Room) -> Result<SharedRoom, RepositoryError>;

    /// Room を取得
    async fn get_room(&self, room_id: &RoomId) -> Result<SharedRoom, RepositoryError>;

    /// 全ての Room のスナップショットを取得
    async fn list_rooms(&self) -> Vec<Room>;

    /// 参加者を追加し、追加後の Room のスナップショットを返す
    async fn add_participant(
        &self,
        room_id: &RoomId,
        participant: Participant,
    ) -> Result<Room, RepositoryError>;

    /// 参加者がいなければ Room を削除する（削除した場合 true）
    async fn remove_room_if_empty(&self, room_id: &RoomId) -> bool;

    /// 登録されている Room の数を取得
    async fn count_rooms(&self) -> usize;
}
