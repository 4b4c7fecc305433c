//! Locking helper for events that act on an already-joined room.

use tokio::sync::OwnedMutexGuard;

use crate::domain::{Room, RoomId, RoomRepository};

use super::error::SessionEventError;

/// Look `room_id` up and lock it, treating an evicted room as missing.
pub(super) async fn lock_open_room(
    repository: &dyn RoomRepository,
    room_id: &RoomId,
) -> Result<OwnedMutexGuard<Room>, SessionEventError> {
    let handle = repository
        .get_room(room_id)
        .await
        .map_err(|_| SessionEventError::RoomNotFound)?;
    let room = handle.lock_owned().await;
    if room.is_closed() {
        return Err(SessionEventError::RoomNotFound);
    }
    Ok(room)
}
