//! Domain entities: rooms and their participants.

use super::{
    error::RoomError,
    value_object::{ConnectionId, ParticipantName, RoomId, Timestamp},
};

/// Buffer content of a freshly created room.
pub const DEFAULT_BUFFER: &str = "# Write your code here";

/// Avatar reference given to every participant.
pub const DEFAULT_AVATAR: &str = "/placeholder.svg?height=32&width=32";

/// A named member of a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub name: ParticipantName,
    /// Opaque display reference (avatar URL)
    pub avatar: String,
    pub typing: bool,
    pub joined_at: Timestamp,
    /// Live connection currently owning this name, if any
    pub connection: Option<ConnectionId>,
}

impl Participant {
    pub fn new(name: ParticipantName, joined_at: Timestamp) -> Self {
        Self {
            name,
            avatar: DEFAULT_AVATAR.to_string(),
            typing: false,
            joined_at,
            connection: None,
        }
    }
}

/// An isolated collaboration session with one shared buffer.
///
/// A `Room` carries no synchronization of its own; the registry wraps each
/// room in a mutex so that every method below runs linearized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    buffer: String,
    /// Participants in join order
    participants: Vec<Participant>,
    pub created_at: Timestamp,
    /// Set once the registry has evicted this room
    closed: bool,
}

impl Room {
    /// Create a room with its creator as the only participant.
    pub fn new(id: RoomId, creator: ParticipantName, created_at: Timestamp) -> Self {
        Self {
            id,
            buffer: DEFAULT_BUFFER.to_string(),
            participants: vec![Participant::new(creator, created_at)],
            created_at,
            closed: false,
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Replace the buffer. Last writer wins; there is no merge.
    pub fn set_buffer(&mut self, text: String) {
        self.buffer = text;
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Owned copy of the participant list, safe to hand to a broadcast.
    pub fn snapshot(&self) -> Vec<Participant> {
        self.participants.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub(crate) fn close(&mut self) {
        self.closed = true;
    }

    pub fn find_participant(&self, name: &ParticipantName) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.name == name)
    }

    /// Append a participant. Names are unique within a room.
    pub fn add_participant(&mut self, participant: Participant) -> Result<(), RoomError> {
        if self.find_participant(&participant.name).is_some() {
            return Err(RoomError::ParticipantNameTaken(
                participant.name.into_string(),
            ));
        }
        self.participants.push(participant);
        Ok(())
    }

    /// Update the typing flag of `name`.
    ///
    /// Returns `None` when the participant is not in the room; callers treat
    /// this as a benign race with a disconnect.
    pub fn set_typing(&mut self, name: &ParticipantName, typing: bool) -> Option<Vec<Participant>> {
        let participant = self.participants.iter_mut().find(|p| &p.name == name)?;
        participant.typing = typing;
        Some(self.snapshot())
    }

    /// Remove `name` from the room and return the remaining participants.
    pub fn remove_participant(&mut self, name: &ParticipantName) -> Vec<Participant> {
        self.participants.retain(|p| &p.name != name);
        self.snapshot()
    }

    /// Tie `name` to a live connection, adding the participant if needed.
    ///
    /// Fails when the name is already owned by a different live connection.
    pub fn bind_connection(
        &mut self,
        name: &ParticipantName,
        connection: ConnectionId,
        joined_at: Timestamp,
    ) -> Result<(), RoomError> {
        match self.participants.iter_mut().find(|p| &p.name == name) {
            Some(participant) => match participant.connection {
                Some(owner) if owner != connection => {
                    Err(RoomError::ParticipantNameTaken(name.as_str().to_string()))
                }
                _ => {
                    participant.connection = Some(connection);
                    Ok(())
                }
            },
            None => {
                let mut participant = Participant::new(name.clone(), joined_at);
                participant.connection = Some(connection);
                self.participants.push(participant);
                Ok(())
            }
        }
    }

    /// Remove `name` only if it is owned by `connection`.
    ///
    /// Returns the remaining participants when a removal happened.
    pub fn release_connection(
        &mut self,
        name: &ParticipantName,
        connection: ConnectionId,
    ) -> Result<Vec<Participant>, RoomError> {
        let owned = self
            .participants
            .iter()
            .any(|p| &p.name == name && p.connection == Some(connection));
        if !owned {
            return Err(RoomError::ParticipantNotFound(name.as_str().to_string()));
        }
        Ok(self.remove_participant(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(value: &str) -> ParticipantName {
        ParticipantName::new(value.to_string()).unwrap()
    }

    fn create_test_room() -> Room {
        Room::new(
            RoomId::new("R1".to_string()).unwrap(),
            name("alice"),
            Timestamp::new(1000),
        )
    }

    fn names(participants: &[Participant]) -> Vec<&str> {
        participants.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_new_room_has_creator_and_default_buffer() {
        // テスト項目: 新規 Room は作成者 1 名とデフォルトのバッファを持つ
        // given (前提条件):

        // when (操作):
        let room = create_test_room();

        // then (期待する結果):
        assert_eq!(room.buffer(), DEFAULT_BUFFER);
        assert_eq!(names(room.participants()), vec!["alice"]);
        assert_eq!(room.participants()[0].avatar, DEFAULT_AVATAR);
        assert!(!room.participants()[0].typing);
        assert!(!room.is_closed());
    }

    #[test]
    fn test_set_buffer_last_writer_wins() {
        // テスト項目: バッファは最後に書き込まれた値になる
        // given (前提条件):
        let mut room = create_test_room();

        // when (操作):
        room.set_buffer("print(1)".to_string());
        room.set_buffer("print(2)".to_string());

        // then (期待する結果):
        assert_eq!(room.buffer(), "print(2)");
    }

    #[test]
    fn test_add_participant_rejects_duplicate_name() {
        // テスト項目: 同じ名前の参加者は追加できない
        // given (前提条件):
        let mut room = create_test_room();

        // when (操作):
        let result = room.add_participant(Participant::new(name("alice"), Timestamp::new(2000)));

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RoomError::ParticipantNameTaken("alice".to_string()))
        );
        assert_eq!(room.participants().len(), 1);
    }

    #[test]
    fn test_participants_keep_join_order() {
        // テスト項目: 参加者リストは参加順に並ぶ
        // given (前提条件):
        let mut room = create_test_room();

        // when (操作):
        room.add_participant(Participant::new(name("charlie"), Timestamp::new(2000)))
            .unwrap();
        room.add_participant(Participant::new(name("bob"), Timestamp::new(3000)))
            .unwrap();

        // then (期待する結果):
        assert_eq!(names(room.participants()), vec!["alice", "charlie", "bob"]);
    }

    #[test]
    fn test_set_typing_updates_flag() {
        // テスト項目: 入力中フラグを更新すると更新後の参加者リストが返される
        // given (前提条件):
        let mut room = create_test_room();

        // when (操作):
        let result = room.set_typing(&name("alice"), true);

        // then (期待する結果):
        let participants = result.unwrap();
        assert!(participants[0].typing);
        assert!(room.participants()[0].typing);
    }

    #[test]
    fn test_set_typing_unknown_name_is_noop() {
        // テスト項目: 存在しない参加者の入力中フラグ更新は何もしない
        // given (前提条件):
        let mut room = create_test_room();
        let before = room.clone();

        // when (操作):
        let result = room.set_typing(&name("ghost"), true);

        // then (期待する結果):
        assert!(result.is_none());
        assert_eq!(room, before);
    }

    #[test]
    fn test_snapshot_is_independent_copy() {
        // テスト項目: スナップショットは後続の変更の影響を受けない
        // given (前提条件):
        let mut room = create_test_room();
        let snapshot = room.snapshot();

        // when (操作):
        room.set_typing(&name("alice"), true);
        room.remove_participant(&name("alice"));

        // then (期待する結果):
        assert_eq!(snapshot.len(), 1);
        assert!(!snapshot[0].typing);
    }

    #[test]
    fn test_bind_connection_claims_unbound_participant() {
        // テスト項目: 未接続の参加者に接続を紐付けられる
        // given (前提条件):
        let mut room = create_test_room();
        let connection = ConnectionId::generate();

        // when (操作):
        let result = room.bind_connection(&name("alice"), connection, Timestamp::new(2000));

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(room.participants().len(), 1);
        assert_eq!(room.participants()[0].connection, Some(connection));
    }

    #[test]
    fn test_bind_connection_adds_missing_participant() {
        // テスト項目: 参加者が存在しない場合は新規に追加して紐付ける
        // given (前提条件):
        let mut room = create_test_room();
        let connection = ConnectionId::generate();

        // when (操作):
        room.bind_connection(&name("bob"), connection, Timestamp::new(2000))
            .unwrap();

        // then (期待する結果):
        assert_eq!(names(room.participants()), vec!["alice", "bob"]);
        assert_eq!(room.participants()[1].joined_at, Timestamp::new(2000));
    }

    #[test]
    fn test_bind_connection_rejects_name_owned_by_other_connection() {
        // テスト項目: 別の接続が使用中の名前には紐付けできない
        // given (前提条件):
        let mut room = create_test_room();
        room.bind_connection(&name("alice"), ConnectionId::generate(), Timestamp::new(2000))
            .unwrap();

        // when (操作):
        let result =
            room.bind_connection(&name("alice"), ConnectionId::generate(), Timestamp::new(3000));

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RoomError::ParticipantNameTaken("alice".to_string()))
        );
    }

    #[test]
    fn test_release_connection_only_removes_owned_participant() {
        // テスト項目: 紐付いていない接続からは参加者を削除できない
        // given (前提条件):
        let mut room = create_test_room();
        let owner = ConnectionId::generate();
        room.bind_connection(&name("alice"), owner, Timestamp::new(2000))
            .unwrap();

        // when (操作):
        let stale = room.release_connection(&name("alice"), ConnectionId::generate());
        let released = room.release_connection(&name("alice"), owner);

        // then (期待する結果):
        assert_eq!(
            stale,
            Err(RoomError::ParticipantNotFound("alice".to_string()))
        );
        assert_eq!(released, Ok(vec![]));
        assert!(room.is_empty());
    }
}
