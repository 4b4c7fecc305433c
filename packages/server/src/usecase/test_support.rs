//! Fixtures shared by the usecase tests.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::{
    domain::{
        ConnectionId, MessagePusher, ParticipantName, Room, RoomId, RoomRepository, Session,
        SessionBinding, Timestamp, TokenClaims,
    },
    infrastructure::{
        dto::websocket::ServerMessage, message_pusher::WebSocketMessagePusher,
        repository::InMemoryRoomRepository,
    },
};

pub fn room_id(value: &str) -> RoomId {
    RoomId::new(value.to_string()).unwrap()
}

pub fn name(value: &str) -> ParticipantName {
    ParticipantName::new(value.to_string()).unwrap()
}

pub fn binding(room: &str, participant: &str) -> SessionBinding {
    SessionBinding {
        room_id: room_id(room),
        name: name(participant),
    }
}

pub fn create_test_repository() -> Arc<InMemoryRoomRepository> {
    Arc::new(InMemoryRoomRepository::new())
}

pub fn create_test_message_pusher() -> Arc<WebSocketMessagePusher> {
    Arc::new(WebSocketMessagePusher::new())
}

/// Create `room` with `creator` as its only participant.
pub async fn create_room(repository: &InMemoryRoomRepository, room: &str, creator: &str) {
    repository
        .create_room(Room::new(room_id(room), name(creator), Timestamp::new(1000)))
        .await
        .unwrap();
}

/// A registered connection with its outbound queue.
pub struct TestClient {
    pub session: Session,
    pub rx: mpsc::UnboundedReceiver<String>,
}

impl TestClient {
    pub fn connection_id(&self) -> ConnectionId {
        self.session.connection_id()
    }

    /// Pop the next queued event, if any.
    pub fn next_event(&mut self) -> Option<ServerMessage> {
        self.rx
            .try_recv()
            .ok()
            .map(|raw| serde_json::from_str(&raw).unwrap())
    }

    /// Pop every queued event.
    pub fn drain(&mut self) -> Vec<ServerMessage> {
        std::iter::from_fn(|| self.next_event()).collect()
    }
}

/// Register a connection authorized for (`room`, `participant`).
pub async fn connect_client(
    pusher: &WebSocketMessagePusher,
    room: &str,
    participant: &str,
) -> TestClient {
    let (tx, rx) = mpsc::unbounded_channel();
    let session = Session::new(
        ConnectionId::generate(),
        TokenClaims {
            room_id: room_id(room),
            name: name(participant),
        },
    );
    pusher.register_client(session.connection_id(), tx).await;
    TestClient { session, rx }
}
