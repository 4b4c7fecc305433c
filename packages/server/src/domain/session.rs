//! Per-connection session state machine.
//!
//! ```text
//! Connected --join--> Joined --disconnect--> Disconnected
//!     \___________________disconnect_______________/
//! ```
//!
//! `Disconnected` is terminal. A session holds only identifiers; the room
//! state itself lives in the registry.

use super::{ConnectionId, ParticipantName, RoomId, TokenClaims};

/// The (room, participant) pair a joined session is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionBinding {
    pub room_id: RoomId,
    pub name: ParticipantName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Connected,
    Joined(SessionBinding),
    Disconnected,
}

/// The binding of one connection to at most one room for its lifetime.
#[derive(Debug)]
pub struct Session {
    connection_id: ConnectionId,
    /// Identity proven by the token presented at upgrade
    authorized: TokenClaims,
    state: SessionState,
}

impl Session {
    pub fn new(connection_id: ConnectionId, authorized: TokenClaims) -> Self {
        Self {
            connection_id,
            authorized,
            state: SessionState::Connected,
        }
    }

    pub fn connection_id(&self) -> ConnectionId {
        self.connection_id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn binding(&self) -> Option<&SessionBinding> {
        match &self.state {
            SessionState::Joined(binding) => Some(binding),
            _ => None,
        }
    }

    /// Whether the token allows joining `room_id` as `name`.
    pub fn is_authorized_for(&self, room_id: &RoomId, name: &ParticipantName) -> bool {
        &self.authorized.room_id == room_id && &self.authorized.name == name
    }

    /// Move `Connected -> Joined`. Returns false in any other state.
    pub fn join(&mut self, binding: SessionBinding) -> bool {
        if self.state != SessionState::Connected {
            return false;
        }
        self.state = SessionState::Joined(binding);
        true
    }

    /// Move to `Disconnected`.
    ///
    /// Returns the room binding the first time a joined session is closed and
    /// `None` on every later call, so cleanup runs at most once.
    pub fn close(&mut self) -> Option<SessionBinding> {
        match std::mem::replace(&mut self.state, SessionState::Disconnected) {
            SessionState::Joined(binding) => Some(binding),
            SessionState::Connected | SessionState::Disconnected => None,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.state == SessionState::Disconnected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims() -> TokenClaims {
        TokenClaims {
            room_id: RoomId::new("R1".to_string()).unwrap(),
            name: ParticipantName::new("alice".to_string()).unwrap(),
        }
    }

    fn binding() -> SessionBinding {
        let TokenClaims { room_id, name } = claims();
        SessionBinding { room_id, name }
    }

    #[test]
    fn test_new_session_is_connected() {
        // テスト項目: 新しいセッションは Connected 状態で始まる
        // given (前提条件):

        // when (操作):
        let session = Session::new(ConnectionId::generate(), claims());

        // then (期待する結果):
        assert_eq!(session.state(), &SessionState::Connected);
        assert!(session.binding().is_none());
    }

    #[test]
    fn test_join_only_once() {
        // テスト項目: 1 つの接続は 1 つのルームにしか参加できない
        // given (前提条件):
        let mut session = Session::new(ConnectionId::generate(), claims());

        // when (操作):
        let first = session.join(binding());
        let second = session.join(binding());

        // then (期待する結果):
        assert!(first);
        assert!(!second);
        assert_eq!(session.binding(), Some(&binding()));
    }

    #[test]
    fn test_close_returns_binding_once() {
        // テスト項目: close は最初の 1 回だけバインディングを返す（冪等性）
        // given (前提条件):
        let mut session = Session::new(ConnectionId::generate(), claims());
        session.join(binding());

        // when (操作):
        let first = session.close();
        let second = session.close();

        // then (期待する結果):
        assert_eq!(first, Some(binding()));
        assert_eq!(second, None);
        assert!(session.is_closed());
    }

    #[test]
    fn test_join_after_close_is_rejected() {
        // テスト項目: 切断後のセッションは再参加できない
        // given (前提条件):
        let mut session = Session::new(ConnectionId::generate(), claims());
        session.close();

        // when (操作):
        let result = session.join(binding());

        // then (期待する結果):
        assert!(!result);
        assert!(session.is_closed());
    }

    #[test]
    fn test_is_authorized_for_matches_token_identity() {
        // テスト項目: トークンと一致するルームと名前のみ許可される
        // given (前提条件):
        let session = Session::new(ConnectionId::generate(), claims());
        let other_room = RoomId::new("R2".to_string()).unwrap();

        // when (操作):
        let allowed = session.is_authorized_for(&binding().room_id, &binding().name);
        let denied = session.is_authorized_for(&other_room, &binding().name);

        // then (期待する結果):
        assert!(allowed);
        assert!(!denied);
    }
}
