//! Authentication collaborator interface.
//!
//! Tokens are opaque to the rest of the domain: they are issued for a
//! (room, participant) pair and verified back into that pair.

use super::{AuthError, ParticipantName, RoomId};

/// Identity embedded in a valid room token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub room_id: RoomId,
    pub name: ParticipantName,
}

/// Issues and verifies room tokens.
pub trait TokenService: Send + Sync {
    fn issue(&self, room_id: &RoomId, name: &ParticipantName) -> Result<String, AuthError>;

    fn verify(&self, token: &str) -> Result<TokenClaims, AuthError>;
}
