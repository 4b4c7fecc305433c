//! HS256 JWT implementation of [`TokenService`].
//!
//! Claims carry the room id and participant name plus `iat`/`exp`.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::{AuthError, ParticipantName, RoomId, TokenClaims, TokenService};

/// Default token lifetime (24 hours).
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 24 * 60 * 60;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Claims {
    room_id: String,
    name: String,
    iat: i64,
    exp: i64,
}

/// Signs and verifies room tokens with a shared secret.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl JwtTokenService {
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::try_seconds(i64::try_from(ttl_secs).unwrap_or(i64::MAX))
                .unwrap_or(Duration::MAX),
        }
    }

    fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenIssueFailed(e.to_string()))
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, room_id: &RoomId, name: &ParticipantName) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now
            .checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
            .timestamp();
        self.sign(&Claims {
            room_id: room_id.as_str().to_string(),
            name: name.as_str().to_string(),
            iat: now.timestamp(),
            exp,
        })
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        if token.trim().is_empty() {
            return Err(AuthError::MissingToken);
        }

        let data = jsonwebtoken::decode::<Claims>(
            token,
            &self.decoding_key,
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|e| {
            tracing::debug!("Token verification failed: {}", e);
            AuthError::InvalidToken
        })?;

        let room_id = RoomId::new(data.claims.room_id).map_err(|_| AuthError::InvalidToken)?;
        let name = ParticipantName::new(data.claims.name).map_err(|_| AuthError::InvalidToken)?;
        Ok(TokenClaims { room_id, name })
    }
}
