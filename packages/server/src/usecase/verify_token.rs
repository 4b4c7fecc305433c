//! UseCase: トークン検証処理

use std::sync::Arc;

use crate::domain::{AuthError, TokenClaims, TokenService};

/// トークン検証のユースケース
pub struct VerifyTokenUseCase {
    token_service: Arc<dyn TokenService>,
}

impl VerifyTokenUseCase {
    pub fn new(token_service: Arc<dyn TokenService>) -> Self {
        Self { token_service }
    }

    /// トークンを検証し、埋め込まれた (roomId, name) を返す
    pub fn execute(&self, token: Option<&str>) -> Result<TokenClaims, AuthError> {
        let token = token.ok_or(AuthError::MissingToken)?;
        self.token_service.verify(token)
    }
}
