use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use casedesk_auth_types::token::{ACCESS_TOKEN_TTL_SECS, JwtClaims, validate_access_token};

use crate::domain::repository::UserRepository;
use crate::domain::types::SessionUser;
use crate::error::AuthFlowError;

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

/// Issue a signed access token for a user. Returns the token and its expiry
/// (seconds since epoch).
pub fn issue_access_token(user_id: Uuid, secret: &str) -> Result<(String, u64), AuthFlowError> {
    let iat = now_secs();
    let exp = iat + ACCESS_TOKEN_TTL_SECS;
    let claims = JwtClaims {
        sub: user_id.to_string(),
        iat,
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthFlowError::Internal(e.into()))?;
    Ok((token, exp))
}

// ── CheckToken ───────────────────────────────────────────────────────────────

/// Validate a bearer token and resolve its subject against the user store.
///
/// Every failure mode (malformed, bad signature, expired, unknown subject)
/// collapses into [`AuthFlowError::InvalidToken`] so callers get no oracle on
/// why a token was rejected.
pub struct CheckTokenUseCase<U: UserRepository> {
    pub users: U,
    pub jwt_secret: String,
}

impl<U: UserRepository> CheckTokenUseCase<U> {
    pub async fn execute(&self, token: &str) -> Result<SessionUser, AuthFlowError> {
        let info = validate_access_token(token, &self.jwt_secret)
            .map_err(|_| AuthFlowError::InvalidToken)?;

        let user = self
            .users
            .find_by_id(info.user_id)
            .await?
            .ok_or(AuthFlowError::InvalidToken)?;

        Ok(SessionUser {
            id: user.id,
            email: user.email,
            verified: user.verified,
        })
    }
}
