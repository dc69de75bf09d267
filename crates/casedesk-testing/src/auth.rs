//! Token-minting helpers for tests.

use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use casedesk_auth_types::token::JwtClaims;

/// Mint a signed access token with explicit `iat`/`exp`, bypassing the
/// service's issuance path. Useful for expiry and tamper tests.
pub fn test_token(user_id: Uuid, secret: &str, iat: u64, exp: u64) -> String {
    let claims = JwtClaims {
        sub: user_id.to_string(),
        iat,
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("failed to encode test token")
}
