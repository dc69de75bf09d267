use chrono::{DateTime, Utc};
use rand::RngExt;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use casedesk_core::serde::{opt_to_rfc3339_ms, to_rfc3339_ms};

/// How long a registration verification code stays valid (10 minutes).
pub const VERIFICATION_CODE_TTL_MS: i64 = 10 * 60 * 1000;

/// How long a login PIN stays valid (5 minutes).
pub const LOGIN_PIN_TTL_MS: i64 = 5 * 60 * 1000;

/// A verified account. Store key: `user:<email>`.
///
/// JSON field names are camelCase to match the store documents the office
/// tool has always written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub salt: String,
    pub verified: bool,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "opt_to_rfc3339_ms")]
    pub last_login: Option<DateTime<Utc>>,
}

/// An unverified registration awaiting its emailed code.
/// Store key: `pending:<email>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingRegistration {
    pub email: String,
    pub password_hash: String,
    pub salt: String,
    pub verification_code: String,
    /// Absolute expiry, milliseconds since epoch.
    pub expires_at: i64,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl PendingRegistration {
    pub fn is_expired(&self, now_ms: i64) -> bool {
        expired(self.expires_at, now_ms)
    }
}

/// A one-time login PIN. Store key: `pin:<email>`; at most one live PIN per
/// email, a new request overwrites the old record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginPin {
    pub email: String,
    pub pin: String,
    pub user_id: Uuid,
    /// Absolute expiry, milliseconds since epoch.
    pub expires_at: i64,
}

impl LoginPin {
    pub fn is_expired(&self, now_ms: i64) -> bool {
        expired(self.expires_at, now_ms)
    }
}

/// Identity handed back to the UI layer after a successful token check.
#[derive(Debug, Clone, Serialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub email: String,
    pub verified: bool,
}

/// Expiry convention for stored records: expired once `expires_at < now`,
/// still valid at exact equality. Checked at use time, never at load time.
pub fn expired(expires_at_ms: i64, now_ms: i64) -> bool {
    expires_at_ms < now_ms
}

/// Current wall-clock time in milliseconds since epoch.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Lowercased, trimmed form of an email, used for all store keys so lookups
/// are case-insensitive.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn user_key(email: &str) -> String {
    format!("user:{}", normalize_email(email))
}

pub fn pending_key(email: &str) -> String {
    format!("pending:{}", normalize_email(email))
}

pub fn pin_key(email: &str) -> String {
    format!("pin:{}", normalize_email(email))
}

/// Uniformly random 6-digit numeric code in [100000, 999999]; used for both
/// registration verification codes and login PINs.
pub fn generate_numeric_code() -> String {
    let mut rng = rand::rng();
    rng.random_range(100_000..=999_999u32).to_string()
}
