#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::types::{LoginPin, PendingRegistration, User};
use crate::error::AuthFlowError;

/// Repository for verified accounts. Email lookups are case-insensitive.
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthFlowError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthFlowError>;

    async fn create(&self, user: &User) -> Result<(), AuthFlowError>;

    /// Set the user's last-login timestamp. A missing id is a no-op.
    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), AuthFlowError>;
}

/// Repository for registrations awaiting email-code confirmation.
pub trait PendingRepository: Send + Sync {
    async fn find(&self, email: &str) -> Result<Option<PendingRegistration>, AuthFlowError>;

    /// Insert or replace the pending record for its email.
    async fn upsert(&self, pending: &PendingRegistration) -> Result<(), AuthFlowError>;

    async fn delete(&self, email: &str) -> Result<(), AuthFlowError>;

    /// Remove records whose expiry has passed. Returns how many were purged.
    async fn purge_expired(&self, now_ms: i64) -> Result<u64, AuthFlowError>;
}

/// Repository for one-time login PINs, at most one live PIN per email.
pub trait PinRepository: Send + Sync {
    async fn find(&self, email: &str) -> Result<Option<LoginPin>, AuthFlowError>;

    /// Insert or replace the PIN record for its email.
    async fn upsert(&self, pin: &LoginPin) -> Result<(), AuthFlowError>;

    async fn delete(&self, email: &str) -> Result<(), AuthFlowError>;

    /// Remove records whose expiry has passed. Returns how many were purged.
    async fn purge_expired(&self, now_ms: i64) -> Result<u64, AuthFlowError>;
}

/// Port for the outbound email collaborator.
///
/// Returns `true` on successful dispatch. Failures are reported, not thrown;
/// the flows surface them as their own failure messages.
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> bool;
}
