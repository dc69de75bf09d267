use std::sync::Arc;

use crate::domain::repository::Mailer;
use crate::infra::store::{
    JsonPendingRepository, JsonPinRepository, JsonStore, JsonUserRepository,
};

/// Shared wiring for the auth flows: storage, mail dispatch, and the bits of
/// configuration the flows consume.
#[derive(Clone)]
pub struct AuthState<M: Mailer> {
    pub store: Arc<JsonStore>,
    pub mailer: M,
    pub jwt_secret: String,
    pub allowed_domains: Vec<String>,
}

impl<M: Mailer> AuthState<M> {
    pub fn user_repo(&self) -> JsonUserRepository {
        JsonUserRepository {
            store: Arc::clone(&self.store),
        }
    }

    pub fn pending_repo(&self) -> JsonPendingRepository {
        JsonPendingRepository {
            store: Arc::clone(&self.store),
        }
    }

    pub fn pin_repo(&self) -> JsonPinRepository {
        JsonPinRepository {
            store: Arc::clone(&self.store),
        }
    }
}
