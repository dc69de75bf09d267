//! JSON-file-backed repositories.
//!
//! Three independent categories, one document each, every document a mapping
//! from a namespaced key (`user:<email>`, `pending:<email>`, `pin:<email>`)
//! to a record. Reads degrade to an empty mapping on missing or corrupt
//! files; writes are fire-and-forget. A per-category mutex keeps each
//! repository method's read-modify-write atomic within the process. Two
//! separate processes writing the same files can still race; accepted
//! limitation of the file-per-store design.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use crate::domain::repository::{PendingRepository, PinRepository, UserRepository};
use crate::domain::types::{
    LoginPin, PendingRegistration, User, pending_key, pin_key, user_key,
};
use crate::error::AuthFlowError;

/// A store category. Each maps to one JSON document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Users,
    Pending,
    Pins,
}

impl Category {
    fn file_name(self) -> &'static str {
        match self {
            Category::Users => "users.json",
            Category::Pending => "pending_users.json",
            Category::Pins => "login_pins.json",
        }
    }
}

pub struct JsonStore {
    data_dir: PathBuf,
    users_lock: Mutex<()>,
    pending_lock: Mutex<()>,
    pins_lock: Mutex<()>,
}

impl JsonStore {
    /// Open a store rooted at `data_dir`, creating the directory if needed.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Arc<Self>, AuthFlowError> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("create data dir {}", data_dir.display()))?;
        Ok(Arc::new(Self {
            data_dir,
            users_lock: Mutex::new(()),
            pending_lock: Mutex::new(()),
            pins_lock: Mutex::new(()),
        }))
    }

    /// Acquire the category's mutex. Held across a full read-modify-write.
    async fn lock(&self, category: Category) -> MutexGuard<'_, ()> {
        match category {
            Category::Users => self.users_lock.lock().await,
            Category::Pending => self.pending_lock.lock().await,
            Category::Pins => self.pins_lock.lock().await,
        }
    }

    fn path(&self, category: Category) -> PathBuf {
        self.data_dir.join(category.file_name())
    }

    /// Load a category. A missing or unreadable document reads as empty; the
    /// caller cannot tell the difference, which is the accepted trade-off.
    async fn load<T: DeserializeOwned>(&self, category: Category) -> HashMap<String, T> {
        let path = self.path(category);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return HashMap::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "store read failed, treating as empty");
                return HashMap::new();
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "store document corrupt, treating as empty");
                HashMap::new()
            }
        }
    }

    /// Persist a category. Failures are logged and swallowed.
    async fn save<T: Serialize>(&self, category: Category, map: &HashMap<String, T>) {
        let path = self.path(category);
        let json = match serde_json::to_vec_pretty(map) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "store serialization failed");
                return;
            }
        };
        if let Err(e) = tokio::fs::write(&path, json).await {
            tracing::error!(path = %path.display(), error = %e, "store write failed");
        }
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct JsonUserRepository {
    pub store: Arc<JsonStore>,
}

impl UserRepository for JsonUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthFlowError> {
        let _guard = self.store.lock(Category::Users).await;
        let users: HashMap<String, User> = self.store.load(Category::Users).await;
        Ok(users.get(&user_key(email)).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthFlowError> {
        let _guard = self.store.lock(Category::Users).await;
        let users: HashMap<String, User> = self.store.load(Category::Users).await;
        Ok(users.into_values().find(|u| u.id == id))
    }

    async fn create(&self, user: &User) -> Result<(), AuthFlowError> {
        let _guard = self.store.lock(Category::Users).await;
        let mut users: HashMap<String, User> = self.store.load(Category::Users).await;
        users.insert(user_key(&user.email), user.clone());
        self.store.save(Category::Users, &users).await;
        Ok(())
    }

    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), AuthFlowError> {
        let _guard = self.store.lock(Category::Users).await;
        let mut users: HashMap<String, User> = self.store.load(Category::Users).await;
        let Some(user) = users.values_mut().find(|u| u.id == id) else {
            return Ok(());
        };
        user.last_login = Some(at);
        self.store.save(Category::Users, &users).await;
        Ok(())
    }
}

// ── Pending-registration repository ──────────────────────────────────────────

#[derive(Clone)]
pub struct JsonPendingRepository {
    pub store: Arc<JsonStore>,
}

impl PendingRepository for JsonPendingRepository {
    async fn find(&self, email: &str) -> Result<Option<PendingRegistration>, AuthFlowError> {
        let _guard = self.store.lock(Category::Pending).await;
        let pending: HashMap<String, PendingRegistration> =
            self.store.load(Category::Pending).await;
        Ok(pending.get(&pending_key(email)).cloned())
    }

    async fn upsert(&self, record: &PendingRegistration) -> Result<(), AuthFlowError> {
        let _guard = self.store.lock(Category::Pending).await;
        let mut pending: HashMap<String, PendingRegistration> =
            self.store.load(Category::Pending).await;
        pending.insert(pending_key(&record.email), record.clone());
        self.store.save(Category::Pending, &pending).await;
        Ok(())
    }

    async fn delete(&self, email: &str) -> Result<(), AuthFlowError> {
        let _guard = self.store.lock(Category::Pending).await;
        let mut pending: HashMap<String, PendingRegistration> =
            self.store.load(Category::Pending).await;
        if pending.remove(&pending_key(email)).is_some() {
            self.store.save(Category::Pending, &pending).await;
        }
        Ok(())
    }

    async fn purge_expired(&self, now_ms: i64) -> Result<u64, AuthFlowError> {
        let _guard = self.store.lock(Category::Pending).await;
        let mut pending: HashMap<String, PendingRegistration> =
            self.store.load(Category::Pending).await;
        let before = pending.len();
        pending.retain(|_, r| !r.is_expired(now_ms));
        let purged = (before - pending.len()) as u64;
        if purged > 0 {
            self.store.save(Category::Pending, &pending).await;
        }
        Ok(purged)
    }
}

// ── PIN repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct JsonPinRepository {
    pub store: Arc<JsonStore>,
}

impl PinRepository for JsonPinRepository {
    async fn find(&self, email: &str) -> Result<Option<LoginPin>, AuthFlowError> {
        let _guard = self.store.lock(Category::Pins).await;
        let pins: HashMap<String, LoginPin> = self.store.load(Category::Pins).await;
        Ok(pins.get(&pin_key(email)).cloned())
    }

    async fn upsert(&self, record: &LoginPin) -> Result<(), AuthFlowError> {
        let _guard = self.store.lock(Category::Pins).await;
        let mut pins: HashMap<String, LoginPin> = self.store.load(Category::Pins).await;
        pins.insert(pin_key(&record.email), record.clone());
        self.store.save(Category::Pins, &pins).await;
        Ok(())
    }

    async fn delete(&self, email: &str) -> Result<(), AuthFlowError> {
        let _guard = self.store.lock(Category::Pins).await;
        let mut pins: HashMap<String, LoginPin> = self.store.load(Category::Pins).await;
        if pins.remove(&pin_key(email)).is_some() {
            self.store.save(Category::Pins, &pins).await;
        }
        Ok(())
    }

    async fn purge_expired(&self, now_ms: i64) -> Result<u64, AuthFlowError> {
        let _guard = self.store.lock(Category::Pins).await;
        let mut pins: HashMap<String, LoginPin> = self.store.load(Category::Pins).await;
        let before = pins.len();
        pins.retain(|_, r| !r.is_expired(now_ms));
        let purged = (before - pins.len()) as u64;
        if purged > 0 {
            self.store.save(Category::Pins, &pins).await;
        }
        Ok(purged)
    }
}
