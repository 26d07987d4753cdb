use std::sync::Arc;

use tracing::{debug, warn};

use crate::contract::model::AuthUser;
use crate::domain::ports::ActorSupplier;
use crate::infra::storage::entity::AuthUserRecord;
use crate::infra::storage::kv::{KeyValueStore, StorageError};
use crate::infra::storage::mapper::{auth_user_to_record, record_to_auth_user};

pub const DEFAULT_SESSION_KEY: &str = "user";

/// Remembers the signed-in principal between runs.
pub struct SessionStore {
    kv: Arc<dyn KeyValueStore>,
    key: String,
}

impl SessionStore {
    pub fn new(kv: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    /// The stored principal; absent, unreadable or corrupt data reads as signed out.
    pub fn current(&self) -> Option<AuthUser> {
        let raw = match self.kv.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to read session slot: {}", e);
                return None;
            }
        };
        match serde_json::from_str::<AuthUserRecord>(&raw) {
            Ok(record) => Some(record_to_auth_user(record)),
            Err(e) => {
                debug!("Ignoring corrupt session data: {}", e);
                None
            }
        }
    }

    pub fn sign_in(&self, user: &AuthUser) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&auth_user_to_record(user))
            .map_err(|source| StorageError::Encode {
                key: self.key.clone(),
                source,
            })?;
        self.kv.set(&self.key, &raw)
    }

    pub fn sign_out(&self) -> Result<(), StorageError> {
        self.kv.remove(&self.key)
    }
}

impl ActorSupplier for SessionStore {
    fn current_actor(&self) -> Option<AuthUser> {
        self.current()
    }
}
