use std::sync::Arc;

use anyhow::Context;
use tracing::debug;

use crate::contract::model::User;
use crate::domain::repo::UsersRepository;
use crate::infra::storage::entity::UserRecord;
use crate::infra::storage::kv::KeyValueStore;
use crate::infra::storage::mapper::{record_to_user, user_to_record};

pub const DEFAULT_USERS_KEY: &str = "users";

/// Users repository backed by a single key-value slot holding a JSON array.
pub struct KvUsersRepository {
    kv: Arc<dyn KeyValueStore>,
    key: String,
}

impl KvUsersRepository {
    pub fn new(kv: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }
}

impl UsersRepository for KvUsersRepository {
    fn load(&self) -> anyhow::Result<Option<Vec<User>>> {
        let raw = self
            .kv
            .get(&self.key)
            .with_context(|| format!("reading slot '{}'", self.key))?;

        let Some(raw) = raw else {
            return Ok(None);
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }

        let records: Vec<UserRecord> = serde_json::from_str(&raw)
            .with_context(|| format!("parsing slot '{}'", self.key))?;
        debug!("Parsed {} user records", records.len());
        Ok(Some(records.into_iter().map(record_to_user).collect()))
    }

    fn save(&self, users: &[User]) -> anyhow::Result<()> {
        let records: Vec<UserRecord> = users.iter().map(user_to_record).collect();
        let raw = serde_json::to_string(&records).context("serializing users")?;
        self.kv
            .set(&self.key, &raw)
            .with_context(|| format!("writing slot '{}'", self.key))?;
        Ok(())
    }
}
