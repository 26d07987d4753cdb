use serde::{Deserialize, Serialize};

/// Configuration for the users_admin module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UsersAdminConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,
    #[serde(default = "default_users_key")]
    pub users_key: String,
    #[serde(default = "default_session_key")]
    pub session_key: String,
}

impl Default for UsersAdminConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            users_key: default_users_key(),
            session_key: default_session_key(),
        }
    }
}

fn default_page_size() -> usize {
    10
}

fn default_max_page_size() -> usize {
    100
}

fn default_users_key() -> String {
    crate::infra::storage::DEFAULT_USERS_KEY.to_string()
}

fn default_session_key() -> String {
    crate::infra::storage::DEFAULT_SESSION_KEY.to_string()
}
