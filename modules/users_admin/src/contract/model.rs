use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// A single capability that can be granted to a role (e.g. `delete-users`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Permission {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// Reference data: a named bundle of permissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: String,
    pub name: String,
    pub permissions: Vec<Permission>,
}

impl Role {
    /// True if the role carries a permission with the given id.
    pub fn has_permission(&self, permission_id: &str) -> bool {
        self.permissions.iter().any(|p| p.id == permission_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserStatus {
    Active,
    Inactive,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown user status '{0}' (expected 'active' or 'inactive')")]
pub struct ParseStatusError(pub String);

impl FromStr for UserStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

/// A managed user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

/// Data for creating a new user. The store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: UserStatus,
    pub last_login: Option<DateTime<Utc>>,
}

/// Partial update data for a user. Identity and creation time are not patchable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub status: Option<UserStatus>,
    pub last_login: Option<DateTime<Utc>>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.role.is_none()
            && self.status.is_none()
            && self.last_login.is_none()
    }
}

/// The principal performing an action; not a managed record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Search and filter selection held by the owning view.
///
/// `None` on `status` / `role_id` means "all".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub search_term: String,
    pub status: Option<UserStatus>,
    pub role_id: Option<String>,
}

/// Values a UI select sends when nothing is narrowed.
const ALL_SENTINELS: &[&str] = &["", "all", "all-statuses", "all-roles"];

fn is_all_sentinel(raw: &str) -> bool {
    ALL_SENTINELS.contains(&raw.trim().to_ascii_lowercase().as_str())
}

impl FilterCriteria {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search_term: term.into(),
            ..Self::default()
        }
    }

    /// Parse a status selection, mapping the "all" sentinels to `None`.
    pub fn parse_status(raw: &str) -> Result<Option<UserStatus>, ParseStatusError> {
        if is_all_sentinel(raw) {
            return Ok(None);
        }
        raw.parse().map(Some)
    }

    /// Parse a role selection, mapping the "all" sentinels to `None`.
    pub fn parse_role(raw: &str) -> Option<String> {
        if is_all_sentinel(raw) {
            None
        } else {
            Some(raw.trim().to_string())
        }
    }
}

/// Requested page of the filtered result. `page` is 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
        }
    }
}

/// The visible window: one page of the filtered collection plus derived totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsersPage {
    pub items: Vec<User>,
    pub total: usize,
    pub total_pages: usize,
    pub page: usize,
    pub page_size: usize,
}

impl UsersPage {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.total_pages > self.page
    }
}

/// Number of users holding a given role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleCount {
    pub role_id: String,
    pub role_name: String,
    pub count: usize,
}

/// Aggregates shown on the dashboard landing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_users: usize,
    pub active_users: usize,
    pub inactive_users: usize,
    pub admin_users: usize,
    pub role_distribution: Vec<RoleCount>,
    pub recent_users: Vec<User>,
}
