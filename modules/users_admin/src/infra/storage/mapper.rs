use crate::contract::model::{AuthUser, Permission, Role, User, UserStatus};
use crate::infra::storage::entity::{
    AuthUserRecord, PermissionRecord, RoleRecord, StatusRecord, UserRecord,
};

impl From<PermissionRecord> for Permission {
    fn from(r: PermissionRecord) -> Self {
        Self {
            id: r.id,
            name: r.name,
            description: r.description,
        }
    }
}

impl From<&Permission> for PermissionRecord {
    fn from(p: &Permission) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            description: p.description.clone(),
        }
    }
}

impl From<RoleRecord> for Role {
    fn from(r: RoleRecord) -> Self {
        Self {
            id: r.id,
            name: r.name,
            permissions: r.permissions.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<&Role> for RoleRecord {
    fn from(r: &Role) -> Self {
        Self {
            id: r.id.clone(),
            name: r.name.clone(),
            permissions: r.permissions.iter().map(Into::into).collect(),
        }
    }
}

impl From<StatusRecord> for UserStatus {
    fn from(s: StatusRecord) -> Self {
        match s {
            StatusRecord::Active => UserStatus::Active,
            StatusRecord::Inactive => UserStatus::Inactive,
        }
    }
}

impl From<UserStatus> for StatusRecord {
    fn from(s: UserStatus) -> Self {
        match s {
            UserStatus::Active => StatusRecord::Active,
            UserStatus::Inactive => StatusRecord::Inactive,
        }
    }
}

/// Convert a stored record to a contract model
pub fn record_to_user(r: UserRecord) -> User {
    User {
        id: r.id,
        name: r.name,
        email: r.email,
        role: r.role.into(),
        status: r.status.into(),
        created_at: r.created_at,
        last_login: r.last_login,
    }
}

/// Convert a contract model to its stored record
pub fn user_to_record(u: &User) -> UserRecord {
    UserRecord {
        id: u.id.clone(),
        name: u.name.clone(),
        email: u.email.clone(),
        role: (&u.role).into(),
        status: u.status.into(),
        created_at: u.created_at,
        last_login: u.last_login,
    }
}

pub fn record_to_auth_user(r: AuthUserRecord) -> AuthUser {
    AuthUser {
        id: r.id,
        name: r.name,
        email: r.email,
        role: r.role.into(),
    }
}

pub fn auth_user_to_record(a: &AuthUser) -> AuthUserRecord {
    AuthUserRecord {
        id: a.id.clone(),
        name: a.name.clone(),
        email: a.email.clone(),
        role: (&a.role).into(),
    }
}
