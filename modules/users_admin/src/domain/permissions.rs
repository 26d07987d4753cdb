//! Static role → permission mapping and the `has_permission` predicate.

use once_cell::sync::Lazy;

use crate::contract::model::{AuthUser, Permission, Role};

pub const VIEW_USERS: &str = "view-users";
pub const CREATE_USERS: &str = "create-users";
pub const EDIT_USERS: &str = "edit-users";
pub const DELETE_USERS: &str = "delete-users";
pub const MANAGE_ROLES: &str = "manage-roles";

pub const ADMIN_ROLE: &str = "admin";
pub const MANAGER_ROLE: &str = "manager";
pub const USER_ROLE: &str = "user";

/// The process-wide role catalog, built once on first use.
pub static STANDARD_ROLES: Lazy<RoleCatalog> = Lazy::new(RoleCatalog::standard);

/// True iff an actor is present and its role carries `permission_id`.
pub fn has_permission(actor: Option<&AuthUser>, permission_id: &str) -> bool {
    match actor {
        Some(actor) => actor.role.has_permission(permission_id),
        None => false,
    }
}

/// Immutable set of roles known to the dashboard, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleCatalog {
    roles: Vec<Role>,
}

impl RoleCatalog {
    pub fn new(roles: Vec<Role>) -> Self {
        Self { roles }
    }

    /// Administrator (everything), Manager (view/create/edit), Standard User (view).
    pub fn standard() -> Self {
        let all = standard_permissions();
        let pick = |ids: &[&str]| -> Vec<Permission> {
            all.iter()
                .filter(|p| ids.contains(&p.id.as_str()))
                .cloned()
                .collect()
        };

        Self::new(vec![
            Role {
                id: ADMIN_ROLE.to_string(),
                name: "Administrator".to_string(),
                permissions: all.clone(),
            },
            Role {
                id: MANAGER_ROLE.to_string(),
                name: "Manager".to_string(),
                permissions: pick(&[VIEW_USERS, CREATE_USERS, EDIT_USERS]),
            },
            Role {
                id: USER_ROLE.to_string(),
                name: "Standard User".to_string(),
                permissions: pick(&[VIEW_USERS]),
            },
        ])
    }

    pub fn all(&self) -> &[Role] {
        &self.roles
    }

    pub fn get(&self, role_id: &str) -> Option<&Role> {
        self.roles.iter().find(|r| r.id == role_id)
    }

    /// Every distinct permission referenced by the catalog.
    pub fn permissions(&self) -> Vec<Permission> {
        let mut out: Vec<Permission> = Vec::new();
        for p in self.roles.iter().flat_map(|r| r.permissions.iter()) {
            if !out.iter().any(|known| known.id == p.id) {
                out.push(p.clone());
            }
        }
        out
    }
}

fn permission(id: &str, name: &str, description: &str) -> Permission {
    Permission {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
    }
}

fn standard_permissions() -> Vec<Permission> {
    vec![
        permission(VIEW_USERS, "View Users", "Can view users in the system"),
        permission(CREATE_USERS, "Create Users", "Can create new users"),
        permission(EDIT_USERS, "Edit Users", "Can edit existing users"),
        permission(DELETE_USERS, "Delete Users", "Can delete users from the system"),
        permission(MANAGE_ROLES, "Manage Roles", "Can manage roles and permissions"),
    ]
}
