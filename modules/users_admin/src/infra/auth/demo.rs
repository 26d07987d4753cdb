use crate::contract::model::AuthUser;
use crate::domain::permissions::{RoleCatalog, ADMIN_ROLE, MANAGER_ROLE, USER_ROLE};
use crate::domain::ports::Authenticator;

/// Demo sign-in: three fixed addresses, any password.
///
/// Not a security boundary. Swap in a real [`Authenticator`] for anything
/// beyond local demos.
pub struct DemoAuthenticator {
    principals: Vec<AuthUser>,
}

impl DemoAuthenticator {
    pub fn new(catalog: &RoleCatalog) -> Self {
        let principal = |id: &str, name: &str, email: &str, role_id: &str| {
            catalog.get(role_id).map(|role| AuthUser {
                id: id.to_string(),
                name: name.to_string(),
                email: email.to_string(),
                role: role.clone(),
            })
        };

        let principals = [
            principal("1", "John Doe", "admin@example.com", ADMIN_ROLE),
            principal("2", "Jane Smith", "manager@example.com", MANAGER_ROLE),
            principal("3", "Robert Johnson", "user@example.com", USER_ROLE),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self { principals }
    }
}

impl Authenticator for DemoAuthenticator {
    fn authenticate(&self, email: &str, _password: &str) -> Option<AuthUser> {
        self.principals.iter().find(|p| p.email == email).cloned()
    }
}
