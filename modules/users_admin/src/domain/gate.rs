use crate::contract::model::{AuthUser, NewUser, User, UserPatch};
use crate::domain::error::DomainError;
use crate::domain::permissions::{has_permission, CREATE_USERS, DELETE_USERS, EDIT_USERS};
use crate::domain::store::UserStore;

/// Fails with `PermissionDenied` unless `actor` holds `permission_id`.
pub fn authorize(actor: Option<&AuthUser>, permission_id: &str) -> Result<(), DomainError> {
    if has_permission(actor, permission_id) {
        Ok(())
    } else {
        Err(DomainError::permission_denied(permission_id))
    }
}

/// Store mutations on behalf of an actor. A denied call never reaches the store.
pub struct AuthorizationGate<'a> {
    store: &'a mut UserStore,
    actor: Option<&'a AuthUser>,
}

impl<'a> AuthorizationGate<'a> {
    pub fn new(store: &'a mut UserStore, actor: Option<&'a AuthUser>) -> Self {
        Self { store, actor }
    }

    pub fn create(&mut self, new_user: NewUser) -> Result<User, DomainError> {
        authorize(self.actor, CREATE_USERS)?;
        self.store.create(new_user)
    }

    pub fn update(&mut self, id: &str, patch: UserPatch) -> Result<User, DomainError> {
        authorize(self.actor, EDIT_USERS)?;
        self.store.update(id, patch)
    }

    pub fn delete(&mut self, id: &str) -> Result<(), DomainError> {
        authorize(self.actor, DELETE_USERS)?;
        self.store.delete(id)
    }
}
