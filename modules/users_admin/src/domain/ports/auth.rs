use crate::contract::model::AuthUser;

/// Credential check performed at login. Implementations decide what counts as
/// valid; the core only consumes the resulting principal.
pub trait Authenticator: Send + Sync {
    fn authenticate(&self, email: &str, password: &str) -> Option<AuthUser>;
}

/// Supplies the currently authenticated actor, or `None` when signed out.
pub trait ActorSupplier: Send + Sync {
    fn current_actor(&self) -> Option<AuthUser>;
}

impl ActorSupplier for Option<AuthUser> {
    fn current_actor(&self) -> Option<AuthUser> {
        self.clone()
    }
}
