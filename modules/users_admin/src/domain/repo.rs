use crate::contract::model::User;

/// Port for the domain layer: the durable slot holding the whole collection.
///
/// The store is the only caller; it always saves the complete collection.
pub trait UsersRepository: Send + Sync {
    /// Load the persisted collection. `Ok(None)` when the slot is empty;
    /// an unreadable or corrupt slot is reported as an error.
    fn load(&self) -> anyhow::Result<Option<Vec<User>>>;
    /// Replace the persisted collection with `users`.
    fn save(&self, users: &[User]) -> anyhow::Result<()>;
}
