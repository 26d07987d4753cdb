use crate::contract::{
    error::UsersAdminError,
    model::{DashboardStats, FilterCriteria, NewUser, Pagination, User, UserPatch, UsersPage},
};

/// Public API trait for the users_admin module that UI layers consume.
///
/// Mutations are authorized against the current actor; reads are not gated.
pub trait UsersAdminApi: Send + Sync {
    /// Full collection in insertion order
    fn list_users(&self) -> Vec<User>;

    /// Get a user by ID
    fn get_user(&self, id: &str) -> Result<User, UsersAdminError>;

    /// One page of the filtered collection
    fn filtered_page(&self, criteria: &FilterCriteria, pagination: Pagination) -> UsersPage;

    /// Dashboard aggregates over the full collection
    fn stats(&self) -> DashboardStats;

    /// Create a new user (requires `create-users`)
    fn create_user(&self, new_user: NewUser) -> Result<User, UsersAdminError>;

    /// Update a user with partial data (requires `edit-users`)
    fn update_user(&self, id: &str, patch: UserPatch) -> Result<User, UsersAdminError>;

    /// Delete a user by ID (requires `delete-users`)
    fn delete_user(&self, id: &str) -> Result<(), UsersAdminError>;
}
