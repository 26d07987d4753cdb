pub mod client;
pub mod error;
pub mod model;

pub use client::UsersAdminApi;
pub use error::UsersAdminError;
pub use model::{
    AuthUser, DashboardStats, FilterCriteria, NewUser, Pagination, Permission, Role, RoleCount,
    User, UserPatch, UserStatus, UsersPage,
};
