pub mod local;

pub use local::UsersAdminLocalClient;
