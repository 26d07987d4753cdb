pub mod entity;
pub mod file;
pub mod kv;
pub mod mapper;
pub mod session;
pub mod users_repo;

pub use file::FileKeyValueStore;
pub use kv::{KeyValueStore, MemoryKeyValueStore, StorageError};
pub use session::{SessionStore, DEFAULT_SESSION_KEY};
pub use users_repo::{KvUsersRepository, DEFAULT_USERS_KEY};
