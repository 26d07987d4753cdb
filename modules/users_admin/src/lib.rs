// === PUBLIC CONTRACT ===
// Consumers (UI layers, the console) should depend on the contract module
pub mod contract;

// Re-export the public contract components
pub use contract::{client, error, model};

// === MODULE DEFINITION ===
pub mod config;
pub mod module;
pub use config::UsersAdminConfig;
pub use module::{UsersAdmin, UsersAdminDeps};

// === INTERNAL MODULES ===
// Exposed for tests and for wiring alternative ports; not a stable API.
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod gateways;
#[doc(hidden)]
pub mod infra;
