pub mod error;
pub mod events;
pub mod filter;
pub mod gate;
pub mod permissions;
pub mod ports;
pub mod repo;
pub mod seed;
pub mod stats;
pub mod store;
pub mod view;
