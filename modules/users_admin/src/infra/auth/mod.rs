pub mod demo;

pub use demo::DemoAuthenticator;
