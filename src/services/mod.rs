//! Application services.

pub mod auth;
pub mod trustifi;

pub use auth::AuthService;
pub use trustifi::TrustifiClient;
