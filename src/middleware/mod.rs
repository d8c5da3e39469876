//! Request middleware: session layer and authentication extractors.

pub mod auth;
pub mod session;

pub use auth::{OptionalUser, RequireAdmin, clear_current_user, set_current_user};
pub use session::create_session_layer;
