//! HTTP route handlers for the blog.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                  - Post listing
//! GET  /health            - Health check
//!
//! # Auth
//! GET  /register          - Signup page
//! POST /register          - Signup action (logs the new user in)
//! GET  /login             - Login page
//! POST /login             - Login action
//! GET  /logout            - Logout action
//!
//! # Posts
//! GET  /post/{id}         - Post detail with comments
//! POST /post/{id}         - Add a comment (requires login)
//! GET  /new-post          - New post form (admin)
//! POST /new-post          - Create post (admin)
//! GET  /edit-post/{id}    - Edit post form (admin)
//! POST /edit-post/{id}    - Update post (admin)
//! GET  /delete/{id}       - Delete post (admin)
//!
//! # Contact
//! GET  /contact           - Contact form
//! POST /contact           - Relay message via the email API
//!
//! # Resume
//! GET  /about             - Access-code form
//! POST /about             - Stream the resume on a correct code
//! GET  /download          - Stream the resume (admin, no code)
//! ```

pub mod about;
pub mod auth;
pub mod contact;
pub mod home;
pub mod posts;

use axum::{
    Router,
    routing::get,
};
use serde::Deserialize;

use crate::state::AppState;

/// Query parameters carrying a message code for display.
///
/// Handlers redirect with `?error=<code>` or `?notice=<code>`; the page
/// handler maps the code to a human-readable message.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub notice: Option<String>,
}

/// Create all routes for the blog.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/post/{id}", get(posts::show).post(posts::add_comment))
        .route("/new-post", get(posts::new_post_page).post(posts::create))
        .route(
            "/edit-post/{id}",
            get(posts::edit_post_page).post(posts::update),
        )
        .route("/delete/{id}", get(posts::delete))
        .route("/contact", get(contact::contact_page).post(contact::submit))
        .route("/about", get(about::about_page).post(about::submit_code))
        .route("/download", get(about::download))
}
