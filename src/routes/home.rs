//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::error::AppError;
use crate::db::PostRepository;
use crate::middleware::OptionalUser;
use crate::models::{CurrentUser, Post};
use crate::state::AppState;

/// Post listing template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub posts: Vec<Post>,
    pub current_user: Option<CurrentUser>,
}

/// Display all posts, oldest first.
#[instrument(skip(state, user))]
pub async fn home(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
) -> Result<IndexTemplate, AppError> {
    let posts = PostRepository::new(state.pool()).list().await?;

    Ok(IndexTemplate {
        posts,
        current_user: user,
    })
}
