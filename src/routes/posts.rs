//! Post and comment route handlers.
//!
//! Reading is open to everyone; commenting needs a session; authoring is
//! gated behind [`RequireAdmin`].

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::db::{CommentRepository, PostRepository, RepositoryError};
use crate::error::AppError;
use crate::middleware::{OptionalUser, RequireAdmin};
use crate::models::{CommentView, CurrentUser, Post, PostId};
use crate::routes::MessageQuery;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Create/edit post form data.
#[derive(Debug, Deserialize)]
pub struct PostForm {
    pub title: String,
    pub subtitle: String,
    pub img_url: String,
    pub body: String,
}

/// Comment form data.
#[derive(Debug, Deserialize)]
pub struct CommentForm {
    pub comment_text: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Post detail template: the post, its comments, and the comment form.
#[derive(Template, WebTemplate)]
#[template(path = "post.html")]
pub struct PostTemplate {
    pub post: Post,
    pub comments: Vec<CommentView>,
    pub error: Option<String>,
    pub current_user: Option<CurrentUser>,
}

/// Shared create/edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "make_post.html")]
pub struct MakePostTemplate {
    pub is_edit: bool,
    /// Where the form posts back to.
    pub action: String,
    pub error: Option<String>,
    pub title: String,
    pub subtitle: String,
    pub img_url: String,
    pub body: String,
    pub current_user: Option<CurrentUser>,
}

impl MakePostTemplate {
    fn empty(admin: CurrentUser) -> Self {
        Self {
            is_edit: false,
            action: "/new-post".to_owned(),
            error: None,
            title: String::new(),
            subtitle: String::new(),
            img_url: String::new(),
            body: String::new(),
            current_user: Some(admin),
        }
    }

    /// Redisplay the form with the submitted values and a message.
    fn redisplay(is_edit: bool, action: String, error: String, form: &PostForm, admin: CurrentUser) -> Self {
        Self {
            is_edit,
            action,
            error: Some(error),
            title: form.title.clone(),
            subtitle: form.subtitle.clone(),
            img_url: form.img_url.clone(),
            body: form.body.clone(),
            current_user: Some(admin),
        }
    }

    fn prefilled(post: &Post, admin: CurrentUser) -> Self {
        Self {
            is_edit: true,
            action: format!("/edit-post/{}", post.id),
            error: None,
            title: post.title.clone(),
            subtitle: post.subtitle.clone(),
            img_url: post.img_url.clone(),
            body: post.body.clone(),
            current_user: Some(admin),
        }
    }
}

const REQUIRED_FIELDS_MESSAGE: &str = "All fields are required.";
const DUPLICATE_TITLE_MESSAGE: &str = "A post with that title already exists.";

fn comment_error_message(code: &str) -> Option<&'static str> {
    match code {
        "empty_comment" => Some("Comments cannot be empty."),
        _ => None,
    }
}

/// Check that every post field is present and non-empty.
fn validate_post_form(form: &PostForm) -> Option<&'static str> {
    let fields = [&form.title, &form.subtitle, &form.img_url, &form.body];
    fields
        .iter()
        .any(|f| f.trim().is_empty())
        .then_some(REQUIRED_FIELDS_MESSAGE)
}

/// Format a date the way post bylines display it ("August 06, 2026").
fn format_publication_date(date: chrono::NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

/// Today's date as a byline string.
fn publication_date_today() -> String {
    format_publication_date(chrono::Local::now().date_naive())
}

// =============================================================================
// Public handlers
// =============================================================================

/// Display a single post with its comments.
#[instrument(skip(state, user, query))]
pub async fn show(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
    Path(id): Path<i64>,
    Query(query): Query<MessageQuery>,
) -> Result<PostTemplate, AppError> {
    let id = PostId::new(id);

    let post = PostRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {id}")))?;

    let comments = CommentRepository::new(state.pool()).list_for_post(id).await?;

    Ok(PostTemplate {
        post,
        comments,
        error: query
            .error
            .as_deref()
            .and_then(comment_error_message)
            .map(str::to_owned),
        current_user: user,
    })
}

/// Add a comment to a post, then redirect back to it.
///
/// Anonymous submitters are sent to the login page and nothing is written.
/// Redirecting after the insert keeps a refresh from double-posting.
pub async fn add_comment(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
    Path(id): Path<i64>,
    Form(form): Form<CommentForm>,
) -> Result<Response, AppError> {
    let id = PostId::new(id);

    if PostRepository::new(state.pool()).get(id).await?.is_none() {
        return Err(AppError::NotFound(format!("post {id}")));
    }

    let Some(user) = user else {
        return Ok(Redirect::to("/login?notice=comment_login").into_response());
    };

    let text = form.comment_text.trim();
    if text.is_empty() {
        return Ok(Redirect::to(&format!("/post/{id}?error=empty_comment")).into_response());
    }

    CommentRepository::new(state.pool())
        .create(id, user.id, text)
        .await?;

    Ok(Redirect::to(&format!("/post/{id}")).into_response())
}

// =============================================================================
// Admin handlers
// =============================================================================

/// Display the new-post form.
pub async fn new_post_page(RequireAdmin(admin): RequireAdmin) -> MakePostTemplate {
    MakePostTemplate::empty(admin)
}

/// Create a new post and redirect to the listing.
#[instrument(skip(state, admin, form))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Form(form): Form<PostForm>,
) -> Result<Response, AppError> {
    if let Some(message) = validate_post_form(&form) {
        return Ok(MakePostTemplate::redisplay(
            false,
            "/new-post".to_owned(),
            message.to_owned(),
            &form,
            admin,
        )
        .into_response());
    }

    let date = publication_date_today();
    let result = PostRepository::new(state.pool())
        .create(
            admin.id,
            form.title.trim(),
            form.subtitle.trim(),
            &date,
            &form.body,
            form.img_url.trim(),
        )
        .await;

    match result {
        Ok(post) => {
            tracing::info!(post_id = %post.id, title = %post.title, "post created");
            Ok(Redirect::to("/").into_response())
        }
        Err(RepositoryError::Conflict(_)) => Ok(MakePostTemplate::redisplay(
            false,
            "/new-post".to_owned(),
            DUPLICATE_TITLE_MESSAGE.to_owned(),
            &form,
            admin,
        )
        .into_response()),
        Err(e) => Err(e.into()),
    }
}

/// Display the edit form pre-filled with the existing post.
pub async fn edit_post_page(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<i64>,
) -> Result<MakePostTemplate, AppError> {
    let id = PostId::new(id);

    let post = PostRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {id}")))?;

    Ok(MakePostTemplate::prefilled(&post, admin))
}

/// Overwrite a post's fields and redirect to its detail page.
///
/// The author and original publication date stay as they were.
#[instrument(skip(state, admin, form))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<i64>,
    Form(form): Form<PostForm>,
) -> Result<Response, AppError> {
    let id = PostId::new(id);
    let action = format!("/edit-post/{id}");

    if let Some(message) = validate_post_form(&form) {
        return Ok(
            MakePostTemplate::redisplay(true, action, message.to_owned(), &form, admin)
                .into_response(),
        );
    }

    let result = PostRepository::new(state.pool())
        .update(
            id,
            form.title.trim(),
            form.subtitle.trim(),
            &form.body,
            form.img_url.trim(),
        )
        .await;

    match result {
        Ok(()) => Ok(Redirect::to(&format!("/post/{id}")).into_response()),
        Err(RepositoryError::NotFound) => Err(AppError::NotFound(format!("post {id}"))),
        Err(RepositoryError::Conflict(_)) => Ok(MakePostTemplate::redisplay(
            true,
            action,
            DUPLICATE_TITLE_MESSAGE.to_owned(),
            &form,
            admin,
        )
        .into_response()),
        Err(e) => Err(e.into()),
    }
}

/// Delete a post (comments cascade) and redirect to the listing.
#[instrument(skip(state, _admin))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    let id = PostId::new(id);

    match PostRepository::new(state.pool()).delete(id).await {
        Ok(()) => {
            tracing::info!(post_id = %id, "post deleted");
            Ok(Redirect::to("/"))
        }
        Err(RepositoryError::NotFound) => Err(AppError::NotFound(format!("post {id}"))),
        Err(e) => Err(e.into()),
    }
}
