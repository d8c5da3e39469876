//! Resume gate route handlers.
//!
//! The about page trades a fixed access code for a resume download; the
//! administrator gets the same file from `/download` with no code.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Redirect, Response},
};
use secrecy::ExposeSecret;
use serde::Deserialize;

use crate::error::AppError;
use crate::middleware::{OptionalUser, RequireAdmin};
use crate::models::CurrentUser;
use crate::routes::MessageQuery;
use crate::state::AppState;

/// Filename offered to the browser for the download.
const RESUME_DOWNLOAD_NAME: &str = "resume.pdf";

/// Access code form data.
#[derive(Debug, Deserialize)]
pub struct AccessCodeForm {
    pub code: String,
}

/// About page template with the access-code form.
#[derive(Template, WebTemplate)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub error: Option<String>,
    pub current_user: Option<CurrentUser>,
}

/// Display the access-code form.
pub async fn about_page(
    Query(query): Query<MessageQuery>,
    OptionalUser(user): OptionalUser,
) -> AboutTemplate {
    let error = query
        .error
        .as_deref()
        .filter(|code| *code == "bad_code")
        .map(|_| "Incorrect code.".to_owned());

    AboutTemplate {
        error,
        current_user: user,
    }
}

/// Check the submitted code and stream the resume on a match.
///
/// A wrong code goes back to the form with an error; there is no rate
/// limiting or expiry on attempts.
pub async fn submit_code(
    State(state): State<AppState>,
    Form(form): Form<AccessCodeForm>,
) -> Result<Response, AppError> {
    if form.code == state.config().resume_access_code.expose_secret() {
        serve_resume(&state).await
    } else {
        Ok(Redirect::to("/about?error=bad_code").into_response())
    }
}

/// Stream the resume for the administrator, no code required.
pub async fn download(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Response, AppError> {
    serve_resume(&state).await
}

/// Read the configured resume file and serve it as an attachment.
async fn serve_resume(state: &AppState) -> Result<Response, AppError> {
    let path = &state.config().resume_file;

    let bytes = tokio::fs::read(path).await.map_err(|e| {
        tracing::error!(error = %e, path = %path.display(), "resume file unavailable");
        AppError::Internal("resume file unavailable".to_owned())
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{RESUME_DOWNLOAD_NAME}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}
