//! Authentication route handlers.
//!
//! Registration, login, and logout. Credential failures are recovered here
//! as redirects carrying a message code; only store-level failures propagate
//! as `AppError`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::AppError;
use crate::middleware::{OptionalUser, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::routes::MessageQuery;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub notice: Option<String>,
    pub current_user: Option<CurrentUser>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
    pub current_user: Option<CurrentUser>,
}

// =============================================================================
// Message codes
// =============================================================================

fn login_error_message(code: &str) -> Option<&'static str> {
    match code {
        "unknown_email" => Some("This email does not exist."),
        "bad_password" => Some("Incorrect password."),
        "invalid_email" => Some("Please enter a valid email address."),
        _ => None,
    }
}

fn login_notice_message(code: &str) -> Option<&'static str> {
    match code {
        "registered" => Some("You've already signed up with that email, log in instead."),
        "comment_login" => Some("You need to log in or register to comment."),
        _ => None,
    }
}

fn register_error_message(code: &str) -> Option<&'static str> {
    match code {
        "invalid_email" => Some("Please enter a valid email address."),
        "weak_password" => Some("Password must be at least 8 characters."),
        "missing_name" => Some("Please enter your name."),
        _ => None,
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the login page.
pub async fn login_page(
    Query(query): Query<MessageQuery>,
    OptionalUser(user): OptionalUser,
) -> LoginTemplate {
    LoginTemplate {
        error: query
            .error
            .as_deref()
            .and_then(login_error_message)
            .map(str::to_owned),
        notice: query
            .notice
            .as_deref()
            .and_then(login_notice_message)
            .map(str::to_owned),
        current_user: user,
    }
}

/// Handle login form submission.
///
/// Both failure modes redisplay the form with their own message; neither
/// establishes a session.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let auth = AuthService::new(state.pool());

    match auth.login(&form.email, &form.password).await {
        Ok(user) => {
            establish_session(&session, &user.into_current()).await?;
            Ok(Redirect::to("/").into_response())
        }
        Err(AuthError::UnknownEmail) => {
            Ok(Redirect::to("/login?error=unknown_email").into_response())
        }
        Err(AuthError::BadPassword) => {
            Ok(Redirect::to("/login?error=bad_password").into_response())
        }
        Err(AuthError::InvalidEmail(_)) => {
            Ok(Redirect::to("/login?error=invalid_email").into_response())
        }
        Err(e) => Err(AppError::Auth(e)),
    }
}

/// Display the registration page.
pub async fn register_page(
    Query(query): Query<MessageQuery>,
    OptionalUser(user): OptionalUser,
) -> RegisterTemplate {
    RegisterTemplate {
        error: query
            .error
            .as_deref()
            .and_then(register_error_message)
            .map(str::to_owned),
        current_user: user,
    }
}

/// Handle registration form submission.
///
/// An already-registered email creates nothing and redirects to the login
/// page with a notice; success logs the new user straight in.
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    let name = form.name.trim();
    if name.is_empty() {
        return Ok(Redirect::to("/register?error=missing_name").into_response());
    }

    let auth = AuthService::new(state.pool());

    match auth.register(&form.email, name, &form.password).await {
        Ok(user) => {
            establish_session(&session, &user.into_current()).await?;
            Ok(Redirect::to("/").into_response())
        }
        Err(AuthError::EmailTaken) => {
            Ok(Redirect::to("/login?notice=registered").into_response())
        }
        Err(AuthError::InvalidEmail(_)) => {
            Ok(Redirect::to("/register?error=invalid_email").into_response())
        }
        Err(AuthError::WeakPassword(_)) => {
            Ok(Redirect::to("/register?error=weak_password").into_response())
        }
        Err(e) => Err(AppError::Auth(e)),
    }
}

/// Clear the session identity and go back to the listing.
///
/// Works the same whether or not anyone was logged in.
pub async fn logout(session: Session) -> Result<Redirect, AppError> {
    clear_current_user(&session).await.map_err(|e| {
        tracing::error!(error = %e, "failed to clear session");
        AppError::Internal("session store failure".to_owned())
    })?;

    Ok(Redirect::to("/"))
}

async fn establish_session(session: &Session, user: &CurrentUser) -> Result<(), AppError> {
    set_current_user(session, user).await.map_err(|e| {
        tracing::error!(error = %e, "failed to establish session");
        AppError::Internal("session store failure".to_owned())
    })
}
