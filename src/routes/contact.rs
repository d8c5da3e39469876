//! Contact form route handlers.
//!
//! Submissions are relayed synchronously through the email API and the same
//! page is re-rendered with the outcome; a failed relay shows its own
//! message instead of pretending the message went out.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State};
use serde::Deserialize;
use tracing::instrument;

use crate::middleware::OptionalUser;
use crate::models::CurrentUser;
use crate::state::AppState;

/// Contact form data.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub success: Option<String>,
    pub error: Option<String>,
    pub current_user: Option<CurrentUser>,
}

const SENT_MESSAGE: &str = "Successfully sent your message.";
const SEND_FAILED_MESSAGE: &str = "Your message could not be sent. Please try again later.";
const REQUIRED_FIELDS_MESSAGE: &str = "All fields are required.";

/// Display the contact form.
pub async fn contact_page(OptionalUser(user): OptionalUser) -> ContactTemplate {
    ContactTemplate {
        success: None,
        error: None,
        current_user: user,
    }
}

/// Relay a contact-form submission and re-render the page with the outcome.
#[instrument(skip(state, user, form), fields(email = %form.email))]
pub async fn submit(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
    Form(form): Form<ContactForm>,
) -> ContactTemplate {
    let fields = [&form.name, &form.email, &form.phone, &form.message];
    if fields.iter().any(|f| f.trim().is_empty()) {
        return ContactTemplate {
            success: None,
            error: Some(REQUIRED_FIELDS_MESSAGE.to_owned()),
            current_user: user,
        };
    }

    let result = state
        .mailer()
        .send_contact_message(
            form.name.trim(),
            form.email.trim(),
            form.phone.trim(),
            form.message.trim(),
        )
        .await;

    match result {
        Ok(()) => ContactTemplate {
            success: Some(SENT_MESSAGE.to_owned()),
            error: None,
            current_user: user,
        },
        Err(e) => {
            tracing::error!(error = %e, "failed to relay contact message");
            ContactTemplate {
                success: None,
                error: Some(SEND_FAILED_MESSAGE.to_owned()),
                current_user: user,
            }
        }
    }
}
