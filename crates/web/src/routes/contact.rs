//! Contact form route handlers.
//!
//! Validates and stores contact messages; nothing is emailed.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use cloud9_cafe_core::{Email, validate};

use crate::db::contact::{ContactMessageRepository, NewContactMessage};
use crate::middleware::OptionalAccount;
use crate::state::AppState;

const DEFAULT_SUBJECT: &str = "Website Inquiry";

/// Contact form data.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: String,
    pub message: String,
}

/// Preserved (non-sensitive) form values for re-rendering.
#[derive(Debug, Default)]
pub struct ContactFormValues {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Field-scoped validation errors.
#[derive(Debug, Default)]
pub struct ContactFieldErrors {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

impl ContactFieldErrors {
    fn any(&self) -> bool {
        self.name.is_some() || self.email.is_some() || self.message.is_some()
    }
}

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "guest/contact.html")]
pub struct ContactTemplate {
    pub logged_in: bool,
    pub values: ContactFormValues,
    pub errors: ContactFieldErrors,
    pub success: Option<String>,
    pub general_error: Option<String>,
}

/// Display the contact page.
pub async fn contact_page(OptionalAccount(account): OptionalAccount) -> impl IntoResponse {
    ContactTemplate {
        logged_in: account.is_some(),
        values: ContactFormValues {
            subject: DEFAULT_SUBJECT.to_string(),
            ..Default::default()
        },
        errors: ContactFieldErrors::default(),
        success: None,
        general_error: None,
    }
}

/// Handle contact form submission.
pub async fn submit(
    State(state): State<AppState>,
    OptionalAccount(account): OptionalAccount,
    Form(form): Form<ContactForm>,
) -> Response {
    let logged_in = account.is_some();

    let mut values = ContactFormValues {
        name: form.name.trim().to_string(),
        email: form.email.trim().to_lowercase(),
        subject: {
            let subject = form.subject.trim();
            if subject.is_empty() {
                DEFAULT_SUBJECT.to_string()
            } else {
                subject.to_string()
            }
        },
        message: form.message.trim().to_string(),
    };

    let mut errors = ContactFieldErrors::default();
    if let Err(e) = validate::contact_name(&values.name) {
        errors.name = Some(e.to_string());
    }
    let email = match Email::parse(&values.email) {
        Ok(email) => Some(email),
        Err(e) => {
            errors.email = Some(e.to_string());
            None
        }
    };
    if let Err(e) = validate::message(&values.message) {
        errors.message = Some(e.to_string());
    }

    if errors.any() {
        return ContactTemplate {
            logged_in,
            values,
            errors,
            success: None,
            general_error: None,
        }
        .into_response();
    }

    // Validated above; errors.any() would have returned
    let Some(email) = email else {
        return ContactTemplate {
            logged_in,
            values,
            errors,
            success: None,
            general_error: None,
        }
        .into_response();
    };

    let result = ContactMessageRepository::new(state.pool())
        .create(NewContactMessage {
            account_id: account.map(|a| a.id),
            name: &values.name,
            email: &email,
            subject: &values.subject,
            message: &values.message,
        })
        .await;

    match result {
        Ok(()) => {
            // Clear the form after a successful submission
            values = ContactFormValues {
                subject: DEFAULT_SUBJECT.to_string(),
                ..Default::default()
            };
            ContactTemplate {
                logged_in,
                values,
                errors: ContactFieldErrors::default(),
                success: Some(
                    "Thank you for your message! We will get back to you within 24 hours."
                        .to_string(),
                ),
                general_error: None,
            }
            .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to store contact message");
            ContactTemplate {
                logged_in,
                values,
                errors: ContactFieldErrors::default(),
                success: None,
                general_error: Some(
                    "Sorry, we could not send your message. Please try again later.".to_string(),
                ),
            }
            .into_response()
        }
    }
}
