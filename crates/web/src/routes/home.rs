//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

use crate::middleware::OptionalAccount;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "guest/home.html")]
pub struct HomeTemplate {
    pub logged_in: bool,
}

/// Display the home page.
pub async fn home(OptionalAccount(account): OptionalAccount) -> impl IntoResponse {
    HomeTemplate {
        logged_in: account.is_some(),
    }
}
