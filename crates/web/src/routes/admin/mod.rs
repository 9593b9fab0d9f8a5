//! Admin panel route handlers.

pub mod auth;
pub mod dashboard;
pub mod menu;
pub mod users;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the admin routes router (mounted at `/admin`).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", get(auth::login_page).post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/", get(dashboard::index))
        .route("/users", get(users::list))
        .route("/users/create", get(users::create_page).post(users::create))
        .route("/users/{id}", get(users::view))
        .route("/users/{id}/edit", get(users::edit_page).post(users::edit))
        .route("/users/{id}/delete", post(users::delete))
        .route("/users/{id}/toggle", post(users::toggle_active))
        .route("/menu", get(menu::list))
        .route("/menu/create", get(menu::create_page).post(menu::create))
        .route("/menu/{id}/edit", get(menu::edit_page).post(menu::edit))
        .route("/menu/{id}/delete", post(menu::delete))
}
