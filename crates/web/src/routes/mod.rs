//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                         - Home page
//! GET  /menu                     - Public menu
//! GET  /health                   - Health check (in main.rs)
//!
//! # Guest auth
//! GET  /guest/contact            - Contact page
//! POST /guest/contact            - Contact action
//! GET  /guest/auth/login         - Login page
//! POST /guest/auth/login         - Login action
//! GET  /guest/auth/register      - Register page
//! POST /guest/auth/register      - Register action
//! POST /guest/auth/logout        - Logout action
//!
//! # User area (requires user session)
//! GET  /user                     - Dashboard
//! GET  /user/account/profile     - Profile form
//! POST /user/account/profile     - Profile update
//! GET  /user/account/settings    - Password change form
//! POST /user/account/settings    - Password change
//!
//! # Admin area (requires admin session)
//! GET  /admin/auth/login         - Admin login page
//! POST /admin/auth/login         - Admin login action
//! POST /admin/auth/logout        - Admin logout
//! GET  /admin                    - Dashboard with counts
//! GET  /admin/users              - Account list (search/filter/pagination)
//! GET  /admin/users/create       - Create form
//! POST /admin/users/create       - Create action
//! GET  /admin/users/{id}         - Detail view
//! GET  /admin/users/{id}/edit    - Edit form
//! POST /admin/users/{id}/edit    - Edit action
//! POST /admin/users/{id}/delete  - Soft/hard delete
//! POST /admin/users/{id}/toggle  - Flip the active flag
//! GET  /admin/menu               - Menu item list
//! GET  /admin/menu/create        - Create form
//! POST /admin/menu/create        - Create action
//! GET  /admin/menu/{id}/edit     - Edit form
//! POST /admin/menu/{id}/edit     - Edit action
//! POST /admin/menu/{id}/delete   - Delete
//! ```

pub mod account;
pub mod admin;
pub mod auth;
pub mod contact;
pub mod home;
pub mod menu;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the guest auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create the user account routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(account::dashboard))
        .route(
            "/account/profile",
            get(account::profile_page).post(account::update_profile),
        )
        .route(
            "/account/settings",
            get(account::settings_page).post(account::change_password),
        )
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Guest pages
        .route("/", get(home::home))
        .route("/menu", get(menu::menu))
        .route(
            "/guest/contact",
            get(contact::contact_page).post(contact::submit),
        )
        // Guest auth
        .nest("/guest/auth", auth_routes())
        // User area
        .nest("/user", user_routes())
        // Admin area
        .nest("/admin", admin::routes())
}
