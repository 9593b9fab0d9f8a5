//! Business logic services.
//!
//! # Services
//!
//! - `auth` - Credential verification, registration, password changes

pub mod auth;

pub use auth::AuthService;
