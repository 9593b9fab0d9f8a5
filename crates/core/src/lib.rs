//! Cloud 9 Cafe Core - Shared types library.
//!
//! This crate provides common types used across all Cloud 9 Cafe components:
//! - `web` - Public site, user account area, and admin panel
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP clients. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, roles, and prices
//! - [`validate`] - The authoritative form-validation rule set

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;
pub mod validate;

pub use types::*;
