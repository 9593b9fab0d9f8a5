//! Core types for Cloud 9 Cafe.
//!
//! This module provides type-safe wrappers for common domain concepts.
//!
//! # Modules
//!
//! - [`category`] - Closed menu category enumeration
//! - [`email`] - Validated, normalized email addresses
//! - [`id`] - Newtype IDs for type-safe entity references
//! - [`price`] - Bounded decimal menu prices
//! - [`role`] - Closed account role enumeration

pub mod category;
pub mod email;
pub mod id;
pub mod price;
pub mod role;

pub use category::MenuCategory;
pub use email::{Email, EmailError};
pub use id::{AccountId, ContactMessageId, MenuItemId, OrderId};
pub use price::{Price, PriceError};
pub use role::Role;
