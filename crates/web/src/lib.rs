//! Cloud 9 Cafe web library.
//!
//! This crate provides the site functionality as a library,
//! allowing it to be tested and reused (the CLI borrows the password
//! hasher and migrations from here).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
