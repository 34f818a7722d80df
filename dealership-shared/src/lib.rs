//! # Dealership Shared Library
//!
//! Persistence and authentication building blocks used by the dealership
//! review API server.
//!
//! ## Module Organization
//!
//! - `auth`: Password hashing and session tokens
//! - `catalog`: Car catalog fixture and idempotent seeding
//! - `db`: Connection pool and migrations
//! - `models`: Database models and data structures

pub mod auth;
pub mod catalog;
pub mod db;
pub mod models;

/// Current version of the dealership shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
