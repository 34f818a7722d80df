//! # Dealership API Server Library
//!
//! Backend for the dealership review site: user accounts and sessions, the
//! car catalog, and pass-through access to the dealership and sentiment
//! services.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `client`: Outbound dealership and sentiment clients
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `extract`: Request body extractors
//! - `middleware`: Response headers
//! - `routes`: API route handlers
//! - `session`: Session cookie handling and extractors

pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod session;
