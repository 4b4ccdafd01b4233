//! Survey API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes) so
//! integration tests, the server binary and `seed-admin` can share them.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
