//! HTTP API
//!
//! Thin adapter that lets a UI or other collaborator drive one shared
//! engine over HTTP.

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod monitoring;
pub mod routes;
pub mod server;

pub use handlers::AppState;
pub use server::{build_app, ApiServer};
