//! HTTP API
//!
//! `GET /traceroute?target=<host>` plus health and OpenAPI endpoints.

mod handlers;
pub mod models;
mod routes;

use actix_web::web;

pub use handlers::AppState;

/// Initialize API routes
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    routes::config_routes(cfg);
}
