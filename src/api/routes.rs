//! API route definitions

use actix_web::{web, HttpResponse};
use utoipa::OpenApi;

use crate::api::handlers;
use crate::api::models;
use crate::model::EnrichedHop;

/// Configure all routes
pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(handlers::query_error_handler))
        .route("/traceroute", web::get().to(handlers::traceroute))
        .route("/health", web::get().to(handlers::health))
        .route("/api-docs/openapi.json", web::get().to(openapi_json));
}

async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(handlers::traceroute, handlers::health),
    components(schemas(
        EnrichedHop,
        models::ErrorResponse,
        models::HealthResponse,
        models::TracerouteQuery,
    )),
    tags((name = "Traceroute", description = "Path tracing with per-hop geolocation"))
)]
pub struct ApiDoc;
