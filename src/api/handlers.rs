//! API request handlers

use actix_web::{web, HttpResponse, Responder};
use tracing::{error, info, warn};

use crate::api::models::*;
use crate::config::ServerConfig;
use crate::error::{Result, TraceError};
use crate::model::EnrichedHop;
use crate::service::{GeoEndpoint, SystemTracer, TraceService};

const TIMEOUT_MESSAGE: &str = "Traceroute timed out.";

/// Shared, read-only handler state built once from [`ServerConfig`].
pub struct AppState {
    service: TraceService<SystemTracer, GeoEndpoint>,
}

impl AppState {
    pub fn from_config(config: &ServerConfig) -> Self {
        let tracer = SystemTracer::new(
            config.traceroute_bin.as_deref(),
            config.max_hops,
            config.trace_timeout,
        );
        let geo = GeoEndpoint::new(config.geo_api_url.clone());

        Self {
            service: TraceService::new(tracer, geo, config.lookup_timeout),
        }
    }
}

/// Trace a host and geolocate every hop
#[utoipa::path(
    get,
    path = "/traceroute",
    params(TracerouteQuery),
    responses(
        (status = 200, description = "Hops in path order", body = Vec<EnrichedHop>),
        (status = 400, description = "Missing or invalid target", body = ErrorResponse),
        (status = 504, description = "Traceroute timed out", body = ErrorResponse),
        (status = 500, description = "Traceroute could not be run", body = ErrorResponse)
    ),
    tag = "Traceroute"
)]
pub async fn traceroute(
    state: web::Data<AppState>,
    query: web::Query<TracerouteQuery>,
) -> impl Responder {
    info!("Traceroute requested for {}", query.target);
    let result = state.service.run(&query.target).await;
    to_response(&query.target, result)
}

fn to_response(target: &str, result: Result<Vec<EnrichedHop>>) -> HttpResponse {
    match result {
        Ok(hops) => HttpResponse::Ok().json(hops),
        Err(TraceError::Timeout(limit)) => {
            warn!("Traceroute to {} timed out after {:?}", target, limit);
            HttpResponse::GatewayTimeout().json(ErrorResponse::new(TIMEOUT_MESSAGE, None))
        }
        Err(TraceError::InvalidTarget(msg)) => {
            HttpResponse::BadRequest().json(ErrorResponse::new(msg, Some("INVALID_TARGET")))
        }
        Err(e) => {
            error!("Traceroute to {} failed: {}", target, e);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "Failed to run traceroute",
                Some("TRACE_FAILED"),
            ))
        }
    }
}

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse)),
    tag = "Traceroute"
)]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Turn query extraction failures (e.g. missing `target`) into JSON errors.
pub fn query_error_handler(
    err: actix_web::error::QueryPayloadError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    let body = ErrorResponse::new(err.to_string(), Some("INVALID_QUERY"));
    actix_web::error::InternalError::from_response(err, HttpResponse::BadRequest().json(body))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::init_routes;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::{json, Value};
    use std::time::Duration;

    fn test_config(bin: &str) -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            // Nothing speaks HTTP on the discard port, so every lookup fails.
            geo_api_url: "http://127.0.0.1:9".to_string(),
            lookup_timeout: Duration::from_millis(500),
            trace_timeout: Duration::from_secs(5),
            max_hops: None,
            traceroute_bin: Some(bin.to_string()),
            verbose: false,
        }
    }

    async fn body_json(resp: HttpResponse) -> Value {
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn test_timeout_response_body() {
        let resp = to_response(
            "example.com",
            Err(TraceError::Timeout(Duration::from_secs(120))),
        );
        assert_eq!(resp.status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(body_json(resp).await, json!({ "error": "Traceroute timed out." }));
    }

    #[actix_web::test]
    async fn test_invalid_target_response() {
        let resp = to_response("-x", Err(TraceError::InvalidTarget("bad".to_string())));
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["code"], "INVALID_TARGET");
    }

    #[actix_web::test]
    async fn test_spawn_failure_response() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no traceroute");
        let resp = to_response("example.com", Err(TraceError::Io(io)));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(resp).await["code"], "TRACE_FAILED");
    }

    #[actix_web::test]
    async fn test_health() {
        let state = web::Data::new(AppState::from_config(&test_config("traceroute")));
        let app = test::init_service(App::new().app_data(state).configure(init_routes)).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[actix_web::test]
    async fn test_missing_target_is_bad_request() {
        let state = web::Data::new(AppState::from_config(&test_config("traceroute")));
        let app = test::init_service(App::new().app_data(state).configure(init_routes)).await;

        let req = test::TestRequest::get().uri("/traceroute").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[cfg(unix)]
    #[actix_web::test]
    async fn test_traceroute_endpoint_with_failed_lookups() {
        // `echo -n 10.0.0.1` prints the bare address; the parser falls back to
        // address-only hops and the unreachable geo service nulls the rest.
        let state = web::Data::new(AppState::from_config(&test_config("echo")));
        let app = test::init_service(App::new().app_data(state).configure(init_routes)).await;

        let req = test::TestRequest::get()
            .uri("/traceroute?target=10.0.0.1")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!([{
                "ip": "10.0.0.1",
                "lat": null,
                "lon": null,
                "country": null,
                "countryCode": null,
                "isp": null,
                "ping": null
            }])
        );
    }

    #[actix_web::test]
    async fn test_openapi_document() {
        let state = web::Data::new(AppState::from_config(&test_config("traceroute")));
        let app = test::init_service(App::new().app_data(state).configure(init_routes)).await;

        let req = test::TestRequest::get()
            .uri("/api-docs/openapi.json")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert!(body["paths"]["/traceroute"].is_object());
    }
}
