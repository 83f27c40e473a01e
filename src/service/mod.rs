pub mod geo_service;
pub mod hop_enricher;
pub mod hop_parser;
pub mod trace_service;
pub mod tracer;

pub use geo_service::GeoEndpoint;
pub use trace_service::TraceService;
pub use tracer::SystemTracer;
