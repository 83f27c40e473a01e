//! Request pipeline: trace, parse, enrich.

use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::model::EnrichedHop;
use crate::service::geo_service::GeoConnector;
use crate::service::hop_enricher::HopEnricher;
use crate::service::hop_parser;
use crate::service::tracer::Tracer;

pub struct TraceService<T, C> {
    tracer: T,
    geo: C,
    lookup_timeout: Duration,
}

impl<T: Tracer, C: GeoConnector> TraceService<T, C> {
    pub fn new(tracer: T, geo: C, lookup_timeout: Duration) -> Self {
        Self {
            tracer,
            geo,
            lookup_timeout,
        }
    }

    /// Trace `target` and return its geolocated hops in path order.
    pub async fn run(&self, target: &str) -> Result<Vec<EnrichedHop>> {
        let raw = self.tracer.trace(target).await?;
        debug!("Traceroute output for {}:\n{}", target, raw);

        let hops = hop_parser::parse(&raw);
        if hops.is_empty() {
            warn!("No hops recognised in traceroute output for {}", target);
            return Ok(Vec::new());
        }
        info!("Traced {}: {} hops", target, hops.len());

        // The lookup context lives only for this enrichment pass.
        let lookup = match self.geo.connect() {
            Ok(lookup) => lookup,
            Err(e) => {
                warn!("Geo lookup unavailable for {}: {:#}", target, e);
                return Ok(hops.into_iter().map(|hop| EnrichedHop::new(hop, None)).collect());
            }
        };
        let enriched = HopEnricher::new(lookup, self.lookup_timeout)
            .enrich(hops)
            .await;

        Ok(enriched)
    }
}
