//! Concurrent per-hop geolocation
//!
//! One task is spawned per hop and the handles are joined in input order, so
//! the output lines up with the input no matter which lookup finishes first.
//! A failed, timed-out or panicked lookup only blanks that hop's geo fields.

use futures::future::join_all;
use std::time::Duration;
use tracing::{debug, warn};

use crate::model::{EnrichedHop, HopRecord};
use crate::service::geo_service::GeoLookup;

pub struct HopEnricher<L> {
    lookup: L,
    lookup_timeout: Duration,
}

impl<L: GeoLookup> HopEnricher<L> {
    pub fn new(lookup: L, lookup_timeout: Duration) -> Self {
        Self {
            lookup,
            lookup_timeout,
        }
    }

    /// Attach geo data to every hop. Output has the same length and order as
    /// `hops`.
    pub async fn enrich(&self, hops: Vec<HopRecord>) -> Vec<EnrichedHop> {
        let handles: Vec<_> = hops
            .iter()
            .map(|hop| {
                let lookup = self.lookup.clone();
                let address = hop.address.to_string();
                let limit = self.lookup_timeout;
                tokio::spawn(async move {
                    match tokio::time::timeout(limit, lookup.lookup(&address)).await {
                        Ok(result) => result,
                        Err(_) => Err(anyhow::anyhow!("lookup timed out after {:?}", limit)),
                    }
                })
            })
            .collect();

        let results = join_all(handles).await;

        let enriched: Vec<EnrichedHop> = hops
            .into_iter()
            .zip(results)
            .map(|(hop, joined)| {
                let geo = match joined {
                    Ok(Ok(info)) => Some(info),
                    Ok(Err(e)) => {
                        warn!("Geo lookup failed for {}: {:#}", hop.address, e);
                        None
                    }
                    Err(e) => {
                        warn!("Geo lookup task for {} aborted: {}", hop.address, e);
                        None
                    }
                };
                EnrichedHop::new(hop, geo)
            })
            .collect();

        let located = enriched.iter().filter(|hop| hop.is_located()).count();
        debug!("Enriched {} hops, {} located", enriched.len(), located);
        enriched
    }
}
