mod enriched;
mod geo;
mod hop;

pub use enriched::EnrichedHop;
pub use geo::{GeoInfo, IpApiResponse};
pub use hop::{HopRecord, Latency};
