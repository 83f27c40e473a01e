use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Round-trip time reported for a single hop.
///
/// `tracert` prints whole milliseconds while `traceroute` prints fractional
/// values; both are kept as reported so the JSON output matches the source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Latency {
    Millis(u64),
    Fractional(f64),
}

/// One hop of a traceroute, in path order.
#[derive(Debug, Clone, PartialEq)]
pub struct HopRecord {
    pub address: IpAddr,
    pub latency: Option<Latency>,
}

impl HopRecord {
    pub fn new(address: IpAddr, latency: Option<Latency>) -> Self {
        Self { address, latency }
    }
}
