use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use utoipa::ToSchema;

use super::{GeoInfo, HopRecord, Latency};

/// A hop with its geolocation attached; the unit of the `/traceroute` response.
///
/// Every field is always serialized, with `null` for anything unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EnrichedHop {
    /// Hop address
    #[serde(rename = "ip")]
    #[schema(value_type = String, example = "93.184.216.34")]
    pub address: IpAddr,

    /// Latitude
    #[serde(rename = "lat")]
    pub latitude: Option<f64>,

    /// Longitude
    #[serde(rename = "lon")]
    pub longitude: Option<f64>,

    /// Country name
    #[serde(rename = "country")]
    pub country_name: Option<String>,

    /// ISO country code
    #[serde(rename = "countryCode")]
    pub country_code: Option<String>,

    /// ISP name
    #[serde(rename = "isp")]
    pub isp_name: Option<String>,

    /// Round-trip time in milliseconds
    #[serde(rename = "ping")]
    #[schema(value_type = Option<f64>)]
    pub latency: Option<Latency>,
}

impl EnrichedHop {
    pub fn new(hop: HopRecord, geo: Option<GeoInfo>) -> Self {
        let geo = geo.unwrap_or_default();
        Self {
            address: hop.address,
            latitude: geo.latitude,
            longitude: geo.longitude,
            country_name: geo.country_name,
            country_code: geo.country_code,
            isp_name: geo.isp_name,
            latency: hop.latency,
        }
    }

    pub fn is_located(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unlocated_hop_serializes_nulls() {
        let hop = HopRecord::new("10.0.0.1".parse().unwrap(), Some(Latency::Millis(3)));
        let enriched = EnrichedHop::new(hop, None);

        assert!(!enriched.is_located());
        assert_eq!(
            serde_json::to_value(&enriched).unwrap(),
            json!({
                "ip": "10.0.0.1",
                "lat": null,
                "lon": null,
                "country": null,
                "countryCode": null,
                "isp": null,
                "ping": 3
            })
        );
    }

    #[test]
    fn test_located_hop() {
        let hop = HopRecord::new("8.8.8.8".parse().unwrap(), Some(Latency::Fractional(9.5)));
        let geo = GeoInfo {
            latitude: Some(37.4),
            longitude: Some(-122.1),
            country_name: Some("United States".to_string()),
            country_code: Some("US".to_string()),
            isp_name: Some("Google LLC".to_string()),
        };
        let enriched = EnrichedHop::new(hop, Some(geo));

        assert!(enriched.is_located());
        let value = serde_json::to_value(&enriched).unwrap();
        assert_eq!(value["countryCode"], "US");
        assert_eq!(value["ping"], 9.5);
    }
}
