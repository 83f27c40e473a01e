use anyhow::{anyhow, Result};
use serde::Deserialize;

/// Raw body returned by the ip-api `/json/{address}` endpoint.
///
/// Only `status` is guaranteed; every other field is absent on failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpApiResponse {
    pub status: String,
    pub message: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub isp: Option<String>,
}

/// Geographic and ISP metadata for one address.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoInfo {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub country_name: Option<String>,
    pub country_code: Option<String>,
    pub isp_name: Option<String>,
}

impl TryFrom<IpApiResponse> for GeoInfo {
    type Error = anyhow::Error;

    fn try_from(resp: IpApiResponse) -> Result<Self> {
        if resp.status != "success" {
            return Err(anyhow!(
                "lookup returned status '{}': {}",
                resp.status,
                resp.message.as_deref().unwrap_or("no message")
            ));
        }

        Ok(GeoInfo {
            latitude: resp.lat,
            longitude: resp.lon,
            country_name: resp.country,
            country_code: resp.country_code,
            isp_name: resp.isp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_response() {
        let body = r#"{
            "status": "success",
            "country": "United States",
            "countryCode": "US",
            "lat": 39.03,
            "lon": -77.5,
            "isp": "Google LLC",
            "query": "8.8.8.8"
        }"#;
        let resp: IpApiResponse = serde_json::from_str(body).unwrap();
        let info = GeoInfo::try_from(resp).unwrap();

        assert_eq!(info.country_name.as_deref(), Some("United States"));
        assert_eq!(info.country_code.as_deref(), Some("US"));
        assert_eq!(info.isp_name.as_deref(), Some("Google LLC"));
        assert_eq!(info.latitude, Some(39.03));
        assert_eq!(info.longitude, Some(-77.5));
    }

    #[test]
    fn test_fail_status_is_error() {
        let body = r#"{"status":"fail","message":"private range","query":"10.0.0.1"}"#;
        let resp: IpApiResponse = serde_json::from_str(body).unwrap();
        let err = GeoInfo::try_from(resp).unwrap_err();
        assert!(err.to_string().contains("private range"));
    }
}
