use crate::model::{GeoInfo, IpApiResponse};
use anyhow::{Context, Result};
use std::future::Future;

/// Resolves an address to geographic/ISP metadata.
pub trait GeoLookup: Clone + Send + Sync + 'static {
    fn lookup(&self, address: &str) -> impl Future<Output = Result<GeoInfo>> + Send;
}

/// Opens the per-request lookup context.
pub trait GeoConnector: Send + Sync {
    type Lookup: GeoLookup;

    fn connect(&self) -> Result<Self::Lookup>;
}

/// Base URL of an ip-api compatible service.
#[derive(Debug, Clone)]
pub struct GeoEndpoint {
    base_url: String,
}

impl GeoEndpoint {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl GeoConnector for GeoEndpoint {
    type Lookup = GeoService;

    fn connect(&self) -> Result<GeoService> {
        GeoService::new(&self.base_url)
    }
}

/// Lookup against an ip-api compatible endpoint (`GET {base}/json/{address}`).
///
/// Cloning shares the underlying connection pool, so one `GeoService` opened
/// per request serves every hop of that request.
#[derive(Clone)]
pub struct GeoService {
    client: reqwest::Client,
    base_url: String,
}

impl GeoService {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn lookup_url(&self, address: &str) -> String {
        format!("{}/json/{}", self.base_url, address)
    }
}

impl GeoLookup for GeoService {
    async fn lookup(&self, address: &str) -> Result<GeoInfo> {
        let url = self.lookup_url(address);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to call geo API")?
            .json::<IpApiResponse>()
            .await
            .context("Failed to parse geo API response")?;

        GeoInfo::try_from(resp)
    }
}
