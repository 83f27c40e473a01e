//! Server configuration
//!
//! Resolved once at startup from, in order of precedence, CLI flags and
//! environment variables, an optional TOML file, and built-in defaults.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::cli::Args;
use crate::error::{Result, TraceError};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_GEO_API_URL: &str = "http://ip-api.com";
const DEFAULT_LOOKUP_TIMEOUT_MS: u64 = 5000;
const DEFAULT_TRACE_TIMEOUT_SECS: u64 = 120;

/// Values accepted in the TOML config file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub geo_api_url: Option<String>,
    pub lookup_timeout_ms: Option<u64>,
    pub trace_timeout_secs: Option<u64>,
    pub max_hops: Option<u8>,
    pub traceroute_bin: Option<String>,
    pub verbose: Option<bool>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TraceError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        toml::from_str(&content)
            .map_err(|e| TraceError::Config(format!("invalid {}: {}", path.display(), e)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub geo_api_url: String,
    pub lookup_timeout: Duration,
    pub trace_timeout: Duration,
    pub max_hops: Option<u8>,
    pub traceroute_bin: Option<String>,
    pub verbose: bool,
}

impl ServerConfig {
    pub fn load(args: Args) -> Result<Self> {
        let file = match &args.config {
            Some(path) => FileConfig::from_file(path)?,
            None => FileConfig::default(),
        };
        Self::merge(args, file)
    }

    fn merge(args: Args, file: FileConfig) -> Result<Self> {
        let lookup_timeout_ms = args
            .lookup_timeout_ms
            .or(file.lookup_timeout_ms)
            .unwrap_or(DEFAULT_LOOKUP_TIMEOUT_MS);
        let trace_timeout_secs = args
            .trace_timeout_secs
            .or(file.trace_timeout_secs)
            .unwrap_or(DEFAULT_TRACE_TIMEOUT_SECS);

        if lookup_timeout_ms == 0 {
            return Err(TraceError::Config("lookup_timeout_ms must be greater than 0".to_string()));
        }
        if trace_timeout_secs == 0 {
            return Err(TraceError::Config("trace_timeout_secs must be greater than 0".to_string()));
        }

        Ok(ServerConfig {
            host: args.host.or(file.host).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: args.port.or(file.port).unwrap_or(DEFAULT_PORT),
            geo_api_url: args
                .geo_api_url
                .or(file.geo_api_url)
                .unwrap_or_else(|| DEFAULT_GEO_API_URL.to_string()),
            lookup_timeout: Duration::from_millis(lookup_timeout_ms),
            trace_timeout: Duration::from_secs(trace_timeout_secs),
            max_hops: args.max_hops.or(file.max_hops),
            traceroute_bin: args.traceroute_bin.or(file.traceroute_bin),
            verbose: args.verbose || file.verbose.unwrap_or(false),
        })
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}
