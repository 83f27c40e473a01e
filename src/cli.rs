use clap::Parser;
use std::path::PathBuf;

/// Command-line options. Unset values fall back to the config file, then to
/// built-in defaults.
#[derive(Parser, Debug, Default)]
#[command(name = "hop-trace")]
#[command(version)]
#[command(about = "Traceroute HTTP service with per-hop geolocation", long_about = None)]
pub struct Args {
    /// TOML config file
    #[arg(short = 'c', long, env = "HOP_TRACE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to bind the HTTP server to
    #[arg(long, env = "HOP_TRACE_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short = 'p', long, env = "HOP_TRACE_PORT")]
    pub port: Option<u16>,

    /// Base URL of the ip-api compatible geolocation service
    #[arg(long, env = "HOP_TRACE_GEO_API_URL")]
    pub geo_api_url: Option<String>,

    /// Per-hop geolocation timeout in milliseconds
    #[arg(long, env = "HOP_TRACE_LOOKUP_TIMEOUT_MS")]
    pub lookup_timeout_ms: Option<u64>,

    /// Traceroute process timeout in seconds
    #[arg(long, env = "HOP_TRACE_TRACE_TIMEOUT_SECS")]
    pub trace_timeout_secs: Option<u64>,

    /// Maximum number of hops passed to the traceroute binary
    #[arg(short = 'm', long, env = "HOP_TRACE_MAX_HOPS")]
    pub max_hops: Option<u8>,

    /// Traceroute binary to run instead of the platform default
    #[arg(long, env = "HOP_TRACE_TRACEROUTE_BIN")]
    pub traceroute_bin: Option<String>,

    /// Verbose output
    #[arg(short = 'v', long, env = "HOP_TRACE_VERBOSE")]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let args = Args::parse_from([
            "hop-trace",
            "--port",
            "9000",
            "--lookup-timeout-ms",
            "250",
            "-m",
            "20",
            "-v",
        ]);
        assert_eq!(args.port, Some(9000));
        assert_eq!(args.lookup_timeout_ms, Some(250));
        assert_eq!(args.max_hops, Some(20));
        assert!(args.verbose);
        assert!(args.host.is_none());
    }
}
