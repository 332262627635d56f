//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_FLAG_TEMPLATE, DEFAULT_GEO_ENDPOINT, DEFAULT_IPV4_ENDPOINT, DEFAULT_IPV6_ENDPOINT,
    DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, FLAG_CODE_MARKER, GEO_ADDRESS_MARKER,
};
use crate::error_handling::ConfigError;
use crate::render::Slot;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Application configuration.
///
/// Parsed from the command line by the binary, or constructed programmatically
/// (see [`Config::default`]) when the crate is used as a library.
///
/// # Examples
///
/// ```no_run
/// use ip_intel::Config;
///
/// let config = Config {
///     timeout_seconds: 5,
///     retries: 2,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ip_intel",
    about = "Shows your public IPv4/IPv6 address, its geolocation and a connection exposure hint."
)]
pub struct Config {
    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// IPv4 address lookup endpoint (must answer `{"ip": "..."}`)
    #[arg(long, default_value = DEFAULT_IPV4_ENDPOINT)]
    pub ipv4_endpoint: String,

    /// IPv6 address lookup endpoint (must answer `{"ip": "..."}`)
    #[arg(long, default_value = DEFAULT_IPV6_ENDPOINT)]
    pub ipv6_endpoint: String,

    /// Geolocation endpoint template; `{ip}` is replaced by the IPv4 address
    #[arg(long, default_value = DEFAULT_GEO_ENDPOINT)]
    pub geo_endpoint: String,

    /// Flag image URL template; `{code}` is replaced by the lowercase country code
    #[arg(long, default_value = DEFAULT_FLAG_TEMPLATE)]
    pub flag_template: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Retries per lookup for transient failures (timeouts, 429, 5xx)
    #[arg(long, default_value_t = 0)]
    pub retries: usize,

    /// Refresh every N seconds until Ctrl-C instead of running once
    #[arg(long)]
    pub watch: Option<u64>,

    /// Show the raw JSON of the last lookup below the panel
    #[arg(long)]
    pub debug: bool,

    /// Copy a field to the clipboard after the refresh
    /// (v4-address, v6-address, country, isp, city)
    #[arg(long)]
    pub copy: Option<Slot>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Warn,
            log_format: LogFormat::Plain,
            ipv4_endpoint: DEFAULT_IPV4_ENDPOINT.to_string(),
            ipv6_endpoint: DEFAULT_IPV6_ENDPOINT.to_string(),
            geo_endpoint: DEFAULT_GEO_ENDPOINT.to_string(),
            flag_template: DEFAULT_FLAG_TEMPLATE.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            retries: 0,
            watch: None,
            debug: false,
            copy: None,
        }
    }
}

impl Config {
    /// Checks that endpoints are absolute http(s) URLs and that templates carry
    /// their substitution markers.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_endpoint("ipv4-endpoint", &self.ipv4_endpoint)?;
        validate_endpoint("ipv6-endpoint", &self.ipv6_endpoint)?;

        if !self.geo_endpoint.contains(GEO_ADDRESS_MARKER) {
            return Err(ConfigError::MissingMarker {
                option: "geo-endpoint",
                marker: GEO_ADDRESS_MARKER,
            });
        }
        // Substitute a documentation address so the template parses as a URL
        validate_endpoint(
            "geo-endpoint",
            &self.geo_endpoint.replace(GEO_ADDRESS_MARKER, "192.0.2.1"),
        )?;

        if !self.flag_template.contains(FLAG_CODE_MARKER) {
            return Err(ConfigError::MissingMarker {
                option: "flag-template",
                marker: FLAG_CODE_MARKER,
            });
        }

        if self.timeout_seconds == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.watch == Some(0) {
            return Err(ConfigError::ZeroWatchInterval);
        }
        Ok(())
    }
}

fn validate_endpoint(option: &'static str, value: &str) -> Result<(), ConfigError> {
    let url = url::Url::parse(value).map_err(|e| ConfigError::InvalidEndpoint {
        option,
        value: value.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::InvalidEndpoint {
            option,
            value: value.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}
