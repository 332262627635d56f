//! Configuration constants.
//!
//! This module defines the default endpoints, placeholders, timeouts and retry
//! parameters used throughout the application.

// Lookup endpoints
/// IPv4-only address echo service. Responds with `{"ip": "..."}`.
pub const DEFAULT_IPV4_ENDPOINT: &str = "https://api.ipify.org?format=json";
/// Dual-stack address echo service. Only answers over IPv6 when the host has
/// IPv6 connectivity, otherwise it fails or echoes the IPv4 address.
pub const DEFAULT_IPV6_ENDPOINT: &str = "https://api64.ipify.org?format=json";
/// Geolocation service template. `{ip}` is replaced by the IPv4 address.
pub const DEFAULT_GEO_ENDPOINT: &str = "https://ipapi.co/{ip}/json/";
/// Flag image template. `{code}` is replaced by the lowercase ISO country code.
pub const DEFAULT_FLAG_TEMPLATE: &str = "https://flagcdn.com/w80/{code}.png";

/// Marker replaced by the looked-up address in the geo endpoint template
pub const GEO_ADDRESS_MARKER: &str = "{ip}";
/// Marker replaced by the country code in the flag template
pub const FLAG_CODE_MARKER: &str = "{code}";

// Placeholders
pub const IPV4_UNAVAILABLE: &str = "Unavailable";
pub const IPV6_NOT_DETECTED: &str = "Not Detected";
pub const UNKNOWN: &str = "Unknown";
pub const UNKNOWN_ISP: &str = "Unknown ISP";
/// Text shown by a slot while its lookup is still in flight.
/// Fields containing it are never copied to the clipboard.
pub const LOADING_PLACEHOLDER: &str = "...";

// Notifications
pub const NETWORK_ERROR_MESSAGE: &str = "Network error";
pub const COPIED_MESSAGE: &str = "Copied to Clipboard";

/// Per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default User-Agent string for lookup requests.
///
/// The echo services do not inspect it; a descriptive value keeps us
/// identifiable in their logs. Users can override this via `--user-agent`.
pub const DEFAULT_USER_AGENT: &str = concat!("ip_intel/", env!("CARGO_PKG_VERSION"));

// Retry strategy
/// Initial delay in milliseconds before first retry
pub const RETRY_INITIAL_DELAY_MS: u64 = 500;
/// Factor by which retry delay is multiplied on each attempt
pub const RETRY_FACTOR: u64 = 2;
/// Maximum delay between retries in seconds
pub const RETRY_MAX_DELAY_SECS: u64 = 5;

/// HTTP 429, retried with backoff
pub const HTTP_STATUS_TOO_MANY_REQUESTS: u16 = 429;
