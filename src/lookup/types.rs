//! Lookup data structures.
//!
//! Wire formats of the three services plus the aggregated per-cycle result.

use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// The three outbound services a refresh cycle talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Endpoint {
    #[strum(serialize = "IPv4")]
    Ipv4,
    #[strum(serialize = "IPv6")]
    Ipv6,
    #[strum(serialize = "geolocation")]
    Geo,
}

/// Body of the address echo services: `{"ip": "203.0.113.7"}`
#[derive(Debug, Clone, Deserialize)]
pub struct AddressResponse {
    #[serde(default)]
    pub ip: Option<String>,
}

/// Geolocation of an address. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_code: Option<String>,
}

/// Body of the geolocation service.
///
/// ipapi.co reports refusals (rate limiting, reserved ranges) as HTTP 200
/// with `{"error": true, "reason": "..."}`.
#[derive(Debug, Clone, Deserialize)]
pub struct GeoResponse {
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(flatten)]
    pub info: GeoInfo,
}

impl GeoInfo {
    /// Drops blank strings so that `""` is treated like an absent field.
    pub fn normalized(self) -> Self {
        fn keep(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }
        GeoInfo {
            country_name: keep(self.country_name),
            country_code: keep(self.country_code),
            org: keep(self.org),
            city: keep(self.city),
            region_code: keep(self.region_code),
        }
    }
}

/// Everything one refresh cycle learned. `None` means the lookup failed or
/// was skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LookupResult {
    pub ipv4: Option<String>,
    pub ipv6: Option<String>,
    pub geo: Option<GeoInfo>,
}
