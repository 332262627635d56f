//! Display strings derived from a geolocation.

use crate::config::{FLAG_CODE_MARKER, UNKNOWN, UNKNOWN_ISP};
use crate::lookup::GeoInfo;

pub fn country_text(geo: &GeoInfo) -> &str {
    geo.country_name.as_deref().unwrap_or(UNKNOWN)
}

pub fn isp_text(geo: &GeoInfo) -> &str {
    geo.org.as_deref().unwrap_or(UNKNOWN_ISP)
}

/// `"city, region"`, `"city"` without a region, `"Unknown"` without a city.
pub fn city_text(geo: &GeoInfo) -> String {
    match (&geo.city, &geo.region_code) {
        (Some(city), Some(region)) => format!("{}, {}", city, region),
        (Some(city), None) => city.clone(),
        (None, _) => UNKNOWN.to_string(),
    }
}

/// Flag image URL for a two-letter country code, or `None` when the code is
/// not two ASCII letters.
pub fn flag_url(template: &str, country_code: &str) -> Option<String> {
    let code = country_code.trim();
    if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    Some(template.replace(FLAG_CODE_MARKER, &code.to_ascii_lowercase()))
}
