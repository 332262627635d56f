// Shared test helpers for mock lookup services.
//
// Mounts the three endpoints on a wiremock server and builds a Config that
// points at them.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ip_intel::{Config, LogFormat, LogLevel};

pub const IPV4: &str = "203.0.113.7";
pub const IPV6: &str = "2001:db8::7";

/// Config whose endpoints all live on `server`.
pub fn config_for(server: &MockServer) -> Config {
    Config {
        log_level: LogLevel::Error,
        log_format: LogFormat::Plain,
        ipv4_endpoint: format!("{}/v4", server.uri()),
        ipv6_endpoint: format!("{}/v6", server.uri()),
        geo_endpoint: format!("{}/geo/{{ip}}/json/", server.uri()),
        timeout_seconds: 5,
        user_agent: "ip_intel_test/1.0".to_string(),
        ..Default::default()
    }
}

pub fn geo_path(address: &str) -> String {
    format!("/geo/{}/json/", address)
}

pub async fn mount_address(server: &MockServer, route: &str, address: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ip": address })))
        .mount(server)
        .await;
}

pub async fn mount_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

pub async fn mount_geo(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(geo_path(IPV4)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub fn japan() -> serde_json::Value {
    json!({
        "ip": IPV4,
        "country_name": "Japan",
        "country_code": "JP",
        "org": "NTT",
        "city": "Tokyo",
        "region_code": "13",
        "latitude": 35.6895,
        "longitude": 139.6917
    })
}
