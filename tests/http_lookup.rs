//! HttpLookupService against mock endpoints.

mod helpers;

use std::time::{Duration, Instant};

use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use helpers::*;
use ip_intel::error_handling::LookupError;
use ip_intel::initialization::init_lookup_service;
use ip_intel::lookup::Endpoint;
use ip_intel::LookupService;

#[tokio::test]
async fn test_lookup_addresses() {
    let server = MockServer::start().await;
    mount_address(&server, "/v4", IPV4).await;
    mount_address(&server, "/v6", IPV6).await;
    let service = init_lookup_service(&config_for(&server)).unwrap();
    let token = CancellationToken::new();

    assert_eq!(service.lookup_ipv4(&token).await.unwrap(), IPV4);
    assert_eq!(service.lookup_ipv6(&token).await.unwrap(), IPV6);
}

#[tokio::test]
async fn test_requests_carry_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4"))
        .and(header("user-agent", "ip_intel_test/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ip": IPV4 })))
        .expect(1)
        .mount(&server)
        .await;
    let service = init_lookup_service(&config_for(&server)).unwrap();

    service
        .lookup_ipv4(&CancellationToken::new())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_lookup_geo_parses_fields() {
    let server = MockServer::start().await;
    mount_geo(&server, japan()).await;
    let service = init_lookup_service(&config_for(&server)).unwrap();

    let geo = service
        .lookup_geo(IPV4, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(geo.country_name.as_deref(), Some("Japan"));
    assert_eq!(geo.country_code.as_deref(), Some("JP"));
    assert_eq!(geo.org.as_deref(), Some("NTT"));
    assert_eq!(geo.city.as_deref(), Some("Tokyo"));
    assert_eq!(geo.region_code.as_deref(), Some("13"));
}

#[tokio::test]
async fn test_geo_error_document_is_a_failure() {
    let server = MockServer::start().await;
    mount_geo(
        &server,
        json!({ "ip": IPV4, "error": true, "reason": "RateLimited" }),
    )
    .await;
    let service = init_lookup_service(&config_for(&server)).unwrap();

    let err = service
        .lookup_geo(IPV4, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, LookupError::Service { ref reason } if reason == "RateLimited"));
}

#[tokio::test]
async fn test_non_success_status_is_a_failure() {
    let server = MockServer::start().await;
    mount_status(&server, "/v6", 404).await;
    let service = init_lookup_service(&config_for(&server)).unwrap();

    let err = service
        .lookup_ipv6(&CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        LookupError::Status {
            endpoint: Endpoint::Ipv6,
            status: 404
        }
    ));
}

#[tokio::test]
async fn test_malformed_body_is_a_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4"))
        .respond_with(ResponseTemplate::new(200).set_body_string("203.0.113.7"))
        .mount(&server)
        .await;
    let service = init_lookup_service(&config_for(&server)).unwrap();

    let err = service
        .lookup_ipv4(&CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, LookupError::Decode { .. }));
}

#[tokio::test]
async fn test_ipv4_answer_on_ipv6_endpoint_is_rejected() {
    let server = MockServer::start().await;
    // The dual-stack service falls back to IPv4 on hosts without IPv6
    mount_address(&server, "/v6", IPV4).await;
    let service = init_lookup_service(&config_for(&server)).unwrap();

    let err = service
        .lookup_ipv6(&CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, LookupError::UnexpectedAddress { .. }));
}

#[tokio::test]
async fn test_missing_ip_field_is_empty_address() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ip": "  " })))
        .mount(&server)
        .await;
    let service = init_lookup_service(&config_for(&server)).unwrap();

    let err = service
        .lookup_ipv4(&CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        LookupError::EmptyAddress {
            endpoint: Endpoint::Ipv4
        }
    ));
}

#[tokio::test]
async fn test_transient_failure_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    mount_address(&server, "/v4", IPV4).await;
    let config = ip_intel::Config {
        retries: 1,
        ..config_for(&server)
    };
    let service = init_lookup_service(&config).unwrap();

    let address = service
        .lookup_ipv4(&CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(address, IPV4);
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;
    let config = ip_intel::Config {
        retries: 3,
        ..config_for(&server)
    };
    let service = init_lookup_service(&config).unwrap();

    let err = service
        .lookup_ipv4(&CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, LookupError::Status { status: 403, .. }));
}

#[tokio::test]
async fn test_cancellation_interrupts_slow_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(geo_path(IPV4)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(japan())
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&server)
        .await;
    let config = ip_intel::Config {
        timeout_seconds: 30,
        ..config_for(&server)
    };
    let service = init_lookup_service(&config).unwrap();
    let token = CancellationToken::new();

    let canceller = {
        let token = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            token.cancel();
        })
    };
    let started = Instant::now();
    let err = service.lookup_geo(IPV4, &token).await.unwrap_err();
    canceller.await.unwrap();

    assert!(err.is_cancelled());
    assert!(started.elapsed() < Duration::from_secs(5));
}
