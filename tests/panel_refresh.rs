//! End-to-end refresh cycles: HttpLookupService feeding a TerminalPanel.

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use helpers::*;
use ip_intel::initialization::init_lookup_service;
use ip_intel::{
    ConnectionStatus, Controller, HttpLookupService, RefreshFailure, RefreshOutcome, RenderPort,
    Slot, TerminalPanel,
};

const FLAG_TEMPLATE: &str = "https://flags.test/{code}.png";

fn controller_for(server: &MockServer) -> Controller<HttpLookupService, TerminalPanel> {
    let service = init_lookup_service(&config_for(server)).unwrap();
    Controller::new(service, TerminalPanel::quiet(), FLAG_TEMPLATE)
}

/// What the panel displays for `slot`; hidden values read as `None`.
fn shown(controller: &Controller<HttpLookupService, TerminalPanel>, slot: Slot) -> Option<String> {
    controller.with_renderer(|panel| panel.text(slot))
}

fn text(controller: &Controller<HttpLookupService, TerminalPanel>, slot: Slot) -> String {
    shown(controller, slot).unwrap_or_default()
}

#[tokio::test]
async fn test_full_refresh_renders_panel() {
    let server = MockServer::start().await;
    mount_address(&server, "/v4", IPV4).await;
    mount_address(&server, "/v6", IPV6).await;
    mount_geo(&server, japan()).await;
    let controller = controller_for(&server);

    let outcome = controller.refresh().await;

    assert!(matches!(outcome, RefreshOutcome::Completed(_)));
    assert_eq!(text(&controller, Slot::V4Address), IPV4);
    assert_eq!(text(&controller, Slot::V6Address), IPV6);
    assert_eq!(text(&controller, Slot::Country), "Japan");
    assert_eq!(text(&controller, Slot::Isp), "NTT");
    assert_eq!(text(&controller, Slot::City), "Tokyo, 13");
    controller.with_renderer(|panel| {
        assert!(panel.slot(Slot::FlagImage).visible);
        assert_eq!(
            panel.slot(Slot::FlagImage).image_source.as_deref(),
            Some("https://flags.test/jp.png")
        );
        assert_eq!(panel.status(), ConnectionStatus::Exposed);
        assert!(panel.trigger_enabled());
        assert!(panel.notifications().is_empty());
    });
    assert!(!controller.is_loading());

    assert_eq!(shown(&controller, Slot::DebugJson), None);
    assert!(controller.toggle_debug_view());
    let debug: serde_json::Value =
        serde_json::from_str(&text(&controller, Slot::DebugJson)).unwrap();
    assert_eq!(debug["ipv4"], IPV4);
    assert_eq!(debug["geo"]["country_code"], "JP");
}

#[tokio::test]
async fn test_missing_ipv6_renders_not_detected() {
    let server = MockServer::start().await;
    mount_address(&server, "/v4", IPV4).await;
    mount_status(&server, "/v6", 502).await;
    mount_geo(
        &server,
        json!({ "ip": IPV4, "country_name": "Netherlands", "country_code": "NL", "org": "M247 VPN Services" }),
    )
    .await;
    let controller = controller_for(&server);

    let outcome = controller.refresh().await;

    assert!(matches!(outcome, RefreshOutcome::Completed(_)));
    assert_eq!(text(&controller, Slot::V6Address), "Not Detected");
    assert_eq!(text(&controller, Slot::City), "Unknown");
    controller.with_renderer(|panel| {
        assert_eq!(panel.status(), ConnectionStatus::Secure);
        assert!(panel.notifications().is_empty());
    });
}

#[tokio::test]
async fn test_geo_error_document_notifies_network_error() {
    let server = MockServer::start().await;
    mount_address(&server, "/v4", IPV4).await;
    mount_address(&server, "/v6", IPV6).await;
    mount_geo(&server, json!({ "error": true, "reason": "Reserved IP Address" })).await;
    let controller = controller_for(&server);

    let outcome = controller.refresh().await;

    assert!(matches!(
        outcome,
        RefreshOutcome::Failed {
            failure: RefreshFailure::Geo(_),
            ..
        }
    ));
    assert_eq!(text(&controller, Slot::V4Address), IPV4);
    controller.with_renderer(|panel| {
        assert_eq!(panel.notifications(), ["Network error".to_string()]);
        assert!(panel.trigger_enabled());
    });
    assert_eq!(shown(&controller, Slot::Country), None);
    assert!(!controller.is_loading());
}

#[tokio::test]
async fn test_failed_refresh_does_not_show_previous_geo() {
    let server = MockServer::start().await;
    mount_address(&server, "/v4", IPV4).await;
    mount_address(&server, "/v6", IPV6).await;
    Mock::given(method("GET"))
        .and(path(geo_path(IPV4)))
        .respond_with(ResponseTemplate::new(200).set_body_json(japan()))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_geo(&server, json!({ "error": true, "reason": "RateLimited" })).await;
    let controller = controller_for(&server);

    assert!(matches!(controller.refresh().await, RefreshOutcome::Completed(_)));
    assert_eq!(text(&controller, Slot::Country), "Japan");

    assert!(controller.refresh().await.is_failure());
    assert_eq!(text(&controller, Slot::V4Address), IPV4);
    for slot in [Slot::Country, Slot::Isp, Slot::City] {
        assert_eq!(shown(&controller, slot), None, "{} still shown", slot);
    }
}

#[tokio::test]
async fn test_ipv4_down_skips_geolocation() {
    let server = MockServer::start().await;
    mount_status(&server, "/v4", 500).await;
    mount_address(&server, "/v6", IPV6).await;
    Mock::given(method("GET"))
        .and(path(geo_path(IPV4)))
        .respond_with(ResponseTemplate::new(200).set_body_json(japan()))
        .expect(0)
        .mount(&server)
        .await;
    let controller = controller_for(&server);

    let outcome = controller.refresh().await;

    assert!(matches!(
        outcome,
        RefreshOutcome::Failed {
            failure: RefreshFailure::Ipv4Unavailable,
            ..
        }
    ));
    assert_eq!(text(&controller, Slot::V4Address), "Unavailable");
    assert_eq!(text(&controller, Slot::V6Address), IPV6);
    controller.with_renderer(|panel| {
        assert_eq!(panel.notifications(), ["Network error".to_string()]);
    });
}

#[tokio::test]
async fn test_cancel_during_geolocation_is_silent() {
    let server = MockServer::start().await;
    mount_address(&server, "/v4", IPV4).await;
    mount_address(&server, "/v6", IPV6).await;
    Mock::given(method("GET"))
        .and(path(geo_path(IPV4)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(japan())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;
    let controller = Arc::new(controller_for(&server));

    let cycle = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.refresh().await })
    };

    // Wait until the geolocation request is on the wire
    let geo_path = geo_path(IPV4);
    for _ in 0..200 {
        let requests = server.received_requests().await.unwrap_or_default();
        if requests.iter().any(|r| r.url.path() == geo_path) {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(controller.is_loading());
    assert!(controller.cancel());

    let outcome = tokio::time::timeout(Duration::from_secs(2), cycle)
        .await
        .expect("cancelled cycle should end before the server answers")
        .unwrap();

    assert!(matches!(outcome, RefreshOutcome::Cancelled));
    assert!(!controller.is_loading());
    controller.with_renderer(|panel| {
        assert!(panel.notifications().is_empty());
        assert!(panel.trigger_enabled());
    });
    assert_eq!(shown(&controller, Slot::Country), None);
}
