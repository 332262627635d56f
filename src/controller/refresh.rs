//! The body of a refresh cycle.

use log::{debug, info, warn};
use tokio_util::sync::CancellationToken;

use super::outcome::{RefreshFailure, RefreshOutcome};
use super::state::Inner;
use super::view::{city_text, country_text, flag_url, isp_text};
use super::Controller;
use crate::config::{IPV4_UNAVAILABLE, IPV6_NOT_DETECTED, NETWORK_ERROR_MESSAGE};
use crate::error_handling::{update_error_stats, InfoType, LookupError};
use crate::lookup::{Endpoint, GeoInfo, LookupResult, LookupService};
use crate::render::{RenderPort, Slot};
use crate::security::classify_exposure;

impl<S: LookupService, R: RenderPort> Controller<S, R> {
    pub(super) async fn run_cycle(&self, token: &CancellationToken) -> RefreshOutcome {
        let (ipv4, ipv6) = tokio::join!(
            self.service.lookup_ipv4(token),
            self.service.lookup_ipv6(token)
        );
        if token.is_cancelled() {
            return RefreshOutcome::Cancelled;
        }

        let ipv4 = self.settle(Endpoint::Ipv4, ipv4);
        let ipv6 = self.settle(Endpoint::Ipv6, ipv6);
        if ipv6.is_none() {
            self.stats.increment_info(InfoType::Ipv6NotDetected);
        }

        let rendered = self.commit(token, |inner| {
            inner.render_value(
                Slot::V4Address,
                ipv4.as_deref().unwrap_or(IPV4_UNAVAILABLE),
            );
            inner.render_value(
                Slot::V6Address,
                ipv6.as_deref().unwrap_or(IPV6_NOT_DETECTED),
            );
        });
        if !rendered {
            return RefreshOutcome::Cancelled;
        }

        let mut result = LookupResult {
            ipv4: ipv4.clone(),
            ipv6,
            geo: None,
        };

        let Some(address) = ipv4 else {
            return self.fail(token, result, RefreshFailure::Ipv4Unavailable);
        };

        match self.service.lookup_geo(&address, token).await {
            Err(e) if e.is_cancelled() => RefreshOutcome::Cancelled,
            Err(e) => {
                update_error_stats(&self.stats, &e);
                self.fail(token, result, RefreshFailure::Geo(e))
            }
            Ok(geo) => {
                result.geo = Some(geo.clone());
                let rendered = self.commit(token, |inner| {
                    self.render_geo(inner, &geo);
                    inner.record_result(&result);
                });
                if !rendered {
                    return RefreshOutcome::Cancelled;
                }
                info!(
                    "{} via {} ({})",
                    address,
                    isp_text(&geo),
                    classify_exposure(geo.org.as_deref())
                );
                RefreshOutcome::Completed(result)
            }
        }
    }

    /// Resolves one of the concurrent address lookups to a value or `None`.
    fn settle(&self, endpoint: Endpoint, lookup: Result<String, LookupError>) -> Option<String> {
        match lookup {
            Ok(address) => {
                debug!("{} address: {}", endpoint, address);
                Some(address)
            }
            Err(e) => {
                update_error_stats(&self.stats, &e);
                match endpoint {
                    // Missing IPv6 connectivity is common and not worth a warning
                    Endpoint::Ipv6 => debug!("{}", e),
                    _ => warn!("{}", e),
                }
                None
            }
        }
    }

    fn render_geo(&self, inner: &mut Inner<R>, geo: &GeoInfo) {
        inner.render_value(Slot::Country, country_text(geo));
        if let Some(url) = geo
            .country_code
            .as_deref()
            .and_then(|code| flag_url(&self.flag_template, code))
        {
            inner.render_image(Slot::FlagImage, &url);
        }
        inner.render_value(Slot::Isp, isp_text(geo));
        inner.render_value(Slot::City, &city_text(geo));
        inner
            .renderer
            .set_status(classify_exposure(geo.org.as_deref()));
    }

    /// Reports a cycle that could not produce a geolocation.
    ///
    /// Without an organization string the exposure classifier falls back to
    /// "exposed", so the status line never stays on "detecting".
    fn fail(
        &self,
        token: &CancellationToken,
        result: LookupResult,
        failure: RefreshFailure,
    ) -> RefreshOutcome {
        let rendered = self.commit(token, |inner| {
            inner.renderer.set_status(classify_exposure(None));
            inner.record_result(&result);
            inner.renderer.notify(NETWORK_ERROR_MESSAGE);
        });
        if !rendered {
            return RefreshOutcome::Cancelled;
        }
        warn!("Refresh failed: {}", failure);
        RefreshOutcome::Failed { result, failure }
    }
}
