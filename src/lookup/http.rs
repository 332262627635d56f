//! reqwest-backed lookup service.

use std::net::IpAddr;
use std::sync::Arc;

use log::debug;
use serde::de::DeserializeOwned;
use tokio_retry::RetryIf;
use tokio_util::sync::CancellationToken;

use super::types::{AddressResponse, Endpoint, GeoInfo, GeoResponse};
use super::LookupService;
use crate::config::{Config, GEO_ADDRESS_MARKER};
use crate::error_handling::{get_retry_strategy, is_retriable, LookupError};

/// Endpoint URLs used by [`HttpLookupService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub ipv4: String,
    pub ipv6: String,
    /// Geolocation URL template containing `{ip}`
    pub geo_template: String,
}

impl Endpoints {
    pub fn from_config(config: &Config) -> Self {
        Endpoints {
            ipv4: config.ipv4_endpoint.clone(),
            ipv6: config.ipv6_endpoint.clone(),
            geo_template: config.geo_endpoint.clone(),
        }
    }

    /// Geolocation URL for `address`.
    pub fn geo_url(&self, address: &str) -> String {
        self.geo_template.replace(GEO_ADDRESS_MARKER, address)
    }
}

/// Looks up addresses and geolocation over HTTP(S).
///
/// Non-2xx answers are failures. Transient failures are retried up to
/// `retries` times with exponential backoff; the whole retry sequence races
/// the cycle's cancellation token.
pub struct HttpLookupService {
    client: Arc<reqwest::Client>,
    endpoints: Endpoints,
    retries: usize,
}

impl HttpLookupService {
    pub fn new(client: Arc<reqwest::Client>, endpoints: Endpoints, retries: usize) -> Self {
        HttpLookupService {
            client,
            endpoints,
            retries,
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<T, LookupError> {
        if cancel.is_cancelled() {
            return Err(LookupError::Cancelled { endpoint });
        }

        let attempts = RetryIf::spawn(
            get_retry_strategy(self.retries),
            || self.fetch_once::<T>(endpoint, url),
            |error: &LookupError| {
                let retry = is_retriable(error);
                if retry {
                    debug!("Retrying {} lookup after: {}", endpoint, error);
                }
                retry
            },
        );

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("{} lookup cancelled", endpoint);
                Err(LookupError::Cancelled { endpoint })
            }
            result = attempts => result,
        }
    }

    async fn fetch_once<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        url: &str,
    ) -> Result<T, LookupError> {
        debug!("GET {} ({})", url, endpoint);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| LookupError::Http { endpoint, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| LookupError::Http { endpoint, source })?;
        serde_json::from_slice(&body).map_err(|source| LookupError::Decode { endpoint, source })
    }

    async fn lookup_address(
        &self,
        endpoint: Endpoint,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<String, LookupError> {
        let response: AddressResponse = self.fetch_json(endpoint, url, cancel).await?;
        let address = response
            .ip
            .map(|ip| ip.trim().to_string())
            .filter(|ip| !ip.is_empty())
            .ok_or(LookupError::EmptyAddress { endpoint })?;
        check_family(endpoint, address)
    }
}

/// Accepts `address` only if it parses as the family `endpoint` is for.
fn check_family(endpoint: Endpoint, address: String) -> Result<String, LookupError> {
    let matches = match address.parse::<IpAddr>() {
        Ok(IpAddr::V4(_)) => endpoint == Endpoint::Ipv4,
        Ok(IpAddr::V6(_)) => endpoint == Endpoint::Ipv6,
        Err(_) => false,
    };
    if matches {
        Ok(address)
    } else {
        Err(LookupError::UnexpectedAddress { endpoint, address })
    }
}

impl LookupService for HttpLookupService {
    async fn lookup_ipv4(&self, cancel: &CancellationToken) -> Result<String, LookupError> {
        self.lookup_address(Endpoint::Ipv4, &self.endpoints.ipv4, cancel)
            .await
    }

    async fn lookup_ipv6(&self, cancel: &CancellationToken) -> Result<String, LookupError> {
        self.lookup_address(Endpoint::Ipv6, &self.endpoints.ipv6, cancel)
            .await
    }

    async fn lookup_geo(
        &self,
        address: &str,
        cancel: &CancellationToken,
    ) -> Result<GeoInfo, LookupError> {
        let url = self.endpoints.geo_url(address);
        let response: GeoResponse = self.fetch_json(Endpoint::Geo, &url, cancel).await?;
        if response.error {
            return Err(LookupError::Service {
                reason: response
                    .reason
                    .unwrap_or_else(|| "no reason given".to_string()),
            });
        }
        Ok(response.info.normalized())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_url_substitutes_address() {
        let endpoints = Endpoints::from_config(&Config::default());
        assert_eq!(
            endpoints.geo_url("203.0.113.7"),
            "https://ipapi.co/203.0.113.7/json/"
        );
    }

    #[test]
    fn test_check_family() {
        assert!(check_family(Endpoint::Ipv4, "203.0.113.7".to_string()).is_ok());
        assert!(check_family(Endpoint::Ipv6, "2001:db8::1".to_string()).is_ok());
        assert!(matches!(
            check_family(Endpoint::Ipv6, "203.0.113.7".to_string()),
            Err(LookupError::UnexpectedAddress {
                endpoint: Endpoint::Ipv6,
                ..
            })
        ));
        assert!(check_family(Endpoint::Ipv4, "not-an-ip".to_string()).is_err());
    }

    #[tokio::test]
    async fn test_pre_cancelled_token_skips_request() {
        let endpoints = Endpoints {
            // Nothing listens here; a request would fail with a connect error
            ipv4: "http://127.0.0.1:9/ip".to_string(),
            ipv6: "http://127.0.0.1:9/ip".to_string(),
            geo_template: "http://127.0.0.1:9/{ip}".to_string(),
        };
        let service = HttpLookupService::new(Arc::new(reqwest::Client::new()), endpoints, 0);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = service.lookup_ipv4(&cancel).await.unwrap_err();
        assert!(err.is_cancelled());
        let err = service.lookup_geo("203.0.113.7", &cancel).await.unwrap_err();
        assert!(matches!(err, LookupError::Cancelled { endpoint: Endpoint::Geo }));
    }
}
