//! HTTP client initialization.
//!
//! This module provides functions to initialize the HTTP client and the
//! lookup service built on it.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::Config;
use crate::error_handling::InitializationError;
use crate::lookup::{Endpoints, HttpLookupService};

/// Initializes the HTTP client.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from the configuration
/// - Per-request timeout from the configuration
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, InitializationError> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}

/// Builds the HTTP lookup service for the configured endpoints.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_lookup_service(config: &Config) -> Result<HttpLookupService, InitializationError> {
    let client = init_client(config)?;
    Ok(HttpLookupService::new(
        client,
        Endpoints::from_config(config),
        config.retries,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_lookup_service_uses_configured_endpoints() {
        let config = Config {
            ipv4_endpoint: "http://127.0.0.1:8080/v4".to_string(),
            ..Default::default()
        };
        let service = init_lookup_service(&config).unwrap();
        assert_eq!(service.endpoints().ipv4, "http://127.0.0.1:8080/v4");
        assert_eq!(service.endpoints().geo_template, config.geo_endpoint);
    }
}
