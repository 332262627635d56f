//! Public address and geolocation lookups.
//!
//! The controller only sees the [`LookupService`] trait; [`HttpLookupService`]
//! is the reqwest implementation that talks to the real services.

mod http;
mod types;

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::error_handling::LookupError;

pub use http::{Endpoints, HttpLookupService};
pub use types::{AddressResponse, Endpoint, GeoInfo, GeoResponse, LookupResult};

/// Outbound lookups issued by a refresh cycle.
///
/// Every call receives the cycle's cancellation token. Once the token is
/// cancelled an implementation must resolve to [`LookupError::Cancelled`]
/// promptly and must not hand back a late result.
pub trait LookupService: Send + Sync {
    /// Public IPv4 address of this host.
    fn lookup_ipv4(
        &self,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<String, LookupError>> + Send;

    /// Public IPv6 address of this host. Fails without IPv6 connectivity.
    fn lookup_ipv6(
        &self,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<String, LookupError>> + Send;

    /// Geolocation of `address`.
    fn lookup_geo(
        &self,
        address: &str,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<GeoInfo, LookupError>> + Send;
}
