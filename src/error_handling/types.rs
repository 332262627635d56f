//! Error type definitions.
//!
//! This module defines the error and info types used throughout the application.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

use crate::lookup::Endpoint;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Invalid configuration values.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("--{option} '{value}' is not a valid endpoint: {reason}")]
    InvalidEndpoint {
        option: &'static str,
        value: String,
        reason: String,
    },

    #[error("--{option} must contain the '{marker}' placeholder")]
    MissingMarker {
        option: &'static str,
        marker: &'static str,
    },

    #[error("--timeout-seconds must be greater than zero")]
    ZeroTimeout,

    #[error("--watch interval must be greater than zero")]
    ZeroWatchInterval,
}

/// Failure of a single lookup.
///
/// `Cancelled` is not a failure from the user's point of view: it means a
/// newer refresh cycle superseded the one that issued the request.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("{endpoint} lookup cancelled")]
    Cancelled { endpoint: Endpoint },

    #[error("{endpoint} request failed: {source}")]
    Http {
        endpoint: Endpoint,
        #[source]
        source: ReqwestError,
    },

    #[error("{endpoint} answered HTTP {status}")]
    Status { endpoint: Endpoint, status: u16 },

    #[error("{endpoint} answered with an unreadable body: {source}")]
    Decode {
        endpoint: Endpoint,
        #[source]
        source: serde_json::Error,
    },

    #[error("{endpoint} answered without an address")]
    EmptyAddress { endpoint: Endpoint },

    /// The address is not of the family the endpoint is for. The dual-stack
    /// echo service answers with the IPv4 address on hosts without IPv6.
    #[error("{endpoint} answered with '{address}', which is not an {endpoint} address")]
    UnexpectedAddress { endpoint: Endpoint, address: String },

    /// The geolocation service answered 200 with an error document
    /// (ipapi.co does this for rate limiting and reserved ranges).
    #[error("geolocation service refused the lookup: {reason}")]
    Service { reason: String },
}

impl LookupError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, LookupError::Cancelled { .. })
    }

    /// Which endpoint produced the error.
    pub fn endpoint(&self) -> Endpoint {
        match self {
            LookupError::Cancelled { endpoint }
            | LookupError::Http { endpoint, .. }
            | LookupError::Status { endpoint, .. }
            | LookupError::Decode { endpoint, .. }
            | LookupError::EmptyAddress { endpoint }
            | LookupError::UnexpectedAddress { endpoint, .. } => *endpoint,
            LookupError::Service { .. } => Endpoint::Geo,
        }
    }
}

/// Error types for clipboard access.
#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("failed to write to clipboard: {0}")]
    Write(String),
}

/// Categories of lookup failures, used for statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    // HTTP/Network errors
    HttpRequestBuilderError,
    HttpRequestTimeoutError,
    HttpRequestConnectError,
    HttpRequestRequestError,
    HttpRequestBodyError,
    HttpRequestDecodeError,
    HttpRequestOtherError,
    HttpRequestTooManyRequests,
    HttpRequestClientError, // 4xx other than 429
    HttpRequestServerError, // 5xx
    // Payload errors
    ResponseDecodeError,
    EmptyAddressError,
    UnexpectedAddressError,
    GeoServiceError,
}

/// Notable refresh events that are not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    RefreshCompleted,
    RefreshFailed,
    RefreshCancelled,
    RefreshSkipped,
    Ipv6NotDetected,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::HttpRequestBuilderError => "HTTP request builder error",
            ErrorType::HttpRequestTimeoutError => "HTTP request timeout error",
            ErrorType::HttpRequestConnectError => "HTTP request connect error",
            ErrorType::HttpRequestRequestError => "HTTP request error",
            ErrorType::HttpRequestBodyError => "HTTP request body error",
            ErrorType::HttpRequestDecodeError => "HTTP request decode error",
            ErrorType::HttpRequestOtherError => "HTTP request other error",
            ErrorType::HttpRequestTooManyRequests => "Too many requests (429)",
            ErrorType::HttpRequestClientError => "Client error (4xx)",
            ErrorType::HttpRequestServerError => "Server error (5xx)",
            ErrorType::ResponseDecodeError => "Response decode error",
            ErrorType::EmptyAddressError => "Empty address",
            ErrorType::UnexpectedAddressError => "Wrong address family",
            ErrorType::GeoServiceError => "Geolocation service error",
        }
    }
}

impl InfoType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::RefreshCompleted => "Refresh completed",
            InfoType::RefreshFailed => "Refresh failed",
            InfoType::RefreshCancelled => "Refresh cancelled",
            InfoType::RefreshSkipped => "Refresh skipped (already running)",
            InfoType::Ipv6NotDetected => "IPv6 not detected",
        }
    }
}
