//! Error categorization and retry strategy.
//!
//! This module provides functions to categorize lookup errors and configure
//! retry strategies.

use std::time::Duration;
use tokio_retry::strategy::ExponentialBackoff;

use super::stats::LookupStats;
use super::types::{ErrorType, LookupError};
use crate::config::{
    HTTP_STATUS_TOO_MANY_REQUESTS, RETRY_FACTOR, RETRY_INITIAL_DELAY_MS, RETRY_MAX_DELAY_SECS,
};

/// Creates an exponential backoff retry strategy.
///
/// Returns a retry strategy configured with:
/// - Initial delay: `RETRY_INITIAL_DELAY_MS` milliseconds
/// - Backoff factor: `RETRY_FACTOR` (doubles delay each retry)
/// - Maximum delay: `RETRY_MAX_DELAY_SECS` seconds
/// - At most `retries` delays, i.e. `retries + 1` attempts in total
pub fn get_retry_strategy(retries: usize) -> impl Iterator<Item = Duration> {
    // tokio-retry yields factor * base^n, so base is the growth rate
    ExponentialBackoff::from_millis(RETRY_FACTOR)
        .factor(RETRY_INITIAL_DELAY_MS / RETRY_FACTOR)
        .max_delay(Duration::from_secs(RETRY_MAX_DELAY_SECS))
        .take(retries)
}

/// Categorizes a `reqwest::Error` into an `ErrorType`.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> ErrorType {
    if let Some(status) = error.status() {
        return categorize_status(status.as_u16());
    }

    if error.is_builder() {
        ErrorType::HttpRequestBuilderError
    } else if error.is_timeout() {
        ErrorType::HttpRequestTimeoutError
    } else if error.is_connect() {
        ErrorType::HttpRequestConnectError
    } else if error.is_request() {
        ErrorType::HttpRequestRequestError
    } else if error.is_body() {
        ErrorType::HttpRequestBodyError
    } else if error.is_decode() {
        ErrorType::HttpRequestDecodeError
    } else {
        ErrorType::HttpRequestOtherError
    }
}

fn categorize_status(status: u16) -> ErrorType {
    match status {
        HTTP_STATUS_TOO_MANY_REQUESTS => ErrorType::HttpRequestTooManyRequests,
        400..=499 => ErrorType::HttpRequestClientError,
        500..=599 => ErrorType::HttpRequestServerError,
        _ => ErrorType::HttpRequestOtherError,
    }
}

/// Categorizes a [`LookupError`].
///
/// Returns `None` for cancellations, which are not counted as failures.
pub fn categorize_lookup_error(error: &LookupError) -> Option<ErrorType> {
    match error {
        LookupError::Cancelled { .. } => None,
        LookupError::Http { source, .. } => Some(categorize_reqwest_error(source)),
        LookupError::Status { status, .. } => Some(categorize_status(*status)),
        LookupError::Decode { .. } => Some(ErrorType::ResponseDecodeError),
        LookupError::EmptyAddress { .. } => Some(ErrorType::EmptyAddressError),
        LookupError::UnexpectedAddress { .. } => Some(ErrorType::UnexpectedAddressError),
        LookupError::Service { .. } => Some(ErrorType::GeoServiceError),
    }
}

/// Determines if a lookup error is transient and worth retrying.
///
/// Timeouts, connection failures, 429 and 5xx are retried. Cancellation,
/// 4xx, malformed payloads and service refusals are not.
pub fn is_retriable(error: &LookupError) -> bool {
    match error {
        LookupError::Http { source, .. } => {
            if let Some(status) = source.status() {
                return is_retriable_status(status.as_u16());
            }
            source.is_timeout() || source.is_connect() || source.is_request()
        }
        LookupError::Status { status, .. } => is_retriable_status(*status),
        LookupError::Cancelled { .. }
        | LookupError::Decode { .. }
        | LookupError::EmptyAddress { .. }
        | LookupError::UnexpectedAddress { .. }
        | LookupError::Service { .. } => false,
    }
}

fn is_retriable_status(status: u16) -> bool {
    status == HTTP_STATUS_TOO_MANY_REQUESTS || (500..600).contains(&status)
}

/// Records a lookup failure in the statistics. Cancellations are ignored.
pub fn update_error_stats(stats: &LookupStats, error: &LookupError) {
    if let Some(error_type) = categorize_lookup_error(error) {
        stats.increment_error(error_type);
    }
}
