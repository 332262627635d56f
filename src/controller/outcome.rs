//! Refresh cycle outcomes.

use thiserror::Error;

use crate::error_handling::{InfoType, LookupError, LookupStats};
use crate::lookup::LookupResult;

/// Why a cycle could not render a geolocation.
#[derive(Error, Debug)]
pub enum RefreshFailure {
    /// The IPv4 lookup failed, so there was no address to geolocate.
    #[error("IPv4 address unavailable, geolocation skipped")]
    Ipv4Unavailable,

    #[error(transparent)]
    Geo(#[from] LookupError),
}

/// How a refresh cycle ended.
#[derive(Debug)]
pub enum RefreshOutcome {
    /// Another cycle was in flight; nothing happened.
    Skipped,
    /// Everything that could be looked up was rendered.
    Completed(LookupResult),
    /// Addresses were rendered but the geolocation was not; the user was
    /// notified.
    Failed {
        result: LookupResult,
        failure: RefreshFailure,
    },
    /// A newer cycle (or [`Controller::cancel`](super::Controller::cancel))
    /// superseded this one. Nothing was reported to the user.
    Cancelled,
}

impl RefreshOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, RefreshOutcome::Failed { .. })
    }

    pub fn result(&self) -> Option<&LookupResult> {
        match self {
            RefreshOutcome::Completed(result) | RefreshOutcome::Failed { result, .. } => {
                Some(result)
            }
            RefreshOutcome::Skipped | RefreshOutcome::Cancelled => None,
        }
    }

    pub(super) fn record(&self, stats: &LookupStats) {
        let info = match self {
            RefreshOutcome::Skipped => InfoType::RefreshSkipped,
            RefreshOutcome::Completed(_) => InfoType::RefreshCompleted,
            RefreshOutcome::Failed { .. } => InfoType::RefreshFailed,
            RefreshOutcome::Cancelled => InfoType::RefreshCancelled,
        };
        stats.increment_info(info);
    }
}
