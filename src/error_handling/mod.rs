//! Error handling and lookup statistics.
//!
//! This module provides:
//! - Error type definitions and categorization
//! - Lookup statistics tracking (errors and refresh outcomes)
//! - Retry strategy configuration

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{
    categorize_lookup_error, categorize_reqwest_error, get_retry_strategy, is_retriable,
    update_error_stats,
};
pub use stats::LookupStats;
pub use types::{
    ClipboardError, ConfigError, ErrorType, InfoType, InitializationError, LookupError,
};
