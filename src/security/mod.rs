//! Connection exposure classification.
//!
//! Derives a coarse "secure / exposed" hint from the ISP organization string
//! returned by the geolocation lookup.

mod exposure;
mod types;

pub use exposure::{classify_exposure, MASKING_KEYWORDS};
pub use types::ConnectionStatus;
