//! ip_intel library: public address, geolocation and exposure lookup
//!
//! This library looks up the public IPv4 and IPv6 addresses of the host,
//! geolocates the IPv4 address and renders the results, together with a
//! best-effort "secure / exposed" hint derived from the ISP name, into a panel
//! of named render slots.
//!
//! # Example
//!
//! ```no_run
//! use ip_intel::controller::{Controller, RefreshOutcome};
//! use ip_intel::initialization::init_lookup_service;
//! use ip_intel::render::TerminalPanel;
//! use ip_intel::Config;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let service = init_lookup_service(&config)?;
//! let controller = Controller::new(service, TerminalPanel::new(), config.flag_template);
//!
//! if let RefreshOutcome::Completed(result) = controller.refresh().await {
//!     println!("{:?}", result.ipv4);
//! }
//! controller.with_renderer(|panel| print!("{}", panel.draw()));
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

mod app;
pub mod clipboard;
pub mod config;
pub mod controller;
pub mod error_handling;
pub mod initialization;
pub mod lookup;
pub mod render;
pub mod security;

// Re-export public API
pub use app::{interrupted, run, RunReport};
pub use config::{Config, LogFormat, LogLevel};
pub use controller::{Controller, RefreshFailure, RefreshOutcome};
pub use lookup::{GeoInfo, HttpLookupService, LookupResult, LookupService};
pub use render::{RenderPort, Slot, TerminalPanel};
pub use security::{classify_exposure, ConnectionStatus};
