//! Terminal front end: drives a [`Controller`] with a [`TerminalPanel`].

mod shutdown;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{info, warn};
use tokio::time::{interval, MissedTickBehavior};

use crate::config::Config;
use crate::controller::{Controller, RefreshOutcome};
use crate::error_handling::LookupStats;
use crate::initialization::init_lookup_service;
use crate::lookup::LookupService;
use crate::render::{RenderPort, Slot, TerminalPanel};

pub use shutdown::interrupted;

/// Summary of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Refresh cycles that ran to their terminal step
    pub cycles: usize,
    /// Cycles that ended with a "Network error" notification
    pub failed: usize,
    /// Cycles cut short by Ctrl-C
    pub cancelled: usize,
    /// Whether the most recent cycle failed
    pub last_failed: bool,
}

impl RunReport {
    fn record(&mut self, outcome: &RefreshOutcome) {
        match outcome {
            RefreshOutcome::Skipped => return,
            RefreshOutcome::Cancelled => self.cancelled += 1,
            RefreshOutcome::Failed { .. } => self.failed += 1,
            RefreshOutcome::Completed(_) => {}
        }
        self.cycles += 1;
        self.last_failed = outcome.is_failure();
    }
}

/// Runs the panel with the given configuration.
///
/// Performs one refresh, or with `watch` set one every interval until Ctrl-C,
/// drawing the panel to stdout after each cycle. Afterwards copies the
/// requested field to the clipboard, if any.
///
/// # Errors
///
/// Fails on invalid configuration or if the HTTP client cannot be built.
/// Lookup failures are not errors; they are rendered and counted in the
/// returned [`RunReport`].
pub async fn run(config: Config) -> Result<RunReport> {
    config.validate().context("Invalid configuration")?;
    let service = init_lookup_service(&config).context("Failed to initialize HTTP client")?;

    let stats = Arc::new(LookupStats::new());
    let controller = Controller::new(service, TerminalPanel::new(), config.flag_template.clone())
        .with_stats(Arc::clone(&stats));
    if config.debug {
        controller.toggle_debug_view();
    }

    let report = match config.watch {
        Some(seconds) => watch(&controller, Duration::from_secs(seconds)).await,
        None => once(&controller).await,
    };

    if let Some(slot) = config.copy {
        copy_to_system_clipboard(&controller, slot);
    }
    if config.watch.is_some() {
        stats.log_summary();
    }
    Ok(report)
}

async fn once<S: LookupService>(controller: &Controller<S, TerminalPanel>) -> RunReport {
    let mut report = RunReport::default();
    let stop = interrupted();
    tokio::pin!(stop);

    let (outcome, stopped) = refresh_until(controller, &mut stop).await;
    report.record(&outcome);
    if stopped {
        info!("Interrupted");
    } else {
        draw(controller);
    }
    report
}

async fn watch<S: LookupService>(
    controller: &Controller<S, TerminalPanel>,
    period: Duration,
) -> RunReport {
    let mut report = RunReport::default();
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let stop = interrupted();
    tokio::pin!(stop);

    loop {
        tokio::select! {
            biased;
            _ = &mut stop => {
                info!("Interrupted, stopping watch");
                break;
            }
            _ = ticker.tick() => {}
        }

        let (outcome, stopped) = refresh_until(controller, &mut stop).await;
        report.record(&outcome);
        if stopped {
            info!("Interrupted, stopping watch");
            break;
        }
        println!("{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
        draw(controller);
    }
    report
}

/// Runs one refresh. If `stop` fires first the cycle is cancelled and still
/// awaited, so it ends through its terminal step. The flag reports whether
/// `stop` fired; it must not be polled again afterwards.
async fn refresh_until<S, F>(
    controller: &Controller<S, TerminalPanel>,
    stop: &mut Pin<&mut F>,
) -> (RefreshOutcome, bool)
where
    S: LookupService,
    F: Future<Output = ()>,
{
    let cycle = controller.refresh();
    tokio::pin!(cycle);
    tokio::select! {
        biased;
        outcome = &mut cycle => (outcome, false),
        _ = stop.as_mut() => {
            controller.cancel();
            (cycle.await, true)
        }
    }
}

fn draw<S: LookupService>(controller: &Controller<S, TerminalPanel>) {
    controller.with_renderer(|panel| print!("{}", panel.draw()));
}

#[cfg(feature = "system-clipboard")]
fn copy_to_system_clipboard<S: LookupService, R: RenderPort>(
    controller: &Controller<S, R>,
    slot: Slot,
) {
    let mut clipboard = match crate::clipboard::SystemClipboard::open() {
        Ok(clipboard) => clipboard,
        Err(e) => {
            warn!("Cannot copy {}: {}", slot, e);
            return;
        }
    };
    match controller.copy_field_to_clipboard(slot, &mut clipboard) {
        Ok(true) => {}
        Ok(false) => warn!("Nothing to copy from {}", slot),
        Err(e) => warn!("Cannot copy {}: {}", slot, e),
    }
}

#[cfg(not(feature = "system-clipboard"))]
fn copy_to_system_clipboard<S: LookupService, R: RenderPort>(
    _controller: &Controller<S, R>,
    slot: Slot,
) {
    warn!(
        "Cannot copy {}: built without the system-clipboard feature",
        slot
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::RefreshFailure;
    use crate::lookup::LookupResult;

    #[test]
    fn test_run_report_counts_outcomes() {
        let mut report = RunReport::default();
        report.record(&RefreshOutcome::Completed(LookupResult::default()));
        report.record(&RefreshOutcome::Skipped);
        report.record(&RefreshOutcome::Failed {
            result: LookupResult::default(),
            failure: RefreshFailure::Ipv4Unavailable,
        });
        assert_eq!(report.cycles, 2);
        assert_eq!(report.failed, 1);
        assert!(report.last_failed);

        report.record(&RefreshOutcome::Cancelled);
        assert_eq!(report.cancelled, 1);
        assert!(!report.last_failed);
    }

    #[tokio::test]
    async fn test_run_rejects_invalid_config() {
        let config = Config {
            geo_endpoint: "https://ipapi.co/json/".to_string(),
            ..Default::default()
        };
        let err = run(config).await.unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid configuration"));
    }
}
