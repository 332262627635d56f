//! Fetch-and-render controller.
//!
//! A [`Controller`] owns the widget state and the render port and runs refresh
//! cycles against a [`LookupService`]:
//!
//! 1. IPv4 and IPv6 lookups run concurrently; either may fail on its own and
//!    degrades to a placeholder.
//! 2. A successful IPv4 lookup keys the geolocation lookup.
//! 3. Geolocation feeds the country, flag, ISP and city slots and the
//!    exposure status.
//!
//! At most one cycle runs at a time. [`Controller::refresh`] is a no-op while a
//! cycle is in flight, [`Controller::restart`] supersedes it. A superseded
//! cycle is cancelled through its token and can no longer write to the render
//! port: every render commit checks the token while holding the same lock that
//! cancellation takes.

mod outcome;
mod refresh;
mod state;
mod view;


use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, warn};
use tokio_util::sync::CancellationToken;

use crate::clipboard::Clipboard;
use crate::config::{COPIED_MESSAGE, LOADING_PLACEHOLDER};
use crate::error_handling::{ClipboardError, InfoType, LookupStats};
use crate::lookup::{LookupResult, LookupService};
use crate::render::{RenderPort, Slot};

pub use outcome::{RefreshFailure, RefreshOutcome};
pub use state::UiState;
pub use view::{city_text, country_text, flag_url, isp_text};

use state::Inner;

/// Runs refresh cycles and renders their results.
pub struct Controller<S, R> {
    service: S,
    inner: Mutex<Inner<R>>,
    flag_template: String,
    stats: Arc<LookupStats>,
}

impl<S: LookupService, R: RenderPort> Controller<S, R> {
    /// Creates a controller. `flag_template` must contain `{code}`.
    pub fn new(service: S, renderer: R, flag_template: impl Into<String>) -> Self {
        Controller {
            service,
            inner: Mutex::new(Inner::new(renderer)),
            flag_template: flag_template.into(),
            stats: Arc::new(LookupStats::new()),
        }
    }

    /// Shares `stats` with the caller instead of keeping private counters.
    pub fn with_stats(mut self, stats: Arc<LookupStats>) -> Self {
        self.stats = stats;
        self
    }

    pub fn stats(&self) -> &LookupStats {
        &self.stats
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Runs one refresh cycle unless one is already in flight.
    ///
    /// Never fails: lookup problems are rendered (placeholders, a
    /// notification) and reported in the returned outcome.
    pub async fn refresh(&self) -> RefreshOutcome {
        self.start(false).await
    }

    /// Cancels the in-flight cycle, if any, and runs a new one.
    ///
    /// Results of the cancelled cycle that arrive later are discarded.
    pub async fn restart(&self) -> RefreshOutcome {
        self.start(true).await
    }

    /// Cancels the in-flight cycle without starting another.
    ///
    /// Returns whether a cycle was in flight. The cancelled cycle still runs
    /// its terminal step and clears the loading state.
    pub fn cancel(&self) -> bool {
        let inner = self.lock();
        match &inner.state.active_request {
            Some(token) => {
                debug!("Cancelling refresh cycle {}", inner.state.generation);
                token.cancel();
                true
            }
            None => false,
        }
    }

    /// Shows or hides the raw JSON of the last result. Returns the new
    /// visibility.
    pub fn toggle_debug_view(&self) -> bool {
        let mut inner = self.lock();
        let visible = !inner.state.debug_visible;
        inner.state.debug_visible = visible;
        inner.renderer.set_visible(Slot::DebugJson, visible);
        visible
    }

    /// Copies the text currently shown by `slot` to `clipboard`.
    ///
    /// Nothing is copied, and `Ok(false)` returned, while the slot is empty or
    /// still shows the loading placeholder. A successful copy is confirmed
    /// with a notification.
    ///
    /// # Errors
    ///
    /// Propagates the clipboard's error; no notification is shown then.
    pub fn copy_field_to_clipboard<C: Clipboard + ?Sized>(
        &self,
        slot: Slot,
        clipboard: &mut C,
    ) -> Result<bool, ClipboardError> {
        let text = self.lock().renderer.text(slot);
        let Some(text) = text.filter(|t| !t.is_empty() && !t.contains(LOADING_PLACEHOLDER)) else {
            debug!("Nothing to copy from {}", slot);
            return Ok(false);
        };

        if let Err(e) = clipboard.set_text(&text) {
            warn!("Copying {} failed: {}", slot, e);
            return Err(e);
        }
        self.lock().renderer.notify(COPIED_MESSAGE);
        Ok(true)
    }

    pub fn is_loading(&self) -> bool {
        self.lock().state.is_loading
    }

    /// Result of the last cycle that got as far as rendering.
    pub fn last_result(&self) -> Option<LookupResult> {
        self.lock().state.last_result.clone()
    }

    /// Id of the newest cycle (0 before the first refresh).
    pub fn generation(&self) -> u64 {
        self.lock().state.generation
    }

    /// Gives read access to the render port, e.g. to draw it.
    pub fn with_renderer<T>(&self, f: impl FnOnce(&R) -> T) -> T {
        f(&self.lock().renderer)
    }

    async fn start(&self, supersede: bool) -> RefreshOutcome {
        let Some((token, generation)) = self.begin_cycle(supersede) else {
            debug!("Refresh already in flight, ignoring trigger");
            self.stats.increment_info(InfoType::RefreshSkipped);
            return RefreshOutcome::Skipped;
        };

        let _guard = CycleGuard {
            controller: self,
            generation,
        };
        let outcome = self.run_cycle(&token).await;
        outcome.record(&self.stats);
        outcome
    }

    /// Cancels the previous cycle, issues a new token and enters the loading
    /// state. Returns `None` when a cycle is in flight and `supersede` is off.
    fn begin_cycle(&self, supersede: bool) -> Option<(CancellationToken, u64)> {
        let mut inner = self.lock();
        if inner.state.is_loading && !supersede {
            return None;
        }
        if let Some(previous) = inner.state.active_request.take() {
            previous.cancel();
        }

        let token = CancellationToken::new();
        inner.state.generation += 1;
        inner.state.active_request = Some(token.clone());
        inner.set_loading(true);
        debug!("Starting refresh cycle {}", inner.state.generation);
        Some((token, inner.state.generation))
    }

    /// Terminal step of a cycle. A superseded cycle leaves the state alone.
    fn finish_cycle(&self, generation: u64) {
        let mut inner = self.lock();
        if inner.state.generation != generation {
            return;
        }
        inner.state.active_request = None;
        inner.set_loading(false);
        debug!("Finished refresh cycle {}", generation);
    }

    /// Applies `render` unless `token` has been cancelled. Returns whether it
    /// was applied.
    fn commit(&self, token: &CancellationToken, render: impl FnOnce(&mut Inner<R>)) -> bool {
        let mut inner = self.lock();
        if token.is_cancelled() {
            return false;
        }
        render(&mut inner);
        true
    }

    fn lock(&self) -> MutexGuard<'_, Inner<R>> {
        // Render ports are not expected to panic; keep serving if one did
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Runs the terminal step of a cycle on every exit path, including the
/// refresh future being dropped mid-flight.
struct CycleGuard<'a, S: LookupService, R: RenderPort> {
    controller: &'a Controller<S, R>,
    generation: u64,
}

impl<S: LookupService, R: RenderPort> Drop for CycleGuard<'_, S, R> {
    fn drop(&mut self) {
        self.controller.finish_cycle(self.generation);
    }
}
