//! Widget state owned by the controller.

use log::error;
use tokio_util::sync::CancellationToken;

use crate::lookup::LookupResult;
use crate::render::{RenderPort, Slot};
use crate::security::ConnectionStatus;

/// Per-controller UI state.
#[derive(Debug, Default)]
pub struct UiState {
    /// True strictly between the start of a cycle and its terminal step
    pub is_loading: bool,
    /// Token of the in-flight cycle
    pub active_request: Option<CancellationToken>,
    /// Id of the newest cycle; only that cycle may clear the loading state
    pub generation: u64,
    pub debug_visible: bool,
    pub last_result: Option<LookupResult>,
}

/// State and render port, guarded together so that cancelling a cycle and
/// committing a render can never interleave.
pub(super) struct Inner<R> {
    pub(super) state: UiState,
    pub(super) renderer: R,
}

impl<R: RenderPort> Inner<R> {
    pub(super) fn new(renderer: R) -> Self {
        Inner {
            state: UiState::default(),
            renderer,
        }
    }

    /// Enters or leaves the loading state.
    ///
    /// Entering disables the trigger, shows every placeholder and hides the
    /// previous values. Leaving re-enables the trigger and hides the
    /// placeholders; values stay hidden unless the cycle rendered them.
    pub(super) fn set_loading(&mut self, loading: bool) {
        self.state.is_loading = loading;
        self.renderer.set_trigger_enabled(!loading);
        for slot in Slot::VALUE_SLOTS {
            self.renderer.set_placeholder_visible(slot, loading);
            if loading {
                self.renderer.set_visible(slot, false);
            }
        }
        if loading {
            self.renderer.set_status(ConnectionStatus::Detecting);
        }
    }

    /// Writes a text value and reveals it in place of its placeholder.
    pub(super) fn render_value(&mut self, slot: Slot, text: &str) {
        self.renderer.set_placeholder_visible(slot, false);
        self.renderer.set_text(slot, text);
        self.renderer.set_visible(slot, true);
    }

    /// Reveals an image slot pointing at `url`.
    pub(super) fn render_image(&mut self, slot: Slot, url: &str) {
        self.renderer.set_placeholder_visible(slot, false);
        self.renderer.set_image_source(slot, url);
        self.renderer.set_visible(slot, true);
    }

    /// Keeps `result` for the debug view and refreshes the JSON dump.
    pub(super) fn record_result(&mut self, result: &LookupResult) {
        match serde_json::to_string_pretty(result) {
            Ok(json) => self.renderer.set_text(Slot::DebugJson, &json),
            Err(e) => error!("Failed to serialize lookup result: {}", e),
        }
        self.state.last_result = Some(result.clone());
    }
}
