//! Render port and its terminal implementation.
//!
//! The controller never touches a concrete UI. It drives a [`RenderPort`],
//! which exposes the handful of slot operations a page template (or the
//! terminal panel shipped here) has to provide.

mod slots;
mod terminal;

pub use slots::Slot;
pub use terminal::{SlotState, TerminalPanel, MAX_NOTIFICATIONS};

use crate::security::ConnectionStatus;

/// Slot operations the controller renders through.
pub trait RenderPort: Send {
    /// Replaces the text of a slot.
    fn set_text(&mut self, slot: Slot, text: &str);

    /// Points an image slot at `url`.
    fn set_image_source(&mut self, slot: Slot, url: &str);

    /// Text currently displayed by a slot: the loading placeholder while it
    /// is shown, otherwise the slot's value. `None` when nothing is displayed.
    fn text(&self, slot: Slot) -> Option<String>;

    /// Shows or hides the value of a slot.
    fn set_visible(&mut self, slot: Slot, visible: bool);

    /// Shows or hides the loading placeholder of a slot.
    fn set_placeholder_visible(&mut self, slot: Slot, visible: bool);

    /// Enables or disables the refresh trigger.
    fn set_trigger_enabled(&mut self, enabled: bool);

    /// Updates the connection status line.
    fn set_status(&mut self, status: ConnectionStatus);

    /// Shows a transient notification.
    fn notify(&mut self, message: &str);
}
