//! In-memory panel drawn to the terminal.

use std::collections::HashMap;
use std::fmt::Write as _;

use colored::*;
use strum::IntoEnumIterator;

use super::{RenderPort, Slot};
use crate::config::LOADING_PLACEHOLDER;
use crate::security::ConnectionStatus;

/// State of one slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotState {
    pub text: Option<String>,
    pub image_source: Option<String>,
    pub visible: bool,
    pub placeholder_visible: bool,
}

/// Notifications kept by a panel; older ones are dropped.
pub const MAX_NOTIFICATIONS: usize = 16;

static EMPTY_SLOT: SlotState = SlotState {
    text: None,
    image_source: None,
    visible: false,
    placeholder_visible: false,
};

/// Render port that keeps slot state in memory and draws it as a text panel.
///
/// Notifications are echoed to stderr as they arrive (unless created with
/// [`TerminalPanel::quiet`]) and the most recent [`MAX_NOTIFICATIONS`] are
/// kept in [`TerminalPanel::notifications`].
#[derive(Debug)]
pub struct TerminalPanel {
    slots: HashMap<Slot, SlotState>,
    trigger_enabled: bool,
    status: ConnectionStatus,
    notifications: Vec<String>,
    echo: bool,
}

impl Default for TerminalPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalPanel {
    /// A fresh panel: value slots show their placeholder, debug is hidden.
    pub fn new() -> Self {
        let slots = Slot::iter()
            .map(|slot| {
                let state = SlotState {
                    placeholder_visible: slot != Slot::DebugJson,
                    ..Default::default()
                };
                (slot, state)
            })
            .collect();
        TerminalPanel {
            slots,
            trigger_enabled: true,
            status: ConnectionStatus::Detecting,
            notifications: Vec::new(),
            echo: true,
        }
    }

    /// A panel that records notifications without printing them.
    pub fn quiet() -> Self {
        TerminalPanel {
            echo: false,
            ..Self::new()
        }
    }

    pub fn slot(&self, slot: Slot) -> &SlotState {
        self.slots.get(&slot).unwrap_or(&EMPTY_SLOT)
    }

    pub fn trigger_enabled(&self) -> bool {
        self.trigger_enabled
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    pub fn notifications(&self) -> &[String] {
        &self.notifications
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut SlotState {
        self.slots.entry(slot).or_default()
    }

    /// Draws the panel.
    pub fn draw(&self) -> String {
        let status = match self.status {
            ConnectionStatus::Detecting => format!("○ {}", self.status).dimmed(),
            ConnectionStatus::Secure => format!("● {}", self.status).green().bold(),
            ConnectionStatus::Exposed => format!("● {}", self.status).red().bold(),
        };

        let mut out = String::new();
        let _ = writeln!(out, "{}", status);
        for slot in [
            Slot::V4Address,
            Slot::V6Address,
            Slot::Country,
            Slot::Isp,
            Slot::City,
        ] {
            let value = self.text(slot).unwrap_or_default();
            let value = if slot == Slot::Country {
                match self.flag_source() {
                    Some(flag) => format!("{} {}", value, format!("({})", flag).dimmed()),
                    None => value,
                }
            } else {
                value
            };
            let _ = writeln!(out, "  {:<8} {}", slot.label().cyan(), value);
        }

        let debug = self.slot(Slot::DebugJson);
        if debug.visible {
            if let Some(json) = &debug.text {
                let _ = writeln!(out, "{}", json.dimmed());
            }
        }
        out
    }

    fn flag_source(&self) -> Option<&str> {
        let flag = self.slot(Slot::FlagImage);
        if flag.visible {
            flag.image_source.as_deref()
        } else {
            None
        }
    }
}

impl RenderPort for TerminalPanel {
    fn set_text(&mut self, slot: Slot, text: &str) {
        self.slot_mut(slot).text = Some(text.to_string());
    }

    fn set_image_source(&mut self, slot: Slot, url: &str) {
        self.slot_mut(slot).image_source = Some(url.to_string());
    }

    fn text(&self, slot: Slot) -> Option<String> {
        let state = self.slot(slot);
        if state.placeholder_visible {
            Some(LOADING_PLACEHOLDER.to_string())
        } else if state.visible {
            state.text.clone()
        } else {
            None
        }
    }

    fn set_visible(&mut self, slot: Slot, visible: bool) {
        self.slot_mut(slot).visible = visible;
    }

    fn set_placeholder_visible(&mut self, slot: Slot, visible: bool) {
        self.slot_mut(slot).placeholder_visible = visible;
    }

    fn set_trigger_enabled(&mut self, enabled: bool) {
        self.trigger_enabled = enabled;
    }

    fn set_status(&mut self, status: ConnectionStatus) {
        self.status = status;
    }

    fn notify(&mut self, message: &str) {
        if self.echo {
            eprintln!("{}", message.yellow().bold());
        }
        if self.notifications.len() == MAX_NOTIFICATIONS {
            self.notifications.remove(0);
        }
        self.notifications.push(message.to_string());
    }
}
