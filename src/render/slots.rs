//! Render slot names.

use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Named UI locations the controller writes into.
///
/// The string forms are stable: they are the ids used by page templates and
/// by the `--copy` CLI option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, AsRefStr)]
pub enum Slot {
    #[strum(serialize = "v4-address")]
    V4Address,
    #[strum(serialize = "v6-address")]
    V6Address,
    #[strum(serialize = "country")]
    Country,
    #[strum(serialize = "flag-image")]
    FlagImage,
    #[strum(serialize = "isp")]
    Isp,
    #[strum(serialize = "city")]
    City,
    #[strum(serialize = "debug-json")]
    DebugJson,
}

impl Slot {
    /// Slots that show a loading placeholder while a refresh is running.
    /// The debug dump has no placeholder; its visibility follows the debug toggle.
    pub const VALUE_SLOTS: [Slot; 6] = [
        Slot::V4Address,
        Slot::V6Address,
        Slot::Country,
        Slot::FlagImage,
        Slot::Isp,
        Slot::City,
    ];

    /// Slots filled from the geolocation lookup.
    pub const GEO_SLOTS: [Slot; 4] = [Slot::Country, Slot::FlagImage, Slot::Isp, Slot::City];

    /// Human-readable row label
    pub fn label(&self) -> &'static str {
        match self {
            Slot::V4Address => "IPv4",
            Slot::V6Address => "IPv6",
            Slot::Country => "Country",
            Slot::FlagImage => "Flag",
            Slot::Isp => "ISP",
            Slot::City => "City",
            Slot::DebugJson => "Debug",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_slot_names_round_trip() {
        for slot in Slot::iter() {
            assert_eq!(Slot::from_str(slot.as_ref()).unwrap(), slot);
        }
    }

    #[test]
    fn test_slot_stable_names() {
        assert_eq!(Slot::V4Address.to_string(), "v4-address");
        assert_eq!(Slot::V6Address.to_string(), "v6-address");
        assert_eq!(Slot::FlagImage.to_string(), "flag-image");
        assert_eq!(Slot::DebugJson.to_string(), "debug-json");
    }

    #[test]
    fn test_value_slots_exclude_debug() {
        assert!(!Slot::VALUE_SLOTS.contains(&Slot::DebugJson));
        assert_eq!(Slot::VALUE_SLOTS.len(), Slot::iter().count() - 1);
    }
}
