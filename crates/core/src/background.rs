//! Background color pairs used as the two stops of the frame's radial gradient.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::color::Srgb;

const BACKGROUND_NAMES: &[&str] = &[
    "dark", "light", "sunset", "ocean", "forest", "cosmic", "fire", "custom",
];

/// Background substituted for unknown keys.
pub const DEFAULT_BACKGROUND: &str = "dark";

/// A `(primary, secondary)` pair: gradient color at the center and at the rim.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Background {
    pub primary: Srgb,
    pub secondary: Srgb,
}

impl Background {
    fn from_hex_pair(primary: &str, secondary: &str) -> Self {
        Self {
            primary: Srgb::from_hex(primary).expect("background hex values are valid"),
            secondary: Srgb::from_hex(secondary).expect("background hex values are valid"),
        }
    }

    /// Looks up a named background. `"custom"` yields its built-in stand-in pair.
    pub fn from_name(name: &str) -> Option<Self> {
        let (primary, secondary) = match name {
            "dark" | "custom" => ("#1a1a2e", "#16213e"),
            "light" => ("#f8f9fa", "#e9ecef"),
            "sunset" | "fire" => ("#2c1810", "#4a1c1c"),
            "ocean" => ("#0a1929", "#1e3a8a"),
            "forest" => ("#1a2e1a", "#2d5016"),
            "cosmic" => ("#1a1a2e", "#2c1810"),
            _ => return None,
        };
        Some(Self::from_hex_pair(primary, secondary))
    }

    /// Returns the names of every background key, `"custom"` included.
    pub fn list_names() -> &'static [&'static str] {
        BACKGROUND_NAMES
    }

    /// Resolves a background key into concrete colors.
    ///
    /// `"custom"` uses the caller-supplied pair when one is given. Unknown
    /// keys resolve to the default background.
    pub fn resolve(key: &str, custom: Option<&Background>) -> Background {
        if key == "custom" {
            if let Some(custom) = custom {
                return *custom;
            }
        }
        Self::from_name(key).unwrap_or_else(|| {
            warn!(background = %key, fallback = DEFAULT_BACKGROUND, "unknown background");
            Self::dark()
        })
    }

    /// Navy pair used when nothing else applies.
    pub fn dark() -> Self {
        Self::from_hex_pair("#1a1a2e", "#16213e")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_name_resolves() {
        for name in Background::list_names() {
            assert!(Background::from_name(name).is_some(), "{name} missing");
        }
    }

    #[test]
    fn ocean_pair_matches_constants() {
        let bg = Background::from_name("ocean").unwrap();
        assert_eq!(bg.primary.to_hex(), "#0a1929");
        assert_eq!(bg.secondary.to_hex(), "#1e3a8a");
    }

    #[test]
    fn unknown_key_resolves_to_dark() {
        assert_eq!(Background::resolve("plaid", None), Background::dark());
    }

    #[test]
    fn custom_uses_supplied_pair() {
        let custom = Background {
            primary: Srgb::from_rgb8(10, 20, 30),
            secondary: Srgb::from_rgb8(40, 50, 60),
        };
        assert_eq!(Background::resolve("custom", Some(&custom)), custom);
    }

    #[test]
    fn custom_without_pair_uses_builtin_stand_in() {
        assert_eq!(Background::resolve("custom", None), Background::dark());
    }

    #[test]
    fn named_key_ignores_custom_pair() {
        let custom = Background {
            primary: Srgb::from_rgb8(1, 1, 1),
            secondary: Srgb::from_rgb8(2, 2, 2),
        };
        let light = Background::resolve("light", Some(&custom));
        assert_eq!(light.primary.to_hex(), "#f8f9fa");
    }
}
