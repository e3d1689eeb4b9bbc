//! Cyclically indexed color palettes and the named/literal palette selector.
//!
//! A [`Palette`] is an ordered, non-empty list of colors. Index `i` always
//! wraps modulo the palette length, so renderers may ask for any shape or
//! depth index regardless of how many colors the user picked.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::color::Srgb;
use crate::error::EngineError;

/// Names of the built-in palettes, in presentation order.
const PALETTE_NAMES: &[&str] = &["sunset", "ocean", "forest", "cosmic", "fire", "monochrome"];

/// Palette substituted for unknown names and empty literal lists.
pub const DEFAULT_PALETTE: &str = "sunset";

/// An ordered, non-empty list of colors consumed cyclically by index.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Srgb>,
}

impl Palette {
    /// Creates a palette from a list of colors.
    ///
    /// Requires at least one color.
    pub fn new(colors: Vec<Srgb>) -> Result<Self, EngineError> {
        if colors.is_empty() {
            return Err(EngineError::InvalidPalette(
                "palette requires at least 1 color".to_string(),
            ));
        }
        Ok(Self { colors })
    }

    /// Creates a palette by parsing hex color strings.
    ///
    /// Each string can be "#rrggbb" or "rrggbb" (case insensitive).
    pub fn from_hex<S: AsRef<str>>(hexes: &[S]) -> Result<Self, EngineError> {
        let colors: Result<Vec<Srgb>, EngineError> =
            hexes.iter().map(|h| Srgb::from_hex(h.as_ref())).collect();
        Self::new(colors?)
    }

    /// Looks up a built-in palette by name.
    pub fn from_name(name: &str) -> Result<Self, EngineError> {
        match name {
            "sunset" => Ok(Self::sunset()),
            "ocean" => Ok(Self::ocean()),
            "forest" => Ok(Self::forest()),
            "cosmic" => Ok(Self::cosmic()),
            "fire" => Ok(Self::fire()),
            "monochrome" => Ok(Self::monochrome()),
            _ => Err(EngineError::UnknownPalette(name.to_string())),
        }
    }

    /// Returns the names of every built-in palette.
    pub fn list_names() -> &'static [&'static str] {
        PALETTE_NAMES
    }

    /// Returns the number of colors in this palette.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns true if this palette has no colors. (Always false for valid palettes.)
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Returns the color at `index`, wrapping modulo the palette length.
    pub fn color(&self, index: usize) -> Srgb {
        self.colors[index % self.colors.len()]
    }

    /// All colors in order.
    pub fn colors(&self) -> &[Srgb] {
        &self.colors
    }

    // -- Built-in palettes --

    /// Coral, teal, sky, sage, butter.
    pub fn sunset() -> Self {
        Self::from_hex(&["#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7"])
            .expect("sunset palette hex values are valid")
    }

    /// Deep blue fading to ice.
    pub fn ocean() -> Self {
        Self::from_hex(&["#0077BE", "#00A8CC", "#7FB3D3", "#C5E4FD", "#E8F4FD"])
            .expect("ocean palette hex values are valid")
    }

    /// Dark moss to pale mint.
    pub fn forest() -> Self {
        Self::from_hex(&["#2D5016", "#61892F", "#86C232", "#C6E377", "#E8F5E8"])
            .expect("forest palette hex values are valid")
    }

    /// Umber through violet to lavender.
    pub fn cosmic() -> Self {
        Self::from_hex(&["#2C1810", "#5D4E75", "#B19CD9", "#C9A9DD", "#E6E6FA"])
            .expect("cosmic palette hex values are valid")
    }

    /// Dark red to salmon.
    pub fn fire() -> Self {
        Self::from_hex(&["#8B0000", "#DC143C", "#FF4500", "#FF6347", "#FFA07A"])
            .expect("fire palette hex values are valid")
    }

    /// Black to white via grays.
    pub fn monochrome() -> Self {
        Self::from_hex(&["#000000", "#404040", "#808080", "#C0C0C0", "#FFFFFF"])
            .expect("monochrome palette hex values are valid")
    }
}

/// Either a built-in palette name or a literal list of colors.
///
/// Serializes untagged, so JSON accepts `"ocean"` as well as
/// `["#ff0000", "#00ff00"]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaletteSelector {
    Named(String),
    Literal(Vec<Srgb>),
}

impl Default for PaletteSelector {
    fn default() -> Self {
        PaletteSelector::Named(DEFAULT_PALETTE.to_string())
    }
}

impl PaletteSelector {
    /// Resolves the selector into concrete colors.
    ///
    /// Literal lists are returned unchanged. Unknown names and empty literal
    /// lists resolve to the default palette; this never fails.
    pub fn resolve(&self) -> Palette {
        match self {
            PaletteSelector::Named(name) => Palette::from_name(name).unwrap_or_else(|_| {
                warn!(palette = %name, fallback = DEFAULT_PALETTE, "unknown palette");
                Palette::sunset()
            }),
            PaletteSelector::Literal(colors) => {
                Palette::new(colors.clone()).unwrap_or_else(|_| {
                    warn!(fallback = DEFAULT_PALETTE, "empty literal palette");
                    Palette::sunset()
                })
            }
        }
    }
}
