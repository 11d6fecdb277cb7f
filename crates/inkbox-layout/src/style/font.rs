//! Resolved font references.
//!
//! [CSS Fonts Level 4](https://www.w3.org/TR/css-fonts-4/)

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use super::keyword::parse_keyword;

/// Font size used when a style does not provide one.
pub const DEFAULT_FONT_SIZE_PX: f32 = 16.0;

/// Family used when a style does not provide one.
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";

/// [§ 3.3 'font-style'](https://www.w3.org/TR/css-fonts-4/#font-style-prop)
///
/// "The 'font-style' property allows italic or oblique faces to be selected."
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(from = "String", rename_all = "kebab-case")]
pub enum FontStyle {
    /// Upright glyphs.
    #[default]
    Normal,
    /// Italic glyphs.
    Italic,
    /// Slanted glyphs (rendered with the italic face when present).
    Oblique,
}

impl From<String> for FontStyle {
    fn from(keyword: String) -> Self {
        parse_keyword("font-style", &keyword)
    }
}

/// A fully resolved font reference, as handed to a text measurer or surface.
///
/// The engine never resolves family names itself; the measurer decides what
/// face a descriptor maps to and reports a failure if it cannot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontDescriptor {
    /// Family name, e.g. `"Segoe UI"`.
    pub family: String,
    /// Font size in pixels.
    pub size: f32,
    /// [§ 3.2 'font-weight'](https://www.w3.org/TR/css-fonts-4/#font-weight-prop)
    ///
    /// Numeric weight: 400 = normal, 700 = bold.
    pub weight: u16,
    /// Upright or slanted face.
    pub style: FontStyle,
}

impl FontDescriptor {
    /// A regular-weight, upright font of the given family and size.
    #[must_use]
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
            weight: 400,
            style: FontStyle::Normal,
        }
    }

    /// Same font with a different weight.
    #[must_use]
    pub fn with_weight(mut self, weight: u16) -> Self {
        self.weight = weight;
        self
    }

    /// Same font with a different style.
    #[must_use]
    pub fn with_style(mut self, style: FontStyle) -> Self {
        self.style = style;
        self
    }

    /// Weights of 600 and above select a bold face.
    #[must_use]
    pub const fn is_bold(&self) -> bool {
        self.weight >= 600
    }

    /// Italic and oblique both select a slanted face.
    #[must_use]
    pub fn is_italic(&self) -> bool {
        self.style != FontStyle::Normal
    }
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self::new(DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE_PX)
    }
}
