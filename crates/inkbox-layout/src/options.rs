//! Layout configuration.

use serde::{Deserialize, Serialize};

use crate::style::DEFAULT_FONT_SIZE_PX;

/// Tunables for a layout pass.
///
/// Every field has a default, so a partial configuration object
/// deserializes cleanly:
///
/// ```
/// use inkbox_layout::LayoutOptions;
///
/// let options: LayoutOptions = serde_json::from_str(r#"{ "tab_size": 4 }"#).unwrap();
/// assert_eq!(options.tab_size, 4);
/// assert!((options.line_height_factor - 1.2).abs() < f32::EPSILON);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// [§ 6.1 'tab-size'](https://www.w3.org/TR/css-text-3/#tab-size-property)
    ///
    /// Distance between tab stops, in space advances, for preserved tabs.
    pub tab_size: u32,

    /// [§ 10.8.1 Leading and half-leading](https://www.w3.org/TR/CSS2/visudet.html#leading)
    ///
    /// "We recommend a used value for 'normal' between 1.0 and 1.2."
    ///
    /// Multiplied by the font size when a measurer cannot report a line height.
    pub line_height_factor: f32,

    /// Share of a fragment's height that lies above its baseline.
    pub baseline_ratio: f32,

    /// Font size substituted for non-positive or non-finite sizes.
    pub default_font_size: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            tab_size: 8,
            line_height_factor: 1.2,
            baseline_ratio: 0.8,
            default_font_size: DEFAULT_FONT_SIZE_PX,
        }
    }
}

impl LayoutOptions {
    /// Line height to use for `font_size` when measurement is unavailable.
    #[must_use]
    pub fn fallback_line_height(&self, font_size: f32) -> f32 {
        let size = if font_size.is_finite() && font_size > 0.0 {
            font_size
        } else {
            self.default_font_size
        };
        size * self.line_height_factor
    }
}
