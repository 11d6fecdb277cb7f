//! Text measurement capability used during layout.
//!
//! [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
//!
//! "CSS assumes that every font has font metrics that specify a
//! characteristic height above the baseline and a depth below it."

use crate::style::FontDescriptor;

/// Why a measurer could not measure a string.
///
/// Layout never propagates these: the offending word gets a zero advance
/// and the failure is reported through the warning log.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeasureError {
    /// No face is available for the requested family.
    #[error("no font available for family '{0}'")]
    UnknownFont(String),
    /// The font size is zero, negative, or not a number.
    #[error("invalid font size {0}")]
    InvalidSize(f32),
}

/// Font metrics interface for text measurement during layout.
///
/// Implementors provide advance widths and line heights. The layout engine
/// calls these for every word, so implementations should avoid rasterizing.
pub trait TextMeasurer {
    /// Total advance width of `text` drawn with `font`.
    ///
    /// # Errors
    ///
    /// Fails when the font cannot be resolved or the size is unusable.
    fn text_width(&self, text: &str, font: &FontDescriptor) -> Result<f32, MeasureError>;

    /// Height of one line of text in `font`.
    ///
    /// # Errors
    ///
    /// Fails when the font cannot be resolved or the size is unusable.
    fn line_height(&self, font: &FontDescriptor) -> Result<f32, MeasureError>;
}

/// Approximate font metrics using fixed ratios.
///
/// The average advance of Latin glyphs in a proportional font is roughly
/// 0.6 of the font size; line height uses 1.2, the upper end of the range
/// recommended for `line-height: normal`. Used as a fallback when no font
/// files are available, and in tests, where its arithmetic is predictable:
/// at 10px every character is 6px wide and every line 12px tall.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateFontMetrics;

impl ApproximateFontMetrics {
    // Ratios are applied as `* n / 5` so integral sizes measure exactly.
    const CHAR_WIDTH_FIFTHS: f32 = 3.0;
    const LINE_HEIGHT_FIFTHS: f32 = 6.0;

    fn checked_size(font: &FontDescriptor) -> Result<f32, MeasureError> {
        if font.size.is_finite() && font.size > 0.0 {
            Ok(font.size)
        } else {
            Err(MeasureError::InvalidSize(font.size))
        }
    }
}

impl TextMeasurer for ApproximateFontMetrics {
    #[allow(clippy::cast_precision_loss)]
    fn text_width(&self, text: &str, font: &FontDescriptor) -> Result<f32, MeasureError> {
        let size = Self::checked_size(font)?;
        let glyphs = text.chars().filter(|ch| !ch.is_control()).count();
        Ok(glyphs as f32 * size * Self::CHAR_WIDTH_FIFTHS / 5.0)
    }

    fn line_height(&self, font: &FontDescriptor) -> Result<f32, MeasureError> {
        Ok(Self::checked_size(font)? * Self::LINE_HEIGHT_FIFTHS / 5.0)
    }
}
