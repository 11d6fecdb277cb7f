//! The drawing capability the painter targets.

use crate::layout::box_model::{Point, Rect};
use crate::style::{ColorValue, FontDescriptor};

/// A destination for painting.
///
/// Coordinates are in the same space as the layout. Implementations must
/// not draw outside `clip` when one is given to [`Surface::draw_text`];
/// rectangles passed to [`Surface::fill_rect`] are already clipped.
pub trait Surface {
    /// Fill an axis-aligned rectangle with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: ColorValue);

    /// Draw a run of text.
    ///
    /// `origin` is the left end of the text's baseline.
    fn draw_text(
        &mut self,
        text: &str,
        origin: Point,
        font: &FontDescriptor,
        color: ColorValue,
        clip: Option<Rect>,
    );
}
