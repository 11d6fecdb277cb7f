//! One-call layout and paint.
//!
//! The host calls [`render`] from its paint callback: layout and painting
//! run to completion, in sequence, before it returns.

use crate::box_tree::{BoxId, BoxTree};
use crate::layout::{LayoutBox, LayoutEngine, Rect, Size, TextMeasurer};
use crate::options::LayoutOptions;
use crate::paint::{Painter, Surface};

/// Lay out the subtree at `root` inside `area` and paint it onto `surface`.
///
/// With `clip` set, nothing is drawn outside `area`. Returns the layout so
/// the caller can inspect lines or repaint without laying out again.
///
/// ```
/// use inkbox_layout::{
///     ApproximateFontMetrics, BoxStyle, BoxTree, DisplayList, LayoutOptions, Rect, render,
/// };
///
/// let mut tree = BoxTree::new(BoxStyle::block());
/// let root = tree.root();
/// let _ = tree.append_text(root, BoxStyle::inline(), "tile caption").unwrap();
///
/// let mut list = DisplayList::new();
/// let area = Rect::new(0.0, 0.0, 200.0, 40.0);
/// let layout = render(
///     &tree, root, area, true, &ApproximateFontMetrics, &mut list, &LayoutOptions::default(),
/// );
/// assert_eq!(layout.lines_text(), ["tile caption"]);
/// assert_eq!(list.texts(), ["tile", "caption"]);
/// ```
pub fn render(
    tree: &BoxTree,
    root: BoxId,
    area: Rect,
    clip: bool,
    measurer: &dyn TextMeasurer,
    surface: &mut dyn Surface,
    options: &LayoutOptions,
) -> LayoutBox {
    let layout = LayoutEngine::new(tree, measurer)
        .with_options(options.clone())
        .layout(root, area);
    Painter::new(tree).paint(&layout, clip.then_some(area), surface);
    layout
}

/// The size the subtree at `root` needs when its lines may be at most
/// `max_width` wide: the widest line (or explicit width) plus edges, and
/// the laid-out height.
#[must_use]
pub fn measure_size(
    tree: &BoxTree,
    root: BoxId,
    max_width: f32,
    measurer: &dyn TextMeasurer,
    options: &LayoutOptions,
) -> Size {
    let engine = LayoutEngine::new(tree, measurer).with_options(options.clone());
    let layout = engine.layout(root, Rect::new(0.0, 0.0, max_width, 0.0));
    Size {
        width: engine.preferred_width(&layout).min(max_width.max(0.0)),
        height: layout.dimensions.margin_box().height,
    }
}
