//! Painter - draws a layout tree onto a surface
//!
//! [CSS 2.1 Appendix E.2 Painting order](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
//!
//! Boxes are painted in tree order: background, then borders, then the
//! box's lines, then its block children. Within a line, each word's inline
//! backgrounds are painted just before the word.

use crate::box_tree::{BoxId, BoxTree};
use crate::layout::box_model::{BoxDimensions, Point, Rect};
use crate::layout::inline::{FragmentContent, LineFragment};
use crate::layout::layout_box::LayoutBox;
use crate::layout::words::{Word, WordKind};
use crate::style::{BoxStyle, ColorValue, DisplayKind, TextDecoration};

use super::Surface;

/// Painter that walks a layout tree and issues drawing calls.
///
/// Painting only reads the layout and the box tree, so the same layout can
/// be painted any number of times with identical results.
pub struct Painter<'a> {
    /// Styles for colors, fonts and decorations.
    tree: &'a BoxTree,
    fallback_style: BoxStyle,
}

impl<'a> Painter<'a> {
    /// Create a painter reading styles from `tree`.
    #[must_use]
    pub fn new(tree: &'a BoxTree) -> Self {
        Self {
            tree,
            fallback_style: BoxStyle::default(),
        }
    }

    fn style(&self, id: BoxId) -> &BoxStyle {
        self.tree.style(id).unwrap_or(&self.fallback_style)
    }

    /// Paint `layout` onto `surface`.
    ///
    /// With a `clip`, nothing is drawn outside it and fragments entirely
    /// outside it are skipped.
    pub fn paint(&self, layout: &LayoutBox, clip: Option<Rect>, surface: &mut dyn Surface) {
        self.paint_box(layout, clip, surface);
    }

    /// [CSS 2.1 Appendix E.2](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
    ///
    /// 1. Background color
    /// 2. Border
    /// 3. Inline content (line boxes)
    /// 4. Block descendants in tree order
    fn paint_box(&self, layout_box: &LayoutBox, clip: Option<Rect>, surface: &mut dyn Surface) {
        if let Some(id) = layout_box.box_id() {
            let style = self.style(id);
            let border_box = layout_box.dimensions.border_box();
            if let Some(background) = style.background_color {
                // [CSS Backgrounds § 3.7](https://www.w3.org/TR/css-backgrounds-3/#background-painting-area)
                //
                // "The initial value of 'background-clip' is 'border-box'"
                fill_clipped(surface, border_box, background, clip);
            }
            paint_borders(surface, &layout_box.dimensions, style.border_color, clip);
        }

        for line in &layout_box.lines {
            for fragment in &line.fragments {
                self.paint_fragment(fragment, clip, surface);
            }
        }

        for child in &layout_box.children {
            self.paint_box(child, clip, surface);
        }
    }

    fn paint_fragment(&self, fragment: &LineFragment, clip: Option<Rect>, surface: &mut dyn Surface) {
        match &fragment.content {
            FragmentContent::InlineBlock(inner) => self.paint_box(inner, clip, surface),
            FragmentContent::Word(word) => self.paint_word(word, fragment, clip, surface),
        }
    }

    /// [CSS 2.1 Appendix E.2 Step 7](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
    ///
    /// "For each inline element: background color, text decoration, text."
    fn paint_word(
        &self,
        word: &Word,
        fragment: &LineFragment,
        clip: Option<Rect>,
        surface: &mut dyn Surface,
    ) {
        if word.is_line_break() {
            return;
        }
        if clip.is_some_and(|clip| !clip.overlaps(&fragment.bounds)) {
            return;
        }

        // The word's own text box and its enclosing inline boxes, outermost first.
        let mut inline_chain: Vec<&BoxStyle> = std::iter::once(word.box_id())
            .chain(self.tree.ancestors(word.box_id()))
            .map(|id| self.style(id))
            .take_while(|style| style.display == DisplayKind::Inline)
            .collect();
        inline_chain.reverse();
        for style in inline_chain {
            if let Some(background) = style.background_color {
                fill_clipped(surface, fragment.bounds, background, clip);
            }
        }

        let style = self.style(word.box_id());
        let baseline_y = fragment.bounds.y + fragment.ascent;
        if word.kind() == WordKind::Printable {
            surface.draw_text(
                word.text(),
                Point::new(fragment.bounds.x, baseline_y),
                &style.font,
                style.color,
                clip,
            );
        }

        // [§ 3 Text Decoration Lines](https://www.w3.org/TR/css-text-decor-3/#text-decoration-line-property)
        let thickness = (style.font.size / 14.0).max(1.0);
        let decoration_y = match style.text_decoration {
            TextDecoration::None => return,
            TextDecoration::Underline => baseline_y + thickness,
            TextDecoration::LineThrough => baseline_y - style.font.size * 0.3,
        };
        let line = Rect::new(fragment.bounds.x, decoration_y, fragment.bounds.width, thickness);
        fill_clipped(surface, line, style.color, clip);
    }
}

/// [CSS Backgrounds § 4 Borders](https://www.w3.org/TR/css-backgrounds-3/#borders)
///
/// Each side is a solid strip. The top and bottom strips span the corners.
fn paint_borders(
    surface: &mut dyn Surface,
    dims: &BoxDimensions,
    color: ColorValue,
    clip: Option<Rect>,
) {
    let outer = dims.border_box();
    let border = &dims.border;
    let inner_height = outer.height - border.top - border.bottom;
    let sides = [
        Rect::new(outer.x, outer.y, outer.width, border.top),
        Rect::new(outer.x, outer.bottom() - border.bottom, outer.width, border.bottom),
        Rect::new(outer.x, outer.y + border.top, border.left, inner_height),
        Rect::new(outer.right() - border.right, outer.y + border.top, border.right, inner_height),
    ];
    for side in sides {
        fill_clipped(surface, side, color, clip);
    }
}

/// Fill `rect` clipped to `clip`, skipping empty and transparent fills.
fn fill_clipped(surface: &mut dyn Surface, rect: Rect, color: ColorValue, clip: Option<Rect>) {
    if color.is_transparent() || rect.is_empty() {
        return;
    }
    let visible = match clip {
        Some(clip) => rect.intersect(&clip),
        None => Some(rect),
    };
    if let Some(visible) = visible {
        surface.fill_rect(visible, color);
    }
}
