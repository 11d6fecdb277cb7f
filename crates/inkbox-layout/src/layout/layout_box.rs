//! Layout boxes and the block layout algorithm.
//!
//! [§ 9.4.1 Block formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#block-formatting)
//!
//! "In a block formatting context, boxes are laid out one after the other,
//! vertically, beginning at the top of a containing block."

use inkbox_common::warning::warn_once;
use serde::Serialize;

use crate::box_tree::{BoxContent, BoxId, BoxTree};
use crate::options::LayoutOptions;
use crate::style::{BoxStyle, DisplayKind};

use super::box_model::{BoxDimensions, Point, Rect};
use super::inline::{FragmentContent, InlineItem, Line, LineBreaker, LineGeometry};
use super::metrics::TextMeasurer;
use super::words::split_words;

/// Containing width wide enough that no line wraps.
const UNBOUNDED_WIDTH: f32 = 1.0e7;

/// What generated a layout box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LayoutBoxKind {
    /// The box generated by a box-tree node.
    Principal(BoxId),
    /// [§ 9.2.1.1 Anonymous block boxes](https://www.w3.org/TR/CSS2/visuren.html#anonymous-block-level)
    ///
    /// Wraps a run of inline content inside a block that also has
    /// block-level children.
    Anonymous,
}

/// A positioned box produced by layout.
///
/// A box holds either line boxes (its content is all inline) or block
/// children, never both.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutBox {
    /// What generated this box.
    pub kind: LayoutBoxKind,
    /// Resolved position and edges.
    pub dimensions: BoxDimensions,
    /// Lines of the inline formatting context this box establishes.
    pub lines: Vec<Line>,
    /// Block-level children, stacked vertically.
    pub children: Vec<LayoutBox>,
}

impl LayoutBox {
    /// The box-tree node behind this box, if it is not anonymous.
    #[must_use]
    pub const fn box_id(&self) -> Option<BoxId> {
        match self.kind {
            LayoutBoxKind::Principal(id) => Some(id),
            LayoutBoxKind::Anonymous => None,
        }
    }

    /// Move the box and everything inside it.
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.dimensions.content = self.dimensions.content.translated(dx, dy);
        self.translate_contents(dx, dy);
    }

    fn translate_contents(&mut self, dx: f32, dy: f32) {
        for line in &mut self.lines {
            line.bounds = line.bounds.translated(dx, dy);
            for fragment in &mut line.fragments {
                fragment.bounds = fragment.bounds.translated(dx, dy);
                if let FragmentContent::InlineBlock(inner) = &mut fragment.content {
                    inner.translate(dx, dy);
                }
            }
        }
        for child in &mut self.children {
            child.translate(dx, dy);
        }
    }

    /// Every line of this box's flow in document order. Lines inside
    /// inline-blocks belong to those boxes and are not included.
    #[must_use]
    pub fn flow_lines(&self) -> Vec<&Line> {
        let mut lines: Vec<&Line> = self.lines.iter().collect();
        for child in &self.children {
            lines.extend(child.flow_lines());
        }
        lines
    }

    /// The drawn text of each flow line.
    #[must_use]
    pub fn lines_text(&self) -> Vec<String> {
        self.flow_lines().into_iter().map(Line::text).collect()
    }

    /// Height of the content area.
    #[must_use]
    pub const fn content_height(&self) -> f32 {
        self.dimensions.content.height
    }
}

/// Lays out a [`BoxTree`] into positioned [`LayoutBox`]es.
///
/// ```
/// use inkbox_layout::{ApproximateFontMetrics, BoxStyle, BoxTree, LayoutEngine, Rect};
///
/// let mut tree = BoxTree::new(BoxStyle::block());
/// let root = tree.root();
/// let _ = tree.append_text(root, BoxStyle::inline(), "Hello World").unwrap();
///
/// let layout = LayoutEngine::new(&tree, &ApproximateFontMetrics)
///     .layout(root, Rect::new(0.0, 0.0, 500.0, 0.0));
/// assert_eq!(layout.lines_text(), ["Hello World"]);
/// ```
pub struct LayoutEngine<'a> {
    tree: &'a BoxTree,
    measurer: &'a dyn TextMeasurer,
    options: LayoutOptions,
    fallback_style: BoxStyle,
}

impl<'a> LayoutEngine<'a> {
    /// Create an engine with default options.
    #[must_use]
    pub fn new(tree: &'a BoxTree, measurer: &'a dyn TextMeasurer) -> Self {
        Self {
            tree,
            measurer,
            options: LayoutOptions::default(),
            fallback_style: BoxStyle::default(),
        }
    }

    /// Replace the layout options.
    #[must_use]
    pub fn with_options(mut self, options: LayoutOptions) -> Self {
        self.options = options;
        self
    }

    /// The options in effect.
    #[must_use]
    pub const fn options(&self) -> &LayoutOptions {
        &self.options
    }

    fn style(&self, id: BoxId) -> &BoxStyle {
        self.tree.style(id).unwrap_or(&self.fallback_style)
    }

    fn is_inline_level(&self, id: BoxId) -> bool {
        self.tree
            .get(id)
            .is_some_and(|node| node.is_text() || node.style.display.is_inline_level())
    }

    /// Lay out the subtree at `root` inside `area`.
    ///
    /// The root's margin box starts at the area's top-left corner and its
    /// width follows the area. When `area.height` is positive, the root is
    /// positioned inside it according to its `vertical-align`. The same tree
    /// and inputs always produce the same result.
    #[must_use]
    pub fn layout(&self, root: BoxId, area: Rect) -> LayoutBox {
        let Some(node) = self.tree.get(root) else {
            let _ = warn_once("Layout", &format!("layout root {root:?} does not exist"));
            return LayoutBox {
                kind: LayoutBoxKind::Anonymous,
                dimensions: BoxDimensions {
                    content: Rect::new(area.x, area.y, area.width.max(0.0), 0.0),
                    ..BoxDimensions::default()
                },
                lines: Vec::new(),
                children: Vec::new(),
            };
        };

        let mut laid_out = if node.is_text() {
            // A bare text root gets an anonymous block to hold its lines.
            let lines = self.layout_inline_run(&[root], &node.style, area.origin(), area.width);
            LayoutBox {
                kind: LayoutBoxKind::Anonymous,
                dimensions: BoxDimensions {
                    content: Rect::new(area.x, area.y, area.width.max(0.0), lines_height(&lines)),
                    ..BoxDimensions::default()
                },
                lines,
                children: Vec::new(),
            }
        } else {
            self.layout_block(root, &node.style, area.origin(), area.width, None)
        };

        let free = area.height - laid_out.dimensions.margin_box().height;
        if area.height > 0.0 && free > 0.0 {
            let offset = free * node.style.vertical_align.block_offset_factor();
            if offset > 0.0 {
                laid_out.translate(0.0, offset);
            }
        }

        log::debug!(
            target: "inkbox::layout",
            "laid out {root:?} in {:.1}x{:.1}: {} lines, height {:.1}",
            area.width,
            area.height,
            laid_out.flow_lines().len(),
            laid_out.dimensions.margin_box().height
        );
        laid_out
    }

    /// Width the laid-out box needs, margins included, if it were allowed
    /// to shrink around its content. Boxes with an explicit width keep it.
    #[must_use]
    pub fn preferred_width(&self, layout_box: &LayoutBox) -> f32 {
        let dims = &layout_box.dimensions;
        let explicit = layout_box
            .box_id()
            .and_then(|id| self.tree.style(id))
            .and_then(|style| style.width);
        let content = explicit.unwrap_or_else(|| {
            let lines = layout_box
                .lines
                .iter()
                .map(|line| line.natural_width)
                .fold(0.0_f32, f32::max);
            let children = layout_box
                .children
                .iter()
                .map(|child| self.preferred_width(child))
                .fold(0.0_f32, f32::max);
            lines.max(children)
        });
        content + dims.horizontal_edges()
    }

    /// [§ 10.3.3 Block-level, non-replaced elements in normal flow](https://www.w3.org/TR/CSS2/visudet.html#blockwidth)
    ///
    /// `origin` is the top-left corner of the margin box. Margins never
    /// collapse.
    fn layout_block(
        &self,
        id: BoxId,
        style: &BoxStyle,
        origin: Point,
        containing_width: f32,
        forced_width: Option<f32>,
    ) -> LayoutBox {
        let mut dims = BoxDimensions {
            content: Rect::default(),
            padding: style.padding,
            border: style.border,
            margin: style.margin,
        };
        dims.content.x = origin.x + style.margin.left + style.border.left + style.padding.left;
        dims.content.y = origin.y + style.margin.top + style.border.top + style.padding.top;
        dims.content.width = forced_width
            .or(style.width)
            .unwrap_or(containing_width - dims.horizontal_edges())
            .max(0.0);

        let (lines, children, used_height) = self.layout_contents(id, style, dims.content);
        dims.content.height = style.height.unwrap_or(used_height).max(0.0);

        let mut laid_out = LayoutBox {
            kind: LayoutBoxKind::Principal(id),
            dimensions: dims,
            lines,
            children,
        };

        if let Some(height) = style.height {
            let offset = (height - used_height).max(0.0) * style.vertical_align.block_offset_factor();
            if offset > 0.0 {
                laid_out.translate_contents(0.0, offset);
            }
        }
        laid_out
    }

    /// [§ 9.2.1.1 Anonymous block boxes](https://www.w3.org/TR/CSS2/visuren.html#anonymous-block-level)
    ///
    /// "If a block container box has a block-level box inside it, then we
    /// force it to have only block-level boxes inside it."
    ///
    /// Returns the lines (all-inline content), the block children, and the
    /// height the content uses.
    fn layout_contents(
        &self,
        id: BoxId,
        style: &BoxStyle,
        content: Rect,
    ) -> (Vec<Line>, Vec<LayoutBox>, f32) {
        let children = self.tree.children(id);

        if children.iter().all(|&child| self.is_inline_level(child)) {
            let lines = self.layout_inline_run(children, style, content.origin(), content.width);
            let height = lines_height(&lines);
            return (lines, Vec::new(), height);
        }

        let mut blocks = Vec::new();
        let mut cursor_y = content.y;
        let mut run_start = 0;
        for (index, &child) in children.iter().enumerate() {
            if self.is_inline_level(child) {
                continue;
            }
            let run = &children[run_start..index];
            self.push_anonymous_block(run, style, content, &mut cursor_y, &mut blocks);
            run_start = index + 1;

            let block = self.layout_block(
                child,
                self.style(child),
                Point::new(content.x, cursor_y),
                content.width,
                None,
            );
            cursor_y = block.dimensions.margin_box().bottom();
            blocks.push(block);
        }
        let run = &children[run_start..];
        self.push_anonymous_block(run, style, content, &mut cursor_y, &mut blocks);

        (Vec::new(), blocks, cursor_y - content.y)
    }

    /// Wrap a run of inline-level siblings in an anonymous block. Runs that
    /// produce no lines (such as collapsed white space) leave no box.
    fn push_anonymous_block(
        &self,
        run: &[BoxId],
        style: &BoxStyle,
        content: Rect,
        cursor_y: &mut f32,
        blocks: &mut Vec<LayoutBox>,
    ) {
        if run.is_empty() {
            return;
        }
        let origin = Point::new(content.x, *cursor_y);
        let lines = self.layout_inline_run(run, style, origin, content.width);
        if lines.is_empty() {
            return;
        }
        let height = lines_height(&lines);
        blocks.push(LayoutBox {
            kind: LayoutBoxKind::Anonymous,
            dimensions: BoxDimensions {
                content: Rect::new(content.x, *cursor_y, content.width, height),
                ..BoxDimensions::default()
            },
            lines,
            children: Vec::new(),
        });
        *cursor_y += height;
    }

    /// Break the inline content of `ids` into lines starting at `origin`.
    /// `block_style` is the style of the block container that owns the lines.
    fn layout_inline_run(
        &self,
        ids: &[BoxId],
        block_style: &BoxStyle,
        origin: Point,
        width: f32,
    ) -> Vec<Line> {
        let mut breaker = LineBreaker::new(
            self.tree,
            self.measurer,
            &self.options,
            &self.fallback_style,
            width,
        );
        for &id in ids {
            self.collect_inline(id, width, &mut breaker);
        }
        breaker.finish(&LineGeometry {
            origin,
            available_width: width,
            text_align: block_style.text_align,
            baseline_ratio: self.options.baseline_ratio,
        })
    }

    /// Feed the inline content of `id` to the line breaker in document order.
    fn collect_inline(&self, id: BoxId, available_width: f32, breaker: &mut LineBreaker<'_>) {
        let Some(node) = self.tree.get(id) else {
            return;
        };
        match &node.content {
            BoxContent::Text(text) => {
                for word in split_words(id, text, node.style.white_space) {
                    breaker.push(InlineItem::Word(word));
                }
            }
            BoxContent::Children(children) => match node.style.display {
                DisplayKind::Inline => {
                    for &child in children {
                        self.collect_inline(child, available_width, breaker);
                    }
                }
                // A block nested in an inline is treated as an atomic inline
                // rather than splitting the inline around it.
                DisplayKind::InlineBlock | DisplayKind::Block => {
                    let atomic = self.layout_inline_block(id, &node.style, available_width);
                    breaker.push(InlineItem::Atomic(atomic));
                }
            },
        }
    }

    /// [§ 10.3.9 'Inline-block', non-replaced elements in normal flow](https://www.w3.org/TR/CSS2/visudet.html#inlineblock-width)
    ///
    /// "If 'width' is 'auto', the used value is the shrink-to-fit width."
    ///
    /// The used width is `min(max(min-content, available), max-content)`.
    /// The margin box starts at the origin; the line breaker moves it into
    /// place.
    fn layout_inline_block(&self, id: BoxId, style: &BoxStyle, available_width: f32) -> LayoutBox {
        let first = self.layout_block(id, style, Point::default(), available_width, None);
        if style.width.is_some() {
            return first;
        }
        let edges = first.dimensions.horizontal_edges();
        let available = (available_width - edges).max(0.0);
        let max_content = self.content_width_at(id, style, UNBOUNDED_WIDTH);
        let used = if max_content <= available {
            max_content
        } else {
            available.max(self.content_width_at(id, style, 0.0))
        };
        if (used - first.dimensions.content.width).abs() < 0.01 {
            return first;
        }
        self.layout_block(id, style, Point::default(), available_width, Some(used))
    }

    /// Preferred content width of a box laid out in `containing_width`.
    /// Unbounded gives the max-content width, zero the min-content width.
    fn content_width_at(&self, id: BoxId, style: &BoxStyle, containing_width: f32) -> f32 {
        let laid_out = self.layout_block(id, style, Point::default(), containing_width, None);
        self.preferred_width(&laid_out) - laid_out.dimensions.horizontal_edges()
    }
}

/// Total height of lines stacked without gaps.
fn lines_height(lines: &[Line]) -> f32 {
    lines.iter().map(|line| line.bounds.height).sum()
}
