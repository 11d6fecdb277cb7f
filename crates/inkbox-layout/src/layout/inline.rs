//! Inline Layout and Line Box Model.
//!
//! [§ 9.4.2 Inline formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
//!
//! "In an inline formatting context, boxes are laid out horizontally, one
//! after the other, beginning at the top of a containing block."
//!
//! Words are packed greedily. Breaking happens in two phases: first every
//! item is assigned to a pending line, then, once the last line is known,
//! each pending line is measured, aligned and positioned.

use inkbox_common::warning::warn_once;
use serde::Serialize;

use crate::box_tree::{BoxId, BoxTree};
use crate::options::LayoutOptions;
use crate::style::{BoxStyle, FontDescriptor, TextAlign, VerticalAlign};

use super::box_model::{Point, Rect};
use super::layout_box::LayoutBox;
use super::metrics::TextMeasurer;
use super::words::{Word, WordKind};

/// Slack for float comparisons against the available width.
const WIDTH_EPSILON: f32 = 0.01;

/// [§ 9.4.2 Inline formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
///
/// "The rectangular area that contains the boxes that form a line is called
/// a line box."
#[derive(Debug, Clone, Serialize)]
pub struct Line {
    /// Position and size of the line. `x` includes the alignment offset and
    /// `width` includes space added by justification.
    pub bounds: Rect,
    /// Sum of the fragments' own advances, before justification.
    pub natural_width: f32,
    /// Baseline position relative to `bounds.y`.
    pub baseline: f32,
    /// Fragments in visual order.
    pub fragments: Vec<LineFragment>,
    /// True when the line was ended by a forced break.
    pub hard_break: bool,
}

impl Line {
    /// Words on this line, forced breaks included.
    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.fragments.iter().filter_map(|fragment| match &fragment.content {
            FragmentContent::Word(word) => Some(word),
            FragmentContent::InlineBlock(_) => None,
        })
    }

    /// The text drawn on this line: every word except forced breaks.
    #[must_use]
    pub fn text(&self) -> String {
        self.words()
            .filter(|word| !word.is_line_break())
            .map(Word::text)
            .collect()
    }

    /// True when nothing on the line would be drawn.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.fragments.iter().all(|fragment| match &fragment.content {
            FragmentContent::Word(word) => word.kind() != WordKind::Printable,
            FragmentContent::InlineBlock(_) => false,
        })
    }
}

/// A piece of content placed on a line.
#[derive(Debug, Clone, Serialize)]
pub struct LineFragment {
    /// The fragment's box on the surface.
    pub bounds: Rect,
    /// Distance from `bounds.y` down to the fragment's baseline.
    pub ascent: f32,
    /// What was placed.
    pub content: FragmentContent,
}

/// The content of a line fragment.
#[derive(Debug, Clone, Serialize)]
pub enum FragmentContent {
    /// A word from a text box; its style comes from [`Word::box_id`].
    Word(Word),
    /// An inline-block laid out as one unbreakable unit.
    InlineBlock(Box<LayoutBox>),
}

/// Input to the line breaker, in document order.
pub(crate) enum InlineItem {
    Word(Word),
    /// An inline-level box already laid out with its margin box at the origin.
    Atomic(LayoutBox),
}

struct PendingItem {
    content: FragmentContent,
    width: f32,
    height: f32,
    vertical_align: VerticalAlign,
    /// White space that may be removed when it ends up at the end of a line.
    collapsible: bool,
    white_space: bool,
    atomic: bool,
}

impl PendingItem {
    fn ascent(&self, baseline_ratio: f32) -> f32 {
        if self.atomic {
            // An inline-block sits on the baseline with its bottom margin edge.
            self.height
        } else {
            self.height * baseline_ratio
        }
    }
}

#[derive(Default)]
struct PendingLine {
    items: Vec<PendingItem>,
    advance: f32,
    /// Number of leading items that stay on this line if it has to wrap.
    wrap_after: Option<usize>,
    /// Minimum height, set when a forced break opened the line.
    strut: f32,
    hard_break: bool,
    opened_by_break: bool,
}

impl PendingLine {
    fn push(&mut self, item: PendingItem) {
        self.advance += item.width;
        self.items.push(item);
    }

    fn ends_in_white_space(&self) -> bool {
        self.items.last().is_none_or(|item| item.white_space)
    }

    fn trim_trailing_white_space(&mut self) {
        while self.items.last().is_some_and(|item| item.collapsible) {
            if let Some(item) = self.items.pop() {
                self.advance -= item.width;
            }
        }
    }
}

/// Vertical and horizontal settings shared by every line of one run.
pub(crate) struct LineGeometry {
    pub origin: Point,
    pub available_width: f32,
    pub text_align: TextAlign,
    pub baseline_ratio: f32,
}

impl PendingLine {
    #[allow(clippy::cast_precision_loss)]
    fn into_line(self, y: f32, geometry: &LineGeometry, is_last: bool) -> Line {
        let ratio = geometry.baseline_ratio;
        let natural_width: f32 = self.items.iter().map(|item| item.width).sum();

        // [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
        //
        // "The height of the line box is the distance between the uppermost
        // box top and the lowermost box bottom."
        let mut ascent = 0.0_f32;
        let mut descent = 0.0_f32;
        let mut tallest = self.strut;
        for item in &self.items {
            if item.vertical_align == VerticalAlign::Baseline {
                let item_ascent = item.ascent(ratio);
                ascent = ascent.max(item_ascent);
                descent = descent.max(item.height - item_ascent);
            } else {
                tallest = tallest.max(item.height);
            }
        }
        let height = (ascent + descent).max(tallest);
        let baseline = if ascent > 0.0 { ascent } else { height * ratio };

        // [§ 16.2 Alignment: the 'text-align' property](https://www.w3.org/TR/CSS2/text.html#alignment-prop)
        let free = geometry.available_width - natural_width;
        let gaps = self.items.iter().filter(|item| item.white_space).count();
        let justifiable = !is_last && !self.hard_break && gaps > 0;
        let (offset, gap_extra) = if free <= 0.0 {
            // Overflowing lines stay at the start edge.
            (0.0, 0.0)
        } else {
            match geometry.text_align {
                TextAlign::Center => (free / 2.0, 0.0),
                TextAlign::Right => (free, 0.0),
                TextAlign::Justify if justifiable => (0.0, free / gaps as f32),
                TextAlign::Left | TextAlign::Justify => (0.0, 0.0),
            }
        };

        let line_x = geometry.origin.x + offset;
        let mut cursor = line_x;
        let mut fragments = Vec::with_capacity(self.items.len());
        for item in self.items {
            let item_ascent = item.ascent(ratio);
            let top = match item.vertical_align {
                VerticalAlign::Baseline => baseline - item_ascent,
                VerticalAlign::Top => 0.0,
                VerticalAlign::Middle => (height - item.height) / 2.0,
                VerticalAlign::Bottom => height - item.height,
            };
            let width = if item.white_space {
                item.width + gap_extra
            } else {
                item.width
            };
            let bounds = Rect::new(cursor, y + top, width, item.height);
            cursor += width;

            let content = match item.content {
                FragmentContent::InlineBlock(mut layout_box) => {
                    layout_box.translate(bounds.x, bounds.y);
                    FragmentContent::InlineBlock(layout_box)
                }
                word @ FragmentContent::Word(_) => word,
            };
            fragments.push(LineFragment {
                bounds,
                ascent: item_ascent,
                content,
            });
        }

        Line {
            bounds: Rect::new(line_x, y, cursor - line_x, height),
            natural_width,
            baseline,
            fragments,
            hard_break: self.hard_break,
        }
    }
}

/// Greedy line breaker for one inline formatting context.
pub(crate) struct LineBreaker<'a> {
    tree: &'a BoxTree,
    measurer: &'a dyn TextMeasurer,
    options: &'a LayoutOptions,
    fallback_style: &'a BoxStyle,
    available_width: f32,
    finished: Vec<PendingLine>,
    current: PendingLine,
}

impl<'a> LineBreaker<'a> {
    pub(crate) fn new(
        tree: &'a BoxTree,
        measurer: &'a dyn TextMeasurer,
        options: &'a LayoutOptions,
        fallback_style: &'a BoxStyle,
        available_width: f32,
    ) -> Self {
        Self {
            tree,
            measurer,
            options,
            fallback_style,
            available_width,
            finished: Vec::new(),
            current: PendingLine::default(),
        }
    }

    fn style(&self, id: BoxId) -> &'a BoxStyle {
        self.tree.style(id).unwrap_or(self.fallback_style)
    }

    /// Advance width of `text`; an unmeasurable font degrades to zero width.
    fn measure_width(&self, text: &str, font: &FontDescriptor) -> f32 {
        match self.measurer.text_width(text, font) {
            Ok(width) if width.is_finite() && width >= 0.0 => width,
            Ok(width) => {
                let _ = warn_once(
                    "Layout",
                    &format!("font '{}' reported width {width}, using zero", font.family),
                );
                0.0
            }
            Err(err) => {
                let _ = warn_once("Layout", &format!("{err}; text measured as zero width"));
                0.0
            }
        }
    }

    fn measure_line_height(&self, font: &FontDescriptor) -> f32 {
        match self.measurer.line_height(font) {
            Ok(height) if height.is_finite() && height > 0.0 => height,
            _ => self.options.fallback_line_height(font.size),
        }
    }

    /// [§ 6.2 Tab stops](https://www.w3.org/TR/css-text-3/#tab-size-property)
    ///
    /// A preserved tab advances to the next tab stop measured from the line start.
    #[allow(clippy::cast_precision_loss)]
    fn tab_advance(&self, font: &FontDescriptor) -> f32 {
        let stop = self.measure_width(" ", font) * self.options.tab_size as f32;
        if stop <= 0.0 {
            return 0.0;
        }
        let x = self.current.advance;
        ((x / stop).floor() + 1.0).mul_add(stop, -x)
    }

    pub(crate) fn push(&mut self, item: InlineItem) {
        match item {
            InlineItem::Word(word) => self.push_word(word),
            InlineItem::Atomic(layout_box) => self.push_atomic(layout_box),
        }
    }

    fn push_word(&mut self, word: Word) {
        let style = self.style(word.box_id());
        let white_space = style.white_space;
        let height = self.measure_line_height(&style.font);

        match word.kind() {
            WordKind::LineBreak => {
                // [§ 4.1.3](https://www.w3.org/TR/css-text-3/#white-space-phase-2)
                // "A sequence of collapsible spaces at the end of a line is removed."
                self.current.trim_trailing_white_space();
                self.current.push(PendingItem {
                    content: FragmentContent::Word(word),
                    width: 0.0,
                    height,
                    vertical_align: style.vertical_align,
                    collapsible: false,
                    white_space: false,
                    atomic: false,
                });
                self.current.hard_break = true;
                self.finish_line();
                self.current.strut = height;
                self.current.opened_by_break = true;
            }
            WordKind::Space | WordKind::Tab => {
                let collapses = white_space.collapses_white_space();
                // Collapsible white space never starts a line and never follows
                // other white space, even across box boundaries.
                if collapses && self.current.ends_in_white_space() {
                    return;
                }
                let width = if collapses {
                    self.measure_width(" ", &style.font)
                } else if word.kind() == WordKind::Tab {
                    self.tab_advance(&style.font)
                } else {
                    self.measure_width(word.text(), &style.font)
                };

                if white_space.wraps()
                    && !self.current.items.is_empty()
                    && self.current.advance + width > self.available_width + WIDTH_EPSILON
                {
                    // The space is the break: it hangs past the line end and is dropped.
                    self.finish_line();
                    return;
                }

                self.current.push(PendingItem {
                    content: FragmentContent::Word(word),
                    width,
                    height,
                    vertical_align: style.vertical_align,
                    collapsible: collapses,
                    white_space: true,
                    atomic: false,
                });
                if white_space.wraps() {
                    self.current.wrap_after = Some(self.current.items.len());
                }
            }
            WordKind::Printable => {
                let width = self.measure_width(word.text(), &style.font);
                self.current.push(PendingItem {
                    content: FragmentContent::Word(word),
                    width,
                    height,
                    vertical_align: style.vertical_align,
                    collapsible: false,
                    white_space: false,
                    atomic: false,
                });
                self.wrap_if_overflowing();
            }
        }
    }

    /// [§ 5.1 Line Breaking Details](https://www.w3.org/TR/css-text-3/#line-break-details)
    ///
    /// Atomic inlines have soft wrap opportunities before and after them
    /// unless their parent forbids wrapping.
    fn push_atomic(&mut self, layout_box: LayoutBox) {
        let (wraps, vertical_align) = layout_box.box_id().map_or(
            (true, VerticalAlign::Baseline),
            |id| {
                let wraps = self
                    .tree
                    .parent(id)
                    .is_none_or(|parent| self.style(parent).white_space.wraps());
                (wraps, self.style(id).vertical_align)
            },
        );
        if wraps && !self.current.items.is_empty() {
            self.current.wrap_after = Some(self.current.items.len());
        }

        let margin_box = layout_box.dimensions.margin_box();
        self.current.push(PendingItem {
            content: FragmentContent::InlineBlock(Box::new(layout_box)),
            width: margin_box.width,
            height: margin_box.height,
            vertical_align,
            collapsible: false,
            white_space: false,
            atomic: true,
        });
        self.wrap_if_overflowing();

        if wraps {
            self.current.wrap_after = Some(self.current.items.len());
        }
    }

    /// Move everything after the last wrap opportunity to a new line when
    /// the current line is too wide. Without an opportunity the run is
    /// unbreakable and is left to overflow.
    fn wrap_if_overflowing(&mut self) {
        if self.current.advance <= self.available_width + WIDTH_EPSILON {
            return;
        }
        let Some(keep) = self.current.wrap_after else {
            return;
        };
        if keep == 0 || keep >= self.current.items.len() {
            return;
        }

        let carried = self.current.items.split_off(keep);
        self.finish_line();
        for item in carried {
            self.current.push(item);
        }
    }

    fn finish_line(&mut self) {
        self.current.trim_trailing_white_space();
        let line = std::mem::take(&mut self.current);

        #[cfg(feature = "layout-trace")]
        log::trace!(
            target: "inkbox::layout",
            "line {} closed: {} items, {:.1}px of {:.1}px{}",
            self.finished.len(),
            line.items.len(),
            line.advance,
            self.available_width,
            if line.hard_break { ", forced" } else { "" }
        );

        self.finished.push(line);
    }

    /// Close the last line and position every line, stacking them from
    /// `geometry.origin` downwards.
    pub(crate) fn finish(mut self, geometry: &LineGeometry) -> Vec<Line> {
        if !self.current.items.is_empty() || self.current.opened_by_break {
            self.finish_line();
        }

        let count = self.finished.len();
        let mut y = geometry.origin.y;
        self.finished
            .into_iter()
            .enumerate()
            .map(|(index, pending)| {
                let line = pending.into_line(y, geometry, index + 1 == count);
                y += line.bounds.height;
                line
            })
            .collect()
    }
}
