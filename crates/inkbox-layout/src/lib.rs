//! Box-model text layout and painting for the inkbox engine.
//!
//! # Scope
//!
//! This crate implements:
//! - **Box tree** - an arena of styled boxes built by an external markup front end
//! - **White space policies** ([CSS Text § 3](https://www.w3.org/TR/css-text-3/#white-space-property))
//!   - Collapsing, line break elimination, and wrapping per `white-space` value
//! - **Word splitting** ([CSS Text § 4](https://www.w3.org/TR/css-text-3/#white-space-processing))
//!   - Printable runs, space runs, forced breaks, and tabs
//! - **Layout** ([CSS 2.1 § 9](https://www.w3.org/TR/CSS2/visuren.html))
//!   - Block stacking with margins, borders, and padding
//!   - Greedy line breaking, inline-blocks, text and vertical alignment
//! - **Painting** ([CSS 2.1 Appendix E](https://www.w3.org/TR/CSS2/zindex.html))
//!   - Backgrounds, borders, text, and decorations onto any [`Surface`]
//!
//! Text measurement is a capability supplied by the caller through
//! [`TextMeasurer`]; nothing here loads fonts or touches pixels.
//!
//! # Not Yet Implemented
//!
//! - Margin collapsing
//! - Bidirectional text and hyphenation
//! - Floats and positioned boxes

/// The styled box tree consumed by layout.
pub mod box_tree;
/// Layout per [CSS 2.1 Visual Formatting Model](https://www.w3.org/TR/CSS2/visuren.html).
pub mod layout;
/// Layout tunables.
pub mod options;
/// Painting per [CSS 2.1 Appendix E](https://www.w3.org/TR/CSS2/zindex.html).
pub mod paint;
/// Layout and paint in a single call.
pub mod pipeline;
/// Resolved style values.
pub mod style;

// Re-exports for convenience
pub use box_tree::{BoxContent, BoxId, BoxNode, BoxTree, BoxTreeError};
pub use layout::{
    ApproximateFontMetrics, BoxDimensions, EdgeSizes, FragmentContent, LayoutBox, LayoutBoxKind,
    LayoutEngine, Line, LineFragment, MeasureError, Point, Rect, Size, TextMeasurer, Word,
    WordKind, WordSplitter, normalize_source_text, split_words,
};
pub use options::LayoutOptions;
pub use paint::{DisplayCommand, DisplayList, Painter, Surface};
pub use pipeline::{measure_size, render};
pub use style::{
    BoxStyle, ColorValue, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE_PX, DisplayKind, FontDescriptor,
    FontStyle, ParseColorError, TextAlign, TextDecoration, VerticalAlign, WhiteSpace,
};
