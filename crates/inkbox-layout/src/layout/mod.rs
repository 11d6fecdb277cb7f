//! Layout Engine
//!
//! Turns a styled box tree into positioned boxes and line boxes.
//!
//! # Relevant Specifications
//!
//! - [CSS Box Model Module Level 3](https://www.w3.org/TR/css-box-3/)
//! - [CSS 2.1 Visual Formatting Model](https://www.w3.org/TR/CSS2/visuren.html)
//! - [CSS Text Module Level 3](https://www.w3.org/TR/css-text-3/)
//!
//! # Module Structure
//!
//! - [`box_model`] - Box dimensions, rectangles, and edge sizes
//! - [`words`] - Splitting text boxes into words
//! - [`metrics`] - The text measurement capability
//! - [`inline`] - Line breaking and the line box model
//! - [`layout_box`] - Layout boxes and block layout

pub mod box_model;
pub mod inline;
pub mod layout_box;
pub mod metrics;
pub mod words;

// Re-exports for convenience
pub use box_model::{BoxDimensions, EdgeSizes, Point, Rect, Size};
pub use inline::{FragmentContent, Line, LineFragment};
pub use layout_box::{LayoutBox, LayoutBoxKind, LayoutEngine};
pub use metrics::{ApproximateFontMetrics, MeasureError, TextMeasurer};
pub use words::{Word, WordKind, WordSplitter, normalize_source_text, split_words};
