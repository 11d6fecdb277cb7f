//! Painting
//!
//! [CSS 2.1 Appendix E - Elaborate description of Stacking Contexts](https://www.w3.org/TR/CSS2/zindex.html)
//!
//! Converts a layout tree into drawing calls against a [`Surface`]. The
//! painter never touches pixels itself, so any backend (a raster image, a
//! recording [`DisplayList`], a window) can receive the output.
//!
//! ```text
//! BoxTree → Layout → Paint → Surface
//! ```

mod display_list;
mod painter;
mod surface;

pub use display_list::{DisplayCommand, DisplayList};
pub use painter::Painter;
pub use surface::Surface;
