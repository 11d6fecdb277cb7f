//! Fonts and pixels for the inkbox engine.
//!
//! `inkbox-layout` decides where everything goes; this crate supplies the
//! two platform pieces it deliberately leaves out:
//!
//! - [`FontdueMeasurer`] - a [`inkbox_layout::TextMeasurer`] backed by real
//!   font files loaded into a [`FontLibrary`]
//! - [`RasterSurface`] - an [`inkbox_layout::Surface`] that draws into an
//!   RGBA image and saves it as PNG

/// Font loading and measurement.
pub mod font_metrics;
/// Software rasterization.
pub mod raster;

pub use font_metrics::{FontError, FontLibrary, FontVariant, FontdueMeasurer};
pub use raster::RasterSurface;
