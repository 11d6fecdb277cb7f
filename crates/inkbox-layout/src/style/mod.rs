//! Resolved style values.
//!
//! Every box in the tree carries a [`BoxStyle`] whose values were resolved
//! by whoever built the tree. This module only defines the value types and
//! their lenient keyword parsing.

mod align;
mod color;
mod computed;
mod display;
mod font;
mod keyword;
mod white_space;

pub use align::{TextAlign, TextDecoration, VerticalAlign};
pub use color::{ColorValue, ParseColorError};
pub use computed::BoxStyle;
pub use display::DisplayKind;
pub use font::{DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE_PX, FontDescriptor, FontStyle};
pub use white_space::WhiteSpace;
