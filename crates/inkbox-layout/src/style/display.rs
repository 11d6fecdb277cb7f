//! Display kinds supported by the engine.
//!
//! [§ 2 Box Layout Modes: the display property](https://www.w3.org/TR/css-display-3/#the-display-properties)

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use super::keyword::parse_keyword;

/// The subset of `display` values the engine lays out.
///
/// [§ 2.1 Outer Display Roles](https://www.w3.org/TR/css-display-3/#outer-role)
///
/// "The `<display-outside>` keywords specify the element's outer display type,
/// which is essentially its principal box's role in flow layout."
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(from = "String", rename_all = "kebab-case")]
pub enum DisplayKind {
    /// "The element generates a block-level box when placed in flow layout."
    Block,
    /// "The element generates an inline-level box when placed in flow layout."
    #[default]
    Inline,
    /// An inline-level box whose contents form their own block.
    InlineBlock,
}

impl DisplayKind {
    /// Parse a CSS keyword. Unknown keywords fall back to `inline`.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Self {
        parse_keyword("display", keyword)
    }

    /// True for boxes that stack vertically in their parent.
    #[must_use]
    pub const fn is_block_level(self) -> bool {
        matches!(self, Self::Block)
    }

    /// True for boxes that participate in their parent's line boxes.
    #[must_use]
    pub const fn is_inline_level(self) -> bool {
        !self.is_block_level()
    }
}

impl From<String> for DisplayKind {
    fn from(keyword: String) -> Self {
        Self::from_keyword(&keyword)
    }
}
