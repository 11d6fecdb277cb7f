//! Alignment and decoration keywords.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use super::keyword::parse_keyword;

/// [§ 16.2 Alignment: the 'text-align' property](https://www.w3.org/TR/CSS2/text.html#alignment-prop)
///
/// "This property describes how inline-level content of a block container
/// is aligned."
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(from = "String", rename_all = "kebab-case")]
pub enum TextAlign {
    /// Lines start at the left content edge.
    #[default]
    Left,
    /// Lines are centered in the content box.
    Center,
    /// Lines end at the right content edge.
    Right,
    /// Wrapped lines are stretched to the full content width.
    Justify,
}

impl TextAlign {
    /// Parse a CSS keyword. Unknown keywords fall back to `left`.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Self {
        parse_keyword("text-align", keyword)
    }
}

impl From<String> for TextAlign {
    fn from(keyword: String) -> Self {
        Self::from_keyword(&keyword)
    }
}

/// [§ 10.8 'vertical-align'](https://www.w3.org/TR/CSS2/visudet.html#propdef-vertical-align)
///
/// On inline content this positions a fragment inside its line box. On a
/// block with an explicit height (or the root of a render) it positions the
/// block's content inside that height, the way a table cell does.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(from = "String", rename_all = "kebab-case")]
pub enum VerticalAlign {
    /// "Align the baseline of the box with the baseline of the parent box."
    #[default]
    Baseline,
    /// "Align the top of the aligned subtree with the top of the line box."
    Top,
    /// Center the box vertically.
    Middle,
    /// "Align the bottom of the aligned subtree with the bottom of the line box."
    Bottom,
}

impl VerticalAlign {
    /// Parse a CSS keyword. Unknown keywords fall back to `baseline`.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Self {
        parse_keyword("vertical-align", keyword)
    }

    /// Fraction of the free vertical space placed above the content.
    ///
    /// Block content has no baseline to align to, so `baseline` acts as `top`.
    #[must_use]
    pub const fn block_offset_factor(self) -> f32 {
        match self {
            Self::Baseline | Self::Top => 0.0,
            Self::Middle => 0.5,
            Self::Bottom => 1.0,
        }
    }
}

impl From<String> for VerticalAlign {
    fn from(keyword: String) -> Self {
        Self::from_keyword(&keyword)
    }
}

/// [§ 2 'text-decoration-line'](https://www.w3.org/TR/css-text-decor-3/#text-decoration-line-property)
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(from = "String", rename_all = "kebab-case")]
pub enum TextDecoration {
    /// No decoration.
    #[default]
    None,
    /// A line below the text.
    Underline,
    /// A line through the middle of the text.
    LineThrough,
}

impl From<String> for TextDecoration {
    fn from(keyword: String) -> Self {
        parse_keyword("text-decoration", &keyword)
    }
}
