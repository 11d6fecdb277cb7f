//! The `white-space` property and the processing policy it implies.
//!
//! [CSS Text Level 3 § 3 White Space and Wrapping](https://www.w3.org/TR/css-text-3/#white-space-property)

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use super::keyword::parse_keyword;

/// [§ 3 'white-space'](https://www.w3.org/TR/css-text-3/#white-space-property)
///
/// "This property specifies two things: whether and how white space inside
/// the element is collapsed, and whether lines may wrap at unforced soft
/// wrap opportunities."
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(from = "String", rename_all = "kebab-case")]
pub enum WhiteSpace {
    /// Collapse white space, eliminate source line breaks, wrap.
    #[default]
    Normal,
    /// Like `normal`, but never wrap.
    #[strum(serialize = "nowrap")]
    #[serde(rename = "nowrap")]
    NoWrap,
    /// Preserve white space and line breaks, never wrap.
    Pre,
    /// Collapse spaces, preserve line breaks, wrap.
    PreLine,
    /// Preserve white space and line breaks, wrap.
    PreWrap,
}

impl WhiteSpace {
    /// Parse a CSS keyword. Unknown keywords fall back to `normal` with a warning.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Self {
        parse_keyword("white-space", keyword)
    }

    /// Whether sequences of spaces and tabs collapse into a single space.
    ///
    /// True for `normal`, `nowrap` and `pre-line`.
    #[must_use]
    pub const fn collapses_white_space(self) -> bool {
        matches!(self, Self::Normal | Self::NoWrap | Self::PreLine)
    }

    /// Whether line breaks in the source text are treated as ordinary
    /// collapsible white space instead of forced breaks.
    ///
    /// True for `normal` and `nowrap`.
    #[must_use]
    pub const fn eliminates_line_breaks(self) -> bool {
        matches!(self, Self::Normal | Self::NoWrap)
    }

    /// Whether lines may wrap at soft wrap opportunities.
    #[must_use]
    pub const fn wraps(self) -> bool {
        !matches!(self, Self::NoWrap | Self::Pre)
    }
}

impl From<String> for WhiteSpace {
    fn from(keyword: String) -> Self {
        Self::from_keyword(&keyword)
    }
}
