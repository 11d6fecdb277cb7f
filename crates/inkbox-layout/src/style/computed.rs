//! Resolved per-box style.

use serde::Serialize;

use crate::layout::box_model::EdgeSizes;

use super::{
    ColorValue, DisplayKind, FontDescriptor, TextAlign, TextDecoration, VerticalAlign, WhiteSpace,
};

/// The fully resolved style of one box.
///
/// The producer of the box tree (an HTML/CSS front end) resolves the
/// cascade; the layout engine and painter only read these values. Colors
/// and fonts are concrete here, never theme lookups.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxStyle {
    /// How the box participates in its parent's layout.
    pub display: DisplayKind,
    /// White space processing for text directly inside this box.
    pub white_space: WhiteSpace,
    /// Font used to measure and draw the box's text.
    pub font: FontDescriptor,
    /// Foreground (text and decoration) color.
    pub color: ColorValue,
    /// Background fill behind the border box, if any.
    pub background_color: Option<ColorValue>,
    /// Color of all four border sides.
    pub border_color: ColorValue,
    /// Margin thickness in pixels.
    pub margin: EdgeSizes,
    /// Border thickness in pixels.
    pub border: EdgeSizes,
    /// Padding thickness in pixels.
    pub padding: EdgeSizes,
    /// Horizontal alignment of the lines this box contains.
    pub text_align: TextAlign,
    /// Vertical alignment, see [`VerticalAlign`].
    pub vertical_align: VerticalAlign,
    /// Line decoration drawn with the text.
    pub text_decoration: TextDecoration,
    /// Explicit content width; `None` means `auto`.
    pub width: Option<f32>,
    /// Explicit content height; `None` means `auto`.
    pub height: Option<f32>,
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            display: DisplayKind::default(),
            white_space: WhiteSpace::default(),
            font: FontDescriptor::default(),
            color: ColorValue::BLACK,
            background_color: None,
            border_color: ColorValue::BLACK,
            margin: EdgeSizes::default(),
            border: EdgeSizes::default(),
            padding: EdgeSizes::default(),
            text_align: TextAlign::default(),
            vertical_align: VerticalAlign::default(),
            text_decoration: TextDecoration::default(),
            width: None,
            height: None,
        }
    }
}

impl BoxStyle {
    /// Default style with `display: block`.
    #[must_use]
    pub fn block() -> Self {
        Self {
            display: DisplayKind::Block,
            ..Self::default()
        }
    }

    /// Default style with `display: inline`.
    #[must_use]
    pub fn inline() -> Self {
        Self::default()
    }

    /// [§ 7 Inheritance](https://www.w3.org/TR/css-cascade-4/#inheriting)
    ///
    /// An inline child style: inherited properties (font, color,
    /// `white-space`, `text-align`, `text-decoration`) come from `parent`,
    /// everything else takes its initial value.
    #[must_use]
    pub fn inherit_from(parent: &Self) -> Self {
        Self {
            white_space: parent.white_space,
            font: parent.font.clone(),
            color: parent.color,
            text_align: parent.text_align,
            text_decoration: parent.text_decoration,
            ..Self::default()
        }
    }

    /// Same style with a different `display`.
    #[must_use]
    pub fn with_display(mut self, display: DisplayKind) -> Self {
        self.display = display;
        self
    }

    /// Same style with a different `white-space`.
    #[must_use]
    pub fn with_white_space(mut self, white_space: WhiteSpace) -> Self {
        self.white_space = white_space;
        self
    }

    /// Same style with a different font.
    #[must_use]
    pub fn with_font(mut self, font: FontDescriptor) -> Self {
        self.font = font;
        self
    }

    /// Same style with a different foreground color.
    #[must_use]
    pub fn with_color(mut self, color: ColorValue) -> Self {
        self.color = color;
        self
    }

    /// Same style with a background fill.
    #[must_use]
    pub fn with_background(mut self, color: ColorValue) -> Self {
        self.background_color = Some(color);
        self
    }

    /// Same style with a different `text-align`.
    #[must_use]
    pub fn with_text_align(mut self, text_align: TextAlign) -> Self {
        self.text_align = text_align;
        self
    }

    /// Same style with a different `vertical-align`.
    #[must_use]
    pub fn with_vertical_align(mut self, vertical_align: VerticalAlign) -> Self {
        self.vertical_align = vertical_align;
        self
    }

    /// Same style with a different `text-decoration`.
    #[must_use]
    pub fn with_text_decoration(mut self, text_decoration: TextDecoration) -> Self {
        self.text_decoration = text_decoration;
        self
    }

    /// Same style with the given margin, border and padding.
    #[must_use]
    pub fn with_edges(mut self, margin: EdgeSizes, border: EdgeSizes, padding: EdgeSizes) -> Self {
        self.margin = margin;
        self.border = border;
        self.padding = padding;
        self
    }

    /// Same style with explicit content dimensions.
    #[must_use]
    pub fn with_size(mut self, width: Option<f32>, height: Option<f32>) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}
