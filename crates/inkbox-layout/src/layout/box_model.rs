//! Box model geometry.
//!
//! [CSS Box Model Module Level 3](https://www.w3.org/TR/css-box-3/)

use serde::{Deserialize, Serialize};

/// A point in surface coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    /// Horizontal position.
    pub x: f32,
    /// Vertical position.
    pub y: f32,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A width/height pair, as reported by size measurement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Size {
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

/// A rectangle positioned in 2D space.
///
/// [§ 3 The CSS Box Model](https://www.w3.org/TR/css-box-3/#box-model)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Rect {
    /// Horizontal position of the top-left corner.
    pub x: f32,
    /// Vertical position of the top-left corner.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (`x + width`).
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Top-left corner.
    #[must_use]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// True when the rectangle covers no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// The overlapping area of two rectangles, or `None` if they do not overlap.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        let clipped = Self::new(x, y, right - x, bottom - y);
        (!clipped.is_empty()).then_some(clipped)
    }

    /// True when the rectangles touch or overlap. Unlike [`Rect::intersect`]
    /// this holds for a zero-width rectangle lying inside `self`.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.x <= other.right()
            && other.x <= self.right()
            && self.y <= other.bottom()
            && other.y <= self.bottom()
    }

    /// True when `other` lies entirely inside this rectangle.
    #[must_use]
    pub fn contains_rect(&self, other: &Self) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// The same rectangle moved by `(dx, dy)`.
    #[must_use]
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// Edge sizes for padding, border, or margin.
///
/// [§ 3 The CSS Box Model](https://www.w3.org/TR/css-box-3/#box-model)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeSizes {
    /// Top edge size.
    pub top: f32,
    /// Right edge size.
    pub right: f32,
    /// Bottom edge size.
    pub bottom: f32,
    /// Left edge size.
    pub left: f32,
}

impl EdgeSizes {
    /// Edges listed clockwise from the top, as in the CSS shorthand.
    #[must_use]
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// The same size on all four sides.
    #[must_use]
    pub const fn uniform(size: f32) -> Self {
        Self::new(size, size, size, size)
    }

    /// `left + right`.
    #[must_use]
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// `top + bottom`.
    #[must_use]
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// [§ 3. The CSS Box Model](https://www.w3.org/TR/css-box-3/#box-model)
///
/// "Each box has a content area and optional surrounding padding, border,
/// and margin areas."
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BoxDimensions {
    /// Content area position and size.
    pub content: Rect,
    /// Padding thickness around the content.
    pub padding: EdgeSizes,
    /// Border thickness around the padding.
    pub border: EdgeSizes,
    /// Margin thickness around the border.
    pub margin: EdgeSizes,
}

impl BoxDimensions {
    // ┌───────────────────────────────┐
    // │ margin                        │
    // │   ┌───────────────────────┐   │
    // │   │ border                │   │
    // │   │   ┌───────────────┐   │   │
    // │   │   │ padding       │   │   │
    // │   │   │   ┌───────┐   │   │   │
    // │   │   │   │CONTENT│   │   │   │
    // │   │   │   └───────┘   │   │   │
    // │   │   └───────────────┘   │   │
    // │   └───────────────────────┘   │
    // └───────────────────────────────┘

    /// "The padding box contains both the content and padding areas."
    #[must_use]
    pub fn padding_box(&self) -> Rect {
        expand(self.content, &self.padding)
    }

    /// "The border box contains content, padding, and border areas."
    #[must_use]
    pub fn border_box(&self) -> Rect {
        expand(self.padding_box(), &self.border)
    }

    /// "The margin box is the outermost box, and contains all four areas."
    #[must_use]
    pub fn margin_box(&self) -> Rect {
        expand(self.border_box(), &self.margin)
    }

    /// Sum of margin, border and padding on the left and right.
    #[must_use]
    pub fn horizontal_edges(&self) -> f32 {
        self.margin.horizontal() + self.border.horizontal() + self.padding.horizontal()
    }

    /// Sum of margin, border and padding on the top and bottom.
    #[must_use]
    pub fn vertical_edges(&self) -> f32 {
        self.margin.vertical() + self.border.vertical() + self.padding.vertical()
    }
}

fn expand(rect: Rect, edges: &EdgeSizes) -> Rect {
    Rect {
        x: rect.x - edges.left,
        y: rect.y - edges.top,
        width: rect.width + edges.horizontal(),
        height: rect.height + edges.vertical(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BoxDimensions {
        BoxDimensions {
            content: Rect::new(20.0, 30.0, 100.0, 50.0),
            padding: EdgeSizes::uniform(5.0),
            border: EdgeSizes::new(1.0, 2.0, 3.0, 4.0),
            margin: EdgeSizes::uniform(10.0),
        }
    }

    #[test]
    fn test_box_nesting() {
        let dims = sample();
        assert_eq!(dims.padding_box(), Rect::new(15.0, 25.0, 110.0, 60.0));
        assert_eq!(dims.border_box(), Rect::new(11.0, 24.0, 116.0, 64.0));
        assert_eq!(dims.margin_box(), Rect::new(1.0, 14.0, 136.0, 84.0));
        assert!((dims.horizontal_edges() - 36.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert_eq!(a.intersect(&b), Some(Rect::new(5.0, 5.0, 5.0, 5.0)));
        assert_eq!(a.intersect(&Rect::new(10.0, 0.0, 5.0, 5.0)), None);
        assert!(b.contains_rect(&Rect::new(6.0, 6.0, 2.0, 2.0)));
    }

    #[test]
    fn test_overlaps_includes_zero_width() {
        let area = Rect::new(0.0, 0.0, 200.0, 100.0);
        let caret = Rect::new(0.0, 0.0, 0.0, 12.0);
        assert!(area.intersect(&caret).is_none());
        assert!(area.overlaps(&caret));
        assert!(!area.overlaps(&Rect::new(201.0, 0.0, 0.0, 12.0)));
        assert!(!area.overlaps(&Rect::new(0.0, 150.0, 10.0, 12.0)));
    }
}
