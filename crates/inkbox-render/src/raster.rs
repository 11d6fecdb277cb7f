//! Software rasterizer for headless rendering.
//!
//! A [`Surface`] over an RGBA pixel buffer, using fontdue for glyphs.
//!
//! ```text
//! BoxTree → Layout → Paint → Surface
//!                              ↓
//!                            Pixels
//! ```
//!
//! The rasterizer knows nothing about boxes or layout. It fills rectangles
//! and draws glyph runs where it is told to.

use std::path::Path;

use anyhow::{Context, Result};
use image::{ImageBuffer, Rgba, RgbaImage};
use inkbox_common::warning::warn_once;
use inkbox_layout::{ColorValue, FontDescriptor, Point, Rect, Surface};

use crate::font_metrics::FontLibrary;

/// Pixel span `[x0, x1) × [y0, y1)` inside the buffer.
#[derive(Debug, Clone, Copy)]
struct PixelSpan {
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
}

impl PixelSpan {
    fn contains(self, x: i64, y: i64) -> bool {
        (i64::from(self.x0)..i64::from(self.x1)).contains(&x)
            && (i64::from(self.y0)..i64::from(self.y1)).contains(&y)
    }
}

/// Surface that draws into an in-memory RGBA image.
pub struct RasterSurface<'a> {
    /// RGBA pixel buffer
    buffer: RgbaImage,
    /// Faces used by `draw_text`
    fonts: &'a FontLibrary,
}

impl<'a> RasterSurface<'a> {
    /// Create a `width` × `height` surface filled with `background`.
    #[must_use]
    pub fn new(width: u32, height: u32, background: ColorValue, fonts: &'a FontLibrary) -> Self {
        Self {
            buffer: ImageBuffer::from_pixel(width, height, to_rgba(background)),
            fonts,
        }
    }

    /// The pixels drawn so far.
    #[must_use]
    pub const fn image(&self) -> &RgbaImage {
        &self.buffer
    }

    /// Consume the surface and return its pixels.
    #[must_use]
    pub fn into_image(self) -> RgbaImage {
        self.buffer
    }

    /// Save the rendered image to a file. The format follows the extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be encoded or written.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.buffer
            .save(path)
            .with_context(|| format!("failed to save image to '{}'", path.display()))
    }

    /// Pixels whose centers fall inside `rect`, clamped to the buffer.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn pixel_span(&self, rect: Rect) -> Option<PixelSpan> {
        let (width, height) = self.buffer.dimensions();
        let clamp = |value: f32, max: u32| value.round().clamp(0.0, max as f32) as u32;
        let span = PixelSpan {
            x0: clamp(rect.x, width),
            y0: clamp(rect.y, height),
            x1: clamp(rect.right(), width),
            y1: clamp(rect.bottom(), height),
        };
        (span.x0 < span.x1 && span.y0 < span.y1).then_some(span)
    }

    fn blend(&mut self, x: u32, y: u32, color: ColorValue, coverage: u8) {
        let alpha = (u16::from(coverage) * u16::from(color.a) / 255).min(255);
        let alpha = u8::try_from(alpha).unwrap_or(u8::MAX);
        if alpha == 0 {
            return;
        }
        let background = *self.buffer.get_pixel(x, y);
        self.buffer
            .put_pixel(x, y, alpha_blend(to_rgba(color), background, alpha));
    }
}

impl Surface for RasterSurface<'_> {
    fn fill_rect(&mut self, rect: Rect, color: ColorValue) {
        let Some(span) = self.pixel_span(rect) else {
            return;
        };
        for y in span.y0..span.y1 {
            for x in span.x0..span.x1 {
                self.blend(x, y, color, u8::MAX);
            }
        }
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_possible_wrap
    )]
    fn draw_text(
        &mut self,
        text: &str,
        origin: Point,
        font: &FontDescriptor,
        color: ColorValue,
        clip: Option<Rect>,
    ) {
        let fonts = self.fonts;
        let Some(face) = fonts.resolve(font) else {
            let _ = warn_once(
                "Render",
                &format!("no font loaded for family '{}', text not drawn", font.family),
            );
            return;
        };

        let (width, height) = self.buffer.dimensions();
        let limits = match clip {
            Some(clip) => match self.pixel_span(clip) {
                Some(span) => span,
                None => return,
            },
            None => PixelSpan {
                x0: 0,
                y0: 0,
                x1: width,
                y1: height,
            },
        };

        let baseline = origin.y.round() as i64;
        let mut cursor_x = origin.x;
        for ch in text.chars().filter(|ch| !ch.is_control()) {
            let (metrics, bitmap) = face.rasterize(ch, font.size);

            // fontdue's ymin is the offset from the baseline to the
            // bottom of the bitmap, positive upwards.
            let glyph_x = cursor_x.round() as i64 + i64::from(metrics.xmin);
            let glyph_top = baseline - i64::from(metrics.ymin) - metrics.height as i64;

            for (index, &coverage) in bitmap.iter().enumerate() {
                if coverage == 0 {
                    continue;
                }
                let px = glyph_x + (index % metrics.width) as i64;
                let py = glyph_top + (index / metrics.width) as i64;
                if limits.contains(px, py) {
                    self.blend(px as u32, py as u32, color, coverage);
                }
            }

            cursor_x += metrics.advance_width;
        }
    }
}

const fn to_rgba(color: ColorValue) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, color.a])
}

/// Alpha blend a foreground color onto a background color.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn alpha_blend(fg: Rgba<u8>, bg: Rgba<u8>, alpha: u8) -> Rgba<u8> {
    let a = f32::from(alpha) / 255.0;
    let inv_a = 1.0 - a;

    Rgba([
        f32::from(fg[0]).mul_add(a, f32::from(bg[0]) * inv_a) as u8,
        f32::from(fg[1]).mul_add(a, f32::from(bg[1]) * inv_a) as u8,
        f32::from(fg[2]).mul_add(a, f32::from(bg[2]) * inv_a) as u8,
        f32::from(bg[3]).mul_add(inv_a, f32::from(alpha)) as u8,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_blend_extremes() {
        let red = Rgba([255, 0, 0, 255]);
        let white = Rgba([255, 255, 255, 255]);
        assert_eq!(alpha_blend(red, white, 255), red);
        assert_eq!(alpha_blend(red, white, 0), white);
    }

    #[test]
    fn test_pixel_span_clamps_to_buffer() {
        let fonts = FontLibrary::new();
        let surface = RasterSurface::new(10, 10, ColorValue::WHITE, &fonts);
        let span = surface
            .pixel_span(Rect::new(-5.0, 8.0, 20.0, 20.0))
            .unwrap();
        assert_eq!((span.x0, span.y0, span.x1, span.y1), (0, 8, 10, 10));
        assert!(surface.pixel_span(Rect::new(20.0, 0.0, 5.0, 5.0)).is_none());
    }
}
