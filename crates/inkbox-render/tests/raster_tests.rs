//! Integration tests for font loading and rasterization.

use std::path::Path;

use inkbox_common::warning::has_warned;
use inkbox_layout::{
    ApproximateFontMetrics, BoxStyle, BoxTree, ColorValue, FontDescriptor, LayoutOptions,
    MeasureError, Point, Rect, Surface, TextMeasurer, render,
};
use inkbox_render::{FontError, FontLibrary, FontVariant, FontdueMeasurer, RasterSurface};

const RED: ColorValue = ColorValue::rgb(255, 0, 0);

fn pixel(surface: &RasterSurface<'_>, x: u32, y: u32) -> [u8; 4] {
    surface.image().get_pixel(x, y).0
}

#[test]
fn test_new_surface_is_filled_with_background() {
    let fonts = FontLibrary::new();
    let surface = RasterSurface::new(4, 3, ColorValue::WHITE, &fonts);
    assert_eq!(surface.image().dimensions(), (4, 3));
    assert_eq!(pixel(&surface, 3, 2), [255, 255, 255, 255]);
}

#[test]
fn test_fill_rect_covers_exact_pixels() {
    let fonts = FontLibrary::new();
    let mut surface = RasterSurface::new(10, 10, ColorValue::WHITE, &fonts);
    surface.fill_rect(Rect::new(2.0, 3.0, 4.0, 2.0), RED);

    assert_eq!(pixel(&surface, 2, 3), [255, 0, 0, 255]);
    assert_eq!(pixel(&surface, 5, 4), [255, 0, 0, 255]);
    assert_eq!(pixel(&surface, 6, 4), [255, 255, 255, 255]);
    assert_eq!(pixel(&surface, 2, 5), [255, 255, 255, 255]);
    assert_eq!(pixel(&surface, 1, 3), [255, 255, 255, 255]);
}

#[test]
fn test_fill_rect_outside_buffer_is_ignored() {
    let fonts = FontLibrary::new();
    let mut surface = RasterSurface::new(5, 5, ColorValue::WHITE, &fonts);
    surface.fill_rect(Rect::new(-20.0, -20.0, 10.0, 10.0), RED);
    surface.fill_rect(Rect::new(50.0, 0.0, 10.0, 10.0), RED);
    assert!(surface.image().pixels().all(|p| p.0 == [255, 255, 255, 255]));

    surface.fill_rect(Rect::new(-2.0, -2.0, 4.0, 4.0), RED);
    assert_eq!(pixel(&surface, 0, 0), [255, 0, 0, 255]);
    assert_eq!(pixel(&surface, 2, 2), [255, 255, 255, 255]);
}

#[test]
fn test_translucent_fill_blends_with_background() {
    let fonts = FontLibrary::new();
    let mut surface = RasterSurface::new(1, 1, ColorValue::WHITE, &fonts);
    let half_black = ColorValue { a: 128, ..ColorValue::BLACK };
    surface.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), half_black);

    let [r, g, b, a] = pixel(&surface, 0, 0);
    assert!((120..=135).contains(&r), "red channel {r}");
    assert_eq!((r, r), (g, b));
    assert_eq!(a, 255);
}

#[test]
fn test_draw_text_without_fonts_draws_nothing() {
    let fonts = FontLibrary::new();
    let mut surface = RasterSurface::new(40, 20, ColorValue::WHITE, &fonts);
    surface.draw_text(
        "ghost",
        Point::new(0.0, 15.0),
        &FontDescriptor::new("no-such-face", 12.0),
        ColorValue::BLACK,
        None,
    );
    assert!(surface.image().pixels().all(|p| p.0 == [255, 255, 255, 255]));
    assert!(has_warned(
        "Render",
        "no font loaded for family 'no-such-face', text not drawn"
    ));
}

#[test]
fn test_measurer_reports_missing_font() {
    let fonts = FontLibrary::new();
    let measurer = FontdueMeasurer::new(&fonts);
    let font = FontDescriptor::new("serif", 12.0);
    assert!(matches!(
        measurer.text_width("abc", &font),
        Err(MeasureError::UnknownFont(family)) if family == "serif"
    ));
}

#[test]
fn test_measurer_rejects_invalid_size() {
    let fonts = FontLibrary::new();
    let measurer = FontdueMeasurer::new(&fonts);
    let font = FontDescriptor::new("serif", f32::NAN);
    assert!(matches!(
        measurer.line_height(&font),
        Err(MeasureError::InvalidSize(_))
    ));
}

#[test]
fn test_load_missing_file_is_io_error() {
    let mut fonts = FontLibrary::new();
    let result = fonts.load_file(
        "missing",
        FontVariant::Regular,
        Path::new("/definitely/not/a/font.ttf"),
    );
    assert!(matches!(result, Err(FontError::Io { .. })));
    assert!(fonts.is_empty());
}

#[test]
fn test_load_non_font_is_parse_error() {
    let path = std::env::temp_dir().join(format!("inkbox-not-a-font-{}.ttf", std::process::id()));
    std::fs::write(&path, b"this is not a font").unwrap();

    let mut fonts = FontLibrary::new();
    let result = fonts.load_file("junk", FontVariant::Regular, &path);
    let _ = std::fs::remove_file(&path);

    assert!(matches!(result, Err(FontError::Parse { .. })));
    assert!(fonts.is_empty());
}

#[test]
fn test_variant_follows_descriptor() {
    let font = FontDescriptor::new("serif", 12.0).with_weight(700);
    assert_eq!(FontVariant::for_descriptor(&font), FontVariant::Bold);
    assert_eq!(
        FontVariant::for_descriptor(&FontDescriptor::new("serif", 12.0)),
        FontVariant::Regular
    );
}

/// Exercises real glyphs when the host has a system font; otherwise only
/// checks that the search reports failure cleanly.
#[test]
fn test_system_font_measures_and_draws() {
    let mut fonts = FontLibrary::new();
    assert_eq!(fonts.families().count(), 0);
    if !fonts.load_system_fonts() {
        assert!(fonts.is_empty());
        return;
    }
    assert!(fonts.families().any(|family| family == "sans-serif"));

    let font = FontDescriptor::new("some-unregistered-family", 16.0);
    let measurer = FontdueMeasurer::new(&fonts);
    let narrow = measurer.text_width("i", &font).unwrap();
    let wide = measurer.text_width("iiii", &font).unwrap();
    assert!(narrow > 0.0);
    assert!((wide - narrow * 4.0).abs() < 0.01);
    assert!(measurer.line_height(&font).unwrap() > 0.0);

    let mut surface = RasterSurface::new(80, 30, ColorValue::WHITE, &fonts);
    surface.draw_text("Hello", Point::new(2.0, 20.0), &font, ColorValue::BLACK, None);
    assert!(surface.image().pixels().any(|p| p.0 != [255, 255, 255, 255]));

    // A clip that excludes everything leaves the buffer untouched.
    let mut clipped = RasterSurface::new(80, 30, ColorValue::WHITE, &fonts);
    clipped.draw_text(
        "Hello",
        Point::new(2.0, 20.0),
        &font,
        ColorValue::BLACK,
        Some(Rect::new(70.0, 0.0, 10.0, 30.0)),
    );
    assert!(clipped.image().pixels().all(|p| p.0 == [255, 255, 255, 255]));
}

#[test]
fn test_pipeline_renders_backgrounds_into_pixels() {
    let style = BoxStyle::block()
        .with_font(FontDescriptor::new("test", 10.0))
        .with_background(RED);
    let mut tree = BoxTree::new(style.clone());
    let root = tree.root();
    let _ = tree
        .append_text(root, BoxStyle::inherit_from(&style), "boxed")
        .unwrap();

    let fonts = FontLibrary::new();
    let mut surface = RasterSurface::new(50, 30, ColorValue::WHITE, &fonts);
    let layout = render(
        &tree,
        root,
        Rect::new(0.0, 0.0, 50.0, 30.0),
        true,
        &ApproximateFontMetrics,
        &mut surface,
        &LayoutOptions::default(),
    );

    assert_eq!(layout.lines_text(), ["boxed"]);
    assert_eq!(pixel(&surface, 0, 0), [255, 0, 0, 255]);
    assert_eq!(pixel(&surface, 49, 11), [255, 0, 0, 255]);
    assert_eq!(pixel(&surface, 0, 12), [255, 255, 255, 255]);
}

#[test]
fn test_save_writes_png() {
    let fonts = FontLibrary::new();
    let mut surface = RasterSurface::new(3, 3, ColorValue::WHITE, &fonts);
    surface.fill_rect(Rect::new(1.0, 1.0, 1.0, 1.0), RED);

    let path = std::env::temp_dir().join(format!("inkbox-save-{}.png", std::process::id()));
    surface.save(&path).unwrap();
    let decoded = image::open(&path).unwrap().into_rgba8();
    let _ = std::fs::remove_file(&path);

    assert_eq!(decoded.get_pixel(1, 1).0, [255, 0, 0, 255]);
    assert_eq!(decoded.get_pixel(0, 0).0, [255, 255, 255, 255]);
    assert_eq!(decoded, surface.into_image());
}
