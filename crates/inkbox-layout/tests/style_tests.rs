//! Integration tests for style values and their keyword parsing.

use inkbox_layout::{
    BoxStyle, ColorValue, DisplayKind, FontDescriptor, FontStyle, TextAlign, TextDecoration,
    VerticalAlign, WhiteSpace,
};

#[test]
fn test_hex_colors() {
    assert_eq!(ColorValue::from_hex("#fff"), Some(ColorValue::WHITE));
    assert_eq!(ColorValue::from_hex("#ff000080").map(|c| c.a), Some(0x80));
    assert_eq!(ColorValue::from_hex("#12345"), None);
    assert_eq!(ColorValue::from_hex("#zzz"), None);
}

#[test]
fn test_color_from_str() {
    assert_eq!("Red".parse::<ColorValue>(), Ok(ColorValue::rgb(255, 0, 0)));
    assert_eq!(" #00ff00 ".parse::<ColorValue>(), Ok(ColorValue::rgb(0, 255, 0)));
    assert!("not-a-color".parse::<ColorValue>().is_err());
}

#[test]
fn test_color_display() {
    assert_eq!(ColorValue::rgb(255, 165, 0).to_string(), "#ffa500");
    assert_eq!(ColorValue::TRANSPARENT.to_string(), "#00000000");
}

#[test]
fn test_color_serde() {
    let color: ColorValue = serde_json::from_str("\"navy\"").unwrap();
    assert_eq!(color, ColorValue::rgb(0, 0, 128));
    assert_eq!(serde_json::to_string(&color).unwrap(), "\"#000080\"");
    assert!(serde_json::from_str::<ColorValue>("\"nope\"").is_err());
}

#[test]
fn test_keywords_are_lenient() {
    assert_eq!(DisplayKind::from_keyword("inline-block"), DisplayKind::InlineBlock);
    assert_eq!(DisplayKind::from_keyword("flex"), DisplayKind::Inline);
    assert_eq!(TextAlign::from_keyword(" CENTER "), TextAlign::Center);
    assert_eq!(TextAlign::from_keyword("start"), TextAlign::Left);
    assert_eq!(VerticalAlign::from_keyword("middle"), VerticalAlign::Middle);
    assert_eq!(TextDecoration::from_keyword("line-through"), TextDecoration::LineThrough);
    assert_eq!(WhiteSpace::from_keyword("pre-wrap"), WhiteSpace::PreWrap);
    assert_eq!(WhiteSpace::from_keyword("break-spaces"), WhiteSpace::Normal);
}

#[test]
fn test_keywords_deserialize_leniently() {
    let align: TextAlign = serde_json::from_str("\"justify\"").unwrap();
    assert_eq!(align, TextAlign::Justify);
    let white_space: WhiteSpace = serde_json::from_str("\"bogus\"").unwrap();
    assert_eq!(white_space, WhiteSpace::Normal);
}

#[test]
fn test_font_descriptor() {
    let font = FontDescriptor::new("serif", 12.0)
        .with_weight(700)
        .with_style(FontStyle::Italic);
    assert!(font.is_bold());
    assert!(font.is_italic());
    assert!(!FontDescriptor::default().is_bold());
}

#[test]
fn test_inheritance_keeps_inherited_properties_only() {
    let parent = BoxStyle::block()
        .with_font(FontDescriptor::new("mono", 9.0))
        .with_color(ColorValue::rgb(1, 2, 3))
        .with_white_space(WhiteSpace::Pre)
        .with_text_align(TextAlign::Right)
        .with_background(ColorValue::WHITE)
        .with_size(Some(10.0), Some(20.0));
    let child = BoxStyle::inherit_from(&parent);

    assert_eq!(child.font, parent.font);
    assert_eq!(child.color, parent.color);
    assert_eq!(child.white_space, WhiteSpace::Pre);
    assert_eq!(child.text_align, TextAlign::Right);
    assert_eq!(child.display, DisplayKind::Inline);
    assert_eq!(child.background_color, None);
    assert_eq!(child.width, None);
}
