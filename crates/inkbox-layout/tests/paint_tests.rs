//! Integration tests for painting.

use inkbox_layout::{
    ApproximateFontMetrics, BoxStyle, BoxTree, ColorValue, DisplayCommand, DisplayList,
    EdgeSizes, FontDescriptor, LayoutEngine, LayoutOptions, MeasureError, Painter, Point, Rect,
    TextDecoration, TextMeasurer, WhiteSpace, render,
};

fn approx(actual: f32, expected: f32) -> bool {
    (actual - expected).abs() < 0.001
}

fn root_style() -> BoxStyle {
    BoxStyle::block().with_font(FontDescriptor::new("test", 10.0))
}

fn text_tree(text: &str, style: BoxStyle) -> BoxTree {
    let mut tree = BoxTree::new(style.clone());
    let root = tree.root();
    let _ = tree
        .append_text(root, BoxStyle::inherit_from(&style), text)
        .unwrap();
    tree
}

fn paint_into(tree: &BoxTree, area: Rect, clip: bool) -> DisplayList {
    let mut list = DisplayList::new();
    let _ = render(
        tree,
        tree.root(),
        area,
        clip,
        &ApproximateFontMetrics,
        &mut list,
        &LayoutOptions::default(),
    );
    list
}

fn fill_rects(list: &DisplayList) -> Vec<Rect> {
    list.commands()
        .iter()
        .filter_map(|command| match command {
            DisplayCommand::FillRect { rect, .. } => Some(*rect),
            DisplayCommand::DrawText { .. } => None,
        })
        .collect()
}

#[test]
fn test_painting_twice_is_identical() {
    let tree = text_tree("paint me twice please", root_style().with_background(ColorValue::WHITE));
    let layout = LayoutEngine::new(&tree, &ApproximateFontMetrics)
        .layout(tree.root(), Rect::new(0.0, 0.0, 60.0, 0.0));
    let painter = Painter::new(&tree);

    let mut first = DisplayList::new();
    painter.paint(&layout, None, &mut first);
    let mut second = DisplayList::new();
    painter.paint(&layout, None, &mut second);

    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn test_background_then_borders_then_text() {
    let style = root_style()
        .with_background(ColorValue::WHITE)
        .with_edges(EdgeSizes::default(), EdgeSizes::uniform(1.0), EdgeSizes::default());
    let list = paint_into(&text_tree("hi there", style), Rect::new(0.0, 0.0, 100.0, 0.0), false);

    let commands = list.commands();
    assert_eq!(commands.len(), 7);
    assert_eq!(
        commands[0],
        DisplayCommand::FillRect {
            rect: Rect::new(0.0, 0.0, 100.0, 14.0),
            color: ColorValue::WHITE,
        }
    );
    assert_eq!(
        fill_rects(&list)[1..],
        [
            Rect::new(0.0, 0.0, 100.0, 1.0),
            Rect::new(0.0, 13.0, 100.0, 1.0),
            Rect::new(0.0, 1.0, 1.0, 12.0),
            Rect::new(99.0, 1.0, 1.0, 12.0),
        ]
    );
    assert_eq!(list.texts(), ["hi", "there"]);
}

#[test]
fn test_text_origin_is_on_baseline() {
    let list = paint_into(&text_tree("a b", root_style()), Rect::new(0.0, 0.0, 100.0, 0.0), false);
    let origins: Vec<Point> = list
        .commands()
        .iter()
        .filter_map(|command| match command {
            DisplayCommand::DrawText { origin, .. } => Some(*origin),
            DisplayCommand::FillRect { .. } => None,
        })
        .collect();
    assert_eq!(origins.len(), 2);
    assert!(approx(origins[0].y, 9.6));
    assert!(approx(origins[1].x, 12.0));
}

#[test]
fn test_breaks_and_spaces_are_not_drawn_as_text() {
    let style = root_style().with_white_space(WhiteSpace::Pre);
    let list = paint_into(&text_tree("a  b\n\tc", style), Rect::new(0.0, 0.0, 200.0, 0.0), false);
    assert_eq!(list.texts(), ["a", "b", "c"]);
}

#[test]
fn test_clip_limits_drawing() {
    let tree = text_tree("aaa bbb ccc", root_style().with_background(ColorValue::WHITE));
    let clip = Rect::new(0.0, 0.0, 20.0, 12.0);
    let list = paint_into(&tree, clip, true);

    assert_eq!(list.texts(), ["aaa"]);
    for rect in fill_rects(&list) {
        assert!(clip.contains_rect(&rect), "{rect:?} escapes the clip");
    }
    for command in list.commands() {
        if let DisplayCommand::DrawText { clip: text_clip, .. } = command {
            assert_eq!(*text_clip, Some(clip));
        }
    }
}

#[test]
fn test_without_clip_everything_is_drawn() {
    let tree = text_tree("aaa bbb ccc", root_style());
    let list = paint_into(&tree, Rect::new(0.0, 0.0, 20.0, 12.0), false);
    assert_eq!(list.texts(), ["aaa", "bbb", "ccc"]);
}

/// Measures every run as unmeasurable, so words lay out zero-width.
struct NoWidthMeasurer;

impl TextMeasurer for NoWidthMeasurer {
    fn text_width(&self, _text: &str, font: &FontDescriptor) -> Result<f32, MeasureError> {
        Err(MeasureError::UnknownFont(font.family.clone()))
    }

    fn line_height(&self, font: &FontDescriptor) -> Result<f32, MeasureError> {
        ApproximateFontMetrics.line_height(font)
    }
}

#[test]
fn test_zero_width_words_inside_clip_are_drawn() {
    let tree = text_tree("Hello World", root_style());
    let area = Rect::new(0.0, 0.0, 200.0, 100.0);
    for clip in [true, false] {
        let mut list = DisplayList::new();
        let _ = render(
            &tree,
            tree.root(),
            area,
            clip,
            &NoWidthMeasurer,
            &mut list,
            &LayoutOptions::default(),
        );
        assert_eq!(list.texts(), ["Hello", "World"], "clip = {clip}");
    }
}

#[test]
fn test_inline_background_painted_behind_word() {
    let style = root_style();
    let mut tree = BoxTree::new(style.clone());
    let root = tree.root();
    let span = tree
        .append_container(root, BoxStyle::inherit_from(&style).with_background(ColorValue::rgb(255, 255, 0)))
        .unwrap();
    let _ = tree.append_text(span, BoxStyle::inherit_from(&style), "mark").unwrap();

    let list = paint_into(&tree, Rect::new(0.0, 0.0, 100.0, 0.0), false);
    assert_eq!(list.len(), 2);
    assert_eq!(
        list.commands()[0],
        DisplayCommand::FillRect {
            rect: Rect::new(0.0, 0.0, 24.0, 12.0),
            color: ColorValue::rgb(255, 255, 0),
        }
    );
    assert!(matches!(list.commands()[1], DisplayCommand::DrawText { .. }));
}

#[test]
fn test_underline_follows_text() {
    let style = root_style().with_text_decoration(TextDecoration::Underline);
    let list = paint_into(&text_tree("under", style), Rect::new(0.0, 0.0, 100.0, 0.0), false);
    let commands = list.commands();
    assert_eq!(commands.len(), 2);
    let DisplayCommand::FillRect { rect, color } = &commands[1] else {
        panic!("expected the underline after the text");
    };
    assert_eq!(*color, ColorValue::BLACK);
    assert!(approx(rect.y, 10.6));
    assert!(approx(rect.width, 30.0));
    assert!(approx(rect.height, 1.0));
}

#[test]
fn test_transparent_fills_are_skipped() {
    let style = root_style().with_background(ColorValue::TRANSPARENT);
    let list = paint_into(&text_tree("x", style), Rect::new(0.0, 0.0, 100.0, 0.0), false);
    assert_eq!(list.texts(), ["x"]);
    assert_eq!(list.len(), 1);
}

#[test]
fn test_replay_reproduces_commands() {
    let list = paint_into(&text_tree("replay", root_style()), Rect::new(0.0, 0.0, 100.0, 0.0), false);
    let mut copy = DisplayList::new();
    list.replay(&mut copy);
    assert_eq!(list, copy);
}
