//! JSON documents describing a box tree.
//!
//! ```json
//! {
//!   "options": { "tab_size": 4 },
//!   "root": {
//!     "style": { "width": 300, "padding": 8, "background-color": "#eee" },
//!     "children": [
//!       { "text": "Hello " },
//!       { "style": { "color": "red", "font-weight": "bold" },
//!         "children": [{ "text": "World" }] }
//!     ]
//!   }
//! }
//! ```
//!
//! Property names follow CSS. Inherited properties flow from parent to
//! child the way [`BoxStyle::inherit_from`] describes; everything else
//! starts at its initial value. Values that cannot be understood are
//! reported once and ignored.

use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};
use inkbox_common::warning::warn_once;
use inkbox_layout::{
    BoxId, BoxStyle, BoxTree, ColorValue, DisplayKind, EdgeSizes, FontDescriptor, FontStyle,
    LayoutOptions, TextAlign, TextDecoration, VerticalAlign, WhiteSpace, normalize_source_text,
};
use serde::Deserialize;

/// A parsed input document.
#[derive(Debug, Deserialize)]
pub struct Document {
    /// Layout tunables; missing fields keep their defaults.
    #[serde(default)]
    pub options: LayoutOptions,
    /// The root container.
    pub root: NodeSpec,
}

/// One box: a container with children, or a text leaf.
#[derive(Debug, Default, Deserialize)]
pub struct NodeSpec {
    #[serde(default)]
    style: StyleSpec,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    children: Vec<NodeSpec>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct StyleSpec {
    display: Option<DisplayKind>,
    white_space: Option<WhiteSpace>,
    font_family: Option<String>,
    font_size: Option<f32>,
    font_weight: Option<WeightSpec>,
    font_style: Option<FontStyle>,
    color: Option<String>,
    background_color: Option<String>,
    border_color: Option<String>,
    margin: Option<EdgeSpec>,
    border: Option<EdgeSpec>,
    padding: Option<EdgeSpec>,
    text_align: Option<TextAlign>,
    vertical_align: Option<VerticalAlign>,
    text_decoration: Option<TextDecoration>,
    width: Option<f32>,
    height: Option<f32>,
    #[serde(flatten)]
    unsupported: BTreeMap<String, serde_json::Value>,
}

/// [§ 3.2 'font-weight'](https://www.w3.org/TR/css-fonts-4/#font-weight-prop)
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WeightSpec {
    Numeric(u16),
    Keyword(String),
}

impl WeightSpec {
    fn resolve(&self) -> Option<u16> {
        match self {
            Self::Numeric(weight) => Some(*weight),
            Self::Keyword(keyword) => match keyword.trim().to_ascii_lowercase().as_str() {
                "normal" => Some(400),
                "bold" => Some(700),
                other => {
                    let _ = warn_once("Document", &format!("ignoring font-weight: {other}"));
                    None
                }
            },
        }
    }
}

/// Edge thickness: a single number, the CSS 1-4 value shorthand as an
/// array, or an object naming sides.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EdgeSpec {
    Uniform(f32),
    Shorthand(Vec<f32>),
    Sides(EdgeSizes),
}

impl EdgeSpec {
    /// [CSS Box § 5 Margins](https://www.w3.org/TR/css-box-4/#margin-shorthand)
    ///
    /// "If there is only one component value, it applies to all sides. If
    /// there are two values, the top and bottom margins are set to the first
    /// value and the right and left margins are set to the second. If there
    /// are three values, the top is set to the first value, the left and
    /// right are set to the second, and the bottom is set to the third."
    fn resolve(&self, property: &str) -> Option<EdgeSizes> {
        match *self {
            Self::Uniform(size) => Some(EdgeSizes::uniform(size)),
            Self::Sides(sides) => Some(sides),
            Self::Shorthand(ref values) => match values[..] {
                [all] => Some(EdgeSizes::uniform(all)),
                [vertical, horizontal] => {
                    Some(EdgeSizes::new(vertical, horizontal, vertical, horizontal))
                }
                [top, horizontal, bottom] => {
                    Some(EdgeSizes::new(top, horizontal, bottom, horizontal))
                }
                [top, right, bottom, left] => Some(EdgeSizes::new(top, right, bottom, left)),
                _ => {
                    let _ = warn_once(
                        "Document",
                        &format!("ignoring {property}: expected 1 to 4 values, got {}", values.len()),
                    );
                    None
                }
            },
        }
    }
}

fn parse_color(property: &str, value: Option<&str>) -> Option<ColorValue> {
    value?
        .parse::<ColorValue>()
        .map_err(|err| {
            let _ = warn_once("Document", &format!("ignoring {property}: {err}"));
        })
        .ok()
}

impl StyleSpec {
    /// Overlay the properties present in this spec onto `style`.
    fn apply(&self, mut style: BoxStyle) -> BoxStyle {
        for property in self.unsupported.keys() {
            let _ = warn_once(
                "Document",
                &format!("ignoring unsupported property '{property}'"),
            );
        }

        if let Some(display) = self.display {
            style.display = display;
        }
        if let Some(white_space) = self.white_space {
            style.white_space = white_space;
        }
        if let Some(family) = &self.font_family {
            style.font.family.clone_from(family);
        }
        if let Some(size) = self.font_size {
            style.font.size = size;
        }
        if let Some(weight) = self.font_weight.as_ref().and_then(WeightSpec::resolve) {
            style.font.weight = weight;
        }
        if let Some(font_style) = self.font_style {
            style.font.style = font_style;
        }
        if let Some(color) = parse_color("color", self.color.as_deref()) {
            style.color = color;
        }
        if let Some(background) = parse_color("background-color", self.background_color.as_deref()) {
            style.background_color = Some(background);
        }
        if let Some(border_color) = parse_color("border-color", self.border_color.as_deref()) {
            style.border_color = border_color;
        }
        if let Some(margin) = self.margin.as_ref().and_then(|edge| edge.resolve("margin")) {
            style.margin = margin;
        }
        if let Some(border) = self.border.as_ref().and_then(|edge| edge.resolve("border")) {
            style.border = border;
        }
        if let Some(padding) = self.padding.as_ref().and_then(|edge| edge.resolve("padding")) {
            style.padding = padding;
        }
        if let Some(text_align) = self.text_align {
            style.text_align = text_align;
        }
        if let Some(vertical_align) = self.vertical_align {
            style.vertical_align = vertical_align;
        }
        if let Some(text_decoration) = self.text_decoration {
            style.text_decoration = text_decoration;
        }
        if self.width.is_some() {
            style.width = self.width;
        }
        if self.height.is_some() {
            style.height = self.height;
        }
        style
    }
}

impl Document {
    /// Parse a document from JSON text.
    ///
    /// # Errors
    ///
    /// Fails if the text is not JSON or does not have the document shape.
    pub fn from_json(source: &str) -> Result<Self> {
        serde_json::from_str(source).context("failed to parse document")
    }

    /// Build the box tree. The root is a block using `base_font` unless its
    /// own style says otherwise.
    ///
    /// Text is passed through [`normalize_source_text`] for its box's
    /// `white-space` unless `preserve_breaks` is set, in which case every
    /// newline in the source is a forced break.
    ///
    /// # Errors
    ///
    /// Fails if the root or any other text node has children.
    pub fn build_tree(&self, base_font: &FontDescriptor, preserve_breaks: bool) -> Result<BoxTree> {
        if self.root.text.is_some() {
            bail!("the root node must be a container, not text");
        }
        let root_style = self
            .root
            .style
            .apply(BoxStyle::block().with_font(base_font.clone()));
        let mut tree = BoxTree::new(root_style);
        let root = tree.root();
        for child in &self.root.children {
            append_node(&mut tree, root, child, preserve_breaks)?;
        }
        log::debug!(target: "inkbox::document", "built box tree with {} boxes", tree.len());
        Ok(tree)
    }
}

fn append_node(
    tree: &mut BoxTree,
    parent: BoxId,
    node: &NodeSpec,
    preserve_breaks: bool,
) -> Result<()> {
    let parent_style = tree.style(parent).cloned().unwrap_or_default();
    let mut inherited = BoxStyle::inherit_from(&parent_style);

    let Some(text) = &node.text else {
        let id = tree.append_container(parent, node.style.apply(inherited))?;
        for child in &node.children {
            append_node(tree, id, child, preserve_breaks)?;
        }
        return Ok(());
    };

    if !node.children.is_empty() {
        bail!("text node {text:?} cannot have children");
    }
    // Text directly inside an inline box sits where that box is aligned.
    if parent_style.display == DisplayKind::Inline {
        inherited.vertical_align = parent_style.vertical_align;
    }
    let style = node.style.apply(inherited);
    let text = if preserve_breaks {
        text.clone()
    } else {
        normalize_source_text(text, style.white_space)
    };
    let _ = tree.append_text(parent, style, text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use inkbox_common::warning::has_warned;
    use inkbox_layout::{ApproximateFontMetrics, LayoutEngine, Rect};

    use super::*;

    fn base_font() -> FontDescriptor {
        FontDescriptor::new("test", 10.0)
    }

    fn build(json: &str, preserve_breaks: bool) -> BoxTree {
        Document::from_json(json)
            .unwrap()
            .build_tree(&base_font(), preserve_breaks)
            .unwrap()
    }

    fn lines(tree: &BoxTree, width: f32) -> Vec<String> {
        LayoutEngine::new(tree, &ApproximateFontMetrics)
            .layout(tree.root(), Rect::new(0.0, 0.0, width, 0.0))
            .lines_text()
    }

    #[test]
    fn test_builds_nested_tree_in_document_order() {
        let tree = build(
            r#"{ "root": { "children": [
                { "text": "Hello " },
                { "style": { "color": "red" }, "children": [{ "text": "World" }] }
            ] } }"#,
            false,
        );
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.text_content(tree.root()), "Hello World");
        assert_eq!(lines(&tree, 500.0), ["Hello World"]);
    }

    #[test]
    fn test_inherited_properties_flow_to_text() {
        let tree = build(
            r##"{ "root": { "style": { "color": "#00f", "white-space": "pre", "margin": 5 },
                 "children": [{ "text": "x" }] } }"##,
            false,
        );
        let root_style = tree.style(tree.root()).unwrap();
        assert_eq!(root_style.display, DisplayKind::Block);
        assert_eq!(root_style.margin, EdgeSizes::uniform(5.0));

        let text_style = tree.style(tree.children(tree.root())[0]).unwrap();
        assert_eq!(text_style.color, ColorValue::rgb(0, 0, 255));
        assert_eq!(text_style.white_space, WhiteSpace::Pre);
        assert_eq!(text_style.font, base_font());
        assert_eq!(text_style.margin, EdgeSizes::default());
    }

    #[test]
    fn test_text_in_inline_box_takes_its_vertical_align() {
        let tree = build(
            r#"{ "root": { "children": [
                { "style": { "vertical-align": "top" }, "children": [{ "text": "up" }] }
            ] } }"#,
            false,
        );
        let span = tree.children(tree.root())[0];
        let text = tree.children(span)[0];
        assert_eq!(tree.style(text).unwrap().vertical_align, VerticalAlign::Top);
    }

    #[test]
    fn test_source_newlines_follow_white_space() {
        let json = r#"{ "root": { "children": [{ "text": "a\r\nb" }] } }"#;
        assert_eq!(lines(&build(json, false), 500.0), ["a b"]);
        assert_eq!(lines(&build(json, true), 500.0), ["a", "b"]);

        let pre = r#"{ "root": { "style": { "white-space": "pre-line" },
                      "children": [{ "text": "a\nb" }] } }"#;
        assert_eq!(lines(&build(pre, false), 500.0), ["a", "b"]);
    }

    #[test]
    fn test_edge_shorthand() {
        let tree = build(
            r#"{ "root": { "style": { "padding": [1, 2, 3], "border": { "left": 4 } } } }"#,
            false,
        );
        let style = tree.style(tree.root()).unwrap();
        assert_eq!(style.padding, EdgeSizes::new(1.0, 2.0, 3.0, 2.0));
        assert_eq!(style.border, EdgeSizes::new(0.0, 0.0, 0.0, 4.0));
    }

    #[test]
    fn test_bad_values_are_ignored_with_a_warning() {
        let tree = build(
            r#"{ "root": { "style": {
                "color": "not-a-color", "float": "left", "font-weight": "heavy",
                "margin": [1, 2, 3, 4, 5]
            } } }"#,
            false,
        );
        let style = tree.style(tree.root()).unwrap();
        assert_eq!(style.color, ColorValue::BLACK);
        assert_eq!(style.font.weight, 400);
        assert_eq!(style.margin, EdgeSizes::default());
        assert!(has_warned("Document", "ignoring unsupported property 'float'"));
        assert!(has_warned("Document", "ignoring font-weight: heavy"));
        assert!(has_warned(
            "Document",
            "ignoring margin: expected 1 to 4 values, got 5"
        ));
    }

    #[test]
    fn test_options_are_read() {
        let document = Document::from_json(r#"{ "options": { "tab_size": 2 }, "root": {} }"#).unwrap();
        assert_eq!(document.options.tab_size, 2);
        assert!(
            (document.options.baseline_ratio - LayoutOptions::default().baseline_ratio).abs()
                < f32::EPSILON
        );
    }

    #[test]
    fn test_text_with_children_is_rejected() {
        let document = Document::from_json(
            r#"{ "root": { "children": [{ "text": "a", "children": [{ "text": "b" }] }] } }"#,
        )
        .unwrap();
        assert!(document.build_tree(&base_font(), false).is_err());

        let text_root = Document::from_json(r#"{ "root": { "text": "a" } }"#).unwrap();
        assert!(text_root.build_tree(&base_font(), false).is_err());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Document::from_json("{ not json").is_err());
        assert!(Document::from_json(r#"{ "options": {} }"#).is_err());
    }
}
