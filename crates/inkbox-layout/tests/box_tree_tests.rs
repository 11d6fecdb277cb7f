//! Integration tests for box tree construction.

use inkbox_layout::{BoxId, BoxStyle, BoxTree, BoxTreeError};

fn sample() -> (BoxTree, BoxId, BoxId, BoxId) {
    let mut tree = BoxTree::new(BoxStyle::block());
    let root = tree.root();
    let span = tree.append_container(root, BoxStyle::inline()).unwrap();
    let first = tree.append_text(span, BoxStyle::inline(), "one ").unwrap();
    let second = tree.append_text(root, BoxStyle::inline(), "two").unwrap();
    (tree, span, first, second)
}

#[test]
fn test_children_in_document_order() {
    let (tree, span, first, second) = sample();
    assert_eq!(tree.children(tree.root()), [span, second]);
    assert_eq!(tree.children(span), [first]);
    assert!(tree.children(first).is_empty());
    assert_eq!(tree.len(), 4);
    assert!(!tree.is_empty());
}

#[test]
fn test_new_tree_holds_only_its_root() {
    let tree = BoxTree::new(BoxStyle::block());
    assert_eq!(tree.len(), 1);
    assert!(!tree.is_empty());
    assert!(tree.children(tree.root()).is_empty());
}

#[test]
fn test_parent_and_ancestors() {
    let (tree, span, first, _) = sample();
    assert_eq!(tree.parent(first), Some(span));
    assert_eq!(tree.parent(tree.root()), None);
    assert_eq!(tree.ancestors(first).collect::<Vec<_>>(), [span, BoxId::ROOT]);
}

#[test]
fn test_descendants_and_text_content() {
    let (tree, span, first, second) = sample();
    assert_eq!(tree.descendants(tree.root()), [BoxId::ROOT, span, first, second]);
    assert_eq!(tree.text_content(tree.root()), "one two");
    assert_eq!(tree.get(first).and_then(|node| node.text()), Some("one "));
}

#[test]
fn test_text_boxes_are_leaves() {
    let (mut tree, _, first, _) = sample();
    assert_eq!(
        tree.append_text(first, BoxStyle::inline(), "nested"),
        Err(BoxTreeError::TextBoxHasChildren(first))
    );
}

#[test]
fn test_unknown_parent_rejected() {
    let (mut tree, ..) = sample();
    assert_eq!(
        tree.append_container(BoxId(99), BoxStyle::block()),
        Err(BoxTreeError::UnknownBox(BoxId(99)))
    );
    assert!(tree.get(BoxId(99)).is_none());
    assert!(tree.style(BoxId(99)).is_none());
}
