//! The styled box tree consumed by layout.
//!
//! The tree uses arena allocation with [`BoxId`] indices for all
//! relationships. Words and line fragments refer back to their box by id,
//! so nothing downstream ever owns a box.

use serde::Serialize;

use crate::style::BoxStyle;

/// A type-safe index into a [`BoxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BoxId(pub usize);

impl BoxId {
    /// The root box is always at index 0.
    pub const ROOT: Self = Self(0);

    /// Position of the box in the arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// What a box holds. Text boxes are leaves; containers never carry text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoxContent {
    /// Child boxes in document order.
    Children(Vec<BoxId>),
    /// A raw text run, exactly as extracted from the markup.
    Text(String),
}

/// One node of the box tree.
#[derive(Debug, Clone)]
pub struct BoxNode {
    /// Resolved style of this box.
    pub style: BoxStyle,
    /// Children or text.
    pub content: BoxContent,
    /// Containing box, `None` for the root.
    pub parent: Option<BoxId>,
}

impl BoxNode {
    /// The text payload, if this is a text box.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            BoxContent::Text(text) => Some(text),
            BoxContent::Children(_) => None,
        }
    }

    /// Child ids; empty for text boxes.
    #[must_use]
    pub fn children(&self) -> &[BoxId] {
        match &self.content {
            BoxContent::Children(children) => children,
            BoxContent::Text(_) => &[],
        }
    }

    /// True for text leaves.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self.content, BoxContent::Text(_))
    }
}

/// Errors raised while building a box tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoxTreeError {
    /// The parent id does not name a box in this tree.
    #[error("box {0:?} does not exist")]
    UnknownBox(BoxId),
    /// Text boxes are leaves.
    #[error("box {0:?} holds text and cannot have children")]
    TextBoxHasChildren(BoxId),
}

/// Arena of boxes. Built once per content change and then only read.
#[derive(Debug, Clone)]
pub struct BoxTree {
    nodes: Vec<BoxNode>,
}

impl BoxTree {
    /// Create a tree holding only a container root with the given style.
    #[must_use]
    pub fn new(root_style: BoxStyle) -> Self {
        Self {
            nodes: vec![BoxNode {
                style: root_style,
                content: BoxContent::Children(Vec::new()),
                parent: None,
            }],
        }
    }

    /// The root box.
    #[must_use]
    pub const fn root(&self) -> BoxId {
        BoxId::ROOT
    }

    /// Number of boxes, root included.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the tree holds no boxes. A tree made by [`BoxTree::new`]
    /// always holds its root.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a box.
    #[must_use]
    pub fn get(&self, id: BoxId) -> Option<&BoxNode> {
        self.nodes.get(id.index())
    }

    /// Look up a box's style.
    #[must_use]
    pub fn style(&self, id: BoxId) -> Option<&BoxStyle> {
        self.get(id).map(|node| &node.style)
    }

    /// Children of a box in document order; empty for text boxes and unknown ids.
    #[must_use]
    pub fn children(&self, id: BoxId) -> &[BoxId] {
        self.get(id).map_or(&[], BoxNode::children)
    }

    /// The containing box.
    #[must_use]
    pub fn parent(&self, id: BoxId) -> Option<BoxId> {
        self.get(id).and_then(|node| node.parent)
    }

    /// Containing boxes from the nearest outwards, excluding `id` itself.
    pub fn ancestors(&self, id: BoxId) -> impl Iterator<Item = BoxId> + '_ {
        std::iter::successors(self.parent(id), move |&current| self.parent(current))
    }

    /// Append a container box under `parent`.
    ///
    /// # Errors
    ///
    /// Fails if `parent` is unknown or is a text box.
    pub fn append_container(
        &mut self,
        parent: BoxId,
        style: BoxStyle,
    ) -> Result<BoxId, BoxTreeError> {
        self.append(parent, style, BoxContent::Children(Vec::new()))
    }

    /// Append a text leaf under `parent`.
    ///
    /// # Errors
    ///
    /// Fails if `parent` is unknown or is a text box.
    pub fn append_text(
        &mut self,
        parent: BoxId,
        style: BoxStyle,
        text: impl Into<String>,
    ) -> Result<BoxId, BoxTreeError> {
        self.append(parent, style, BoxContent::Text(text.into()))
    }

    fn append(
        &mut self,
        parent: BoxId,
        style: BoxStyle,
        content: BoxContent,
    ) -> Result<BoxId, BoxTreeError> {
        let id = BoxId(self.nodes.len());
        match self.nodes.get_mut(parent.index()).map(|node| &mut node.content) {
            None => return Err(BoxTreeError::UnknownBox(parent)),
            Some(BoxContent::Text(_)) => return Err(BoxTreeError::TextBoxHasChildren(parent)),
            Some(BoxContent::Children(children)) => children.push(id),
        }
        self.nodes.push(BoxNode {
            style,
            content,
            parent: Some(parent),
        });
        Ok(id)
    }

    /// All boxes under `id` (inclusive) in document order.
    #[must_use]
    pub fn descendants(&self, id: BoxId) -> Vec<BoxId> {
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if self.get(current).is_none() {
                continue;
            }
            order.push(current);
            stack.extend(self.children(current).iter().rev());
        }
        order
    }

    /// Concatenated raw text of every text box under `id`.
    #[must_use]
    pub fn text_content(&self, id: BoxId) -> String {
        self.descendants(id)
            .into_iter()
            .filter_map(|box_id| self.get(box_id).and_then(BoxNode::text))
            .collect()
    }
}
