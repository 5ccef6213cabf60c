//! Labeled parse tree: composite nodes owning their children, leaves holding
//! matched text.

use serde::{Deserialize, Serialize};

use crate::LoadError;

/// Source location of a leaf.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// 1-based line.
    pub line: u32,
    /// 0-based column.
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// Either a rule application or a matched token.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tree {
    Node(Node),
    Leaf(Leaf),
}

/// A rule application: a label and its children in display order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub label: String,
    #[serde(default)]
    pub children: Vec<Tree>,
}

/// A single matched token.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Leaf {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl Tree {
    /// Decodes a tree from its JSON dump.
    pub fn from_json(text: &str) -> Result<Self, LoadError> {
        let tree = serde_json::from_str(text)?;
        tracing::debug!("decoded tree dump ({} bytes)", text.len());
        Ok(tree)
    }

    pub fn node(label: impl Into<String>, children: impl IntoIterator<Item = Tree>) -> Self {
        Tree::Node(Node::new(label, children))
    }

    pub fn leaf(text: impl Into<String>) -> Self {
        Tree::Leaf(Leaf::new(text))
    }

    pub fn leaf_at(text: impl Into<String>, line: u32, column: u32) -> Self {
        Tree::Leaf(Leaf::new(text).at(Position::new(line, column)))
    }

    /// Returns the leaf, if this is one.
    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Tree::Node(_) => None,
            Tree::Leaf(leaf) => Some(leaf),
        }
    }

    pub fn is_node(&self) -> bool {
        matches!(self, Tree::Node(_))
    }

    /// Position of this leaf, or of the leftmost leaf below this node.
    pub fn position(&self) -> Option<Position> {
        match self {
            Tree::Node(node) => node.position(),
            Tree::Leaf(leaf) => leaf.position,
        }
    }

    /// `true` for a leaf, or a node that is itself a direct line.
    pub fn is_direct_line(&self) -> bool {
        match self {
            Tree::Node(node) => node.is_direct_line(),
            Tree::Leaf(_) => true,
        }
    }

    /// Every leaf of the tree, left to right.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves { stack: vec![self] }
    }
}

/// Iterator returned by [`Tree::leaves`].
#[derive(Clone, Debug)]
pub struct Leaves<'a> {
    stack: Vec<&'a Tree>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a Leaf;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(tree) = self.stack.pop() {
            match tree {
                Tree::Node(node) => self.stack.extend(node.children.iter().rev()),
                Tree::Leaf(leaf) => return Some(leaf),
            }
        }
        None
    }
}

impl Node {
    pub fn new(label: impl Into<String>, children: impl IntoIterator<Item = Tree>) -> Self {
        Self { label: label.into(), children: children.into_iter().collect() }
    }

    /// Counts the children that are nodes rather than leaves.
    pub fn non_terminal_children(&self) -> usize {
        self.children.iter().filter(|child| child.is_node()).count()
    }

    /// Walks the leftmost child at every level until a leaf is reached.
    ///
    /// Returns `None` when that walk ends on a childless node, or when the
    /// leaf it reaches carries no position.
    pub fn position(&self) -> Option<Position> {
        self.children.first()?.position()
    }

    /// An unbranched chain of single-child nodes ending in a leaf, or a node
    /// without children.
    pub fn is_direct_line(&self) -> bool {
        match self.children.as_slice() {
            [] => true,
            [only] => only.is_direct_line(),
            _ => false,
        }
    }
}

impl Leaf {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), position: None }
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }
}
