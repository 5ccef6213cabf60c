//! Incremental builder for a `Tree`, driven by parser events.

use crate::{Leaf, Node, Position, Tree};

/// Builds a `Tree` from start/leaf/finish events.
///
/// Nodes are opened with [`Builder::start_node`] and closed with
/// [`Builder::finish_node`]; leaves attach to the innermost open node.
#[derive(Debug, Default)]
pub struct Builder {
    opened: Vec<Node>,
    root: Option<Tree>,
}

impl Drop for Builder {
    fn drop(&mut self) {
        if !std::thread::panicking() && !self.opened.is_empty() {
            panic!("you should call `Builder::finish()`");
        }
    }
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a node; subsequent events become its children.
    pub fn start_node(&mut self, label: impl Into<String>) {
        self.opened.push(Node::new(label, []));
    }

    /// Attaches a leaf to the innermost open node.
    pub fn leaf(&mut self, text: impl Into<String>, position: Option<Position>) {
        self.attach(Tree::Leaf(Leaf { text: text.into(), position }));
    }

    /// Closes the innermost open node.
    pub fn finish_node(&mut self) {
        let node = self.opened.pop().expect("`finish_node` without a matching `start_node`");
        self.attach(Tree::Node(node));
    }

    /// Returns the finished tree.
    ///
    /// Panics if a node is still open or nothing was built.
    pub fn finish(mut self) -> Tree {
        assert!(self.opened.is_empty(), "unfinished nodes: {}", self.opened.len());
        self.root.take().expect("`finish` called on an empty builder")
    }

    fn attach(&mut self, child: Tree) {
        match self.opened.last_mut() {
            Some(parent) => parent.children.push(child),
            None => {
                assert!(self.root.is_none(), "a tree has exactly one root");
                self.root = Some(child);
            }
        }
    }
}
