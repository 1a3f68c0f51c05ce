//! Built trees.
//!
//! A [`Tree`] owns an arena of [`TreeNode`]s addressed by [`NodeId`]. Nodes
//! are created once by the builder and never mutated afterwards; children are
//! stored as ids into the same arena, in derivation order.

use crate::context::NodeContext;
use crate::path::Path;
use rustc_hash::FxHashMap;
use shapetree_ast::{Annotations, Ast, AstTag};
use std::fmt;
use std::sync::Arc;

// =============================================================================
// NodeId
// =============================================================================

/// Index of a node inside its tree's arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const ROOT: Self = Self(0);

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// TreeNode
// =============================================================================

/// A node of a built tree, carrying a caller-defined context `C`.
#[derive(Clone, Debug)]
pub struct TreeNode<C> {
    pub(crate) id: NodeId,
    pub(crate) parent: Option<NodeId>,
    pub(crate) path: Path,
    pub(crate) ast: Arc<Ast>,
    pub(crate) annotations: Annotations,
    pub(crate) context: C,
    pub(crate) children: Vec<NodeId>,
}

impl<C> TreeNode<C> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn ast(&self) -> &Arc<Ast> {
        &self.ast
    }

    pub fn tag(&self) -> AstTag {
        self.ast.tag()
    }

    /// Effective annotations: the AST's own, overridden by edge annotations.
    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

// =============================================================================
// TreeIndex
// =============================================================================

/// Lookup maps attached to an indexed tree.
#[derive(Clone, Debug, Default)]
pub struct TreeIndex {
    /// Entity id when the node's context exposes one, else the formatted path.
    node_map: FxHashMap<String, NodeId>,
    /// Formatted path.
    path_map: FxHashMap<String, NodeId>,
}

impl TreeIndex {
    fn build<C: NodeContext>(nodes: &[TreeNode<C>]) -> Self {
        let mut index = Self::default();
        for node in nodes {
            let path = node.path.to_string();
            let key = match node.context.entity_id() {
                Some(entity) => entity.to_string(),
                None => path.clone(),
            };
            // Nested structs of one entity share its id; keep the outermost.
            index.node_map.entry(key).or_insert(node.id);
            index.path_map.entry(path).or_insert(node.id);
        }
        index
    }

    pub fn node_map(&self) -> &FxHashMap<String, NodeId> {
        &self.node_map
    }

    pub fn path_map(&self) -> &FxHashMap<String, NodeId> {
        &self.path_map
    }
}

// =============================================================================
// Tree
// =============================================================================

/// Immutable tree of context-annotated nodes.
#[derive(Clone, Debug)]
pub struct Tree<C> {
    nodes: Vec<TreeNode<C>>,
    root: NodeId,
    index: Option<TreeIndex>,
}

impl<C> Tree<C> {
    pub(crate) fn from_parts(nodes: Vec<TreeNode<C>>, root: NodeId) -> Self {
        Self {
            nodes,
            root,
            index: None,
        }
    }

    pub fn root(&self) -> &TreeNode<C> {
        &self.nodes[self.root.index()]
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&TreeNode<C>> {
        self.nodes.get(id.index())
    }

    pub fn children<'a>(&'a self, node: &'a TreeNode<C>) -> impl Iterator<Item = &'a TreeNode<C>> {
        node.children.iter().filter_map(|&child| self.node(child))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn index(&self) -> Option<&TreeIndex> {
        self.index.as_ref()
    }

    /// Depth-first pre-order walk starting at the root.
    pub fn iter(&self) -> PreOrder<'_, C> {
        PreOrder {
            tree: self,
            stack: vec![self.root],
        }
    }

    /// Node whose formatted path equals `formatted`.
    ///
    /// Uses the path index when present and falls back to a walk otherwise.
    pub fn node_at_path(&self, formatted: &str) -> Option<&TreeNode<C>> {
        match &self.index {
            Some(index) => index
                .path_map
                .get(formatted)
                .and_then(|&id| self.node(id)),
            None => self.iter().find(|node| node.path.to_string() == formatted),
        }
    }

    pub fn node_at(&self, path: &Path) -> Option<&TreeNode<C>> {
        self.node_at_path(&path.to_string())
    }
}

impl<C: NodeContext> Tree<C> {
    /// Attach the node and path lookup maps.
    pub fn with_index(mut self) -> Self {
        self.index = Some(TreeIndex::build(&self.nodes));
        self
    }

    /// Node registered under `key` in the node map (entity id, else path).
    pub fn node_by_key(&self, key: &str) -> Option<&TreeNode<C>> {
        match &self.index {
            Some(index) => index.node_map.get(key).and_then(|&id| self.node(id)),
            None => self.iter().find(|node| match node.context.entity_id() {
                Some(entity) => entity == key,
                None => node.path.to_string() == key,
            }),
        }
    }
}

/// Pre-order iterator over a tree, driven by an explicit stack.
pub struct PreOrder<'a, C> {
    tree: &'a Tree<C>,
    stack: Vec<NodeId>,
}

impl<'a, C> Iterator for PreOrder<'a, C> {
    type Item = &'a TreeNode<C>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            if let Some(node) = self.tree.node(id) {
                self.stack.extend(node.children.iter().rev().copied());
                return Some(node);
            }
        }
        None
    }
}

impl<'a, C> IntoIterator for &'a Tree<C> {
    type Item = &'a TreeNode<C>;
    type IntoIter = PreOrder<'a, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
#[path = "../tests/tree_tests.rs"]
mod tests;
