//! Queries over built trees.
//!
//! Every query walks the tree with [`Tree::iter`], an explicit-stack
//! pre-order traversal, and never fails: absent results are `None` or an
//! empty list.

use crate::context::NodeContext;
use crate::path::format_segments;
use crate::tree::{Tree, TreeNode};
use std::fmt::Display;

/// Nodes without children, in pre-order.
pub fn extract_leaves<C>(tree: &Tree<C>) -> Vec<&TreeNode<C>> {
    tree.iter().filter(|node| node.is_leaf()).collect()
}

/// Context of the node at `path` (given segment by segment).
pub fn extract_context_at_path<'a, C, S>(tree: &'a Tree<C>, path: &[S]) -> Option<&'a C>
where
    S: Display,
{
    tree.node_at_path(&format_segments(path))
        .map(TreeNode::context)
}

/// Semantic type of the node: an explicit `semanticType` annotation, else the
/// context's value, else the default label of the node's kind.
pub fn resolved_semantic_type<C: NodeContext>(node: &TreeNode<C>) -> &str {
    node.annotations()
        .semantic_type()
        .or_else(|| node.context().semantic_type())
        .unwrap_or_else(|| node.tag().default_semantic_label())
}

/// All nodes whose resolved semantic type equals `semantic_type`.
pub fn find_nodes_by_semantic_type<'a, C: NodeContext>(
    tree: &'a Tree<C>,
    semantic_type: &str,
) -> Vec<&'a TreeNode<C>> {
    tree.iter()
        .filter(|node| resolved_semantic_type(node) == semantic_type)
        .collect()
}

/// Nodes whose context carries an entity id.
pub fn find_entity_nodes<C: NodeContext>(tree: &Tree<C>) -> Vec<&TreeNode<C>> {
    tree.iter()
        .filter(|node| node.context().entity_id().is_some())
        .collect()
}

/// Nodes whose context carries an entity-field id.
pub fn find_entity_field_nodes<C: NodeContext>(tree: &Tree<C>) -> Vec<&TreeNode<C>> {
    tree.iter()
        .filter(|node| node.context().entity_field_id().is_some())
        .collect()
}

/// First node (pre-order) stamped with `entity_id`.
pub fn find_node_by_entity_id<'a, C: NodeContext>(
    tree: &'a Tree<C>,
    entity_id: &str,
) -> Option<&'a TreeNode<C>> {
    tree.node_by_key(entity_id)
        .filter(|node| node.context().entity_id() == Some(entity_id))
}

#[cfg(test)]
#[path = "../tests/query_tests.rs"]
mod tests;
