//! Catamorphisms over built trees.
//!
//! [`fold`] computes a value bottom-up: the algebra sees each node together
//! with the already computed results of its children, in child order. The
//! traversal is an iterative post-order walk, so it shares the builder's
//! tolerance for very deep trees.

use crate::error::{Result, TreeError};
use crate::tree::{NodeId, Tree, TreeNode};
use rustc_hash::FxHashMap;
use shapetree_ast::limits::INITIAL_WORKLIST_CAPACITY;

enum Step {
    /// Schedule the node's children, then come back to combine.
    Visit(NodeId),
    /// All children are done; apply the algebra.
    Combine(NodeId),
}

/// Fold the whole tree.
pub fn fold<C, A, F>(tree: &Tree<C>, algebra: F) -> Result<A>
where
    F: FnMut(&TreeNode<C>, Vec<A>) -> A,
{
    fold_from(tree, tree.root_id(), algebra)
}

/// Fold the subtree rooted at `start`.
pub fn fold_from<C, A, F>(tree: &Tree<C>, start: NodeId, mut algebra: F) -> Result<A>
where
    F: FnMut(&TreeNode<C>, Vec<A>) -> A,
{
    let mut stack = Vec::with_capacity(INITIAL_WORKLIST_CAPACITY);
    let mut results: FxHashMap<NodeId, A> = FxHashMap::default();
    stack.push(Step::Visit(start));

    while let Some(step) = stack.pop() {
        match step {
            Step::Visit(id) => {
                let node = tree.node(id).ok_or(TreeError::UnknownNode(id))?;
                stack.push(Step::Combine(id));
                // Reversed so the leftmost child is popped first.
                stack.extend(node.children().iter().rev().map(|&child| Step::Visit(child)));
            }
            Step::Combine(id) => {
                let node = tree.node(id).ok_or(TreeError::UnknownNode(id))?;
                let mut child_results = Vec::with_capacity(node.children().len());
                for &child in node.children() {
                    let value = results
                        .remove(&child)
                        .ok_or(TreeError::MissingChildResult { parent: id, child })?;
                    child_results.push(value);
                }
                let value = algebra(node, child_results);
                results.insert(id, value);
            }
        }
    }

    results
        .remove(&start)
        .ok_or(TreeError::MissingFoldResult(start))
}

/// Number of nodes in the tree.
pub fn count_nodes<C>(tree: &Tree<C>) -> Result<usize> {
    fold(tree, |_, children: Vec<usize>| 1 + children.iter().sum::<usize>())
}

/// Length of the longest root-to-leaf chain, counting nodes.
pub fn max_depth<C>(tree: &Tree<C>) -> Result<usize> {
    fold(tree, |_, children: Vec<usize>| {
        1 + children.into_iter().max().unwrap_or(0)
    })
}

#[cfg(test)]
#[path = "../tests/fold_tests.rs"]
mod tests;
