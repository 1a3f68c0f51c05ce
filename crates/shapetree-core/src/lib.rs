//! Tree construction, folding and queries over type-shape ASTs.
//!
//! ```text
//! Ast ──> TreeBuilder (ContextFactory) ──> Tree<C>
//!                                            ├─> fold        (bottom-up results)
//!                                            ├─> query       (leaves, paths, entities)
//!                                            └─> render      (prompt text)
//! ```
//!
//! All traversals use explicit work-lists; none of them recurse on the shape
//! of the input, and `Suspend` nodes are never resolved.

// Shared schemas for unit tests
#[cfg(test)]
#[path = "../tests/test_fixtures.rs"]
pub(crate) mod test_fixtures;

pub mod builder;
pub use builder::{
    ChildEdge, TreeBuilder, build_indexed_tree, build_tree, build_tree_with, child_edges,
};

pub mod context;
pub use context::{
    AnnotationBundle, ContextFactory, CoreAnnotations, DefaultContext, DefaultContextFactory,
    NodeContext, Provenance,
};

mod error;
pub use error::{Result, TreeError};

pub mod fold;
pub use fold::{count_nodes, fold, fold_from, max_depth};

pub mod path;
pub use path::{Path, PathSegment, format_segments};

pub mod query;
pub use query::{
    extract_context_at_path, extract_leaves, find_entity_field_nodes, find_entity_nodes,
    find_node_by_entity_id, find_nodes_by_semantic_type, resolved_semantic_type,
};

pub mod render;
pub use render::{render_node_context, render_schema_prompt};

pub mod tree;
pub use tree::{NodeId, PreOrder, Tree, TreeIndex, TreeNode};
