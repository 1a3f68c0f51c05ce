//! shapetree: schema ASTs as context-annotated trees.
//!
//! ```text
//! shapetree-ast     AST model, annotations, JSON decoding
//! shapetree-core    tree builder, fold, queries, prompt rendering
//! shapetree-entity  identity stamping, field signatures, fingerprints
//! ```
//!
//! The flat re-exports below cover the usual pipeline: describe a schema,
//! optionally [`stamp`] it as an entity, [`build_tree`] it, then query or
//! render the result.

pub use shapetree_ast as ast;
pub use shapetree_core as tree;
pub use shapetree_entity as entity;

pub use shapetree_ast::{
    AnnotationKey, Annotations, AsAst, Ast, AstData, AstError, AstTag, Field, LiteralValue,
    PropertyKey, Suspend, TupleElement,
};
pub use shapetree_core::{
    ContextFactory, DefaultContext, DefaultContextFactory, NodeContext, NodeId, Path,
    PathSegment, Tree, TreeBuilder, TreeError, TreeNode, build_indexed_tree, build_tree,
    build_tree_with, count_nodes, extract_context_at_path, extract_leaves,
    find_entity_field_nodes, find_entity_nodes, find_node_by_entity_id,
    find_nodes_by_semantic_type, fold, render_node_context, render_schema_prompt,
    resolved_semantic_type,
};
pub use shapetree_entity::{
    EntityFieldId, EntityFingerprint, EntityId, field_signatures, fingerprint, signature_set,
    stamp,
};

pub mod tracing_config;
