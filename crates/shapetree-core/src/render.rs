//! Prompt text rendering.
//!
//! Pure formatters turning node contexts into the plain-text blocks that are
//! pasted into LLM prompts.

use crate::context::NodeContext;
use crate::tree::{Tree, TreeNode};
use std::fmt::Write;

pub const SCHEMA_CONTEXT_HEADER: &str = "=== SCHEMA CONTEXT ===";
pub const CHILD_SCHEMAS_HEADER: &str = "=== CHILD SCHEMAS ===";

/// One line per present context value, in a fixed order. `Path` is always
/// emitted; the root's formatted path is empty.
pub fn render_node_context<C: NodeContext>(node: &TreeNode<C>) -> String {
    let context = node.context();
    let path = node.path().to_string();

    let lines = [
        ("Entity", context.entity_id()),
        ("Field", context.entity_field_id()),
        ("Parent", context.parent_entity_id()),
        ("Path", Some(path.as_str())),
        ("Title", context.title()),
        ("Description", context.description()),
        ("Type", context.semantic_type()),
        ("Role", context.role()),
        ("Source", context.source()),
        ("Comment", context.comment()),
    ];

    let mut out = String::new();
    for (label, value) in lines {
        let Some(value) = value else {
            continue;
        };
        if !out.is_empty() {
            out.push('\n');
        }
        let _ = write!(out, "{label}: {value}");
    }
    out
}

/// Schema prompt for the node at `root_path` (the tree root when `None` or
/// when no node has that path), followed by its direct children.
pub fn render_schema_prompt<C: NodeContext>(tree: &Tree<C>, root_path: Option<&str>) -> String {
    let node = root_path
        .and_then(|path| tree.node_at_path(path))
        .unwrap_or_else(|| tree.root());

    let mut out = String::new();
    out.push_str(SCHEMA_CONTEXT_HEADER);
    out.push('\n');
    out.push_str(&render_node_context(node));

    if !node.is_leaf() {
        out.push_str("\n\n");
        out.push_str(CHILD_SCHEMAS_HEADER);
        for (i, child) in tree.children(node).enumerate() {
            let _ = write!(out, "\n\n[{}] {}", i + 1, render_node_context(child));
        }
    }
    out
}

#[cfg(test)]
#[path = "../tests/render_tests.rs"]
mod tests;
