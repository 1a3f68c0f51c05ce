//! Tree construction.
//!
//! Converts an AST into an immutable [`Tree`] of context-annotated nodes.
//! The walk is driven by an explicit work-list so that schemas nested
//! thousands of levels deep build without growing the call stack.
//!
//! ## Work items
//!
//! | Item | Effect |
//! |------|--------|
//! | `Enter` | merge annotations, compute context, allocate the node, fill the parent's slot, schedule children |
//! | `Exit` | check every child slot is filled and finalize the node's children |
//!
//! A node's `Exit` is pushed before its children's `Enter`s, so it only pops
//! once the whole subtree below it has been processed.

use crate::context::{ContextFactory, DefaultContext, DefaultContextFactory, NodeContext};
use crate::error::{Result, TreeError};
use crate::path::{Path, PathSegment};
use crate::tree::{NodeId, Tree, TreeNode};
use shapetree_ast::limits::INITIAL_WORKLIST_CAPACITY;
use shapetree_ast::{AsAst, Ast, AstData, Annotations, PropertyKey};
use std::sync::Arc;
use tracing::{Level, debug, trace};

// =============================================================================
// Child derivation
// =============================================================================

/// A link from a node to one of its children.
#[derive(Clone, Debug)]
pub struct ChildEdge {
    pub ast: Arc<Ast>,
    /// `None` keeps the parent's path (refinements).
    pub segment: Option<PathSegment>,
    /// Annotations declared on the link itself; they override the child's own.
    pub annotations: Option<Annotations>,
}

impl ChildEdge {
    fn new(ast: &Arc<Ast>, segment: Option<PathSegment>) -> Self {
        Self {
            ast: Arc::clone(ast),
            segment,
            annotations: None,
        }
    }

    fn annotated(mut self, annotations: &Annotations) -> Self {
        if !annotations.is_empty() {
            self.annotations = Some(annotations.clone());
        }
        self
    }
}

/// Children of `ast`, in order.
///
/// | Kind | Children | Segment | Edge annotations |
/// |------|----------|---------|------------------|
/// | Struct | fields, then index signatures | key; `index_i` | field's; none |
/// | Union | alternatives | `union_i` | none |
/// | Tuple | elements, then rest | `tuple_i`; `rest_i` | element's; rest's |
/// | Refinement | `from` | unchanged | none |
/// | Transformation | `from`, `to` | `from`; `to` | none |
/// | Declaration | type parameters | `typeParameter_i` | none |
/// | Suspend and leaves | none | | |
pub fn child_edges(ast: &Ast) -> Vec<ChildEdge> {
    match &ast.data {
        AstData::Struct(shape) => {
            let fields = shape.fields.iter().map(|field| {
                let segment = match &field.key {
                    PropertyKey::Name(name) => PathSegment::Key(Arc::from(name.as_str())),
                    PropertyKey::Symbol(description) => {
                        PathSegment::Symbol(Arc::from(description.as_str()))
                    }
                };
                ChildEdge::new(&field.ty, Some(segment)).annotated(&field.annotations)
            });
            let signatures = shape
                .index_signatures
                .iter()
                .enumerate()
                .map(|(i, signature)| ChildEdge::new(&signature.ty, Some(PathSegment::Index(i))));
            fields.chain(signatures).collect()
        }
        AstData::Union(members) => members
            .iter()
            .enumerate()
            .map(|(i, member)| ChildEdge::new(member, Some(PathSegment::Union(i))))
            .collect(),
        AstData::Tuple(shape) => {
            let elements = shape.elements.iter().enumerate().map(|(i, element)| {
                ChildEdge::new(&element.ty, Some(PathSegment::Tuple(i)))
                    .annotated(&element.annotations)
            });
            let rest = shape.rest.iter().enumerate().map(|(i, element)| {
                ChildEdge::new(&element.ty, Some(PathSegment::Rest(i)))
                    .annotated(&element.annotations)
            });
            elements.chain(rest).collect()
        }
        AstData::Refinement(refinement) => vec![ChildEdge::new(&refinement.from, None)],
        AstData::Transformation(transformation) => vec![
            ChildEdge::new(&transformation.from, Some(PathSegment::From)),
            ChildEdge::new(&transformation.to, Some(PathSegment::To)),
        ],
        AstData::Declaration(declaration) => declaration
            .type_parameters
            .iter()
            .enumerate()
            .map(|(i, parameter)| ChildEdge::new(parameter, Some(PathSegment::TypeParameter(i))))
            .collect(),
        // Suspend stays opaque: resolving it here could unfold forever.
        AstData::Suspend(_)
        | AstData::String
        | AstData::Number
        | AstData::Boolean
        | AstData::BigInt
        | AstData::Symbol
        | AstData::Object
        | AstData::Literal(_)
        | AstData::Undefined
        | AstData::Void
        | AstData::Never
        | AstData::Unknown
        | AstData::Any
        | AstData::TemplateLiteral(_)
        | AstData::Enums(_)
        | AstData::UniqueSymbol(_) => Vec::new(),
    }
}

// =============================================================================
// TreeBuilder
// =============================================================================

/// Position of a child inside its parent's children list.
#[derive(Copy, Clone, Debug)]
struct ChildSlot {
    parent: NodeId,
    index: usize,
}

enum WorkItem {
    Enter {
        ast: Arc<Ast>,
        path: Path,
        parent: Option<NodeId>,
        edge: Option<Annotations>,
        slot: Option<ChildSlot>,
    },
    Exit(NodeId),
}

/// Builds trees with a fixed context factory.
pub struct TreeBuilder<F> {
    factory: F,
    indexed: bool,
}

impl TreeBuilder<DefaultContextFactory> {
    pub fn with_default_context() -> Self {
        Self::new(DefaultContextFactory)
    }
}

impl<F> TreeBuilder<F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            indexed: false,
        }
    }

    /// Attach node and path lookup maps to every built tree.
    pub fn indexed(mut self) -> Self {
        self.indexed = true;
        self
    }

    /// Build a tree from `input` without lookup maps.
    pub fn build<C>(&self, input: impl AsAst) -> Result<Tree<C>>
    where
        F: ContextFactory<C>,
    {
        let root = input.as_ast();
        let mut nodes: Vec<TreeNode<C>> = Vec::new();
        let mut slots: Vec<Vec<Option<NodeId>>> = Vec::new();
        let mut built_root = None;

        let mut stack = Vec::with_capacity(INITIAL_WORKLIST_CAPACITY);
        stack.push(WorkItem::Enter {
            ast: root,
            path: Path::root(),
            parent: None,
            edge: None,
            slot: None,
        });

        while let Some(item) = stack.pop() {
            match item {
                WorkItem::Enter {
                    ast,
                    path,
                    parent,
                    edge,
                    slot,
                } => {
                    let annotations = match &edge {
                        Some(edge) => ast.annotations.merged(edge),
                        None => ast.annotations.clone(),
                    };
                    let parent_node = parent.and_then(|id| nodes.get(id.index()));
                    let context = self.factory.create(&ast, &annotations, &path, parent_node);

                    let id = NodeId(nodes.len() as u32);
                    if tracing::enabled!(Level::TRACE) {
                        trace!(node = %id, path = %path, tag = %ast.tag(), "enter");
                    }
                    if let Some(slot) = slot {
                        if let Some(entry) = slots
                            .get_mut(slot.parent.index())
                            .and_then(|children| children.get_mut(slot.index))
                        {
                            *entry = Some(id);
                        }
                    }

                    let edges = child_edges(&ast);
                    slots.push(vec![None; edges.len()]);
                    stack.push(WorkItem::Exit(id));
                    for (index, child) in edges.into_iter().enumerate().rev() {
                        let child_path = match child.segment {
                            Some(segment) => path.child(segment),
                            None => path.clone(),
                        };
                        stack.push(WorkItem::Enter {
                            ast: child.ast,
                            path: child_path,
                            parent: Some(id),
                            edge: child.annotations,
                            slot: Some(ChildSlot { parent: id, index }),
                        });
                    }

                    nodes.push(TreeNode {
                        id,
                        parent,
                        path,
                        ast,
                        annotations,
                        context,
                        children: Vec::new(),
                    });
                }
                WorkItem::Exit(id) => {
                    let filled = std::mem::take(&mut slots[id.index()]);
                    let mut children = Vec::with_capacity(filled.len());
                    for (index, child) in filled.into_iter().enumerate() {
                        children.push(child.ok_or(TreeError::UnfilledChildSlot { node: id, index })?);
                    }
                    let node = &mut nodes[id.index()];
                    node.children = children;
                    if node.parent.is_none() {
                        built_root = Some(id);
                    }
                }
            }
        }

        let root = built_root.ok_or(TreeError::MissingRoot)?;
        debug!(nodes = nodes.len(), "built schema tree");
        Ok(Tree::from_parts(nodes, root))
    }

    /// Build a tree and attach lookup maps when the builder is indexed.
    pub fn build_tree<C>(&self, input: impl AsAst) -> Result<Tree<C>>
    where
        F: ContextFactory<C>,
        C: NodeContext,
    {
        let tree = self.build(input)?;
        Ok(if self.indexed { tree.with_index() } else { tree })
    }
}

// =============================================================================
// Convenience entry points
// =============================================================================

/// Build with the default context factory.
pub fn build_tree(input: impl AsAst) -> Result<Tree<DefaultContext>> {
    TreeBuilder::with_default_context().build(input)
}

/// Build with the default context factory and attach lookup maps.
pub fn build_indexed_tree(input: impl AsAst) -> Result<Tree<DefaultContext>> {
    TreeBuilder::with_default_context().indexed().build_tree(input)
}

/// Build with a caller-supplied context function.
pub fn build_tree_with<C, F>(input: impl AsAst, factory: F) -> Result<Tree<C>>
where
    F: Fn(&Arc<Ast>, &Annotations, &Path, Option<&TreeNode<C>>) -> C,
{
    TreeBuilder::new(factory).build(input)
}

#[cfg(test)]
#[path = "../tests/builder_tests.rs"]
mod tests;
