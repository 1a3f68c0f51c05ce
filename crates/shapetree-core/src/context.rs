//! Per-node context.
//!
//! The builder asks a [`ContextFactory`] for one context value per node. The
//! context type is chosen by the caller; queries and prompt rendering only
//! need it to implement [`NodeContext`], whose accessors all default to
//! "absent".
//!
//! [`DefaultContextFactory`] extracts the well-known annotations into a
//! [`DefaultContext`].

use crate::path::Path;
use crate::tree::TreeNode;
use serde::Serialize;
use shapetree_ast::{Annotations, Ast};
use std::sync::Arc;

// =============================================================================
// NodeContext
// =============================================================================

/// Read-only view over the pieces of a context that the core understands.
pub trait NodeContext {
    fn entity_id(&self) -> Option<&str> {
        None
    }

    fn entity_field_id(&self) -> Option<&str> {
        None
    }

    fn parent_entity_id(&self) -> Option<&str> {
        None
    }

    fn identifier(&self) -> Option<&str> {
        None
    }

    fn title(&self) -> Option<&str> {
        None
    }

    fn description(&self) -> Option<&str> {
        None
    }

    /// Explicit semantic type. Queries fall back to the AST kind's label.
    fn semantic_type(&self) -> Option<&str> {
        None
    }

    fn role(&self) -> Option<&str> {
        None
    }

    fn source(&self) -> Option<&str> {
        None
    }

    fn comment(&self) -> Option<&str> {
        None
    }
}

impl NodeContext for () {}

// =============================================================================
// ContextFactory
// =============================================================================

/// Computes the context of a node while the tree is being built.
///
/// `parent` is the already created parent node. Its path, annotations and
/// context are final; its children are not populated yet.
pub trait ContextFactory<C> {
    fn create(
        &self,
        ast: &Arc<Ast>,
        annotations: &Annotations,
        path: &Path,
        parent: Option<&TreeNode<C>>,
    ) -> C;
}

impl<C, F> ContextFactory<C> for F
where
    F: Fn(&Arc<Ast>, &Annotations, &Path, Option<&TreeNode<C>>) -> C,
{
    fn create(
        &self,
        ast: &Arc<Ast>,
        annotations: &Annotations,
        path: &Path,
        parent: Option<&TreeNode<C>>,
    ) -> C {
        self(ast, annotations, path, parent)
    }
}

// =============================================================================
// DefaultContext
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreAnnotations {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Provenance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Raw well-known annotations, grouped the way prompt assembly consumes them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AnnotationBundle {
    pub core: Option<CoreAnnotations>,
    pub role: Option<String>,
    pub semantic: Option<String>,
    pub provenance: Option<Provenance>,
}

/// Context produced by [`DefaultContextFactory`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultContext {
    pub entity_id: Option<String>,
    pub entity_field_id: Option<String>,
    /// Nearest ancestor's entity id.
    pub parent_entity_id: Option<String>,
    pub identifier: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Explicit semantic type, else the default label of the node's kind.
    /// The explicit value alone is kept in `annotations.semantic`.
    pub semantic_type: Option<String>,
    pub annotations: AnnotationBundle,
}

impl NodeContext for DefaultContext {
    fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    fn entity_field_id(&self) -> Option<&str> {
        self.entity_field_id.as_deref()
    }

    fn parent_entity_id(&self) -> Option<&str> {
        self.parent_entity_id.as_deref()
    }

    fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn semantic_type(&self) -> Option<&str> {
        self.semantic_type.as_deref()
    }

    fn role(&self) -> Option<&str> {
        self.annotations.role.as_deref()
    }

    fn source(&self) -> Option<&str> {
        self.annotations
            .provenance
            .as_ref()
            .and_then(|p| p.source.as_deref())
    }

    fn comment(&self) -> Option<&str> {
        self.annotations
            .provenance
            .as_ref()
            .and_then(|p| p.comment.as_deref())
    }
}

/// Reads the well-known annotation keys into a [`DefaultContext`].
#[derive(Copy, Clone, Debug, Default)]
pub struct DefaultContextFactory;

impl ContextFactory<DefaultContext> for DefaultContextFactory {
    fn create(
        &self,
        ast: &Arc<Ast>,
        annotations: &Annotations,
        _path: &Path,
        parent: Option<&TreeNode<DefaultContext>>,
    ) -> DefaultContext {
        let owned = |value: Option<&str>| value.map(str::to_string);

        let title = owned(annotations.title());
        let description = owned(annotations.description());
        let identifier = owned(annotations.identifier());
        let semantic_type = owned(annotations.semantic_type());

        let core = (title.is_some() || description.is_some() || identifier.is_some()).then(|| {
            CoreAnnotations {
                title: title.clone(),
                description: description.clone(),
                identifier: identifier.clone(),
            }
        });
        let provenance = (annotations.source().is_some() || annotations.comment().is_some())
            .then(|| Provenance {
                source: owned(annotations.source()),
                comment: owned(annotations.comment()),
            });

        let parent_entity_id = parent.and_then(|node| {
            let context = node.context();
            context
                .entity_id
                .clone()
                .or_else(|| context.parent_entity_id.clone())
        });

        DefaultContext {
            entity_id: owned(annotations.entity_type()),
            entity_field_id: owned(annotations.entity_field()),
            parent_entity_id,
            identifier,
            title,
            description,
            semantic_type: Some(
                semantic_type
                    .clone()
                    .unwrap_or_else(|| ast.tag().default_semantic_label().to_string()),
            ),
            annotations: AnnotationBundle {
                core,
                role: owned(annotations.role()),
                semantic: semantic_type,
                provenance,
            },
        }
    }
}

#[cfg(test)]
#[path = "../tests/context_tests.rs"]
mod tests;
