//! Entity identity and stamping.
//!
//! Stamping promotes a struct AST into an *entity*: the struct (and every
//! struct nested under its fields) is tagged with the entity's identity, and
//! every field is tagged with a marker derived from it. The markers are plain
//! annotations, so a stamped AST builds and queries like any other.
//!
//! | Where | Key | Value |
//! |-------|-----|-------|
//! | struct annotations | `EntityType` | identity |
//! | struct annotations | `Identifier` | identity |
//! | field (property) annotations | `EntityField` | `field##<identity>` |

use serde::{Deserialize, Serialize};
use shapetree_ast::{AnnotationKey, Ast, AstData, Field, StructShape};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Prefix of every entity field marker.
pub const ENTITY_FIELD_PREFIX: &str = "field##";

// =============================================================================
// EntityId / EntityFieldId
// =============================================================================

/// Opaque token naming a stamped struct.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(Arc<str>);

impl EntityId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Marker attached to every field of this entity.
    pub fn field_id(&self) -> EntityFieldId {
        EntityFieldId(Arc::from(format!("{ENTITY_FIELD_PREFIX}{}", self.0)))
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Field marker derived from an [`EntityId`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityFieldId(Arc<str>);

impl EntityFieldId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Identity this marker was derived from.
    pub fn entity_id(&self) -> Option<EntityId> {
        self.0.strip_prefix(ENTITY_FIELD_PREFIX).map(EntityId::new)
    }
}

impl fmt::Display for EntityFieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Stamping
// =============================================================================

enum Step<'a> {
    /// Schedule the struct-typed fields of this struct.
    Enter(&'a Arc<Ast>),
    /// Rebuild this struct from its already stamped nested structs.
    Exit(&'a Arc<Ast>),
}

/// Stamp `ast` with `identity`.
///
/// Non-struct input is returned as is. The input is never modified; untouched
/// field types are shared with the result.
pub fn stamp(ast: &Arc<Ast>, identity: &EntityId) -> Arc<Ast> {
    if !ast.is_struct() {
        return Arc::clone(ast);
    }

    let marker = identity.field_id();
    let mut stack = vec![Step::Enter(ast)];
    // Stamped structs, in completion order.
    let mut done: Vec<Arc<Ast>> = Vec::new();
    let mut stamped_structs = 0usize;

    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(node) => {
                stack.push(Step::Exit(node));
                if let Some(shape) = node.as_struct() {
                    stack.extend(
                        shape
                            .fields
                            .iter()
                            .rev()
                            .filter(|field| field.ty.is_struct())
                            .map(|field| Step::Enter(&field.ty)),
                    );
                }
            }
            Step::Exit(node) => {
                let Some(shape) = node.as_struct() else {
                    continue;
                };
                let nested = shape.fields.iter().filter(|f| f.ty.is_struct()).count();
                let mut stamped = done.split_off(done.len().saturating_sub(nested)).into_iter();

                let fields = shape
                    .fields
                    .iter()
                    .map(|field| {
                        let ty = if field.ty.is_struct() {
                            stamped.next().unwrap_or_else(|| Arc::clone(&field.ty))
                        } else {
                            Arc::clone(&field.ty)
                        };
                        let mut annotations = field.annotations.clone();
                        annotations.insert(AnnotationKey::EntityField, marker.as_str());
                        Field {
                            key: field.key.clone(),
                            ty,
                            optional: field.optional,
                            readonly: field.readonly,
                            annotations,
                        }
                    })
                    .collect();

                let mut annotations = node.annotations.clone();
                annotations.insert(AnnotationKey::EntityType, identity.as_str());
                annotations.insert(AnnotationKey::Identifier, identity.as_str());

                done.push(Arc::new(Ast {
                    data: AstData::Struct(StructShape {
                        fields,
                        index_signatures: shape.index_signatures.clone(),
                    }),
                    annotations,
                }));
                stamped_structs += 1;
            }
        }
    }

    debug!(entity = %identity, structs = stamped_structs, "stamped entity");
    done.pop().unwrap_or_else(|| Arc::clone(ast))
}

/// Identity stamped on `ast`, if any.
pub fn entity_id_of(ast: &Ast) -> Option<EntityId> {
    ast.annotations.entity_type().map(EntityId::new)
}

pub fn is_entity(ast: &Ast) -> bool {
    ast.is_struct() && ast.annotations.entity_type().is_some()
}

#[cfg(test)]
#[path = "../tests/identity_tests.rs"]
mod tests;
