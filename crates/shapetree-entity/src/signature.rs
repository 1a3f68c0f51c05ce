//! Field signatures and entity fingerprints.
//!
//! A field signature is `<path>:<kind-tag>:<marker>`. The fingerprint of a
//! stamped AST hashes the *set* of its signatures, so it ignores field order
//! and duplicates but changes with the identity embedded in every marker.

use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use shapetree_ast::{Ast, AstData};
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Kind tag used for property-level signatures.
pub const PROPERTY_SIGNATURE_TAG: &str = "PropertySignature";

/// Path label of the root node in signatures.
const ROOT_LABEL: &str = "root";

/// Structural hash over the signature set of a stamped AST.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityFingerprint(pub u64);

impl fmt::Display for EntityFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Signatures of every marked node and property.
///
/// A node of any kind carrying a field marker in its own annotations yields
/// `<path or root>:<Tag>:<marker>`. Each marked struct field yields
/// `<path>.<key>:PropertySignature:<marker>` (just `<key>` at the root).
/// Only struct fields are descended. Nodes are visited in pre-order, and a
/// struct lists its own field signatures before anything nested below it.
pub fn field_signatures(ast: &Ast) -> Vec<String> {
    let mut signatures = Vec::new();
    let mut stack: Vec<(&Ast, String)> = vec![(ast, String::new())];

    while let Some((node, path)) = stack.pop() {
        if let Some(marker) = node.annotations.entity_field() {
            let label = if path.is_empty() { ROOT_LABEL } else { path.as_str() };
            signatures.push(format!("{label}:{}:{marker}", node.tag().name()));
        }

        let AstData::Struct(shape) = &node.data else {
            continue;
        };

        let mut nested = Vec::with_capacity(shape.fields.len());
        for field in &shape.fields {
            let field_path = if path.is_empty() {
                field.key.to_string()
            } else {
                format!("{path}.{}", field.key)
            };
            if let Some(marker) = field.annotations.entity_field() {
                signatures.push(format!("{field_path}:{PROPERTY_SIGNATURE_TAG}:{marker}"));
            }
            nested.push((field.ty.as_ref(), field_path));
        }
        // Reversed so the first field's subtree is compiled first.
        stack.extend(nested.into_iter().rev());
    }

    signatures
}

/// Deduplicated, ordered signature set.
pub fn signature_set(ast: &Ast) -> BTreeSet<String> {
    field_signatures(ast).into_iter().collect()
}

/// Fingerprint of a stamped AST.
pub fn fingerprint(ast: &Ast) -> EntityFingerprint {
    fingerprint_signatures(&signature_set(ast))
}

/// Fingerprint of an already collected signature set.
pub fn fingerprint_signatures(signatures: &BTreeSet<String>) -> EntityFingerprint {
    let mut hasher = FxHasher::default();
    signatures.len().hash(&mut hasher);
    for signature in signatures {
        signature.hash(&mut hasher);
    }
    EntityFingerprint(hasher.finish())
}

#[cfg(test)]
#[path = "../tests/signature_tests.rs"]
mod tests;
