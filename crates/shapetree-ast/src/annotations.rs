//! Annotation dictionaries.
//!
//! Every AST node, struct field and tuple element carries an [`Annotations`]
//! map. The map is a side channel: it never changes the structural kind of a
//! node, it only carries metadata (titles, semantic labels, provenance and the
//! identity markers written by entity stamping).
//!
//! Keys are an opaque [`AnnotationKey`]; values are arbitrary JSON. Callers are
//! expected to go through the typed accessors (`title()`, `semantic_type()`,
//! ...) instead of poking the raw map.

use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;

// =============================================================================
// AnnotationKey
// =============================================================================

/// Key of an annotation entry.
///
/// | Key | JSON name | Meaning |
/// |-----|-----------|---------|
/// | `Title` | `title` | Short human label |
/// | `Description` | `description` | Longer free text |
/// | `Identifier` | `identifier` | Generic schema identifier |
/// | `SemanticType` | `semanticType` | Semantic label (e.g. `person`) |
/// | `Role` | `role` | Role of the value inside its parent |
/// | `Source` | `source` | Provenance: where the value comes from |
/// | `Comment` | `comment` | Provenance: free-form remark |
/// | `EntityType` | `entityType` | Identity marker on a stamped struct |
/// | `EntityField` | `entityField` | Identity marker on a stamped field |
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AnnotationKey {
    Title,
    Description,
    Identifier,
    SemanticType,
    Role,
    Source,
    Comment,
    EntityType,
    EntityField,
    /// Any key the core does not interpret.
    Custom(String),
}

impl AnnotationKey {
    /// Name used when annotations are read from or written to JSON.
    pub fn name(&self) -> &str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Identifier => "identifier",
            Self::SemanticType => "semanticType",
            Self::Role => "role",
            Self::Source => "source",
            Self::Comment => "comment",
            Self::EntityType => "entityType",
            Self::EntityField => "entityField",
            Self::Custom(name) => name,
        }
    }

    /// Inverse of [`AnnotationKey::name`]. Unknown names become `Custom`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "title" => Self::Title,
            "description" => Self::Description,
            "identifier" => Self::Identifier,
            "semanticType" => Self::SemanticType,
            "role" => Self::Role,
            "source" => Self::Source,
            "comment" => Self::Comment,
            "entityType" => Self::EntityType,
            "entityField" => Self::EntityField,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for AnnotationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Annotations
// =============================================================================

/// Insertion-ordered annotation dictionary.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Annotations {
    entries: IndexMap<AnnotationKey, Value>,
}

impl Annotations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, key: &AnnotationKey) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &AnnotationKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert or replace an entry, returning the previous value.
    pub fn insert(&mut self, key: AnnotationKey, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key, value.into())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: AnnotationKey, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AnnotationKey, &Value)> {
        self.entries.iter()
    }

    /// Right-biased merge: entries of `overrides` win over `self`.
    ///
    /// Keys keep their first insertion position, so a merged dictionary lists
    /// the node's own keys first and any edge-only keys after them.
    pub fn merged(&self, overrides: &Annotations) -> Annotations {
        if overrides.is_empty() {
            return self.clone();
        }
        let mut entries = self.entries.clone();
        for (key, value) in &overrides.entries {
            entries.insert(key.clone(), value.clone());
        }
        Annotations { entries }
    }

    /// String value of `key`, if present and a JSON string.
    pub fn get_str(&self, key: &AnnotationKey) -> Option<&str> {
        self.entries.get(key).and_then(Value::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.get_str(&AnnotationKey::Title)
    }

    pub fn description(&self) -> Option<&str> {
        self.get_str(&AnnotationKey::Description)
    }

    pub fn identifier(&self) -> Option<&str> {
        self.get_str(&AnnotationKey::Identifier)
    }

    pub fn semantic_type(&self) -> Option<&str> {
        self.get_str(&AnnotationKey::SemanticType)
    }

    pub fn role(&self) -> Option<&str> {
        self.get_str(&AnnotationKey::Role)
    }

    pub fn source(&self) -> Option<&str> {
        self.get_str(&AnnotationKey::Source)
    }

    pub fn comment(&self) -> Option<&str> {
        self.get_str(&AnnotationKey::Comment)
    }

    pub fn entity_type(&self) -> Option<&str> {
        self.get_str(&AnnotationKey::EntityType)
    }

    pub fn entity_field(&self) -> Option<&str> {
        self.get_str(&AnnotationKey::EntityField)
    }
}

impl FromIterator<(AnnotationKey, Value)> for Annotations {
    fn from_iter<I: IntoIterator<Item = (AnnotationKey, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/annotations_tests.rs"]
mod tests;
