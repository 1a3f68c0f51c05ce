//! Type-shape AST.
//!
//! An [`Ast`] is a closed, tagged description of a schema's shape plus the
//! annotation dictionary attached to it. Composite nodes hold their children
//! behind `Arc` so that rewrites (see entity stamping) can share untouched
//! subtrees instead of copying them.
//!
//! The structure is a pure description: nothing here validates data.

use crate::annotations::{AnnotationKey, Annotations};
use crate::tag::AstTag;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

// =============================================================================
// Ast
// =============================================================================

/// A node of the type-shape description.
#[derive(Clone, Debug)]
pub struct Ast {
    pub data: AstData,
    pub annotations: Annotations,
}

/// Structural kind of an [`Ast`] node.
///
/// | Variant | Children |
/// |---------|----------|
/// | `Struct` | fields, then index signature value types |
/// | `Union` | alternatives |
/// | `Tuple` | elements, then rest entries |
/// | `Refinement` | the refined (`from`) type |
/// | `Transformation` | `from`, `to` |
/// | `Suspend` | none (never resolved by traversals) |
/// | `Declaration` | type parameters |
/// | everything else | none |
#[derive(Clone, Debug)]
pub enum AstData {
    Struct(StructShape),
    Union(Vec<Arc<Ast>>),
    Tuple(TupleShape),
    Refinement(Refinement),
    Transformation(Transformation),
    Suspend(Suspend),
    Declaration(Declaration),
    String,
    Number,
    Boolean,
    BigInt,
    Symbol,
    Object,
    Literal(LiteralValue),
    Undefined,
    Void,
    Never,
    Unknown,
    Any,
    /// Template literal type, kept as its source pattern.
    TemplateLiteral(String),
    /// Enumeration as `(name, value)` pairs.
    Enums(Vec<(String, LiteralValue)>),
    /// Unique symbol, identified by its description.
    UniqueSymbol(String),
}

#[derive(Clone, Debug, Default)]
pub struct StructShape {
    pub fields: Vec<Field>,
    pub index_signatures: Vec<IndexSignature>,
}

/// A named member of a struct.
///
/// `annotations` are the property-level (edge) annotations, distinct from the
/// annotations of the field's type.
#[derive(Clone, Debug)]
pub struct Field {
    pub key: PropertyKey,
    pub ty: Arc<Ast>,
    pub optional: bool,
    pub readonly: bool,
    pub annotations: Annotations,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    Name(String),
    /// Symbol-keyed property; the payload is the symbol's description.
    Symbol(String),
}

impl PropertyKey {
    /// Textual form: the name, or the symbol description.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Name(name) | Self::Symbol(name) => name,
        }
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug)]
pub struct IndexSignature {
    pub parameter: Arc<Ast>,
    pub ty: Arc<Ast>,
}

#[derive(Clone, Debug, Default)]
pub struct TupleShape {
    pub elements: Vec<TupleElement>,
    pub rest: Vec<TupleElement>,
}

#[derive(Clone, Debug)]
pub struct TupleElement {
    pub ty: Arc<Ast>,
    pub optional: bool,
    pub annotations: Annotations,
}

impl TupleElement {
    pub fn new(ty: impl Into<Arc<Ast>>) -> Self {
        Self {
            ty: ty.into(),
            optional: false,
            annotations: Annotations::new(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Refinement {
    pub from: Arc<Ast>,
    /// Optional label of the predicate (e.g. `positive`).
    pub name: Option<String>,
}

#[derive(Clone, Debug)]
pub struct Transformation {
    pub from: Arc<Ast>,
    pub to: Arc<Ast>,
}

#[derive(Clone, Debug)]
pub struct Declaration {
    pub name: Option<String>,
    pub type_parameters: Vec<Arc<Ast>>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum LiteralValue {
    String(String),
    Number(f64),
    Boolean(bool),
    BigInt(String),
    Null,
}

// =============================================================================
// Suspend
// =============================================================================

type SuspendThunk = dyn Fn() -> Option<Arc<Ast>> + Send + Sync;

/// Lazily resolved reference, used for self-referential definitions.
///
/// Traversals treat a `Suspend` as a terminal node. Calling
/// [`resolve`](Suspend::resolve) is an explicit opt-in made by the caller.
#[derive(Clone)]
pub struct Suspend {
    label: Option<String>,
    thunk: Arc<SuspendThunk>,
}

impl Suspend {
    pub fn new<F>(thunk: F) -> Self
    where
        F: Fn() -> Option<Arc<Ast>> + Send + Sync + 'static,
    {
        Self {
            label: None,
            thunk: Arc::new(thunk),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Name of the referenced definition, when known.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn resolve(&self) -> Option<Arc<Ast>> {
        (self.thunk)()
    }
}

impl fmt::Debug for Suspend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Suspend").field("label", &self.label).finish_non_exhaustive()
    }
}

// =============================================================================
// Construction helpers
// =============================================================================

impl Ast {
    pub fn new(data: AstData) -> Self {
        Self {
            data,
            annotations: Annotations::new(),
        }
    }

    pub fn string() -> Self {
        Self::new(AstData::String)
    }

    pub fn number() -> Self {
        Self::new(AstData::Number)
    }

    pub fn boolean() -> Self {
        Self::new(AstData::Boolean)
    }

    pub fn literal(value: LiteralValue) -> Self {
        Self::new(AstData::Literal(value))
    }

    pub fn structure(fields: Vec<Field>) -> Self {
        Self::new(AstData::Struct(StructShape {
            fields,
            index_signatures: Vec::new(),
        }))
    }

    pub fn union(members: Vec<Arc<Ast>>) -> Self {
        Self::new(AstData::Union(members))
    }

    pub fn tuple(elements: Vec<TupleElement>, rest: Vec<TupleElement>) -> Self {
        Self::new(AstData::Tuple(TupleShape { elements, rest }))
    }

    /// `Array<T>`: a tuple with no fixed elements and a single rest entry.
    pub fn array(item: impl Into<Arc<Ast>>) -> Self {
        Self::tuple(Vec::new(), vec![TupleElement::new(item)])
    }

    pub fn refinement(from: impl Into<Arc<Ast>>) -> Self {
        Self::new(AstData::Refinement(Refinement {
            from: from.into(),
            name: None,
        }))
    }

    pub fn transformation(from: impl Into<Arc<Ast>>, to: impl Into<Arc<Ast>>) -> Self {
        Self::new(AstData::Transformation(Transformation {
            from: from.into(),
            to: to.into(),
        }))
    }

    pub fn suspend<F>(thunk: F) -> Self
    where
        F: Fn() -> Option<Arc<Ast>> + Send + Sync + 'static,
    {
        Self::new(AstData::Suspend(Suspend::new(thunk)))
    }

    pub fn declaration(type_parameters: Vec<Arc<Ast>>) -> Self {
        Self::new(AstData::Declaration(Declaration {
            name: None,
            type_parameters,
        }))
    }

    /// Builder-style annotation on the node itself.
    pub fn annotate(mut self, key: AnnotationKey, value: impl Into<Value>) -> Self {
        self.annotations.insert(key, value);
        self
    }

    pub fn tag(&self) -> AstTag {
        AstTag::of(&self.data)
    }

    pub fn as_struct(&self) -> Option<&StructShape> {
        match &self.data {
            AstData::Struct(shape) => Some(shape),
            _ => None,
        }
    }

    pub fn is_struct(&self) -> bool {
        matches!(self.data, AstData::Struct(_))
    }
}

impl Field {
    pub fn new(name: impl Into<String>, ty: impl Into<Arc<Ast>>) -> Self {
        Self {
            key: PropertyKey::Name(name.into()),
            ty: ty.into(),
            optional: false,
            readonly: false,
            annotations: Annotations::new(),
        }
    }

    pub fn symbol(description: impl Into<String>, ty: impl Into<Arc<Ast>>) -> Self {
        Self {
            key: PropertyKey::Symbol(description.into()),
            ..Self::new(String::new(), ty)
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Annotate the property itself (not its type).
    pub fn annotate(mut self, key: AnnotationKey, value: impl Into<Value>) -> Self {
        self.annotations.insert(key, value);
        self
    }
}

// =============================================================================
// AsAst
// =============================================================================

/// Anything that exposes a type-shape AST.
///
/// Raw nodes return themselves; schema wrappers return the AST they carry.
pub trait AsAst {
    fn as_ast(&self) -> Arc<Ast>;
}

impl AsAst for Ast {
    fn as_ast(&self) -> Arc<Ast> {
        Arc::new(self.clone())
    }
}

impl AsAst for Arc<Ast> {
    fn as_ast(&self) -> Arc<Ast> {
        Arc::clone(self)
    }
}

impl<T: AsAst + ?Sized> AsAst for &T {
    fn as_ast(&self) -> Arc<Ast> {
        (**self).as_ast()
    }
}

// =============================================================================
// Drop
// =============================================================================

impl AstData {
    /// Move every direct child out of `self`, leaving empty shells behind.
    fn drain_children(&mut self, out: &mut Vec<Arc<Ast>>) {
        match std::mem::replace(self, AstData::Never) {
            AstData::Struct(shape) => {
                out.extend(shape.fields.into_iter().map(|field| field.ty));
                for signature in shape.index_signatures {
                    out.push(signature.parameter);
                    out.push(signature.ty);
                }
            }
            AstData::Union(members) => out.extend(members),
            AstData::Tuple(shape) => {
                out.extend(shape.elements.into_iter().map(|element| element.ty));
                out.extend(shape.rest.into_iter().map(|element| element.ty));
            }
            AstData::Refinement(refinement) => out.push(refinement.from),
            AstData::Transformation(transformation) => {
                out.push(transformation.from);
                out.push(transformation.to);
            }
            AstData::Declaration(declaration) => out.extend(declaration.type_parameters),
            other => *self = other,
        }
    }
}

// Nested schemas can be thousands of levels deep; the derived drop glue would
// recurse once per level.
impl Drop for Ast {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.data.drain_children(&mut pending);
        while let Some(child) = pending.pop() {
            if let Some(mut owned) = Arc::into_inner(child) {
                owned.data.drain_children(&mut pending);
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/ast_tests.rs"]
mod tests;
