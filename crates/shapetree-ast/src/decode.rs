//! JSON descriptions of ASTs.
//!
//! Schema libraries outside Rust can hand their AST over as JSON. Each node is
//! an object discriminated by `_tag` (see [`AstTag::name`]):
//!
//! ```json
//! {
//!   "_tag": "Struct",
//!   "annotations": { "semanticType": "person" },
//!   "fields": [
//!     { "name": "name", "type": { "_tag": "StringKeyword" } },
//!     { "name": "friends", "type": { "_tag": "Tuple", "rest": [{ "type": { "_tag": "Suspend", "ref": "Person" } }] } }
//!   ],
//!   "$defs": { "Person": { "_tag": "Struct", "fields": [] } }
//! }
//! ```
//!
//! Decoding runs in two phases: `serde` deserializes the document into plain
//! description structs, then an explicit work-list converts those into an
//! [`Ast`]. Only the first phase recurses; it grows its stack on demand at
//! every child node and is bounded by [`MAX_DECODE_DEPTH`] JSON nesting levels.
//!
//! `$defs` is only read on the root object. A `Suspend` node names one of
//! those definitions; resolving it decodes the definition on demand, so
//! recursive definitions never unfold during decoding.

use crate::annotations::{AnnotationKey, Annotations};
use crate::ast::{
    Ast, AstData, Declaration, Field, IndexSignature, LiteralValue, PropertyKey, Refinement,
    StructShape, Suspend, Transformation, TupleElement, TupleShape,
};
use crate::error::{AstError, Result};
use crate::limits::{DECODE_STACK_GROWTH, DECODE_STACK_RED_ZONE, MAX_DECODE_DEPTH};
use crate::tag::AstTag;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;

// =============================================================================
// Entry points
// =============================================================================

/// Decode a JSON AST description.
pub fn from_json(value: &Value) -> Result<Ast> {
    check_nesting(value)?;
    let root = NodeDto::deserialize(value).map_err(malformed)?;
    let defs = match value.get("$defs") {
        None => Map::new(),
        Some(Value::Object(defs)) => defs.clone(),
        Some(other) => {
            return Err(AstError::Malformed(format!(
                "`$defs` must be an object, found {other}"
            )));
        }
    };

    let decoder = Decoder {
        defs: Arc::new(defs),
    };
    // Resolution is lazy, so make sure every definition decodes now.
    for (name, def) in decoder.defs.iter() {
        decoder.decode_value(def).map_err(|err| {
            debug!(definition = %name, error = %err, "invalid $defs entry");
            err
        })?;
    }
    decoder.convert(root)
}

/// Decode a JSON AST description from text.
///
/// `serde_json` limits text to 128 nesting levels on its own.
pub fn from_json_str(text: &str) -> Result<Ast> {
    let value: Value = serde_json::from_str(text).map_err(malformed)?;
    from_json(&value)
}

fn malformed(err: serde_json::Error) -> AstError {
    AstError::Malformed(err.to_string())
}

/// Reject documents nested deeper than [`MAX_DECODE_DEPTH`] before `serde`
/// walks them.
fn check_nesting(value: &Value) -> Result<()> {
    let mut stack = vec![(value, 1u32)];
    while let Some((value, depth)) = stack.pop() {
        if depth > MAX_DECODE_DEPTH {
            return Err(AstError::DepthExceeded {
                limit: MAX_DECODE_DEPTH,
            });
        }
        match value {
            Value::Array(items) => stack.extend(items.iter().map(|item| (item, depth + 1))),
            Value::Object(entries) => stack.extend(entries.values().map(|item| (item, depth + 1))),
            _ => {}
        }
    }
    Ok(())
}

// =============================================================================
// Description structs
// =============================================================================

/// Treat an explicit `null` as a present value rather than as absence.
fn deserialize_present<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// A child node description. Each one may need a fresh stack segment.
#[derive(Debug)]
struct ChildDto(Box<NodeDto>);

impl<'de> Deserialize<'de> for ChildDto {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        stacker::maybe_grow(DECODE_STACK_RED_ZONE, DECODE_STACK_GROWTH, || {
            NodeDto::deserialize(deserializer).map(|node| Self(Box::new(node)))
        })
    }
}

impl ChildDto {
    fn into_inner(self) -> NodeDto {
        *self.0
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeDto {
    #[serde(rename = "_tag")]
    tag: String,
    #[serde(default)]
    annotations: Option<Map<String, Value>>,
    #[serde(default)]
    fields: Vec<FieldDto>,
    #[serde(default)]
    index_signatures: Vec<IndexSignatureDto>,
    #[serde(default)]
    types: Vec<ChildDto>,
    #[serde(default)]
    elements: Vec<ElementDto>,
    #[serde(default)]
    rest: Vec<ElementDto>,
    #[serde(default)]
    from: Option<ChildDto>,
    #[serde(default)]
    to: Option<ChildDto>,
    #[serde(default)]
    type_parameters: Vec<ChildDto>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    literal: Option<LiteralDto>,
    #[serde(default)]
    pattern: Option<String>,
    #[serde(default)]
    enums: Vec<(String, LiteralDto)>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, rename = "ref")]
    reference: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FieldDto {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    symbol: Option<String>,
    #[serde(default, rename = "type")]
    ty: Option<ChildDto>,
    #[serde(default)]
    optional: bool,
    #[serde(default)]
    readonly: bool,
    #[serde(default)]
    annotations: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct IndexSignatureDto {
    #[serde(default)]
    parameter: Option<ChildDto>,
    #[serde(default, rename = "type")]
    ty: Option<ChildDto>,
}

#[derive(Debug, Deserialize)]
struct ElementDto {
    #[serde(default, rename = "type")]
    ty: Option<ChildDto>,
    #[serde(default)]
    optional: bool,
    #[serde(default)]
    annotations: Option<Map<String, Value>>,
}

/// Literal values: strings, numbers, booleans, `null`, or `{"bigint": "<digits>"}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LiteralDto {
    String(String),
    Number(f64),
    Boolean(bool),
    BigInt { bigint: String },
    Null,
}

impl From<LiteralDto> for LiteralValue {
    fn from(literal: LiteralDto) -> Self {
        match literal {
            LiteralDto::String(text) => Self::String(text),
            LiteralDto::Number(number) => Self::Number(number),
            LiteralDto::Boolean(flag) => Self::Boolean(flag),
            LiteralDto::BigInt { bigint } => Self::BigInt(bigint),
            LiteralDto::Null => Self::Null,
        }
    }
}

fn to_annotations(entries: Option<Map<String, Value>>) -> Annotations {
    entries
        .into_iter()
        .flatten()
        .map(|(name, value)| (AnnotationKey::from_name(&name), value))
        .collect()
}

fn required<T>(value: Option<T>, tag: AstTag, member: &'static str) -> Result<T> {
    value.ok_or(AstError::MissingMember {
        tag: tag.name(),
        member,
    })
}

// =============================================================================
// Conversion
// =============================================================================

/// Per-child data of a composite node kept while its children convert.
struct FieldHead {
    key: PropertyKey,
    optional: bool,
    readonly: bool,
    annotations: Annotations,
}

struct ElementHead {
    optional: bool,
    annotations: Annotations,
}

/// A composite node waiting for its converted children.
///
/// Children are converted in the order they appear here; index signatures
/// contribute two (parameter, then type).
enum Shape {
    Struct {
        fields: Vec<FieldHead>,
        signatures: usize,
    },
    Union(usize),
    Tuple {
        elements: Vec<ElementHead>,
        rest: Vec<ElementHead>,
    },
    Refinement(Option<String>),
    Transformation,
    Declaration {
        name: Option<String>,
        parameters: usize,
    },
}

impl Shape {
    fn arity(&self) -> usize {
        match self {
            Self::Struct { fields, signatures } => fields.len() + 2 * signatures,
            Self::Union(members) => *members,
            Self::Tuple { elements, rest } => elements.len() + rest.len(),
            Self::Refinement(_) => 1,
            Self::Transformation => 2,
            Self::Declaration { parameters, .. } => *parameters,
        }
    }
}

enum Entered {
    Leaf(AstData),
    Composite(Shape, Vec<NodeDto>),
}

enum Step {
    Enter(NodeDto),
    Exit {
        tag: AstTag,
        shape: Shape,
        annotations: Annotations,
    },
}

#[derive(Clone)]
struct Decoder {
    defs: Arc<Map<String, Value>>,
}

impl Decoder {
    fn decode_value(&self, value: &Value) -> Result<Ast> {
        check_nesting(value)?;
        let node = NodeDto::deserialize(value).map_err(malformed)?;
        self.convert(node)
    }

    /// Convert a description into an AST with an explicit work-list.
    fn convert(&self, root: NodeDto) -> Result<Ast> {
        let mut stack = vec![Step::Enter(root)];
        let mut done: Vec<Arc<Ast>> = Vec::new();

        while let Some(step) = stack.pop() {
            match step {
                Step::Enter(mut node) => {
                    let tag: AstTag = node.tag.parse()?;
                    let annotations = to_annotations(node.annotations.take());
                    match self.enter(tag, node)? {
                        Entered::Leaf(data) => done.push(Arc::new(Ast { data, annotations })),
                        Entered::Composite(shape, children) => {
                            stack.push(Step::Exit {
                                tag,
                                shape,
                                annotations,
                            });
                            stack.extend(children.into_iter().rev().map(Step::Enter));
                        }
                    }
                }
                Step::Exit {
                    tag,
                    shape,
                    annotations,
                } => {
                    let start = done.len().saturating_sub(shape.arity());
                    let children = done.split_off(start);
                    let data = assemble(tag, shape, children)?;
                    done.push(Arc::new(Ast { data, annotations }));
                }
            }
        }

        let root = done.pop().ok_or(AstError::MissingMember {
            tag: "document",
            member: "_tag",
        })?;
        // The work-list produced this node and nothing else holds it.
        Ok(Arc::unwrap_or_clone(root))
    }

    /// Split a description into its leaf data, or its pending shape plus the
    /// child descriptions still to convert.
    fn enter(&self, tag: AstTag, node: NodeDto) -> Result<Entered> {
        let NodeDto {
            fields,
            index_signatures,
            types,
            elements,
            rest,
            from,
            to,
            type_parameters,
            name,
            literal,
            pattern,
            enums,
            description,
            reference,
            ..
        } = node;
        let mut children = Vec::new();

        let shape = match tag {
            AstTag::Struct => {
                let mut heads = Vec::with_capacity(fields.len());
                for field in fields {
                    let key = match (field.name, field.symbol) {
                        (Some(name), _) => PropertyKey::Name(name),
                        (None, Some(description)) => PropertyKey::Symbol(description),
                        (None, None) => {
                            return Err(AstError::MissingMember {
                                tag: tag.name(),
                                member: "name",
                            });
                        }
                    };
                    children.push(required(field.ty, tag, "type")?.into_inner());
                    heads.push(FieldHead {
                        key,
                        optional: field.optional,
                        readonly: field.readonly,
                        annotations: to_annotations(field.annotations),
                    });
                }
                let signatures = index_signatures.len();
                for signature in index_signatures {
                    children.push(required(signature.parameter, tag, "parameter")?.into_inner());
                    children.push(required(signature.ty, tag, "type")?.into_inner());
                }
                Shape::Struct {
                    fields: heads,
                    signatures,
                }
            }
            AstTag::Union => {
                let members = types.len();
                children.extend(types.into_iter().map(ChildDto::into_inner));
                Shape::Union(members)
            }
            AstTag::Tuple => {
                let mut heads = |entries: Vec<ElementDto>| -> Result<Vec<ElementHead>> {
                    let mut out = Vec::with_capacity(entries.len());
                    for element in entries {
                        children.push(required(element.ty, tag, "type")?.into_inner());
                        out.push(ElementHead {
                            optional: element.optional,
                            annotations: to_annotations(element.annotations),
                        });
                    }
                    Ok(out)
                };
                let elements = heads(elements)?;
                let rest = heads(rest)?;
                Shape::Tuple { elements, rest }
            }
            AstTag::Refinement => {
                children.push(required(from, tag, "from")?.into_inner());
                Shape::Refinement(name)
            }
            AstTag::Transformation => {
                children.push(required(from, tag, "from")?.into_inner());
                children.push(required(to, tag, "to")?.into_inner());
                Shape::Transformation
            }
            AstTag::Declaration => {
                let parameters = type_parameters.len();
                children.extend(type_parameters.into_iter().map(ChildDto::into_inner));
                Shape::Declaration { name, parameters }
            }
            AstTag::Suspend => {
                return Ok(Entered::Leaf(AstData::Suspend(
                    self.suspend(required(reference, tag, "ref")?)?,
                )));
            }
            AstTag::Literal => {
                return Ok(Entered::Leaf(AstData::Literal(
                    required(literal, tag, "literal")?.into(),
                )));
            }
            AstTag::TemplateLiteral => {
                return Ok(Entered::Leaf(AstData::TemplateLiteral(required(
                    pattern, tag, "pattern",
                )?)));
            }
            AstTag::Enums => {
                return Ok(Entered::Leaf(AstData::Enums(
                    enums
                        .into_iter()
                        .map(|(name, literal)| (name, literal.into()))
                        .collect(),
                )));
            }
            AstTag::UniqueSymbol => {
                return Ok(Entered::Leaf(AstData::UniqueSymbol(required(
                    description,
                    tag,
                    "description",
                )?)));
            }
            AstTag::String => return Ok(Entered::Leaf(AstData::String)),
            AstTag::Number => return Ok(Entered::Leaf(AstData::Number)),
            AstTag::Boolean => return Ok(Entered::Leaf(AstData::Boolean)),
            AstTag::BigInt => return Ok(Entered::Leaf(AstData::BigInt)),
            AstTag::Symbol => return Ok(Entered::Leaf(AstData::Symbol)),
            AstTag::Object => return Ok(Entered::Leaf(AstData::Object)),
            AstTag::Undefined => return Ok(Entered::Leaf(AstData::Undefined)),
            AstTag::Void => return Ok(Entered::Leaf(AstData::Void)),
            AstTag::Never => return Ok(Entered::Leaf(AstData::Never)),
            AstTag::Unknown => return Ok(Entered::Leaf(AstData::Unknown)),
            AstTag::Any => return Ok(Entered::Leaf(AstData::Any)),
        };

        Ok(Entered::Composite(shape, children))
    }

    fn suspend(&self, name: String) -> Result<Suspend> {
        if !self.defs.contains_key(&name) {
            return Err(AstError::UnknownReference(name));
        }
        let decoder = self.clone();
        let label = name.clone();
        Ok(Suspend::new(move || {
            let def = decoder.defs.get(&name)?;
            decoder.decode_value(def).ok().map(Arc::new)
        })
        .with_label(label))
    }
}

/// Rebuild a composite node from its converted children, in child order.
fn assemble(tag: AstTag, shape: Shape, children: Vec<Arc<Ast>>) -> Result<AstData> {
    let mut children = children.into_iter();
    let mut next = || {
        children.next().ok_or(AstError::MissingMember {
            tag: tag.name(),
            member: "type",
        })
    };

    let data = match shape {
        Shape::Struct { fields, signatures } => {
            let mut converted = Vec::with_capacity(fields.len());
            for head in fields {
                converted.push(Field {
                    key: head.key,
                    ty: next()?,
                    optional: head.optional,
                    readonly: head.readonly,
                    annotations: head.annotations,
                });
            }
            let mut index_signatures = Vec::with_capacity(signatures);
            for _ in 0..signatures {
                index_signatures.push(IndexSignature {
                    parameter: next()?,
                    ty: next()?,
                });
            }
            AstData::Struct(StructShape {
                fields: converted,
                index_signatures,
            })
        }
        Shape::Union(members) => {
            let mut converted = Vec::with_capacity(members);
            for _ in 0..members {
                converted.push(next()?);
            }
            AstData::Union(converted)
        }
        Shape::Tuple { elements, rest } => {
            let mut element = |head: ElementHead| -> Result<TupleElement> {
                Ok(TupleElement {
                    ty: next()?,
                    optional: head.optional,
                    annotations: head.annotations,
                })
            };
            let elements = elements.into_iter().map(&mut element).collect::<Result<_>>()?;
            let rest = rest.into_iter().map(&mut element).collect::<Result<_>>()?;
            AstData::Tuple(TupleShape { elements, rest })
        }
        Shape::Refinement(name) => AstData::Refinement(Refinement { from: next()?, name }),
        Shape::Transformation => AstData::Transformation(Transformation {
            from: next()?,
            to: next()?,
        }),
        Shape::Declaration { name, parameters } => {
            let mut type_parameters = Vec::with_capacity(parameters);
            for _ in 0..parameters {
                type_parameters.push(next()?);
            }
            AstData::Declaration(Declaration {
                name,
                type_parameters,
            })
        }
    };
    Ok(data)
}

#[cfg(test)]
#[path = "../tests/decode_tests.rs"]
mod tests;
