//! Type-shape AST for shapetree.
//!
//! This crate holds the data model shared by every other shapetree crate:
//! - The closed AST (`Ast`, `AstData` and its shape payloads)
//! - Annotation dictionaries with typed accessors (`Annotations`, `AnnotationKey`)
//! - Kind tags and the default semantic label mapping (`AstTag`)
//! - JSON decoding of AST descriptions produced outside Rust
//! - Centralized limits

pub mod annotations;
pub use annotations::{AnnotationKey, Annotations};

pub mod ast;
pub use ast::{
    AsAst, Ast, AstData, Declaration, Field, IndexSignature, LiteralValue, PropertyKey,
    Refinement, StructShape, Suspend, Transformation, TupleElement, TupleShape,
};

pub mod tag;
pub use tag::{AstTag, UNKNOWN_SEMANTIC_LABEL, semantic_label_for_tag};

pub mod decode;

mod error;
pub use error::{AstError, Result};

pub mod limits;
