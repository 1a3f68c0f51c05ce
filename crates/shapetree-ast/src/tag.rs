//! Kind tags and default semantic labels.
//!
//! [`AstTag`] is the payload-free mirror of [`AstData`]. It names the kind in
//! field signatures and JSON descriptions, and maps every kind to the semantic
//! label used when a node carries no explicit `semanticType` annotation.

use crate::ast::AstData;
use crate::error::AstError;
use std::fmt;
use std::str::FromStr;

/// Label used for anything that cannot be classified.
pub const UNKNOWN_SEMANTIC_LABEL: &str = "unknown";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AstTag {
    Struct,
    Union,
    Tuple,
    Refinement,
    Transformation,
    Suspend,
    Declaration,
    String,
    Number,
    Boolean,
    BigInt,
    Symbol,
    Object,
    Literal,
    Undefined,
    Void,
    Never,
    Unknown,
    Any,
    TemplateLiteral,
    Enums,
    UniqueSymbol,
}

impl AstTag {
    pub const ALL: [AstTag; 22] = [
        Self::Struct,
        Self::Union,
        Self::Tuple,
        Self::Refinement,
        Self::Transformation,
        Self::Suspend,
        Self::Declaration,
        Self::String,
        Self::Number,
        Self::Boolean,
        Self::BigInt,
        Self::Symbol,
        Self::Object,
        Self::Literal,
        Self::Undefined,
        Self::Void,
        Self::Never,
        Self::Unknown,
        Self::Any,
        Self::TemplateLiteral,
        Self::Enums,
        Self::UniqueSymbol,
    ];

    pub const fn of(data: &AstData) -> Self {
        match data {
            AstData::Struct(_) => Self::Struct,
            AstData::Union(_) => Self::Union,
            AstData::Tuple(_) => Self::Tuple,
            AstData::Refinement(_) => Self::Refinement,
            AstData::Transformation(_) => Self::Transformation,
            AstData::Suspend(_) => Self::Suspend,
            AstData::Declaration(_) => Self::Declaration,
            AstData::String => Self::String,
            AstData::Number => Self::Number,
            AstData::Boolean => Self::Boolean,
            AstData::BigInt => Self::BigInt,
            AstData::Symbol => Self::Symbol,
            AstData::Object => Self::Object,
            AstData::Literal(_) => Self::Literal,
            AstData::Undefined => Self::Undefined,
            AstData::Void => Self::Void,
            AstData::Never => Self::Never,
            AstData::Unknown => Self::Unknown,
            AstData::Any => Self::Any,
            AstData::TemplateLiteral(_) => Self::TemplateLiteral,
            AstData::Enums(_) => Self::Enums,
            AstData::UniqueSymbol(_) => Self::UniqueSymbol,
        }
    }

    /// Tag name as it appears in field signatures and JSON (`_tag`).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Struct => "Struct",
            Self::Union => "Union",
            Self::Tuple => "Tuple",
            Self::Refinement => "Refinement",
            Self::Transformation => "Transformation",
            Self::Suspend => "Suspend",
            Self::Declaration => "Declaration",
            Self::String => "StringKeyword",
            Self::Number => "NumberKeyword",
            Self::Boolean => "BooleanKeyword",
            Self::BigInt => "BigIntKeyword",
            Self::Symbol => "SymbolKeyword",
            Self::Object => "ObjectKeyword",
            Self::Literal => "Literal",
            Self::Undefined => "UndefinedKeyword",
            Self::Void => "VoidKeyword",
            Self::Never => "NeverKeyword",
            Self::Unknown => "UnknownKeyword",
            Self::Any => "AnyKeyword",
            Self::TemplateLiteral => "TemplateLiteral",
            Self::Enums => "Enums",
            Self::UniqueSymbol => "UniqueSymbol",
        }
    }

    /// Semantic label for a node of this kind without an explicit one.
    pub const fn default_semantic_label(self) -> &'static str {
        match self {
            Self::Struct => "struct",
            Self::Union => "union",
            Self::Tuple => "tuple",
            Self::Refinement => "refinement",
            Self::Transformation => "transformation",
            Self::Suspend => "recursive",
            Self::Declaration => "declaration",
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::BigInt => "bigint",
            Self::Symbol => "symbol",
            Self::Object => "object",
            Self::Literal => "literal",
            Self::Undefined => "undefined",
            Self::Void => "void",
            Self::Never => "never",
            Self::Unknown => UNKNOWN_SEMANTIC_LABEL,
            Self::Any => "any",
            Self::TemplateLiteral => "template_literal",
            Self::Enums => "enum",
            Self::UniqueSymbol => "unique_symbol",
        }
    }

    /// True for kinds that never have children.
    pub const fn is_leaf(self) -> bool {
        !matches!(
            self,
            Self::Struct
                | Self::Union
                | Self::Tuple
                | Self::Refinement
                | Self::Transformation
                | Self::Declaration
        )
    }
}

impl fmt::Display for AstTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AstTag {
    type Err = AstError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.name() == s)
            .ok_or_else(|| AstError::UnexpectedTag(s.to_string()))
    }
}

/// Semantic label for a raw tag name. Never fails: unrecognised tags label as
/// [`UNKNOWN_SEMANTIC_LABEL`].
pub fn semantic_label_for_tag(tag: &str) -> &'static str {
    tag.parse::<AstTag>()
        .map(AstTag::default_semantic_label)
        .unwrap_or(UNKNOWN_SEMANTIC_LABEL)
}

#[cfg(test)]
#[path = "../tests/tag_tests.rs"]
mod tests;
