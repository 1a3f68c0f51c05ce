use super::*;
use crate::ast::Ast;

#[test]
fn test_tag_names_parse_back() {
    for tag in AstTag::ALL {
        assert_eq!(tag.name().parse::<AstTag>(), Ok(tag));
    }
}

#[test]
fn test_unexpected_tag_is_an_error() {
    assert_eq!(
        "TypeLiteral".parse::<AstTag>(),
        Err(AstError::UnexpectedTag("TypeLiteral".to_string()))
    );
}

#[test]
fn test_default_semantic_labels() {
    assert_eq!(AstTag::Struct.default_semantic_label(), "struct");
    assert_eq!(AstTag::Suspend.default_semantic_label(), "recursive");
    assert_eq!(AstTag::String.default_semantic_label(), "string");
    assert_eq!(AstTag::Enums.default_semantic_label(), "enum");
    assert_eq!(Ast::number().tag().default_semantic_label(), "number");
}

#[test]
fn test_semantic_label_for_unrecognised_tag_is_unknown() {
    assert_eq!(semantic_label_for_tag("Tuple"), "tuple");
    assert_eq!(semantic_label_for_tag("Intersection"), UNKNOWN_SEMANTIC_LABEL);
}

#[test]
fn test_leaf_kinds() {
    assert!(AstTag::Suspend.is_leaf());
    assert!(AstTag::TemplateLiteral.is_leaf());
    assert!(!AstTag::Refinement.is_leaf());
    assert!(!AstTag::Declaration.is_leaf());
}
