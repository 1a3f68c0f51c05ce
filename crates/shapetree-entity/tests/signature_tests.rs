use super::*;
use crate::identity::{EntityId, stamp};
use shapetree_ast::{AnnotationKey, Ast, Field};
use std::sync::Arc;

fn stamped(fields: Vec<Field>, id: &str) -> Arc<Ast> {
    stamp(&Arc::new(Ast::structure(fields)), &EntityId::new(id))
}

fn scalars() -> Vec<Field> {
    vec![
        Field::new("name", Ast::string()),
        Field::new("age", Ast::number()),
        Field::new("active", Ast::boolean()),
    ]
}

#[test]
fn test_one_signature_per_scalar_field() {
    let ast = stamped(scalars(), "entity##abc");
    let signatures = field_signatures(&ast);

    assert_eq!(
        signatures,
        vec![
            "name:PropertySignature:field##entity##abc",
            "age:PropertySignature:field##entity##abc",
            "active:PropertySignature:field##entity##abc",
        ]
    );
}

#[test]
fn test_nested_struct_signatures_use_dotted_paths() {
    let address = Ast::structure(vec![Field::new("city", Ast::string())]);
    let ast = stamped(
        vec![Field::new("name", Ast::string()), Field::new("address", address)],
        "e1",
    );

    assert_eq!(
        field_signatures(&ast),
        vec![
            "name:PropertySignature:field##e1",
            "address:PropertySignature:field##e1",
            "address.city:PropertySignature:field##e1",
        ]
    );
}

#[test]
fn test_struct_own_marker_signature() {
    let ast = Ast::structure(vec![Field::new("x", Ast::number())])
        .annotate(AnnotationKey::EntityField, "field##own");

    assert_eq!(field_signatures(&ast), vec!["root:Struct:field##own"]);
}

#[test]
fn test_own_marker_on_scalar_field_type() {
    let ast = Ast::structure(vec![
        Field::new("a", Ast::string().annotate(AnnotationKey::EntityField, "field##e"))
            .annotate(AnnotationKey::EntityField, "field##e"),
        Field::new("b", Ast::number().annotate(AnnotationKey::EntityField, "field##e")),
    ]);

    assert_eq!(
        field_signatures(&ast),
        vec![
            "a:PropertySignature:field##e",
            "a:StringKeyword:field##e",
            "b:NumberKeyword:field##e",
        ]
    );
}

#[test]
fn test_own_marker_on_non_struct_root() {
    let ast = Ast::array(Ast::string()).annotate(AnnotationKey::EntityField, "field##e");

    assert_eq!(field_signatures(&ast), vec!["root:Tuple:field##e"]);
}

#[test]
fn test_unstamped_ast_has_no_signatures() {
    let ast = Ast::structure(scalars());

    assert!(field_signatures(&ast).is_empty());
    assert_eq!(fingerprint(&ast), fingerprint_signatures(&Default::default()));
}

#[test]
fn test_fingerprint_is_deterministic() {
    let first = fingerprint(&stamped(scalars(), "entity##abc"));
    let second = fingerprint(&stamped(scalars(), "entity##abc"));

    assert_eq!(first, second);
}

#[test]
fn test_fingerprint_depends_on_identity() {
    let abc = fingerprint(&stamped(scalars(), "entity##abc"));
    let xyz = fingerprint(&stamped(scalars(), "entity##xyz"));

    assert_ne!(abc, xyz);
}

#[test]
fn test_fingerprint_ignores_field_order() {
    let mut reversed = scalars();
    reversed.reverse();

    assert_eq!(
        fingerprint(&stamped(scalars(), "e1")),
        fingerprint(&stamped(reversed, "e1"))
    );
}

#[test]
fn test_signature_set_deduplicates() {
    let ast = Ast::structure(vec![
        Field::new("a", Ast::string()).annotate(AnnotationKey::EntityField, "m"),
        Field::new("a", Ast::number()).annotate(AnnotationKey::EntityField, "m"),
    ]);

    assert_eq!(field_signatures(&ast).len(), 2);
    assert_eq!(signature_set(&ast).len(), 1);
}

#[test]
fn test_fingerprint_display_is_fixed_width_hex() {
    let rendered = EntityFingerprint(0xabc).to_string();

    assert_eq!(rendered, "0000000000000abc");
    assert_eq!(fingerprint(&stamped(scalars(), "e1")).to_string().len(), 16);
}
