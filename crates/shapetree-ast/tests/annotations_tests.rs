use super::*;
use serde_json::json;

#[test]
fn test_typed_accessors_read_string_values() {
    let annotations = Annotations::new()
        .with(AnnotationKey::Title, "Person")
        .with(AnnotationKey::SemanticType, "person")
        .with(AnnotationKey::Custom("weight".into()), 3);

    assert_eq!(annotations.title(), Some("Person"));
    assert_eq!(annotations.semantic_type(), Some("person"));
    assert_eq!(annotations.description(), None);
    assert_eq!(annotations.len(), 3);
}

#[test]
fn test_non_string_values_are_not_exposed_as_text() {
    let annotations = Annotations::new().with(AnnotationKey::Title, 42);

    assert!(annotations.contains(&AnnotationKey::Title));
    assert_eq!(annotations.title(), None);
    assert_eq!(annotations.get(&AnnotationKey::Title), Some(&json!(42)));
}

#[test]
fn test_merge_is_right_biased() {
    let own = Annotations::new()
        .with(AnnotationKey::Title, "type title")
        .with(AnnotationKey::Role, "value");
    let edge = Annotations::new()
        .with(AnnotationKey::Title, "field title")
        .with(AnnotationKey::Source, "form");

    let merged = own.merged(&edge);

    assert_eq!(merged.title(), Some("field title"));
    assert_eq!(merged.role(), Some("value"));
    assert_eq!(merged.source(), Some("form"));
    let keys: Vec<_> = merged.iter().map(|(key, _)| key.name().to_string()).collect();
    assert_eq!(keys, vec!["title", "role", "source"]);
}

#[test]
fn test_merge_with_empty_edge_passes_through() {
    let own = Annotations::new().with(AnnotationKey::Comment, "keep");
    assert_eq!(own.merged(&Annotations::new()), own);
}

#[test]
fn test_key_names_round_trip() {
    for key in [
        AnnotationKey::Title,
        AnnotationKey::Description,
        AnnotationKey::Identifier,
        AnnotationKey::SemanticType,
        AnnotationKey::Role,
        AnnotationKey::Source,
        AnnotationKey::Comment,
        AnnotationKey::EntityType,
        AnnotationKey::EntityField,
    ] {
        assert_eq!(AnnotationKey::from_name(key.name()), key);
    }
    assert_eq!(
        AnnotationKey::from_name("x-extra"),
        AnnotationKey::Custom("x-extra".to_string())
    );
}
