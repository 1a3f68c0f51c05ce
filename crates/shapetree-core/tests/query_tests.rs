use super::*;
use crate::builder::{build_indexed_tree, build_tree};
use crate::context::DefaultContext;
use crate::test_fixtures::{category_schema, nested_chain, person_schema};
use shapetree_ast::{AnnotationKey, Ast, Field};

#[test]
fn test_extract_leaves() {
    let tree = build_tree(person_schema()).expect("tree builds");
    let leaves: Vec<_> = extract_leaves(&tree)
        .into_iter()
        .map(|node| node.path().to_string())
        .collect();

    assert_eq!(leaves, vec!["person.name", "person.age", "tags.rest_0"]);
}

#[test]
fn test_deep_chain_has_single_leaf() {
    let tree = build_indexed_tree(nested_chain(2000)).expect("deep tree builds");
    let leaves = extract_leaves(&tree);

    assert_eq!(leaves.len(), 1);
    assert!(leaves[0].children().is_empty());
}

#[test]
fn test_extract_context_at_path() {
    let tree = build_indexed_tree(person_schema()).expect("tree builds");

    let context: &DefaultContext =
        extract_context_at_path(&tree, &["person", "name"]).expect("name context");
    assert_eq!(context.semantic_type(), Some("string"));
    assert_eq!(context.annotations.semantic, None);

    let node = tree.node_at_path("person.name").expect("name node");
    assert_eq!(resolved_semantic_type(node), "string");
    assert!(extract_context_at_path(&tree, &["person", "email"]).is_none());
    assert!(extract_context_at_path::<_, &str>(&tree, &[]).is_some());
}

#[test]
fn test_find_nodes_by_semantic_type() {
    let tree = build_tree(person_schema()).expect("tree builds");

    let strings: Vec<_> = find_nodes_by_semantic_type(&tree, "string")
        .into_iter()
        .map(|node| node.path().to_string())
        .collect();
    assert_eq!(strings, vec!["person.name", "tags.rest_0"]);

    let people = find_nodes_by_semantic_type(&tree, "person");
    assert_eq!(people.len(), 1);
    assert_eq!(people[0].path().to_string(), "person");

    // Explicit labels replace the kind label.
    assert!(find_nodes_by_semantic_type(&tree, "struct").is_empty());
    assert_eq!(find_nodes_by_semantic_type(&tree, "tuple").len(), 1);
    assert!(find_nodes_by_semantic_type(&tree, "email").is_empty());
}

#[test]
fn test_suspend_resolves_to_recursive_label() {
    let tree = build_tree(category_schema()).expect("tree builds");
    assert_eq!(find_nodes_by_semantic_type(&tree, "recursive").len(), 1);
}

#[test]
fn test_entity_queries() {
    let ast = Ast::structure(vec![
        Field::new("name", Ast::string()).annotate(AnnotationKey::EntityField, "field##e1"),
        Field::new("note", Ast::string()),
    ])
    .annotate(AnnotationKey::EntityType, "e1");
    let tree = build_indexed_tree(ast).expect("tree builds");

    let entities = find_entity_nodes(&tree);
    assert_eq!(entities.len(), 1);
    assert!(entities[0].path().is_root());

    let fields = find_entity_field_nodes(&tree);
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].path().to_string(), "name");

    let found = find_node_by_entity_id(&tree, "e1").expect("entity node");
    assert_eq!(found.id(), tree.root_id());
    assert!(find_node_by_entity_id(&tree, "name").is_none());
    assert!(find_node_by_entity_id(&tree, "e2").is_none());
}

#[test]
fn test_context_returned_by_path_outlives_path_slice() {
    let tree = build_indexed_tree(person_schema()).expect("tree builds");

    let context = {
        let segments = vec!["person".to_string(), "age".to_string()];
        extract_context_at_path(&tree, segments.as_slice())
    };
    assert_eq!(context.and_then(|c| c.semantic_type()), Some("number"));
}

#[test]
fn test_resolved_semantic_type_prefers_explicit_annotation() {
    let ast = Ast::structure(vec![
        Field::new("email", Ast::string()).annotate(AnnotationKey::SemanticType, "email"),
        Field::new("note", Ast::string()),
    ]);
    // A context that knows nothing about semantic types.
    let tree = crate::builder::build_tree_with(ast, |_ast, _annotations, _path, _parent| ())
        .expect("tree builds");

    let email = tree.node_at_path("email").expect("email node");
    let note = tree.node_at_path("note").expect("note node");
    assert_eq!(resolved_semantic_type(email), "email");
    assert_eq!(resolved_semantic_type(note), "string");
    assert_eq!(resolved_semantic_type(tree.root()), "struct");
}
