use super::*;
use crate::fold::count_nodes;
use crate::test_fixtures::{category_schema, nested_chain, person_schema};
use shapetree_ast::{AnnotationKey, AstTag, Field, IndexSignature, StructShape, TupleElement};

fn child_paths<C>(tree: &Tree<C>, node: &TreeNode<C>) -> Vec<String> {
    tree.children(node).map(|child| child.path().to_string()).collect()
}

#[test]
fn test_struct_children_follow_field_order() {
    let tree = build_tree(person_schema()).expect("tree builds");
    let root = tree.root();

    assert_eq!(root.children().len(), 2);
    assert_eq!(child_paths(&tree, root), vec!["person", "tags"]);
    assert!(root.path().is_root());
    assert_eq!(root.context().semantic_type.as_deref(), Some("root"));

    let person = tree.node_at_path("person").expect("person node");
    assert_eq!(person.context().semantic_type.as_deref(), Some("person"));
    assert_eq!(child_paths(&tree, person), vec!["person.name", "person.age"]);
}

#[test]
fn test_field_annotations_override_type_annotations() {
    let ast = Ast::structure(vec![
        Field::new("name", Ast::string().annotate(AnnotationKey::Title, "String"))
            .annotate(AnnotationKey::Title, "Customer name")
            .annotate(AnnotationKey::Role, "label"),
        Field::new("plain", Ast::string().annotate(AnnotationKey::Title, "String")),
    ]);
    let tree = build_tree(ast).expect("tree builds");

    let name = tree.node_at_path("name").expect("name node");
    assert_eq!(name.annotations().title(), Some("Customer name"));
    assert_eq!(name.annotations().role(), Some("label"));
    // The AST itself is untouched.
    assert_eq!(name.ast().annotations.title(), Some("String"));

    let plain = tree.node_at_path("plain").expect("plain node");
    assert_eq!(plain.annotations(), &plain.ast().annotations);
}

#[test]
fn test_index_signatures_follow_fields() {
    let ast = Ast::new(AstData::Struct(StructShape {
        fields: vec![Field::new("id", Ast::string())],
        index_signatures: vec![IndexSignature {
            parameter: Arc::new(Ast::string()),
            ty: Arc::new(Ast::number()),
        }],
    }));
    let tree = build_tree(ast).expect("tree builds");

    assert_eq!(child_paths(&tree, tree.root()), vec!["id", "index_0"]);
    let index = tree.node_at_path("index_0").expect("index node");
    assert_eq!(index.tag(), AstTag::Number);
}

#[test]
fn test_union_and_tuple_segments() {
    let tuple = Ast::tuple(
        vec![
            TupleElement::new(Ast::string()),
            TupleElement {
                annotations: Annotations::new().with(AnnotationKey::Title, "Count"),
                ..TupleElement::new(Ast::number())
            },
        ],
        vec![TupleElement::new(Ast::boolean())],
    );
    let ast = Ast::union(vec![Arc::new(tuple), Arc::new(Ast::string())]);
    let tree = build_tree(ast).expect("tree builds");

    assert_eq!(child_paths(&tree, tree.root()), vec!["union_0", "union_1"]);
    let tuple_node = tree.node_at_path("union_0").expect("tuple node");
    assert_eq!(
        child_paths(&tree, tuple_node),
        vec!["union_0.tuple_0", "union_0.tuple_1", "union_0.rest_0"]
    );
    let count = tree.node_at_path("union_0.tuple_1").expect("count node");
    assert_eq!(count.context().title.as_deref(), Some("Count"));
}

#[test]
fn test_refinement_keeps_path() {
    let ast = Ast::structure(vec![Field::new("age", Ast::refinement(Ast::number()))]);
    let tree = build_tree(ast).expect("tree builds");

    let age = tree.node_at_path("age").expect("age node");
    assert_eq!(age.tag(), AstTag::Refinement);
    assert_eq!(age.children().len(), 1);
    let base = tree.node(age.children()[0]).expect("base node");
    assert_eq!(base.tag(), AstTag::Number);
    assert_eq!(base.path(), age.path());
}

#[test]
fn test_transformation_and_declaration_segments() {
    let ast = Ast::union(vec![
        Arc::new(Ast::transformation(Ast::string(), Ast::number())),
        Arc::new(Ast::declaration(vec![
            Arc::new(Ast::string()),
            Arc::new(Ast::boolean()),
        ])),
    ]);
    let tree = build_tree(ast).expect("tree builds");

    let transformation = tree.node_at_path("union_0").expect("transformation");
    assert_eq!(
        child_paths(&tree, transformation),
        vec!["union_0.from", "union_0.to"]
    );
    let declaration = tree.node_at_path("union_1").expect("declaration");
    assert_eq!(
        child_paths(&tree, declaration),
        vec!["union_1.typeParameter_0", "union_1.typeParameter_1"]
    );
}

#[test]
fn test_symbol_keys_render_by_description() {
    let ast = Ast::structure(vec![Field::symbol("brand", Ast::string())]);
    let tree = build_tree(ast).expect("tree builds");

    let brand = tree.node_at_path("brand").expect("brand node");
    assert_eq!(
        brand.path().last(),
        Some(&PathSegment::Symbol(Arc::from("brand")))
    );
}

#[test]
fn test_suspend_is_terminal() {
    let tree = build_tree(category_schema()).expect("recursive schema builds");

    let suspend = tree
        .node_at_path("children.rest_0")
        .expect("suspend node");
    assert_eq!(suspend.tag(), AstTag::Suspend);
    assert!(suspend.is_leaf());
    assert_eq!(tree.len(), 4);
}

#[test]
fn test_deep_nesting_builds_iteratively() {
    const DEPTH: usize = 2000;
    let tree = build_tree(nested_chain(DEPTH)).expect("deep tree builds");

    assert_eq!(tree.len(), DEPTH + 1);
    assert!(count_nodes(&tree).expect("fold succeeds") >= DEPTH);
    let leaf = tree.iter().last().expect("leaf");
    assert_eq!(leaf.path().len(), DEPTH);
    assert_eq!(leaf.tag(), AstTag::String);
}

#[test]
fn test_custom_factory_sees_parent_context() {
    let factory = |_ast: &Arc<Ast>,
                   _annotations: &Annotations,
                   path: &Path,
                   parent: Option<&TreeNode<usize>>| {
        let depth = parent.map_or(0, |node| node.context() + 1);
        assert_eq!(depth, path.len());
        depth
    };
    let tree = build_tree_with(nested_chain(5), factory).expect("tree builds");

    let depths: Vec<usize> = tree.iter().map(|node| *node.context()).collect();
    assert_eq!(depths, vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn test_factory_receives_effective_annotations() {
    let ast = Ast::structure(vec![
        Field::new("a", Ast::string()).annotate(AnnotationKey::SemanticType, "email"),
    ]);
    let tree = build_tree_with(ast, |_ast, annotations: &Annotations, _path, _parent| {
        annotations.semantic_type().map(str::to_string)
    })
    .expect("tree builds");

    let field = tree.node_at_path("a").expect("field node");
    assert_eq!(field.context().as_deref(), Some("email"));
}

#[test]
fn test_builder_accepts_schema_wrappers() {
    struct Schema(Arc<Ast>);
    impl AsAst for Schema {
        fn as_ast(&self) -> Arc<Ast> {
            Arc::clone(&self.0)
        }
    }

    let schema = Schema(Arc::new(person_schema()));
    let tree = build_tree(&schema).expect("tree builds");
    assert!(Arc::ptr_eq(tree.root().ast(), &schema.0));
}

#[test]
fn test_indexed_builder() {
    let builder = TreeBuilder::with_default_context().indexed();
    let tree: Tree<DefaultContext> = builder.build_tree(person_schema()).expect("tree builds");
    assert!(tree.index().is_some());

    let plain: Tree<DefaultContext> = builder.build(person_schema()).expect("tree builds");
    assert!(plain.index().is_none());
}

#[test]
fn test_child_edges_of_leaves_and_suspend() {
    assert!(child_edges(&Ast::string()).is_empty());
    assert!(child_edges(&Ast::suspend(|| None)).is_empty());
    assert_eq!(child_edges(&Ast::refinement(Ast::number()))[0].segment, None);
}
