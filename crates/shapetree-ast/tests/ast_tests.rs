use super::*;

fn person() -> Ast {
    Ast::structure(vec![
        Field::new("name", Ast::string()),
        Field::new("age", Ast::number()).optional(),
    ])
    .annotate(AnnotationKey::SemanticType, "person")
}

#[test]
fn test_struct_helpers() {
    let ast = person();
    let shape = ast.as_struct().expect("struct shape");

    assert!(ast.is_struct());
    assert_eq!(shape.fields.len(), 2);
    assert_eq!(shape.fields[0].key.as_str(), "name");
    assert!(shape.fields[1].optional);
    assert_eq!(ast.annotations.semantic_type(), Some("person"));
}

#[test]
fn test_array_is_tuple_with_rest() {
    let ast = Ast::array(Ast::string());
    match &ast.data {
        AstData::Tuple(shape) => {
            assert!(shape.elements.is_empty());
            assert_eq!(shape.rest.len(), 1);
            assert_eq!(shape.rest[0].ty.tag(), AstTag::String);
        }
        other => panic!("Expected tuple, got {:?}", other),
    }
}

#[test]
fn test_symbol_field_key() {
    let field = Field::symbol("brand", Ast::string());
    assert_eq!(field.key, PropertyKey::Symbol("brand".to_string()));
    assert_eq!(field.key.to_string(), "brand");
}

#[test]
fn test_suspend_resolves_only_on_request() {
    let suspend = Suspend::new(|| Some(Arc::new(Ast::number()))).with_label("Num");

    assert_eq!(suspend.label(), Some("Num"));
    let resolved = suspend.resolve().expect("resolves");
    assert_eq!(resolved.tag(), AstTag::Number);
}

#[test]
fn test_as_ast_unwraps_wrappers() {
    struct Schema {
        ast: Arc<Ast>,
    }
    impl AsAst for Schema {
        fn as_ast(&self) -> Arc<Ast> {
            Arc::clone(&self.ast)
        }
    }

    let schema = Schema {
        ast: Arc::new(person()),
    };
    assert!(Arc::ptr_eq(&schema.as_ast(), &schema.ast));
    assert!(Arc::ptr_eq(&(&schema).as_ast(), &schema.ast));
    assert_eq!(person().as_ast().tag(), AstTag::Struct);
}

#[test]
fn test_deep_nesting_drops_without_recursion() {
    let mut ast = Ast::string();
    for _ in 0..100_000 {
        ast = Ast::structure(vec![Field::new("next", ast)]);
    }
    drop(ast);
}

#[test]
fn test_shared_subtrees_survive_parent_drop() {
    let shared = Arc::new(Ast::array(Ast::number()));
    let parent = Ast::union(vec![Arc::clone(&shared), Arc::new(Ast::string())]);
    drop(parent);
    assert_eq!(shared.tag(), AstTag::Tuple);
}
