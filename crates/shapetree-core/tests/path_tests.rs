use super::*;

#[test]
fn test_root_path_is_empty() {
    let root = Path::root();
    assert!(root.is_root());
    assert_eq!(root.len(), 0);
    assert_eq!(root.to_string(), "");
    assert!(root.segments().is_empty());
}

#[test]
fn test_child_paths_extend_by_one_segment() {
    let person = Path::root().child(PathSegment::from("person"));
    let name = person.child(PathSegment::from("name"));

    assert_eq!(name.len(), person.len() + 1);
    assert_eq!(name.last(), Some(&PathSegment::from("name")));
    assert_eq!(name.to_string(), "person.name");
    assert_eq!(person.to_string(), "person");
}

#[test]
fn test_synthetic_segments_render() {
    let path: Path = [
        PathSegment::Union(0),
        PathSegment::Tuple(1),
        PathSegment::Rest(0),
        PathSegment::Index(2),
        PathSegment::TypeParameter(0),
        PathSegment::From,
        PathSegment::To,
        PathSegment::Symbol(Arc::from("brand")),
    ]
    .into_iter()
    .collect();

    assert_eq!(
        path.to_string(),
        "union_0.tuple_1.rest_0.index_2.typeParameter_0.from.to.brand"
    );
}

#[test]
fn test_structural_equality() {
    let a = Path::root().child("a".into()).child("b".into());
    let b: Path = [PathSegment::from("a"), PathSegment::from("b")]
        .into_iter()
        .collect();
    let c = Path::root().child("a".into()).child("c".into());

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_ne!(a, Path::root().child("a".into()));

    let mut seen = std::collections::HashSet::new();
    seen.insert(a.clone());
    assert!(seen.contains(&b));
}

#[test]
fn test_format_segments_of_strings() {
    assert_eq!(format_segments(["person", "name"]), "person.name");
    assert_eq!(format_segments(Vec::<String>::new()), "");
}

#[test]
fn test_long_paths_drop_iteratively() {
    let mut path = Path::root();
    for i in 0..200_000 {
        path = path.child(PathSegment::Index(i));
    }
    assert_eq!(path.len(), 200_000);
    drop(path);
}
