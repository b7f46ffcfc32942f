use heritage::core::{DeclarationIndex, InheritanceIndex, TypeDeclaration};

fn names(types: &[std::sync::Arc<TypeDeclaration>]) -> Vec<&str> {
    types.iter().map(|t| t.qualified_name.as_str()).collect()
}

#[test]
fn direct_subtypes_are_found_regardless_of_insertion_order() {
    let index = DeclarationIndex::new();
    index.insert(TypeDeclaration::class("zoo.Dog").extending("Animal"));
    index.insert(TypeDeclaration::class("zoo.Puppy").extending("Dog"));
    index.insert(TypeDeclaration::class("zoo.Animal"));
    index.insert(TypeDeclaration::class("zoo.Cat").extending("zoo.Animal"));

    assert_eq!(
        names(&index.direct_subtypes("zoo.Animal")),
        vec!["zoo.Dog", "zoo.Cat"]
    );
    // Direct only: Puppy is not listed under Animal.
    assert_eq!(names(&index.direct_subtypes("zoo.Dog")), vec!["zoo.Puppy"]);
    assert!(index.direct_subtypes("zoo.Cat").is_empty());
    assert!(index.direct_subtypes("zoo.Unknown").is_empty());
}

#[test]
fn same_simple_name_in_other_package_is_not_a_subtype() {
    let index: DeclarationIndex = [
        TypeDeclaration::interface("geo.Shape"),
        TypeDeclaration::interface("art.Shape"),
        TypeDeclaration::class("geo.Circle").implementing("Shape"),
        TypeDeclaration::class("art.Sketch").implementing("Shape"),
        TypeDeclaration::class("app.Icon")
            .with_import("art.Shape")
            .implementing("Shape"),
    ]
    .into_iter()
    .collect();

    assert_eq!(names(&index.direct_subtypes("geo.Shape")), vec!["geo.Circle"]);
    assert_eq!(
        names(&index.direct_subtypes("art.Shape")),
        vec!["art.Sketch", "app.Icon"]
    );
}

#[test]
fn subtype_listing_a_supertype_twice_appears_once() {
    let index: DeclarationIndex = [
        TypeDeclaration::interface("p.I"),
        TypeDeclaration::class("p.C")
            .implementing("I")
            .implementing("p.I"),
    ]
    .into_iter()
    .collect();

    assert_eq!(names(&index.direct_subtypes("p.I")), vec!["p.C"]);
}

#[test]
fn remove_and_replace_update_subtype_queries() {
    let index: DeclarationIndex = [
        TypeDeclaration::class("p.Base"),
        TypeDeclaration::class("p.A").extending("Base"),
        TypeDeclaration::class("p.B").extending("Base"),
    ]
    .into_iter()
    .collect();

    let removed = index.remove("p.A").unwrap();
    assert_eq!(removed.qualified_name, "p.A");
    assert_eq!(names(&index.direct_subtypes("p.Base")), vec!["p.B"]);
    assert!(index.remove("p.A").is_none());

    // B no longer extends Base after reindexing.
    let previous = index.insert(TypeDeclaration::class("p.B"));
    assert!(previous.is_some());
    assert!(index.direct_subtypes("p.Base").is_empty());
    assert_eq!(index.len(), 2);
}

#[test]
fn replaced_type_keeps_its_position() {
    let index: DeclarationIndex = [
        TypeDeclaration::class("p.Base"),
        TypeDeclaration::class("p.A").extending("Base"),
        TypeDeclaration::class("p.B").extending("Base"),
    ]
    .into_iter()
    .collect();

    index.insert(TypeDeclaration::class("p.A").extending("p.Base"));

    assert_eq!(names(&index.types()), vec!["p.Base", "p.A", "p.B"]);
    assert_eq!(
        names(&index.direct_subtypes("p.Base")),
        vec!["p.A", "p.B"]
    );
}

#[test]
fn queries_are_snapshots_under_concurrent_inserts() {
    let index = DeclarationIndex::new();
    index.insert(TypeDeclaration::class("c.Root"));

    std::thread::scope(|scope| {
        scope.spawn(|| {
            for i in 0..200 {
                index.insert(TypeDeclaration::class(format!("c.Leaf{i}")).extending("Root"));
            }
        });
        scope.spawn(|| {
            let mut last = 0;
            for _ in 0..200 {
                let seen = index.direct_subtypes("c.Root").len();
                assert!(seen >= last);
                last = seen;
            }
        });
    });

    assert_eq!(index.direct_subtypes("c.Root").len(), 200);
}

#[test]
fn concurrent_replacements_of_one_type_keep_subtypes_consistent() {
    let index: DeclarationIndex = [
        TypeDeclaration::class("p.Base"),
        TypeDeclaration::class("p.Other"),
    ]
    .into_iter()
    .collect();

    for _ in 0..20 {
        std::thread::scope(|scope| {
            scope.spawn(|| {
                for _ in 0..100 {
                    index.insert(TypeDeclaration::class("p.T").extending("Base"));
                }
            });
            scope.spawn(|| {
                for _ in 0..100 {
                    index.insert(TypeDeclaration::class("p.T").extending("Other"));
                }
            });
        });

        let stored = index.get("p.T").unwrap();
        let (expected, other) = if stored.extends[0].as_str() == "Base" {
            ("p.Base", "p.Other")
        } else {
            ("p.Other", "p.Base")
        };
        assert_eq!(names(&index.direct_subtypes(expected)), vec!["p.T"]);
        assert!(index.direct_subtypes(other).is_empty());
    }

    index.insert(TypeDeclaration::class("p.T").extending("Base"));
    assert_eq!(names(&index.direct_subtypes("p.Base")), vec!["p.T"]);
}
