use heritage::core::{
    flatten_members, DeclarationIndex, MemberDeclaration, MemberKind, SupertypeResolver,
    TypeDeclaration, Visibility,
};

#[test]
fn supertypes_resolve_extends_before_implements_and_drop_unknown() {
    let index: DeclarationIndex = [
        TypeDeclaration::interface("ui.Clickable"),
        TypeDeclaration::class("ui.Widget"),
        TypeDeclaration::class("ui.Button")
            .implementing("Clickable")
            .implementing("flash.events.IEventDispatcher")
            .extending("Widget"),
    ]
    .into_iter()
    .collect();

    let button = index.get("ui.Button").unwrap();
    let supers = SupertypeResolver::new(&index).resolve_supertypes(&button);
    let names: Vec<_> = supers.iter().map(|t| t.qualified_name.as_str()).collect();
    assert_eq!(names, vec!["ui.Widget", "ui.Clickable"]);
}

#[test]
fn flattened_members_keep_order_and_duplicates() {
    let index: DeclarationIndex = [
        TypeDeclaration::class("p.A")
            .with_member(MemberDeclaration::method("run"))
            .with_member(
                MemberDeclaration::new("count", MemberKind::Field)
                    .with_visibility(Visibility::Private),
            ),
        TypeDeclaration::interface("p.I")
            .with_member(MemberDeclaration::method("run"))
            .with_member(MemberDeclaration::unnamed(MemberKind::Method)),
        TypeDeclaration::class("p.C").extending("A").implementing("I"),
    ]
    .into_iter()
    .collect();

    let c = index.get("p.C").unwrap();
    let supers = SupertypeResolver::new(&index).resolve_supertypes(&c);
    let members = flatten_members(&supers);

    let listed: Vec<(&str, Option<&str>)> = members
        .iter()
        .map(|m| (m.owner.qualified_name.as_str(), m.name()))
        .collect();
    assert_eq!(
        listed,
        vec![
            ("p.A", Some("run")),
            ("p.A", Some("count")),
            ("p.I", Some("run")),
            ("p.I", None),
        ]
    );
}

#[test]
fn type_without_supertypes_resolves_to_nothing() {
    let index: DeclarationIndex = [TypeDeclaration::class("p.Root")].into_iter().collect();
    let root = index.get("p.Root").unwrap();
    let supers = SupertypeResolver::new(&index).resolve_supertypes(&root);
    assert!(supers.is_empty());
    assert!(flatten_members(&supers).is_empty());
}
