use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Copy)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Class,
    Interface,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Copy)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Method,
    Field,
    Property,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Copy, Default)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    #[default]
    Private,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Copy)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    Override,
    Static,
    Inline,
    Dynamic,
}

/// Byte range of a token in its source file, plus its 1-based line.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize) -> Self {
        Self { start, end, line }
    }
}

/// An identifier token: the text a marker is anchored on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NameToken {
    pub text: String,
    #[serde(default)]
    pub span: Span,
}

impl NameToken {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            span: Span::default(),
        }
    }

    pub fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

/// A supertype reference as written in an extends or implements clause.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct TypeRef(pub String);

impl TypeRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The reference without its type arguments: `Map<String, Int>` -> `Map`.
    pub fn base_name(&self) -> &str {
        base_name_of(&self.0)
    }

    pub fn is_qualified(&self) -> bool {
        self.base_name().contains('.')
    }

    /// Last dotted segment of the reference.
    pub fn simple_name(&self) -> &str {
        simple_name_of(&self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemberDeclaration {
    #[serde(default)]
    pub name: Option<NameToken>,
    pub kind: MemberKind,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
}

impl MemberDeclaration {
    pub fn new(name: impl Into<String>, kind: MemberKind) -> Self {
        Self {
            name: Some(NameToken::new(name)),
            kind,
            visibility: Visibility::Private,
            modifiers: Vec::new(),
        }
    }

    /// A public method, the common case for marker sources.
    pub fn method(name: impl Into<String>) -> Self {
        Self::new(name, MemberKind::Method).with_visibility(Visibility::Public)
    }

    pub fn unnamed(kind: MemberKind) -> Self {
        Self {
            name: None,
            kind,
            visibility: Visibility::Public,
            modifiers: Vec::new(),
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        if !self.modifiers.contains(&modifier) {
            self.modifiers.push(modifier);
        }
        self
    }

    pub fn at(mut self, span: Span) -> Self {
        if let Some(token) = self.name.as_mut() {
            token.span = span;
        }
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_ref().map(|token| token.text.as_str())
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    pub fn is_method(&self) -> bool {
        self.kind == MemberKind::Method
    }

    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    pub fn declares_override(&self) -> bool {
        self.has_modifier(Modifier::Override)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TypeDeclaration {
    pub qualified_name: String,
    #[serde(default)]
    pub name: Option<NameToken>,
    pub kind: TypeKind,
    #[serde(default)]
    pub extends: Vec<TypeRef>,
    #[serde(default)]
    pub implements: Vec<TypeRef>,
    #[serde(default)]
    pub members: Vec<MemberDeclaration>,
    #[serde(default)]
    pub imports: Vec<String>,
    #[serde(default)]
    pub file_path: Option<PathBuf>,
}

impl TypeDeclaration {
    pub fn new(qualified_name: impl Into<String>, kind: TypeKind) -> Self {
        let qualified_name = qualified_name.into();
        let name = NameToken::new(simple_name_of(&qualified_name));
        Self {
            qualified_name,
            name: Some(name),
            kind,
            extends: Vec::new(),
            implements: Vec::new(),
            members: Vec::new(),
            imports: Vec::new(),
            file_path: None,
        }
    }

    pub fn class(qualified_name: impl Into<String>) -> Self {
        Self::new(qualified_name, TypeKind::Class)
    }

    pub fn interface(qualified_name: impl Into<String>) -> Self {
        Self::new(qualified_name, TypeKind::Interface)
    }

    pub fn extending(mut self, reference: impl Into<String>) -> Self {
        self.extends.push(TypeRef::new(reference));
        self
    }

    pub fn implementing(mut self, reference: impl Into<String>) -> Self {
        self.implements.push(TypeRef::new(reference));
        self
    }

    pub fn with_member(mut self, member: MemberDeclaration) -> Self {
        self.members.push(member);
        self
    }

    pub fn with_import(mut self, qualified_name: impl Into<String>) -> Self {
        self.imports.push(qualified_name.into());
        self
    }

    pub fn with_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    pub fn at(mut self, span: Span) -> Self {
        if let Some(token) = self.name.as_mut() {
            token.span = span;
        }
        self
    }

    /// Drops the name token, as for a declaration whose identifier failed to parse.
    pub fn without_name_token(mut self) -> Self {
        self.name = None;
        self
    }

    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    pub fn simple_name(&self) -> &str {
        simple_name_of(&self.qualified_name)
    }

    /// Package portion of the qualified name; empty for the top level.
    pub fn package(&self) -> &str {
        match self.qualified_name.rfind('.') {
            Some(idx) => &self.qualified_name[..idx],
            None => "",
        }
    }

    /// Extends-list followed by implements-list, in declaration order.
    pub fn supertype_refs(&self) -> impl Iterator<Item = (&TypeRef, InheritanceKind)> {
        self.extends
            .iter()
            .map(|r| (r, InheritanceKind::Extends))
            .chain(
                self.implements
                    .iter()
                    .map(|r| (r, InheritanceKind::Implements)),
            )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Copy)]
#[serde(rename_all = "snake_case")]
pub enum InheritanceKind {
    Extends,
    Implements,
}

/// Directed subtype -> supertype relation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct InheritanceEdge {
    pub kind: InheritanceKind,
    pub subtype: String,
    pub supertype: String,
}

impl InheritanceEdge {
    pub fn new(kind: InheritanceKind, subtype: String, supertype: String) -> Self {
        Self {
            kind,
            subtype,
            supertype,
        }
    }
}

/// A member viewed together with the type that declares it.
#[derive(Debug, Clone, Copy)]
pub struct MemberRef<'a> {
    pub owner: &'a TypeDeclaration,
    pub member: &'a MemberDeclaration,
}

impl<'a> MemberRef<'a> {
    pub fn name(&self) -> Option<&'a str> {
        self.member.name()
    }
}

fn base_name_of(name: &str) -> &str {
    match name.find('<') {
        Some(idx) => name[..idx].trim_end(),
        None => name,
    }
}

pub(crate) fn simple_name_of(qualified: &str) -> &str {
    let base = base_name_of(qualified);
    base.rsplit('.').next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_and_simple_name_split_on_last_dot() {
        let ty = TypeDeclaration::class("geo.shapes.Circle");
        assert_eq!(ty.package(), "geo.shapes");
        assert_eq!(ty.simple_name(), "Circle");
        assert_eq!(ty.name.as_ref().map(|t| t.text.as_str()), Some("Circle"));

        let top = TypeDeclaration::interface("Shape");
        assert_eq!(top.package(), "");
        assert_eq!(top.simple_name(), "Shape");
    }

    #[test]
    fn supertype_refs_list_extends_before_implements() {
        let ty = TypeDeclaration::class("a.C")
            .implementing("a.I")
            .extending("a.B");
        let refs: Vec<_> = ty
            .supertype_refs()
            .map(|(r, kind)| (r.as_str().to_string(), kind))
            .collect();
        assert_eq!(
            refs,
            vec![
                ("a.B".to_string(), InheritanceKind::Extends),
                ("a.I".to_string(), InheritanceKind::Implements),
            ]
        );
    }

    #[test]
    fn type_arguments_are_stripped_from_references() {
        let generic = TypeRef::new("haxe.ds.Map<String, p.Foo>");
        assert_eq!(generic.base_name(), "haxe.ds.Map");
        assert_eq!(generic.simple_name(), "Map");
        assert!(generic.is_qualified());

        let bare = TypeRef::new("Box<p.Item>");
        assert_eq!(bare.simple_name(), "Box");
        assert!(!bare.is_qualified());
    }

    #[test]
    fn member_defaults_to_private_when_deserialized() {
        let member: MemberDeclaration =
            serde_json::from_str(r#"{"name": {"text": "draw"}, "kind": "method"}"#).unwrap();
        assert_eq!(member.name(), Some("draw"));
        assert!(!member.is_public());
        assert!(!member.declares_override());
    }
}
