use std::sync::Arc;

use super::index::{InheritanceIndex, TypeResolver};
use super::marker::{
    Anchor, AnchorKind, Framing, MarkerDirective, MarkerKind, MarkerLabel, MarkerSink,
    NavigationTarget,
};
use super::model::{MemberDeclaration, MemberRef, NameToken, TypeDeclaration};
use super::resolver::{flatten_members, SupertypeResolver};

/// Computes override / implementation / subclass markers for one type at a time.
///
/// Holds only shared references to its collaborators, so a single classifier
/// can be used from many threads at once.
#[derive(Clone, Copy)]
pub struct RelationshipClassifier<'a> {
    supertypes: SupertypeResolver<'a>,
    index: &'a dyn InheritanceIndex,
}

impl<'a> RelationshipClassifier<'a> {
    pub fn new(types: &'a dyn TypeResolver, index: &'a dyn InheritanceIndex) -> Self {
        Self {
            supertypes: SupertypeResolver::new(types),
            index,
        }
    }

    pub fn classify(&self, decl: &TypeDeclaration) -> Vec<MarkerDirective> {
        let mut markers = Vec::new();
        self.classify_into(decl, &mut markers);
        markers
    }

    /// Emits markers in order: per method, the supertype marker then the
    /// subtype marker; the type-level marker last.
    pub fn classify_into<S: MarkerSink + ?Sized>(&self, decl: &TypeDeclaration, sink: &mut S) {
        let supers = self.supertypes.resolve_supertypes(decl);
        let super_members = flatten_members(&supers);

        let sub_types: Vec<Arc<TypeDeclaration>> = self.index.direct_subtypes(&decl.qualified_name);
        let sub_members = flatten_members(&sub_types);

        let framing = Framing::for_type(decl);

        for member in decl.members.iter().filter(|m| m.is_method()) {
            let Some(token) = marker_source(member) else {
                continue;
            };

            if let Some(marker) = override_marker(decl, member, token, &super_members) {
                sink.accept(marker);
            }
            if let Some(marker) = subtype_marker(decl, token, &sub_members, framing) {
                sink.accept(marker);
            }
        }

        if sub_types.is_empty() {
            return;
        }
        match &decl.name {
            Some(token) => sink.accept(subclass_marker(decl, token, &sub_types, framing)),
            None => tracing::debug!(
                "{} has {} subtypes but no name token; skipping type marker",
                decl.qualified_name,
                sub_types.len()
            ),
        }
    }
}

/// Only named public members are annotated.
fn marker_source(member: &MemberDeclaration) -> Option<&NameToken> {
    if !member.is_public() {
        return None;
    }
    member.name.as_ref()
}

fn matching<'m>(name: &str, pool: &[MemberRef<'m>]) -> Vec<MemberRef<'m>> {
    pool.iter()
        .filter(|candidate| candidate.name() == Some(name))
        .copied()
        .collect()
}

fn member_anchor(decl: &TypeDeclaration, token: &NameToken) -> Anchor {
    Anchor {
        kind: AnchorKind::MemberName,
        owner: decl.qualified_name.clone(),
        name: token.text.clone(),
        span: token.span,
        file_path: decl.file_path.clone(),
    }
}

fn override_marker(
    decl: &TypeDeclaration,
    member: &MemberDeclaration,
    token: &NameToken,
    super_members: &[MemberRef<'_>],
) -> Option<MarkerDirective> {
    let matches = matching(&token.text, super_members);
    let first = matches.first()?;

    // Classified by the modifier alone, whatever the supertype member looks like.
    let (kind, framing) = if member.declares_override() {
        (MarkerKind::Overrides, Framing::Overridden)
    } else {
        (MarkerKind::Implements, Framing::Implemented)
    };

    Some(MarkerDirective {
        anchor: member_anchor(decl, token),
        alignment: kind.alignment(),
        kind,
        framing,
        label: MarkerLabel {
            subject: token.text.clone(),
            related_type: Some(first.owner.qualified_name.clone()),
            count: matches.len(),
        },
        targets: matches
            .into_iter()
            .filter_map(NavigationTarget::member)
            .collect(),
    })
}

fn subtype_marker(
    decl: &TypeDeclaration,
    token: &NameToken,
    sub_members: &[MemberRef<'_>],
    framing: Framing,
) -> Option<MarkerDirective> {
    let matches = matching(&token.text, sub_members);
    if matches.is_empty() {
        return None;
    }

    let kind = match framing {
        Framing::Implemented => MarkerKind::ImplementedBy,
        Framing::Overridden => MarkerKind::OverriddenBy,
    };

    Some(MarkerDirective {
        anchor: member_anchor(decl, token),
        alignment: kind.alignment(),
        kind,
        framing,
        label: MarkerLabel {
            subject: token.text.clone(),
            related_type: None,
            count: matches.len(),
        },
        targets: matches
            .into_iter()
            .filter_map(NavigationTarget::member)
            .collect(),
    })
}

fn subclass_marker(
    decl: &TypeDeclaration,
    token: &NameToken,
    sub_types: &[Arc<TypeDeclaration>],
    framing: Framing,
) -> MarkerDirective {
    let kind = MarkerKind::HasSubclasses;
    MarkerDirective {
        anchor: Anchor {
            kind: AnchorKind::TypeName,
            owner: decl.qualified_name.clone(),
            name: token.text.clone(),
            span: token.span,
            file_path: decl.file_path.clone(),
        },
        alignment: kind.alignment(),
        kind,
        framing,
        label: MarkerLabel {
            subject: token.text.clone(),
            related_type: None,
            count: sub_types.len(),
        },
        targets: sub_types
            .iter()
            .map(|sub| NavigationTarget::of_type(sub))
            .collect(),
    }
}
