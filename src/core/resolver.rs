use std::sync::Arc;

use super::index::TypeResolver;
use super::model::{MemberRef, TypeDeclaration};

/// Resolves the direct supertypes of a declaration and flattens their members
/// into the candidate pool used for override matching.
#[derive(Clone, Copy)]
pub struct SupertypeResolver<'a> {
    types: &'a dyn TypeResolver,
}

impl<'a> SupertypeResolver<'a> {
    pub fn new(types: &'a dyn TypeResolver) -> Self {
        Self { types }
    }

    /// Extends-list then implements-list, resolved. Unresolvable references
    /// are dropped without error.
    pub fn resolve_supertypes(&self, decl: &TypeDeclaration) -> Vec<Arc<TypeDeclaration>> {
        decl.supertype_refs()
            .filter_map(|(reference, kind)| {
                let resolved = self.types.resolve(reference, decl);
                if resolved.is_none() {
                    tracing::trace!(
                        "{} {:?} {}: unresolved, skipping",
                        decl.qualified_name,
                        kind,
                        reference.as_str()
                    );
                }
                resolved
            })
            .collect()
    }
}

/// Members of every type in `types`, in order. Duplicates are kept.
pub fn flatten_members(types: &[Arc<TypeDeclaration>]) -> Vec<MemberRef<'_>> {
    let capacity = types.iter().map(|t| t.members.len()).sum();
    let mut members = Vec::with_capacity(capacity);
    for owner in types {
        members.extend(owner.members.iter().map(|member| MemberRef {
            owner: owner.as_ref(),
            member,
        }));
    }
    members
}
