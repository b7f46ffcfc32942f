use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::model::{simple_name_of, TypeDeclaration, TypeRef};

/// Resolves a supertype reference, as written inside `context`, to a known declaration.
pub trait TypeResolver: Send + Sync {
    fn resolve(&self, reference: &TypeRef, context: &TypeDeclaration)
        -> Option<Arc<TypeDeclaration>>;
}

/// Reverse inheritance lookup: supertype qualified name -> known direct subtypes.
///
/// Results are snapshots; implementations must tolerate concurrent reads while
/// they are being updated.
pub trait InheritanceIndex: Send + Sync {
    fn direct_subtypes(&self, qualified_name: &str) -> Vec<Arc<TypeDeclaration>>;
}

#[derive(Debug, Clone)]
struct IndexedType {
    seq: u64,
    decl: Arc<TypeDeclaration>,
}

/// Thread-safe declaration store that serves both as type resolver and
/// inheritance index.
///
/// Subtype edges are recorded under the simple name of each supertype
/// reference and confirmed by resolution at query time, so insertion order
/// between a subtype and its supertype does not matter.
#[derive(Debug, Default)]
pub struct DeclarationIndex {
    types: DashMap<String, IndexedType>,
    /// supertype reference simple name -> qualified names of referencing types
    referrers: DashMap<String, Vec<String>>,
    next_seq: AtomicU64,
}

impl DeclarationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a declaration, replacing any previous one with the same qualified name.
    /// A replaced declaration keeps its original position in iteration order.
    pub fn insert(&self, decl: TypeDeclaration) -> Option<Arc<TypeDeclaration>> {
        // The entry guard is held until the new declaration is stored, so
        // referrer updates for one name never interleave.
        match self.types.entry(decl.qualified_name.clone()) {
            Entry::Occupied(mut entry) => {
                let seq = entry.get().seq;
                self.unlink(&entry.get().decl);
                self.link(&decl);
                let previous = entry.insert(IndexedType {
                    seq,
                    decl: Arc::new(decl),
                });
                Some(previous.decl)
            }
            Entry::Vacant(entry) => {
                self.link(&decl);
                let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
                entry.insert(IndexedType {
                    seq,
                    decl: Arc::new(decl),
                });
                None
            }
        }
    }

    pub fn remove(&self, qualified_name: &str) -> Option<Arc<TypeDeclaration>> {
        match self.types.entry(qualified_name.to_string()) {
            Entry::Occupied(entry) => {
                self.unlink(&entry.get().decl);
                Some(entry.remove().decl)
            }
            Entry::Vacant(_) => None,
        }
    }

    pub fn get(&self, qualified_name: &str) -> Option<Arc<TypeDeclaration>> {
        self.types.get(qualified_name).map(|e| e.decl.clone())
    }

    pub fn contains(&self, qualified_name: &str) -> bool {
        self.types.contains_key(qualified_name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Snapshot of every indexed declaration in insertion order.
    pub fn types(&self) -> Vec<Arc<TypeDeclaration>> {
        let mut entries: Vec<IndexedType> = self.types.iter().map(|e| e.value().clone()).collect();
        entries.sort_by_key(|e| e.seq);
        entries.into_iter().map(|e| e.decl).collect()
    }

    fn link(&self, decl: &TypeDeclaration) {
        for (reference, _) in decl.supertype_refs() {
            let mut referrers = self
                .referrers
                .entry(reference.simple_name().to_string())
                .or_default();
            if !referrers.contains(&decl.qualified_name) {
                referrers.push(decl.qualified_name.clone());
            }
        }
    }

    fn unlink(&self, decl: &TypeDeclaration) {
        for (reference, _) in decl.supertype_refs() {
            if let Some(mut referrers) = self.referrers.get_mut(reference.simple_name()) {
                referrers.retain(|name| name != &decl.qualified_name);
            }
        }
        self.referrers.retain(|_, referrers| !referrers.is_empty());
    }

    fn seq_of(&self, qualified_name: &str) -> u64 {
        self.types
            .get(qualified_name)
            .map(|e| e.seq)
            .unwrap_or(u64::MAX)
    }
}

/// Dotted references name their type exactly. A bare name is looked up
/// through the context's imports, then its own package, then the root package.
impl TypeResolver for DeclarationIndex {
    fn resolve(
        &self,
        reference: &TypeRef,
        context: &TypeDeclaration,
    ) -> Option<Arc<TypeDeclaration>> {
        let name = reference.base_name();
        if reference.is_qualified() {
            return self.get(name);
        }

        let imported = context
            .imports
            .iter()
            .filter(|import| simple_name_of(import) == name)
            .find_map(|import| self.get(import));
        if imported.is_some() {
            return imported;
        }

        let package = context.package();
        if !package.is_empty() {
            if let Some(found) = self.get(&format!("{}.{}", package, name)) {
                return Some(found);
            }
        }
        self.get(name)
    }
}

impl InheritanceIndex for DeclarationIndex {
    fn direct_subtypes(&self, qualified_name: &str) -> Vec<Arc<TypeDeclaration>> {
        let simple = simple_name_of(qualified_name);
        let candidates: Vec<String> = match self.referrers.get(simple) {
            Some(referrers) => referrers.clone(),
            None => return Vec::new(),
        };

        let mut subtypes: Vec<(u64, Arc<TypeDeclaration>)> = candidates
            .iter()
            .filter_map(|name| self.get(name))
            .filter(|candidate| {
                candidate
                    .supertype_refs()
                    .filter(|(reference, _)| reference.simple_name() == simple)
                    .any(|(reference, _)| {
                        self.resolve(reference, candidate)
                            .is_some_and(|resolved| resolved.qualified_name == qualified_name)
                    })
            })
            .map(|decl| (self.seq_of(&decl.qualified_name), decl))
            .collect();

        subtypes.sort_by_key(|(seq, _)| *seq);
        subtypes.into_iter().map(|(_, decl)| decl).collect()
    }
}

impl FromIterator<TypeDeclaration> for DeclarationIndex {
    fn from_iter<I: IntoIterator<Item = TypeDeclaration>>(iter: I) -> Self {
        let index = Self::new();
        for decl in iter {
            index.insert(decl);
        }
        index
    }
}
