//! # Type Store
//!
//! Memoizes conversions per `(SchemaId, Position)` and merges named types
//! that come out shape-identical to one already stored.
//!
//! A slot is `InProgress` between allocating a composite's name and storing
//! its definition; recursive visits of the same slot see the name and stop.

use crate::error::{AppError, AppResult};
use crate::graphql::types::{Position, TypeDefinition, TypeRef};
use crate::naming::NameAllocator;
use crate::schema::SchemaId;
use indexmap::IndexMap;
use std::collections::HashMap;
use tracing::debug;

/// Cache key: one slot per schema node and position.
pub type SlotKey = (SchemaId, Position);

/// State of a cache slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    /// The composite is being built under this name.
    InProgress(String),
    /// Final converted type.
    Done(TypeRef),
}

/// A freshly converted type offered to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Candidate {
    /// Unnamed result (scalars, opaque objects); stored unchanged.
    Plain(TypeRef),
    /// A named definition subject to equivalence merging.
    Named(TypeDefinition),
}

/// Conversion cache plus the named definitions of one run.
#[derive(Debug, Default)]
pub struct TypeStore {
    slots: HashMap<SlotKey, Slot>,
    definitions: IndexMap<String, TypeDefinition>,
}

impl TypeStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached result for a slot. In-progress slots yield their reserved name.
    pub fn get(&self, key: SlotKey) -> Option<TypeRef> {
        self.slots.get(&key).map(|slot| match slot {
            Slot::InProgress(name) => TypeRef::named(name.clone()),
            Slot::Done(ty) => ty.clone(),
        })
    }

    /// Raw slot state.
    pub fn slot(&self, key: SlotKey) -> Option<&Slot> {
        self.slots.get(&key)
    }

    /// Marks a slot as being built under `name`.
    pub fn begin(&mut self, key: SlotKey, name: impl Into<String>) {
        self.slots.insert(key, Slot::InProgress(name.into()));
    }

    /// Stores a conversion result and returns what callers must use.
    ///
    /// A named candidate that is equivalent to a stored definition sharing its
    /// base name is dropped in favour of that definition, and the candidate's
    /// own name is released.
    pub fn put(
        &mut self,
        key: SlotKey,
        candidate: Candidate,
        names: &mut NameAllocator,
    ) -> AppResult<TypeRef> {
        let definition = match candidate {
            Candidate::Named(def) if def.is_mergeable() => def,
            Candidate::Named(def) => {
                let ty = TypeRef::named(def.name());
                self.register(def)?;
                self.slots.insert(key, Slot::Done(ty.clone()));
                return Ok(ty);
            }
            Candidate::Plain(ty) => {
                self.slots.insert(key, Slot::Done(ty.clone()));
                return Ok(ty);
            }
        };

        if let Some(existing) = self.find_equivalent(&definition, names) {
            names.release(definition.name())?;
            debug!(
                candidate = definition.name(),
                existing = existing.as_str(),
                "merged equivalent type"
            );
            let ty = TypeRef::named(existing);
            self.slots.insert(key, Slot::Done(ty.clone()));
            return Ok(ty);
        }

        let ty = TypeRef::named(definition.name());
        self.register(definition)?;
        self.slots.insert(key, Slot::Done(ty.clone()));
        Ok(ty)
    }

    /// Forgets a slot, e.g. when its composite turned out unusable.
    pub fn abandon(&mut self, key: SlotKey) {
        self.slots.remove(&key);
    }

    /// Adds a definition without equivalence checking.
    ///
    /// Fails when a definition of the same name is already stored; the
    /// stored one is kept.
    pub fn register(&mut self, definition: TypeDefinition) -> AppResult<()> {
        if self.definitions.contains_key(definition.name()) {
            return Err(AppError::General(format!(
                "type '{}' is already defined",
                definition.name()
            )));
        }
        self.definitions
            .insert(definition.name().to_string(), definition);
        Ok(())
    }

    /// Looks up a stored definition.
    pub fn definition(&self, name: &str) -> Option<&TypeDefinition> {
        self.definitions.get(name)
    }

    /// Stored definitions in creation order.
    pub fn definitions(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.definitions.values()
    }

    /// Consumes the store, yielding definitions in creation order.
    pub fn into_definitions(self) -> Vec<TypeDefinition> {
        self.definitions.into_values().collect()
    }

    fn find_equivalent(
        &self,
        candidate: &TypeDefinition,
        names: &NameAllocator,
    ) -> Option<String> {
        self.definitions.values().find_map(|existing| {
            names.common_prefix_of(candidate.name(), existing.name())?;
            candidate
                .is_equivalent(existing)
                .then(|| existing.name().to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::types::{FieldDefinition, ObjectType, ScalarType, STRING};
    use crate::schema::{SchemaArena, SchemaKind, SchemaNode};

    fn ids(n: usize) -> Vec<SchemaId> {
        let mut arena = SchemaArena::new();
        (0..n)
            .map(|_| arena.push(SchemaNode::new(SchemaKind::Scalar("string".into()))))
            .collect()
    }

    fn pet(name: &str, field: &str) -> TypeDefinition {
        TypeDefinition::Object(ObjectType {
            name: name.into(),
            description: None,
            fields: vec![FieldDefinition {
                name: field.into(),
                description: None,
                arguments: vec![],
                ty: TypeRef::named(STRING),
            }],
        })
    }

    #[test]
    fn test_plain_candidates_are_stored_unchanged() {
        let ids = ids(1);
        let mut store = TypeStore::new();
        let mut names = NameAllocator::new();
        let key = (ids[0], Position::Output);

        let ty = store
            .put(key, Candidate::Plain(TypeRef::named(STRING)), &mut names)
            .unwrap();
        assert_eq!(ty, TypeRef::named(STRING));
        assert_eq!(store.get(key), Some(TypeRef::named(STRING)));
        assert_eq!(store.definitions().count(), 0);
    }

    #[test]
    fn test_in_progress_slot_yields_reserved_name() {
        let ids = ids(1);
        let mut store = TypeStore::new();
        let key = (ids[0], Position::Output);
        store.begin(key, "Pet");
        assert_eq!(store.slot(key), Some(&Slot::InProgress("Pet".into())));
        assert_eq!(store.get(key), Some(TypeRef::named("Pet")));
        assert_eq!(store.get((ids[0], Position::Input)), None);
    }

    #[test]
    fn test_equivalent_candidate_is_merged_and_name_recycled() {
        let ids = ids(3);
        let mut store = TypeStore::new();
        let mut names = NameAllocator::new();

        let first = names.allocate(Some("Pet"));
        store
            .put((ids[0], Position::Output), Candidate::Named(pet(&first, "name")), &mut names)
            .unwrap();

        let second = names.allocate(Some("Pet"));
        assert_eq!(second, "Pet1");
        let ty = store
            .put((ids[1], Position::Output), Candidate::Named(pet(&second, "name")), &mut names)
            .unwrap();

        assert_eq!(ty, TypeRef::named("Pet"));
        assert_eq!(store.get((ids[1], Position::Output)), Some(TypeRef::named("Pet")));
        assert_eq!(store.definitions().count(), 1);
        assert_eq!(names.allocate(Some("Pet")), "Pet1");
    }

    #[test]
    fn test_different_shape_is_kept() {
        let ids = ids(2);
        let mut store = TypeStore::new();
        let mut names = NameAllocator::new();

        let first = names.allocate(Some("Pet"));
        store
            .put((ids[0], Position::Output), Candidate::Named(pet(&first, "name")), &mut names)
            .unwrap();
        let second = names.allocate(Some("Pet"));
        let ty = store
            .put((ids[1], Position::Output), Candidate::Named(pet(&second, "tag")), &mut names)
            .unwrap();

        assert_eq!(ty, TypeRef::named("Pet1"));
        assert_eq!(store.definitions().count(), 2);
    }

    #[test]
    fn test_same_shape_different_base_is_kept() {
        let ids = ids(2);
        let mut store = TypeStore::new();
        let mut names = NameAllocator::new();

        let pet_name = names.allocate(Some("Pet"));
        store
            .put((ids[0], Position::Output), Candidate::Named(pet(&pet_name, "name")), &mut names)
            .unwrap();
        let owner_name = names.allocate(Some("Owner"));
        let ty = store
            .put((ids[1], Position::Output), Candidate::Named(pet(&owner_name, "name")), &mut names)
            .unwrap();

        assert_eq!(ty, TypeRef::named("Owner"));
        assert_eq!(store.definitions().count(), 2);
    }

    #[test]
    fn test_merge_into_later_suffix_keeps_it_live() {
        let ids = ids(3);
        let mut store = TypeStore::new();
        let mut names = NameAllocator::new();

        let outer = names.allocate(Some("Tree"));
        let inner = names.allocate(Some("Tree"));
        store
            .put((ids[1], Position::Output), Candidate::Named(pet(&inner, "id")), &mut names)
            .unwrap();
        let ty = store
            .put((ids[0], Position::Output), Candidate::Named(pet(&outer, "id")), &mut names)
            .unwrap();
        assert_eq!(ty, TypeRef::named("Tree1"));

        let next = names.allocate(Some("Tree"));
        assert_eq!(next, "Tree2");
        let ty = store
            .put((ids[2], Position::Output), Candidate::Named(pet(&next, "other")), &mut names)
            .unwrap();
        assert_eq!(ty, TypeRef::named("Tree2"));
        assert_eq!(store.definitions().count(), 2);
        assert_eq!(store.definition("Tree1"), Some(&pet("Tree1", "id")));
    }

    #[test]
    fn test_register_rejects_duplicate_names() {
        let mut store = TypeStore::new();
        store.register(pet("Pet", "name")).unwrap();
        assert!(store.register(pet("Pet", "tag")).is_err());
        assert_eq!(store.definition("Pet"), Some(&pet("Pet", "name")));
    }

    #[test]
    fn test_scalars_bypass_merging() {
        let ids = ids(1);
        let mut store = TypeStore::new();
        let mut names = NameAllocator::new();
        let scalar = TypeDefinition::Scalar(ScalarType {
            name: "Object".into(),
            description: None,
        });
        let ty = store
            .put((ids[0], Position::Output), Candidate::Named(scalar), &mut names)
            .unwrap();
        assert_eq!(ty, TypeRef::named("Object"));
        assert!(store.definition("Object").is_some());
    }
}
