//! # Reference Resolver
//!
//! Dereferences `#/components/schemas/<Name>` pointers into their concrete
//! definition. Resolution is cheap and idempotent, so nothing is memoized here.

use crate::error::{AppError, AppResult};
use crate::oas::ref_utils::extract_component_name;
use crate::schema::{ComponentRegistry, SchemaArena, SchemaId, SchemaKind};
use std::collections::HashSet;

/// Resolves schema references against a document's component registry.
#[derive(Debug, Clone, Default)]
pub struct ReferenceResolver {
    components: ComponentRegistry,
}

impl ReferenceResolver {
    /// Creates a resolver over the given registry.
    pub fn new(components: ComponentRegistry) -> Self {
        Self { components }
    }

    /// The registry this resolver reads from.
    pub fn components(&self) -> &ComponentRegistry {
        &self.components
    }

    /// Resolves one level of indirection.
    ///
    /// Concrete nodes are returned unchanged. For a reference, the registry's
    /// node is returned and, if still anonymous, stamped with the referenced
    /// name (first resolution wins).
    pub fn resolve(&self, arena: &mut SchemaArena, id: SchemaId) -> AppResult<SchemaId> {
        let pointer = match &arena.get(id).kind {
            SchemaKind::Reference(pointer) => pointer.clone(),
            _ => return Ok(id),
        };

        let name = extract_component_name(&pointer, "schemas").ok_or_else(|| {
            AppError::Reference(format!(
                "'{}' is not of the form #/components/schemas/<Name>",
                pointer
            ))
        })?;
        let target = self.components.get(&name).ok_or_else(|| {
            AppError::Reference(format!("schema '{}' not found in components", name))
        })?;

        let node = arena.get_mut(target);
        if node.name.is_none() {
            node.name = Some(name);
        }
        Ok(target)
    }

    /// Follows references until a concrete node is reached.
    ///
    /// Components that alias each other in a loop never reach a concrete
    /// node and fail with a `Reference` error.
    pub fn resolve_concrete(&self, arena: &mut SchemaArena, id: SchemaId) -> AppResult<SchemaId> {
        let mut current = id;
        let mut seen = HashSet::new();
        while !arena.get(current).is_concrete() {
            if !seen.insert(current) {
                return Err(AppError::Reference(format!(
                    "circular alias while resolving schema {}",
                    id
                )));
            }
            current = self.resolve(arena, current)?;
        }
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ObjectShape, SchemaNode};

    fn setup() -> (SchemaArena, ReferenceResolver, SchemaId) {
        let mut arena = SchemaArena::new();
        let mut registry = ComponentRegistry::new();
        let pet = arena.push(SchemaNode::new(SchemaKind::Object(ObjectShape::default())));
        registry.insert("Pet", pet);
        (arena, ReferenceResolver::new(registry), pet)
    }

    #[test]
    fn test_concrete_node_is_returned_unchanged() {
        let (mut arena, resolver, pet) = setup();
        assert_eq!(resolver.resolve(&mut arena, pet).unwrap(), pet);
        assert!(arena.get(pet).name.is_none());
    }

    #[test]
    fn test_reference_resolves_and_stamps_name() {
        let (mut arena, resolver, pet) = setup();
        let r = arena.push(SchemaNode::new(SchemaKind::Reference(
            "#/components/schemas/Pet".into(),
        )));

        assert_eq!(resolver.resolve(&mut arena, r).unwrap(), pet);
        assert_eq!(resolver.resolve(&mut arena, r).unwrap(), pet);
        assert_eq!(arena.get(pet).name.as_deref(), Some("Pet"));
    }

    #[test]
    fn test_first_resolution_wins() {
        let (mut arena, resolver, pet) = setup();
        arena.get_mut(pet).name = Some("Animal".into());
        let r = arena.push(SchemaNode::new(SchemaKind::Reference(
            "#/components/schemas/Pet".into(),
        )));

        resolver.resolve(&mut arena, r).unwrap();
        assert_eq!(arena.get(pet).name.as_deref(), Some("Animal"));
    }

    #[test]
    fn test_malformed_and_missing_references() {
        let (mut arena, resolver, _) = setup();
        let bad = arena.push(SchemaNode::new(SchemaKind::Reference("#/definitions/Pet".into())));
        let missing = arena.push(SchemaNode::new(SchemaKind::Reference(
            "#/components/schemas/Owner".into(),
        )));

        assert!(matches!(
            resolver.resolve(&mut arena, bad),
            Err(AppError::Reference(_))
        ));
        assert!(matches!(
            resolver.resolve(&mut arena, missing),
            Err(AppError::Reference(_))
        ));
    }

    #[test]
    fn test_alias_chain_and_alias_loop() {
        let (mut arena, mut resolver, pet) = setup();
        let mut registry = resolver.components().clone();
        let alias = arena.push(SchemaNode::new(SchemaKind::Reference(
            "#/components/schemas/Pet".into(),
        )));
        registry.insert("Animal", alias);
        let loop_a = arena.push(SchemaNode::new(SchemaKind::Reference(
            "#/components/schemas/LoopB".into(),
        )));
        let loop_b = arena.push(SchemaNode::new(SchemaKind::Reference(
            "#/components/schemas/LoopA".into(),
        )));
        registry.insert("LoopA", loop_a);
        registry.insert("LoopB", loop_b);
        resolver = ReferenceResolver::new(registry);

        let r = arena.push(SchemaNode::new(SchemaKind::Reference(
            "#/components/schemas/Animal".into(),
        )));
        assert_eq!(resolver.resolve_concrete(&mut arena, r).unwrap(), pet);
        assert!(matches!(
            resolver.resolve_concrete(&mut arena, loop_a),
            Err(AppError::Reference(_))
        ));
    }
}
