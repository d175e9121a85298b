#![deny(missing_docs)]

//! # Type Converter
//!
//! Recursive engine turning schema nodes into GraphQL types.
//!
//! Dispatch happens on the resolved node:
//! - **array**: converts the item in the same position and wraps it in a list.
//! - **object**: cache lookup, name allocation, field conversion, store.
//! - **enum**: cache lookup, name allocation, store.
//! - **scalar**: direct mapping of the primitive tag.
//!
//! One converter is one conversion run: it owns the schema arena, the name
//! allocator and the type store, so independent runs never share names.

pub mod store;

use crate::error::{AppError, AppResult};
use crate::graphql::types::{
    builtin_scalar, EnumType, EnumValue, FieldDefinition, InputObjectType, InputType, InputValue,
    ObjectType, OutputType, Position, ScalarType, TypeDefinition, TypeRef, OBJECT_SCALAR,
};
use crate::naming::{graphql_name, input_base_name, NameAllocator, DEFAULT_BASE_NAME};
use crate::schema::{
    ComponentRegistry, ObjectShape, ReferenceResolver, SchemaArena, SchemaId, SchemaKind,
};
use serde_json::Value;
use store::{Candidate, TypeStore};
use tracing::{debug, warn};

/// Names GraphQL forbids as enum values.
const RESERVED_ENUM_VALUES: [&str; 3] = ["true", "false", "null"];

/// Converts schema nodes of one document into GraphQL types.
#[derive(Debug)]
pub struct TypeConverter {
    arena: SchemaArena,
    resolver: ReferenceResolver,
    names: NameAllocator,
    store: TypeStore,
    opaque_scalar: Option<String>,
}

impl TypeConverter {
    /// Starts a fresh run over a document's schemas.
    ///
    /// # Arguments
    ///
    /// * `arena` - All schema nodes of the document.
    /// * `components` - `components.schemas`, used for `$ref` resolution.
    pub fn new(arena: SchemaArena, components: ComponentRegistry) -> Self {
        Self {
            arena,
            resolver: ReferenceResolver::new(components),
            names: NameAllocator::new(),
            store: TypeStore::new(),
            opaque_scalar: None,
        }
    }

    /// Converts a node in output position.
    pub fn convert_output(
        &mut self,
        id: SchemaId,
        default_name: Option<&str>,
    ) -> AppResult<OutputType> {
        self.convert(id, Position::Output, default_name)
            .map(OutputType::new)
    }

    /// Converts a node in input position.
    pub fn convert_input(
        &mut self,
        id: SchemaId,
        default_name: Option<&str>,
    ) -> AppResult<InputType> {
        self.convert(id, Position::Input, default_name)
            .map(InputType::new)
    }

    /// Follows references until a concrete node is reached.
    pub fn resolve(&mut self, id: SchemaId) -> AppResult<SchemaId> {
        self.resolver.resolve_concrete(&mut self.arena, id)
    }

    /// The schema nodes of this run.
    pub fn arena(&self) -> &SchemaArena {
        &self.arena
    }

    /// Mutable access to the schema nodes, used to stamp derived names.
    pub fn arena_mut(&mut self) -> &mut SchemaArena {
        &mut self.arena
    }

    /// The run's name allocator, shared with the operation assembler.
    pub fn names_mut(&mut self) -> &mut NameAllocator {
        &mut self.names
    }

    /// The run's type store.
    pub fn store(&self) -> &TypeStore {
        &self.store
    }

    /// Ends the run, yielding named definitions in creation order.
    pub fn into_definitions(self) -> Vec<TypeDefinition> {
        self.store.into_definitions()
    }

    fn convert(
        &mut self,
        id: SchemaId,
        position: Position,
        default_name: Option<&str>,
    ) -> AppResult<TypeRef> {
        let id = self.resolve(id)?;
        match &self.arena.get(id).kind {
            SchemaKind::Array(item) => {
                let item = *item;
                let inner = self.convert(item, position, default_name)?;
                Ok(TypeRef::list(inner))
            }
            SchemaKind::Object(shape) if !shape.is_structured() => self.convert_opaque(id, position),
            SchemaKind::Object(shape) => {
                let shape = shape.clone();
                self.convert_object(id, position, default_name, &shape)
            }
            SchemaKind::Enum(values) => {
                let values = values.clone();
                self.convert_enum(id, position, default_name, &values)
            }
            SchemaKind::Scalar(tag) => builtin_scalar(tag).map(TypeRef::named).ok_or_else(|| {
                AppError::UnsupportedSchemaKind(format!("primitive type '{}'", tag))
            }),
            SchemaKind::Unsupported(what) => Err(AppError::UnsupportedSchemaKind(what.clone())),
            SchemaKind::Reference(pointer) => Err(AppError::Reference(format!(
                "'{}' did not resolve to a concrete schema",
                pointer
            ))),
        }
    }

    fn convert_object(
        &mut self,
        id: SchemaId,
        position: Position,
        default_name: Option<&str>,
        shape: &ObjectShape,
    ) -> AppResult<TypeRef> {
        let key = (id, position);
        if let Some(ty) = self.store.get(key) {
            return Ok(ty);
        }

        let base = self.base_name(id, position, default_name);
        let name = self.names.allocate(Some(&base));
        self.store.begin(key, name.clone());

        let mut fields = Vec::with_capacity(shape.properties.len());
        for (property, property_id) in &shape.properties {
            let ty = match self.convert(*property_id, position, Some(property)) {
                Ok(ty) => ty,
                Err(e) => {
                    warn!(type_name = name.as_str(), field = property.as_str(), "dropping field: {}", e);
                    continue;
                }
            };
            let ty = if shape.is_required(property) {
                ty.non_null()
            } else {
                ty
            };
            let field_name = graphql_name(property);
            if fields.iter().any(|(existing, _, _)| *existing == field_name) {
                warn!(type_name = name.as_str(), field = property.as_str(), "dropping field: name clash");
                continue;
            }
            let description = self.arena.get(*property_id).description.clone();
            fields.push((field_name, description, ty));
        }

        if fields.is_empty() {
            // Nothing convertible: fall back to the opaque scalar.
            self.store.abandon(key);
            self.names.release(&name)?;
            return self.convert_opaque(id, position);
        }

        let description = self.arena.get(id).description.clone();
        let definition = match position {
            Position::Output => TypeDefinition::Object(ObjectType {
                name: name.clone(),
                description,
                fields: fields
                    .into_iter()
                    .map(|(name, description, ty)| FieldDefinition {
                        name,
                        description,
                        arguments: vec![],
                        ty,
                    })
                    .collect(),
            }),
            Position::Input => TypeDefinition::InputObject(InputObjectType {
                name: name.clone(),
                description,
                fields: fields
                    .into_iter()
                    .map(|(name, description, ty)| InputValue {
                        name,
                        description,
                        ty,
                    })
                    .collect(),
            }),
        };

        let ty = self.store.put(key, Candidate::Named(definition), &mut self.names)?;
        debug!(schema = %id, type_name = %ty, "converted object");
        Ok(ty)
    }

    fn convert_enum(
        &mut self,
        id: SchemaId,
        position: Position,
        default_name: Option<&str>,
        literals: &[Value],
    ) -> AppResult<TypeRef> {
        let key = (id, position);
        if let Some(ty) = self.store.get(key) {
            return Ok(ty);
        }
        if literals.is_empty() {
            return Err(AppError::UnsupportedSchemaKind(
                "enum without values".to_string(),
            ));
        }

        let base = self.base_name(id, position, default_name);
        let name = self.names.allocate(Some(&base));
        let mut values: Vec<EnumValue> = Vec::with_capacity(literals.len());
        for literal in literals {
            let value = literal_string(literal);
            let mut value_name = graphql_name(&value);
            if RESERVED_ENUM_VALUES.contains(&value_name.as_str()) {
                value_name.insert(0, '_');
            }
            if values.iter().any(|v| v.name == value_name) {
                debug!(enum_name = name.as_str(), value = value.as_str(), "duplicate enum value name");
                continue;
            }
            values.push(EnumValue {
                name: value_name,
                value,
            });
        }

        let definition = TypeDefinition::Enum(EnumType {
            name,
            description: self.arena.get(id).description.clone(),
            values,
        });
        let ty = self.store.put(key, Candidate::Named(definition), &mut self.names)?;
        debug!(schema = %id, type_name = %ty, "converted enum");
        Ok(ty)
    }

    /// Free-form objects become the generic `Object` scalar.
    fn convert_opaque(&mut self, id: SchemaId, position: Position) -> AppResult<TypeRef> {
        let key = (id, position);
        if let Some(ty) = self.store.get(key) {
            return Ok(ty);
        }
        let name = match &self.opaque_scalar {
            Some(name) => name.clone(),
            None => {
                let name = self.names.allocate(Some(OBJECT_SCALAR));
                self.store.register(TypeDefinition::Scalar(ScalarType {
                    name: name.clone(),
                    description: Some("Arbitrary JSON object".to_string()),
                }))?;
                self.opaque_scalar = Some(name.clone());
                name
            }
        };
        self.store
            .put(key, Candidate::Plain(TypeRef::named(name)), &mut self.names)
    }

    fn base_name(&self, id: SchemaId, position: Position, default_name: Option<&str>) -> String {
        let name = self
            .arena
            .get(id)
            .name
            .as_deref()
            .or(default_name)
            .map(graphql_name)
            .unwrap_or_else(|| DEFAULT_BASE_NAME.to_string());
        match position {
            Position::Output => name,
            Position::Input => input_base_name(&name),
        }
    }
}

fn literal_string(literal: &Value) -> String {
    match literal {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
