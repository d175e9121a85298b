#![deny(missing_docs)]

//! # Schema Arena
//!
//! Id-addressed storage for the source-side data shapes of one document.
//!
//! Every inline schema occurrence owns its own `SchemaId`, while every
//! component schema owns exactly one id that all `$ref`s resolve to. Caching
//! during conversion is keyed by these ids, so two schemas with identical
//! content are still distinct nodes unless they *are* the same component.
//!
//! - **resolver**: `$ref` dereferencing against the component registry.

pub mod resolver;

use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;

pub use resolver::ReferenceResolver;

/// Stable identity of a schema node within one parsed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaId(usize);

impl SchemaId {
    /// Returns the raw arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for SchemaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Declared properties of an object schema.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectShape {
    /// Properties in document order.
    pub properties: IndexMap<String, SchemaId>,
    /// Names listed in `required`.
    pub required: Vec<String>,
}

impl ObjectShape {
    /// An object is structured when it declares at least one property.
    /// Free-form maps and `{}` schemas are not.
    pub fn is_structured(&self) -> bool {
        !self.properties.is_empty()
    }

    /// Whether the given property is listed in `required`.
    pub fn is_required(&self, property: &str) -> bool {
        self.required.iter().any(|r| r == property)
    }
}

/// The kind-specific payload of a schema node.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    /// A `$ref` pointer, kept verbatim.
    Reference(String),
    /// A primitive type tag (`integer`, `number`, `string`, `boolean`, ...).
    Scalar(String),
    /// Literal enum values in declaration order.
    Enum(Vec<Value>),
    /// An array of the referenced item schema.
    Array(SchemaId),
    /// An object schema.
    Object(ObjectShape),
    /// A construct without a GraphQL counterpart (`oneOf`, boolean schemas, ...).
    Unsupported(String),
}

/// One data shape of the source document.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    /// Name used when the node becomes a named type. Stamped by reference
    /// resolution or by the operation assembler; never by the document.
    pub name: Option<String>,
    /// `description` keyword.
    pub description: Option<String>,
    /// Kind-specific payload.
    pub kind: SchemaKind,
}

impl SchemaNode {
    /// Creates an anonymous node of the given kind.
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            name: None,
            description: None,
            kind,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Sets the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// True for every kind except `Reference`.
    pub fn is_concrete(&self) -> bool {
        !matches!(self.kind, SchemaKind::Reference(_))
    }
}

/// Owner of all schema nodes of one document.
#[derive(Debug, Clone, Default)]
pub struct SchemaArena {
    nodes: Vec<SchemaNode>,
}

impl SchemaArena {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a node and returns its identity.
    pub fn push(&mut self, node: SchemaNode) -> SchemaId {
        self.nodes.push(node);
        SchemaId(self.nodes.len() - 1)
    }

    /// Returns the node behind an id.
    ///
    /// Ids are only minted by `push`, so lookups of foreign ids are a caller bug.
    pub fn get(&self, id: SchemaId) -> &SchemaNode {
        &self.nodes[id.0]
    }

    /// Mutable access, used to stamp names.
    pub fn get_mut(&mut self, id: SchemaId) -> &mut SchemaNode {
        &mut self.nodes[id.0]
    }

    /// Number of stored nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Read-only registry of `components.schemas`: name -> root node.
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    schemas: IndexMap<String, SchemaId>,
}

impl ComponentRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a component schema. Later registrations replace earlier ones.
    pub fn insert(&mut self, name: impl Into<String>, id: SchemaId) {
        self.schemas.insert(name.into(), id);
    }

    /// Looks up a component by name.
    pub fn get(&self, name: &str) -> Option<SchemaId> {
        self.schemas.get(name).copied()
    }

    /// Component names in document order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    /// Number of registered components.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Whether no components are registered.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
