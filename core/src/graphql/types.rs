//! # GraphQL Types
//!
//! Target-side model produced by the converter. Named types live once in the
//! run's type store; everything else points at them by name through
//! `TypeRef`, which makes self-referential schemas representable without
//! shared ownership.

use std::fmt;

/// Built-in `Int` scalar.
pub const INT: &str = "Int";
/// Built-in `Float` scalar.
pub const FLOAT: &str = "Float";
/// Built-in `String` scalar.
pub const STRING: &str = "String";
/// Built-in `Boolean` scalar.
pub const BOOLEAN: &str = "Boolean";
/// Base name of the opaque scalar standing in for free-form objects.
pub const OBJECT_SCALAR: &str = "Object";

/// Whether a type is used as a response shape or as an argument shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    /// Response/field position.
    Output,
    /// Argument/request-body position.
    Input,
}

/// A type reference as it appears on a field or argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// A scalar or named type.
    Named(String),
    /// `[T]`
    List(Box<TypeRef>),
    /// `T!`
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    /// Reference to a named type.
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    /// Wraps the reference into a list.
    pub fn list(inner: TypeRef) -> Self {
        TypeRef::List(Box::new(inner))
    }

    /// Wraps the reference as non-null. Already non-null references are kept.
    pub fn non_null(self) -> Self {
        match self {
            TypeRef::NonNull(_) => self,
            other => TypeRef::NonNull(Box::new(other)),
        }
    }

    /// Name of the innermost named type.
    pub fn base_name(&self) -> &str {
        match self {
            TypeRef::Named(name) => name,
            TypeRef::List(inner) | TypeRef::NonNull(inner) => inner.base_name(),
        }
    }

    /// Printed signature, e.g. `[Pet!]`.
    pub fn signature(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named(name) => write!(f, "{}", name),
            TypeRef::List(inner) => write!(f, "[{}]", inner),
            TypeRef::NonNull(inner) => write!(f, "{}!", inner),
        }
    }
}

/// A converted type in output position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputType(TypeRef);

impl OutputType {
    /// Tags a reference as output.
    pub fn new(ty: TypeRef) -> Self {
        Self(ty)
    }

    /// The underlying reference.
    pub fn ty(&self) -> &TypeRef {
        &self.0
    }

    /// Unwraps the reference.
    pub fn into_inner(self) -> TypeRef {
        self.0
    }
}

/// A converted type in input position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputType(TypeRef);

impl InputType {
    /// Tags a reference as input.
    pub fn new(ty: TypeRef) -> Self {
        Self(ty)
    }

    /// The underlying reference.
    pub fn ty(&self) -> &TypeRef {
        &self.0
    }

    /// Unwraps the reference.
    pub fn into_inner(self) -> TypeRef {
        self.0
    }
}

/// An argument or input-object field.
#[derive(Debug, Clone, PartialEq)]
pub struct InputValue {
    /// Argument/field name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Declared type.
    pub ty: TypeRef,
}

/// A field of an object type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    /// Field name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Arguments, only used by root operation fields.
    pub arguments: Vec<InputValue>,
    /// Declared type.
    pub ty: TypeRef,
}

/// `type X { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectType {
    /// Type name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Fields in declaration order.
    pub fields: Vec<FieldDefinition>,
}

/// `input X { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct InputObjectType {
    /// Type name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Fields in declaration order.
    pub fields: Vec<InputValue>,
}

/// One value of an enum type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    /// GraphQL name of the value.
    pub name: String,
    /// String form of the source literal.
    pub value: String,
}

/// `enum X { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct EnumType {
    /// Type name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Values in declaration order.
    pub values: Vec<EnumValue>,
}

/// `scalar X`
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarType {
    /// Type name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// A named type definition.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDefinition {
    /// Output object.
    Object(ObjectType),
    /// Input object.
    InputObject(InputObjectType),
    /// Enumeration.
    Enum(EnumType),
    /// Custom scalar.
    Scalar(ScalarType),
}

impl TypeDefinition {
    /// Name of the defined type.
    pub fn name(&self) -> &str {
        match self {
            TypeDefinition::Object(t) => &t.name,
            TypeDefinition::InputObject(t) => &t.name,
            TypeDefinition::Enum(t) => &t.name,
            TypeDefinition::Scalar(t) => &t.name,
        }
    }

    /// Whether equivalence merging applies to this kind (composites and enums).
    pub fn is_mergeable(&self) -> bool {
        !matches!(self, TypeDefinition::Scalar(_))
    }

    /// Shallow structural equality used by equivalence merging.
    ///
    /// Enums compare their ordered `(name, value)` pairs. Object-like types
    /// compare field names and printed type signatures position by position;
    /// nested named types are equal when their names are.
    pub fn is_equivalent(&self, other: &TypeDefinition) -> bool {
        match (self, other) {
            (TypeDefinition::Enum(a), TypeDefinition::Enum(b)) => a.values == b.values,
            (TypeDefinition::Object(a), TypeDefinition::Object(b)) => {
                a.fields.len() == b.fields.len()
                    && a.fields
                        .iter()
                        .zip(&b.fields)
                        .all(|(x, y)| x.name == y.name && x.ty.signature() == y.ty.signature())
            }
            (TypeDefinition::InputObject(a), TypeDefinition::InputObject(b)) => {
                a.fields.len() == b.fields.len()
                    && a.fields
                        .iter()
                        .zip(&b.fields)
                        .all(|(x, y)| x.name == y.name && x.ty.signature() == y.ty.signature())
            }
            _ => false,
        }
    }
}

/// Maps an OpenAPI primitive tag to its built-in scalar.
pub fn builtin_scalar(tag: &str) -> Option<&'static str> {
    match tag {
        "integer" => Some(INT),
        "number" => Some(FLOAT),
        "string" => Some(STRING),
        "boolean" => Some(BOOLEAN),
        _ => None,
    }
}
