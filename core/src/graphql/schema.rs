//! # GraphQL Schema
//!
//! The assembled result of one document conversion.

use crate::graphql::printer::print_schema;
use crate::graphql::types::{ObjectType, TypeDefinition};
use crate::oas::HttpMethod;

/// Root query type name.
pub const QUERY_TYPE: &str = "Query";
/// Root mutation type name.
pub const MUTATION_TYPE: &str = "Mutation";

/// An operation that could not be converted, with the reason.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedOperation {
    /// HTTP method.
    pub method: HttpMethod,
    /// Path template.
    pub path: String,
    /// Rendered error.
    pub reason: String,
}

/// A complete GraphQL schema built from one OpenAPI document.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphQlSchema {
    /// The `Query` root.
    pub query: ObjectType,
    /// The `Mutation` root, present when at least one mutation converted.
    pub mutation: Option<ObjectType>,
    /// Named types in creation order.
    pub types: Vec<TypeDefinition>,
    /// Operations left out of the schema.
    pub skipped: Vec<SkippedOperation>,
}

impl GraphQlSchema {
    /// Looks up a named type.
    pub fn get_type(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.iter().find(|t| t.name() == name)
    }

    /// Prints the schema as SDL.
    pub fn to_sdl(&self) -> String {
        print_schema(self)
    }
}
