#![deny(missing_docs)]

//! # OAS2GQL Core
//!
//! Core library converting OpenAPI 3 documents into GraphQL schemas.
//!
//! A conversion run is strictly local: `SchemaAssembler` owns one
//! `TypeConverter`, which owns its name allocator and type store, so
//! independent documents can be converted concurrently without sharing state.

/// Shared error types.
pub mod error;

/// Source-side schema model and `$ref` resolution.
pub mod schema;

/// Unique name allocation and identifier hygiene.
pub mod naming;

/// Target-side GraphQL model and SDL printing.
pub mod graphql;

/// Schema node to GraphQL type conversion.
pub mod converter;

/// OpenAPI document loading.
pub mod oas;

/// Query/Mutation assembly from operations.
pub mod assembler;

pub use assembler::{convert_document, SchemaAssembler};
pub use converter::TypeConverter;
pub use error::{AppError, AppResult};
pub use graphql::{GraphQlSchema, InputType, OutputType, Position, SkippedOperation, TypeRef};
pub use naming::{operation_name, NameAllocator};
pub use oas::{parse_openapi_document, HttpMethod, OperationDescriptor, ParsedOpenApi};
pub use schema::{ComponentRegistry, ReferenceResolver, SchemaArena, SchemaId, SchemaNode};

/// Parses `content` (JSON or YAML) and converts it to a GraphQL schema.
pub fn convert_openapi(content: &str) -> AppResult<GraphQlSchema> {
    let parsed = parse_openapi_document(content)?;
    Ok(convert_document(parsed))
}
