#![deny(missing_docs)]

//! # GraphQL Module
//!
//! - **types**: Target-side type model (`TypeRef`, definitions, equivalence).
//! - **schema**: The assembled `GraphQlSchema`.
//! - **printer**: SDL output through `graphql-parser`.

pub mod printer;
pub mod schema;
pub mod types;

pub use schema::{GraphQlSchema, SkippedOperation, MUTATION_TYPE, QUERY_TYPE};
pub use types::{
    EnumType, EnumValue, FieldDefinition, InputObjectType, InputType, InputValue, ObjectType,
    OutputType, Position, ScalarType, TypeDefinition, TypeRef,
};
