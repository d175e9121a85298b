#![deny(missing_docs)]

//! # OpenAPI Models
//!
//! Intermediate representation of the operations found in a document.
//!
//! Schema bodies are not carried here; descriptors point into the document's
//! `SchemaArena` by `SchemaId`.

use crate::schema::SchemaId;
use std::fmt;

/// HTTP methods that map onto GraphQL root fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// `GET`, mapped to `Query`.
    Get,
    /// `POST`, mapped to `Mutation`.
    Post,
    /// `PUT`, mapped to `Mutation`.
    Put,
    /// `PATCH`, mapped to `Mutation`.
    Patch,
}

impl HttpMethod {
    /// All supported methods, in path item order.
    pub const ALL: [HttpMethod; 4] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
    ];

    /// Lowercase key used in a Path Item Object.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Patch => "patch",
        }
    }

    /// Whether operations with this method become `Query` fields.
    pub fn is_query(&self) -> bool {
        matches!(self, HttpMethod::Get)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

/// A parameter of an operation after `$ref` resolution and path-level merging.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDescriptor {
    /// Parameter name.
    pub name: String,
    /// Location (`path`, `query`, `header`, `cookie`).
    pub location: String,
    /// Description.
    pub description: Option<String>,
    /// Whether the parameter must be supplied.
    pub required: bool,
    /// The parameter's schema.
    pub schema: SchemaId,
}

/// The selected request body representation.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestBodyDescriptor {
    /// Description.
    pub description: Option<String>,
    /// Whether the body must be supplied.
    pub required: bool,
    /// Media type the schema was taken from.
    pub media_type: String,
    /// The body's schema.
    pub schema: SchemaId,
}

/// One convertible operation.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationDescriptor {
    /// HTTP method.
    pub method: HttpMethod,
    /// Path template (e.g. `/pets/{petId}`).
    pub path: String,
    /// `operationId`, if declared.
    pub operation_id: Option<String>,
    /// Short summary.
    pub summary: Option<String>,
    /// Long description.
    pub description: Option<String>,
    /// Parameters, path-level ones included.
    pub parameters: Vec<ParameterDescriptor>,
    /// Request body, if any.
    pub request_body: Option<RequestBodyDescriptor>,
    /// Schema of the selected success response.
    pub response: SchemaId,
}
