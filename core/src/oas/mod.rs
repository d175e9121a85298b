#![deny(missing_docs)]

//! # OpenAPI Parsing Module
//!
//! - **shims**: Deserialization layer mirroring OpenAPI objects.
//! - **lowering**: Schema Objects into `SchemaNode`s.
//! - **models**: Operation descriptors.
//! - **document**: Entry point tying the above together.

pub mod document;
pub mod lowering;
pub mod models;
pub(crate) mod ref_utils;
pub mod shims;

pub use document::{parse_openapi_document, ParsedOpenApi};
pub use models::{HttpMethod, OperationDescriptor, ParameterDescriptor, RequestBodyDescriptor};
