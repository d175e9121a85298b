#![deny(missing_docs)]

//! # Document Shims
//!
//! Generic structures acting as an Intermediate Deserialization Layer.
//! These structs map directly to OpenAPI objects. Schema bodies stay raw
//! `serde_json::Value`s and are lowered separately.
//!
//! Note: Shims holding `utoipa::RefOr` do not derive `Debug`.

use indexmap::IndexMap;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use utoipa::openapi::RefOr;

/// Schema for the root document.
#[derive(Deserialize)]
pub struct ShimOpenApi {
    /// OpenAPI version (e.g. "3.0.3").
    pub openapi: Option<String>,

    /// Swagger version, present only in 2.0 documents.
    pub swagger: Option<String>,

    /// Path items.
    pub paths: Option<ShimPaths>,

    /// Components section used for reference resolution.
    #[serde(default)]
    pub components: Option<ShimComponents>,
}

/// Represents the Paths Object. Specification extensions (`x-...`) are
/// skipped rather than parsed as path items.
#[derive(Default)]
pub struct ShimPaths {
    /// Parsed path items keyed by path template, in document order.
    pub items: IndexMap<String, ShimPathItem>,
}

impl<'de> Deserialize<'de> for ShimPaths {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = IndexMap::<String, Value>::deserialize(deserializer)?;
        let mut items = IndexMap::new();

        for (key, value) in raw {
            if key.starts_with("x-") {
                continue;
            }
            let path_item = serde_json::from_value::<ShimPathItem>(value).map_err(|e| {
                DeError::custom(format!("Failed to parse path item '{}': {}", key, e))
            })?;
            items.insert(key, path_item);
        }

        Ok(Self { items })
    }
}

/// A Path Item Object.
#[derive(Deserialize, Default)]
pub struct ShimPathItem {
    /// Parameters shared by every operation of the path.
    #[serde(default)]
    pub parameters: Vec<RefOr<ShimParameter>>,
    /// GET operation.
    pub get: Option<ShimOperation>,
    /// POST operation.
    pub post: Option<ShimOperation>,
    /// PUT operation.
    pub put: Option<ShimOperation>,
    /// PATCH operation.
    pub patch: Option<ShimOperation>,
}

/// An Operation Object.
#[derive(Deserialize)]
pub struct ShimOperation {
    /// Unique operation id.
    #[serde(rename = "operationId")]
    pub operation_id: Option<String>,
    /// Short summary.
    pub summary: Option<String>,
    /// Long description.
    pub description: Option<String>,
    /// Operation-level parameters.
    #[serde(default)]
    pub parameters: Vec<RefOr<ShimParameter>>,
    /// Request body.
    #[serde(rename = "requestBody")]
    pub request_body: Option<RefOr<ShimRequestBody>>,
    /// Responses keyed by status code (or `default`), in document order.
    #[serde(default)]
    pub responses: IndexMap<String, RefOr<ShimResponse>>,
}

/// A local shim for Parameter to ensure robust parsing of fields like `required`.
#[derive(Deserialize, Clone)]
pub struct ShimParameter {
    /// Name of the parameter.
    pub name: String,
    /// Location of the parameter (query, path, header, cookie).
    #[serde(rename = "in")]
    pub parameter_in: String,
    /// Description.
    pub description: Option<String>,
    /// Whether the parameter is required.
    #[serde(default)]
    pub required: bool,
    /// Schema definition.
    pub schema: Option<Value>,
    /// Alternative representation through media types.
    #[serde(default)]
    pub content: IndexMap<String, ShimMediaType>,
}

/// A Request Body Object.
#[derive(Deserialize, Clone)]
pub struct ShimRequestBody {
    /// Description.
    pub description: Option<String>,
    /// Whether the body is required.
    #[serde(default)]
    pub required: bool,
    /// Media types, in document order.
    #[serde(default)]
    pub content: IndexMap<String, ShimMediaType>,
}

/// A Response Object.
#[derive(Deserialize, Clone)]
pub struct ShimResponse {
    /// Description.
    pub description: Option<String>,
    /// Media types, in document order.
    #[serde(default)]
    pub content: IndexMap<String, ShimMediaType>,
}

/// A Media Type Object.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct ShimMediaType {
    /// Schema of the representation.
    pub schema: Option<Value>,
}

/// Components object holding reusable definitions.
#[derive(Deserialize, Default)]
pub struct ShimComponents {
    /// Reusable schemas, in document order.
    #[serde(default)]
    pub schemas: IndexMap<String, Value>,
    /// Reusable parameters.
    #[serde(default)]
    pub parameters: IndexMap<String, RefOr<ShimParameter>>,
    /// Reusable request bodies.
    #[serde(rename = "requestBodies", default)]
    pub request_bodies: IndexMap<String, RefOr<ShimRequestBody>>,
    /// Reusable responses.
    #[serde(default)]
    pub responses: IndexMap<String, RefOr<ShimResponse>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_skip_extensions() {
        let json = serde_json::json!({
            "/pets": { "get": { "responses": {} } },
            "x-internal": true
        });
        let paths: ShimPaths = serde_json::from_value(json).unwrap();
        assert_eq!(paths.items.len(), 1);
        assert!(paths.items["/pets"].get.is_some());
        assert!(!paths.items.contains_key("x-internal"));
    }

    #[test]
    fn test_parameter_ref_or_inline() {
        let json = serde_json::json!([
            { "$ref": "#/components/parameters/Limit" },
            { "name": "id", "in": "path", "required": true, "schema": { "type": "string" } }
        ]);
        let params: Vec<RefOr<ShimParameter>> = serde_json::from_value(json).unwrap();
        assert!(matches!(&params[0], RefOr::Ref(r) if r.ref_location == "#/components/parameters/Limit"));
        assert!(matches!(&params[1], RefOr::T(p) if p.name == "id" && p.required));
    }
}
