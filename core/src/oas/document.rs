#![deny(missing_docs)]

//! # OpenAPI Document Parsing
//!
//! Loads a JSON or YAML document and extracts what the GraphQL conversion
//! needs: the schema arena, the component registry and one descriptor per
//! supported operation.
//!
//! Operations whose parameters, body or response cannot be resolved are not
//! fatal; they are reported in `ParsedOpenApi::rejected`.

use crate::error::{AppError, AppResult};
use crate::graphql::schema::SkippedOperation;
use crate::oas::lowering::lower_schema;
use crate::oas::models::{
    HttpMethod, OperationDescriptor, ParameterDescriptor, RequestBodyDescriptor,
};
use crate::oas::ref_utils::extract_component_name;
use crate::oas::shims::{
    ShimComponents, ShimMediaType, ShimOpenApi, ShimOperation, ShimParameter, ShimPathItem,
    ShimResponse,
};
use crate::schema::{ComponentRegistry, SchemaArena};
use indexmap::IndexMap;
use std::collections::HashSet;
use utoipa::openapi::RefOr;

/// Everything extracted from one OpenAPI document.
#[derive(Debug, Clone)]
pub struct ParsedOpenApi {
    /// All schema nodes of the document.
    pub arena: SchemaArena,
    /// `components.schemas`, by name.
    pub components: ComponentRegistry,
    /// Convertible operations, in document order.
    pub operations: Vec<OperationDescriptor>,
    /// Operations that could not be described.
    pub rejected: Vec<SkippedOperation>,
}

/// Parses an OpenAPI 3.x document (JSON or YAML).
///
/// Swagger 2.0 documents and documents without an `openapi` version are
/// rejected with `AppError::Parse`.
pub fn parse_openapi_document(content: &str) -> AppResult<ParsedOpenApi> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(content)
        .map_err(|e| AppError::Parse(format!("Failed to parse OpenAPI document: {}", e)))?;
    // Goes through serde_json so numeric keys like `200:` become strings.
    let json = serde_json::to_value(yaml)
        .map_err(|e| AppError::Parse(format!("Failed to parse OpenAPI document: {}", e)))?;
    let shim: ShimOpenApi = serde_json::from_value(json)
        .map_err(|e| AppError::Parse(format!("Invalid OpenAPI document: {}", e)))?;
    validate_version(&shim)?;

    let components = shim.components.unwrap_or_default();
    let mut arena = SchemaArena::new();
    let mut registry = ComponentRegistry::new();
    for (name, schema) in &components.schemas {
        let id = lower_schema(&mut arena, schema);
        registry.insert(name.clone(), id);
    }

    let mut operations = Vec::new();
    let mut rejected = Vec::new();
    let paths = shim.paths.map(|p| p.items).unwrap_or_default();
    for (path, item) in &paths {
        for method in HttpMethod::ALL {
            let Some(operation) = operation_of(item, method) else {
                continue;
            };
            match describe_operation(&mut arena, &components, item, operation, method, path) {
                Ok(descriptor) => operations.push(descriptor),
                Err(e) => rejected.push(SkippedOperation {
                    method,
                    path: path.clone(),
                    reason: e.to_string(),
                }),
            }
        }
    }

    Ok(ParsedOpenApi {
        arena,
        components: registry,
        operations,
        rejected,
    })
}

fn validate_version(shim: &ShimOpenApi) -> AppResult<()> {
    if let Some(version) = &shim.swagger {
        return Err(AppError::Parse(format!(
            "Swagger {} documents are not supported; convert to OpenAPI 3 first",
            version
        )));
    }
    match shim.openapi.as_deref() {
        Some(v) if v.starts_with("3.") => Ok(()),
        Some(v) => Err(AppError::Parse(format!("Unsupported OpenAPI version '{}'", v))),
        None => Err(AppError::Parse(
            "Document is missing the 'openapi' version field".into(),
        )),
    }
}

fn operation_of(item: &ShimPathItem, method: HttpMethod) -> Option<&ShimOperation> {
    match method {
        HttpMethod::Get => item.get.as_ref(),
        HttpMethod::Post => item.post.as_ref(),
        HttpMethod::Put => item.put.as_ref(),
        HttpMethod::Patch => item.patch.as_ref(),
    }
}

fn describe_operation(
    arena: &mut SchemaArena,
    components: &ShimComponents,
    item: &ShimPathItem,
    operation: &ShimOperation,
    method: HttpMethod,
    path: &str,
) -> AppResult<OperationDescriptor> {
    // Path-level first; an operation parameter replaces one with the same (name, in).
    let mut merged: Vec<ShimParameter> = Vec::new();
    for param in item.parameters.iter().chain(&operation.parameters) {
        let param = resolve_ref(param, "parameters", &components.parameters)?;
        match merged
            .iter_mut()
            .find(|p| p.name == param.name && p.parameter_in == param.parameter_in)
        {
            Some(existing) => *existing = param,
            None => merged.push(param),
        }
    }

    let mut parameters = Vec::with_capacity(merged.len());
    for param in merged {
        let schema = param
            .schema
            .as_ref()
            .or_else(|| first_schema(&param.content).map(|(_, s)| s))
            .ok_or_else(|| {
                AppError::AmbiguousContent(format!("parameter '{}' has no schema", param.name))
            })?;
        parameters.push(ParameterDescriptor {
            schema: lower_schema(arena, schema),
            name: param.name,
            location: param.parameter_in,
            description: param.description,
            required: param.required,
        });
    }

    let request_body = match &operation.request_body {
        Some(body) => {
            let body = resolve_ref(body, "requestBodies", &components.request_bodies)?;
            let (media_type, schema) = first_schema(&body.content).ok_or_else(|| {
                AppError::AmbiguousContent("request body has no media type with a schema".into())
            })?;
            Some(RequestBodyDescriptor {
                description: body.description.clone(),
                required: body.required,
                media_type: media_type.to_string(),
                schema: lower_schema(arena, schema),
            })
        }
        None => None,
    };

    let response = select_response(&operation.responses)
        .ok_or_else(|| AppError::AmbiguousContent("operation declares no responses".into()))?;
    let response = resolve_ref(response, "responses", &components.responses)?;
    let (_, schema) = first_schema(&response.content).ok_or_else(|| {
        AppError::AmbiguousContent("selected response has no media type with a schema".into())
    })?;
    let response = lower_schema(arena, schema);

    Ok(OperationDescriptor {
        method,
        path: path.to_string(),
        operation_id: operation.operation_id.clone(),
        summary: operation.summary.clone(),
        description: operation.description.clone(),
        parameters,
        request_body,
        response,
    })
}

/// First `2xx` response, else `default`, else the first one declared.
fn select_response(
    responses: &IndexMap<String, RefOr<ShimResponse>>,
) -> Option<&RefOr<ShimResponse>> {
    responses
        .iter()
        .find(|(code, _)| code.starts_with('2'))
        .or_else(|| responses.iter().find(|(code, _)| code.as_str() == "default"))
        .or_else(|| responses.first())
        .map(|(_, response)| response)
}

fn first_schema(
    content: &IndexMap<String, ShimMediaType>,
) -> Option<(&str, &serde_json::Value)> {
    content
        .iter()
        .find_map(|(media, m)| m.schema.as_ref().map(|s| (media.as_str(), s)))
}

/// Follows `#/components/<section>/<name>` references until an inline object.
fn resolve_ref<T: Clone>(
    item: &RefOr<T>,
    section: &str,
    pool: &IndexMap<String, RefOr<T>>,
) -> AppResult<T> {
    let mut current = item;
    let mut seen = HashSet::new();
    loop {
        match current {
            RefOr::T(value) => return Ok(value.clone()),
            RefOr::Ref(r) => {
                let name = extract_component_name(&r.ref_location, section).ok_or_else(|| {
                    AppError::Reference(format!(
                        "'{}' does not point into components.{}",
                        r.ref_location, section
                    ))
                })?;
                if !seen.insert(name.clone()) {
                    return Err(AppError::Reference(format!(
                        "reference cycle through '{}'",
                        r.ref_location
                    )));
                }
                current = pool.get(&name).ok_or_else(|| {
                    AppError::Reference(format!("'{}' not found", r.ref_location))
                })?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaKind;

    const PETSTORE: &str = r#"
openapi: 3.0.3
info:
  title: Petstore
  version: 1.0.0
paths:
  /pets/{petId}:
    parameters:
      - name: petId
        in: path
        required: true
        schema:
          type: string
      - name: verbose
        in: query
        schema:
          type: boolean
    get:
      operationId: getPet
      summary: Fetch a pet
      parameters:
        - name: verbose
          in: query
          required: true
          schema:
            type: integer
        - $ref: '#/components/parameters/Limit'
      responses:
        404:
          description: missing
        200:
          description: ok
          content:
            application/json:
              schema:
                $ref: '#/components/schemas/Pet'
    put:
      requestBody:
        $ref: '#/components/requestBodies/PetBody'
      responses:
        default:
          $ref: '#/components/responses/PetResponse'
components:
  schemas:
    Pet:
      type: object
      properties:
        name:
          type: string
  parameters:
    Limit:
      name: limit
      in: query
      schema:
        type: integer
  requestBodies:
    PetBody:
      required: true
      content:
        application/json:
          schema:
            $ref: '#/components/schemas/Pet'
  responses:
    PetResponse:
      description: ok
      content:
        application/json:
          schema:
            $ref: '#/components/schemas/Pet'
"#;

    #[test]
    fn test_parse_operations_in_document_order() {
        let parsed = parse_openapi_document(PETSTORE).unwrap();
        assert!(parsed.rejected.is_empty(), "{:?}", parsed.rejected);
        let methods: Vec<_> = parsed.operations.iter().map(|o| o.method).collect();
        assert_eq!(methods, vec![HttpMethod::Get, HttpMethod::Put]);
        assert!(parsed.components.get("Pet").is_some());
    }

    #[test]
    fn test_parameters_are_merged_and_resolved() {
        let parsed = parse_openapi_document(PETSTORE).unwrap();
        let get = &parsed.operations[0];
        let names: Vec<_> = get.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["petId", "verbose", "limit"]);

        let verbose = &get.parameters[1];
        assert!(verbose.required);
        assert_eq!(
            parsed.arena.get(verbose.schema).kind,
            SchemaKind::Scalar("integer".into())
        );
    }

    #[test]
    fn test_response_and_body_selection() {
        let parsed = parse_openapi_document(PETSTORE).unwrap();
        let get = &parsed.operations[0];
        assert_eq!(
            parsed.arena.get(get.response).kind,
            SchemaKind::Reference("#/components/schemas/Pet".into())
        );

        let put = &parsed.operations[1];
        let body = put.request_body.as_ref().unwrap();
        assert!(body.required);
        assert_eq!(body.media_type, "application/json");
    }

    #[test]
    fn test_operation_without_schema_is_rejected() {
        let doc = r#"
openapi: 3.1.0
paths:
  /health:
    get:
      responses:
        '204':
          description: empty
  /pets:
    post:
      parameters:
        - $ref: '#/components/parameters/Missing'
      responses:
        '200':
          description: ok
          content:
            application/json:
              schema:
                type: string
"#;
        let parsed = parse_openapi_document(doc).unwrap();
        assert!(parsed.operations.is_empty());
        assert_eq!(parsed.rejected.len(), 2);
        assert_eq!(parsed.rejected[0].method, HttpMethod::Get);
        assert!(parsed.rejected[0].reason.contains("Ambiguous"));
        assert!(parsed.rejected[1].reason.contains("Reference"));
    }

    #[test]
    fn test_reject_swagger_and_garbage() {
        assert!(matches!(
            parse_openapi_document("swagger: '2.0'\npaths: {}\n"),
            Err(AppError::Parse(_))
        ));
        assert!(matches!(
            parse_openapi_document("paths: {}\n"),
            Err(AppError::Parse(_))
        ));
        assert!(matches!(
            parse_openapi_document("openapi: [unterminated"),
            Err(AppError::Parse(_))
        ));
    }

    #[test]
    fn test_json_documents_are_accepted() {
        let doc = r#"{"openapi": "3.0.0", "paths": {}, "components": {"schemas": {"Id": {"type": "string"}}}}"#;
        let parsed = parse_openapi_document(doc).unwrap();
        assert_eq!(parsed.components.len(), 1);
        assert!(parsed.operations.is_empty());
    }
}
