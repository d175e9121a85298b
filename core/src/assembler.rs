#![deny(missing_docs)]

//! # Schema Assembler
//!
//! Builds the `Query` and `Mutation` roots from operation descriptors.
//!
//! Each operation becomes one root field. An operation that fails to convert
//! is skipped with a warning; the rest of the document still converts.

use crate::converter::TypeConverter;
use crate::error::{AppError, AppResult};
use crate::graphql::schema::{GraphQlSchema, SkippedOperation, MUTATION_TYPE, QUERY_TYPE};
use crate::graphql::types::{FieldDefinition, InputValue, ObjectType, TypeRef, STRING};
use crate::naming::{graphql_name, operation_name};
use crate::oas::{OperationDescriptor, ParsedOpenApi};
use tracing::{info, warn};

/// Argument name carrying the request body.
pub const BODY_ARGUMENT: &str = "body";

/// Field keeping `Query` non-empty when no query operation converted.
pub const PLACEHOLDER_FIELD: &str = "_empty";

/// One document conversion run.
#[derive(Debug)]
pub struct SchemaAssembler {
    converter: TypeConverter,
    operations: Vec<OperationDescriptor>,
    skipped: Vec<SkippedOperation>,
}

impl SchemaAssembler {
    /// Starts a fresh run over a parsed document.
    pub fn new(parsed: ParsedOpenApi) -> Self {
        Self {
            converter: TypeConverter::new(parsed.arena, parsed.components),
            operations: parsed.operations,
            skipped: parsed.rejected,
        }
    }

    /// Converts every operation and returns the finished schema.
    pub fn assemble(mut self) -> GraphQlSchema {
        for skipped in &self.skipped {
            warn!(
                "{} {} could not be converted: {}",
                skipped.method, skipped.path, skipped.reason
            );
        }

        let mut queries = Vec::new();
        let mut mutations = Vec::new();
        let operations = std::mem::take(&mut self.operations);
        for operation in &operations {
            match self.convert_operation(operation) {
                Ok(field) if operation.method.is_query() => queries.push(field),
                Ok(field) => mutations.push(field),
                Err(e) => {
                    warn!(
                        "{} {} could not be converted: {}",
                        operation.method, operation.path, e
                    );
                    self.skipped.push(SkippedOperation {
                        method: operation.method,
                        path: operation.path.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            queries = queries.len(),
            mutations = mutations.len(),
            skipped = self.skipped.len(),
            "assembled schema"
        );

        if queries.is_empty() {
            queries.push(FieldDefinition {
                name: PLACEHOLDER_FIELD.to_string(),
                description: None,
                arguments: vec![],
                ty: TypeRef::named(STRING),
            });
        }
        let query = ObjectType {
            name: QUERY_TYPE.to_string(),
            description: None,
            fields: queries,
        };
        let mutation = (!mutations.is_empty()).then(|| ObjectType {
            name: MUTATION_TYPE.to_string(),
            description: None,
            fields: mutations,
        });

        GraphQlSchema {
            query,
            mutation,
            types: self.converter.into_definitions(),
            skipped: self.skipped,
        }
    }

    fn convert_operation(&mut self, operation: &OperationDescriptor) -> AppResult<FieldDefinition> {
        let op_name = graphql_name(&operation_name(
            operation.operation_id.as_deref(),
            operation.method.as_str(),
            &operation.path,
        ));
        let field_name = self.converter.names_mut().allocate(Some(&op_name));

        match self.build_field(operation, &op_name, field_name.clone()) {
            Ok(field) => Ok(field),
            Err(e) => {
                self.converter.names_mut().release(&field_name)?;
                Err(e)
            }
        }
    }

    fn build_field(
        &mut self,
        operation: &OperationDescriptor,
        op_name: &str,
        field_name: String,
    ) -> AppResult<FieldDefinition> {
        let response_name = format!("{}Response", op_name);
        let ty = self
            .converter
            .convert_output(operation.response, Some(&response_name))?
            .into_inner();

        let mut arguments = Vec::with_capacity(operation.parameters.len() + 1);
        for param in &operation.parameters {
            let name = graphql_name(&param.name);
            if arguments.iter().any(|a: &InputValue| a.name == name) {
                return Err(AppError::General(format!(
                    "duplicate argument '{}' (parameter '{}' in {})",
                    name, param.name, param.location
                )));
            }
            let ty = self
                .converter
                .convert_input(param.schema, Some(&param.name))?
                .into_inner();
            arguments.push(InputValue {
                name,
                description: param.description.clone(),
                ty: if param.required { ty.non_null() } else { ty },
            });
        }

        if let Some(body) = &operation.request_body {
            if arguments.iter().any(|a| a.name == BODY_ARGUMENT) {
                return Err(AppError::General(format!(
                    "parameter named '{}' clashes with the request body argument",
                    BODY_ARGUMENT
                )));
            }
            let input_name = format!("{}Input", op_name);
            let schema = self.converter.resolve(body.schema)?;
            let node = self.converter.arena_mut().get_mut(schema);
            if node.name.is_none() {
                node.name = Some(input_name.clone());
            }
            let ty = self
                .converter
                .convert_input(schema, Some(&input_name))?
                .into_inner();
            arguments.push(InputValue {
                name: BODY_ARGUMENT.to_string(),
                description: body.description.clone(),
                ty: if body.required { ty.non_null() } else { ty },
            });
        }

        Ok(FieldDefinition {
            name: field_name,
            description: operation
                .description
                .clone()
                .or_else(|| operation.summary.clone()),
            arguments,
            ty,
        })
    }
}

/// Converts a parsed document into a GraphQL schema in one fresh run.
pub fn convert_document(parsed: ParsedOpenApi) -> GraphQlSchema {
    SchemaAssembler::new(parsed).assemble()
}
