//! # SDL Printer
//!
//! Lowers a `GraphQlSchema` into `graphql-parser`'s schema AST and prints it
//! with the AST's `Display` implementation.

use crate::graphql::schema::GraphQlSchema;
use crate::graphql::types::{
    EnumType, FieldDefinition, InputObjectType, InputValue, ObjectType, ScalarType,
    TypeDefinition, TypeRef,
};
use graphql_parser::schema as ast;
use graphql_parser::Pos;

/// Schema document with owned strings.
pub type Document = ast::Document<'static, String>;

const POS: Pos = Pos { line: 1, column: 1 };

/// Builds the AST document: root types first, then named types in creation order.
pub fn to_document(schema: &GraphQlSchema) -> Document {
    let mut definitions = vec![object_definition(&schema.query)];
    if let Some(mutation) = &schema.mutation {
        definitions.push(object_definition(mutation));
    }
    definitions.extend(schema.types.iter().map(type_definition));

    Document { definitions }
}

/// Prints the schema as SDL.
pub fn print_schema(schema: &GraphQlSchema) -> String {
    to_document(schema).to_string()
}

fn object_definition(object: &ObjectType) -> ast::Definition<'static, String> {
    ast::Definition::TypeDefinition(ast::TypeDefinition::Object(object_type(object)))
}

fn type_definition(definition: &TypeDefinition) -> ast::Definition<'static, String> {
    let def = match definition {
        TypeDefinition::Object(t) => ast::TypeDefinition::Object(object_type(t)),
        TypeDefinition::InputObject(t) => ast::TypeDefinition::InputObject(input_object_type(t)),
        TypeDefinition::Enum(t) => ast::TypeDefinition::Enum(enum_type(t)),
        TypeDefinition::Scalar(t) => ast::TypeDefinition::Scalar(scalar_type(t)),
    };
    ast::Definition::TypeDefinition(def)
}

fn object_type(object: &ObjectType) -> ast::ObjectType<'static, String> {
    ast::ObjectType {
        position: POS,
        description: object.description.clone(),
        name: object.name.clone(),
        implements_interfaces: vec![],
        directives: vec![],
        fields: object.fields.iter().map(field).collect(),
    }
}

fn field(field: &FieldDefinition) -> ast::Field<'static, String> {
    ast::Field {
        position: POS,
        description: field.description.clone(),
        name: field.name.clone(),
        arguments: field.arguments.iter().map(input_value).collect(),
        field_type: type_ref(&field.ty),
        directives: vec![],
    }
}

fn input_object_type(input: &InputObjectType) -> ast::InputObjectType<'static, String> {
    ast::InputObjectType {
        position: POS,
        description: input.description.clone(),
        name: input.name.clone(),
        directives: vec![],
        fields: input.fields.iter().map(input_value).collect(),
    }
}

fn input_value(value: &InputValue) -> ast::InputValue<'static, String> {
    ast::InputValue {
        position: POS,
        description: value.description.clone(),
        name: value.name.clone(),
        value_type: type_ref(&value.ty),
        default_value: None,
        directives: vec![],
    }
}

fn enum_type(enum_type: &EnumType) -> ast::EnumType<'static, String> {
    ast::EnumType {
        position: POS,
        description: enum_type.description.clone(),
        name: enum_type.name.clone(),
        directives: vec![],
        values: enum_type
            .values
            .iter()
            .map(|v| ast::EnumValue {
                position: POS,
                description: None,
                name: v.name.clone(),
                directives: vec![],
            })
            .collect(),
    }
}

fn scalar_type(scalar: &ScalarType) -> ast::ScalarType<'static, String> {
    ast::ScalarType {
        position: POS,
        description: scalar.description.clone(),
        name: scalar.name.clone(),
        directives: vec![],
    }
}

fn type_ref(ty: &TypeRef) -> ast::Type<'static, String> {
    match ty {
        TypeRef::Named(name) => ast::Type::NamedType(name.clone()),
        TypeRef::List(inner) => ast::Type::ListType(Box::new(type_ref(inner))),
        TypeRef::NonNull(inner) => ast::Type::NonNullType(Box::new(type_ref(inner))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::types::EnumValue;

    fn sample() -> GraphQlSchema {
        let pet = ObjectType {
            name: "Pet".into(),
            description: Some("A pet".into()),
            fields: vec![FieldDefinition {
                name: "tags".into(),
                description: None,
                arguments: vec![],
                ty: TypeRef::list(TypeRef::named("String")).non_null(),
            }],
        };
        let status = EnumType {
            name: "Status".into(),
            description: None,
            values: vec![EnumValue {
                name: "available".into(),
                value: "available".into(),
            }],
        };
        GraphQlSchema {
            query: ObjectType {
                name: "Query".into(),
                description: None,
                fields: vec![FieldDefinition {
                    name: "getPet".into(),
                    description: None,
                    arguments: vec![InputValue {
                        name: "status".into(),
                        description: None,
                        ty: TypeRef::named("Status"),
                    }],
                    ty: TypeRef::named("Pet"),
                }],
            },
            mutation: None,
            types: vec![TypeDefinition::Object(pet), TypeDefinition::Enum(status)],
            skipped: vec![],
        }
    }

    #[test]
    fn test_print_contains_definitions() {
        let sdl = print_schema(&sample());
        assert!(sdl.contains("type Query {"));
        assert!(sdl.contains("getPet(status: Status): Pet"));
        assert!(sdl.contains("tags: [String]!"));
        assert!(sdl.contains("enum Status {"));
        assert!(!sdl.contains("type Mutation"));
    }

    #[test]
    fn test_printed_schema_parses_back() {
        let sdl = print_schema(&sample());
        let reparsed = graphql_parser::parse_schema::<String>(&sdl).unwrap();
        assert_eq!(reparsed.definitions.len(), 3);
    }

    #[test]
    fn test_root_types_come_first() {
        let doc = to_document(&sample());
        match &doc.definitions[0] {
            ast::Definition::TypeDefinition(ast::TypeDefinition::Object(o)) => {
                assert_eq!(o.name, "Query")
            }
            _ => panic!("Query must be printed first"),
        }
    }
}
