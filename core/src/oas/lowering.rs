#![deny(missing_docs)]

//! # Schema Lowering
//!
//! Turns raw Schema Objects into `SchemaNode`s of a `SchemaArena`.
//!
//! Every occurrence gets its own id; nested schemas are lowered depth-first.
//! `$ref`s stay symbolic and are followed later by the `ReferenceResolver`.

use crate::schema::{ObjectShape, SchemaArena, SchemaId, SchemaKind, SchemaNode};
use indexmap::IndexMap;
use serde_json::{Map, Value};

const COMPOSITION_KEYWORDS: [&str; 3] = ["oneOf", "anyOf", "allOf"];

/// Lowers one Schema Object (and everything nested in it) into the arena.
pub fn lower_schema(arena: &mut SchemaArena, schema: &Value) -> SchemaId {
    let obj = match schema {
        Value::Object(obj) => obj,
        // `true` accepts anything.
        Value::Bool(true) => return arena.push(SchemaNode::new(opaque())),
        other => {
            return arena.push(SchemaNode::new(SchemaKind::Unsupported(format!(
                "schema '{}'",
                other
            ))))
        }
    };

    let description = obj
        .get("description")
        .and_then(Value::as_str)
        .map(str::to_string);
    let kind = lower_kind(arena, obj);
    arena.push(SchemaNode::new(kind).with_description(description))
}

fn lower_kind(arena: &mut SchemaArena, obj: &Map<String, Value>) -> SchemaKind {
    if let Some(pointer) = obj.get("$ref").and_then(Value::as_str) {
        return SchemaKind::Reference(pointer.to_string());
    }
    if let Some(values) = obj.get("enum").and_then(Value::as_array) {
        return SchemaKind::Enum(values.iter().filter(|v| !v.is_null()).cloned().collect());
    }
    if let Some(keyword) = COMPOSITION_KEYWORDS.iter().find(|k| obj.contains_key(**k)) {
        return SchemaKind::Unsupported(format!("{} composition", keyword));
    }

    let type_tag = match primary_type(obj.get("type")) {
        Ok(tag) => tag,
        Err(kind) => return kind,
    };

    match type_tag.as_deref() {
        Some("array") => match obj.get("items") {
            Some(items) => SchemaKind::Array(lower_schema(arena, items)),
            None => SchemaKind::Unsupported("array without items".to_string()),
        },
        Some("object") | None => lower_object(arena, obj),
        Some(tag) => SchemaKind::Scalar(tag.to_string()),
    }
}

/// Picks the effective `type`. OAS 3.1 allows `[T, "null"]`.
fn primary_type(type_value: Option<&Value>) -> Result<Option<String>, SchemaKind> {
    match type_value {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Array(types)) => {
            let non_null: Vec<&str> = types
                .iter()
                .filter_map(Value::as_str)
                .filter(|t| *t != "null")
                .collect();
            match non_null.as_slice() {
                [] => Ok(Some("null".to_string())),
                [single] => Ok(Some(single.to_string())),
                _ => Err(SchemaKind::Unsupported(format!(
                    "union type [{}]",
                    non_null.join(", ")
                ))),
            }
        }
        Some(other) => Err(SchemaKind::Unsupported(format!("type {}", other))),
    }
}

fn lower_object(arena: &mut SchemaArena, obj: &Map<String, Value>) -> SchemaKind {
    let mut properties = IndexMap::new();
    if let Some(props) = obj.get("properties").and_then(Value::as_object) {
        for (name, schema) in props {
            let id = lower_schema(arena, schema);
            properties.insert(name.clone(), id);
        }
    }
    let required = obj
        .get("required")
        .and_then(Value::as_array)
        .map(|names| {
            names
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    SchemaKind::Object(ObjectShape {
        properties,
        required,
    })
}

fn opaque() -> SchemaKind {
    SchemaKind::Object(ObjectShape::default())
}
