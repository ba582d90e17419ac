//! Schema composer
//!
//! Assembles the document schemas from the question model:
//! - `compose` builds the questionnaire-document schema over a step tree
//! - `compose_answers` builds the answer-document schema
//!
//! Both are pure functions returning a fresh value on every call, so no
//! caller can mutate a shared canonical schema out from under another.
//! Step, section, question, and grid-column definitions live under `$defs`
//! and are wired together with `$ref` links, never copied inline; a
//! constraint change in one definition propagates everywhere it is
//! referenced. Every composed schema passes `check` before it is returned.

use serde_json::{json, Value};

use crate::model::{
    QuestionKind, Step, MAX_GRID_COLUMNS, MAX_GRID_ROWS, MAX_SELECT_OPTIONS,
};

use super::errors::{ComposeError, ComposeResult};
use crate::model::ModelError;

/// The pattern every answer key must match: `"<section>-<question>"`.
/// Wire-frozen; stored answer documents depend on it.
pub const ANSWER_KEY_PATTERN: &str = r"^\d+\-\d+$";

const JSON_SCHEMA_DIALECT: &str = "https://json-schema.org/draft/2020-12/schema";

/// Composes the questionnaire-document schema for the given step tree,
/// pinning the read-only `schema_version` marker to `version_tag`.
///
/// Fails fast on an invalid constraint combination anywhere in the tree
/// (for example `grid_columns` on a non-grid question); such a tree must
/// never produce a schema.
pub fn compose(steps: &[Step], version_tag: &str) -> ComposeResult<Value> {
    if steps.is_empty() {
        return Err(ComposeError::InvalidModel(ModelError::EmptyQuestionnaire));
    }
    for step in steps {
        step.check_constraints()?;
    }

    let schema = json!({
        "$schema": JSON_SCHEMA_DIALECT,
        "title": "Questionnaire Schema",
        "description": "A questionnaire with steps, sections, and questions.",
        "type": "object",
        "additionalProperties": false,
        "required": ["schema_version", "steps"],
        "properties": {
            "schema_version": {
                "type": "string",
                "title": "Schema version",
                "default": version_tag,
                "readOnly": true,
                "description": "The version of the questionnaire schema.",
            },
            "steps": {
                "title": "Steps",
                "type": "array",
                "items": {"$ref": "#/$defs/step"},
                "minItems": 1,
            },
        },
        "$defs": {
            "step": step_def(),
            "section": section_def(),
            "question": question_def(),
            "grid_column": grid_column_def(),
        },
    });

    check(&schema)?;
    Ok(schema)
}

/// Composes the answer-document schema, pinning the read-only
/// `schema_version` marker to `version_tag`.
///
/// The answers object is the one open spot in an otherwise closed world:
/// keys matching the answer-key pattern carry either a primitive value or
/// a grid answer; everything else is rejected.
pub fn compose_answers(version_tag: &str) -> ComposeResult<Value> {
    // A value under an answer key: a primitive or a grid answer.
    let mut answer_value = primitive_types();
    answer_value.push(json!({"$ref": "#/$defs/grid_answer"}));
    let mut answers_patterns = serde_json::Map::new();
    answers_patterns.insert(
        ANSWER_KEY_PATTERN.to_string(),
        json!({"oneOf": answer_value}),
    );

    let schema = json!({
        "$schema": JSON_SCHEMA_DIALECT,
        "title": "Answer Document Schema",
        "description": "Answers collected against a questionnaire.",
        "type": "object",
        "additionalProperties": false,
        "required": ["schema_version", "active_step", "steps"],
        "properties": {
            "schema_version": {
                "type": "string",
                "title": "Schema version",
                "default": version_tag,
                "readOnly": true,
                "description": "The version of the answer document schema.",
            },
            "active_step": {
                "type": "integer",
                "title": "Active step",
                "minimum": 0,
            },
            "steps": {
                "title": "Step States",
                "type": "array",
                "items": {"$ref": "#/$defs/step_state"},
                "minItems": 1,
            },
        },
        "$defs": {
            "step_state": {
                "type": "object",
                "title": "Step State",
                "additionalProperties": false,
                "required": ["is_valid", "answers"],
                "properties": {
                    "is_valid": {"type": ["boolean", "null"], "default": null},
                    "answers": {"$ref": "#/$defs/answers"},
                },
            },
            "answers": {
                "type": "object",
                "title": "Answers",
                "additionalProperties": false,
                "properties": {},
                "patternProperties": answers_patterns,
            },
            "grid_answer": {
                "type": "array",
                "items": {
                    "type": "object",
                    "additionalProperties": {"oneOf": primitive_types()},
                },
            },
        },
    });

    check(&schema)?;
    Ok(schema)
}

/// The version tag a schema pins its documents to, if the schema carries one
pub fn version_tag(schema: &Value) -> Option<&str> {
    schema
        .get("properties")?
        .get("schema_version")?
        .get("default")?
        .as_str()
}

/// The primitive value types an answer may carry
fn primitive_types() -> Vec<Value> {
    vec![
        json!({"type": "string"}),
        json!({"type": "integer", "minimum": 0}),
        json!({"type": "boolean"}),
        json!({"type": "null"}),
    ]
}

fn kind_names(kinds: &[QuestionKind]) -> Value {
    Value::Array(
        kinds
            .iter()
            .map(|k| Value::String(k.as_str().to_string()))
            .collect(),
    )
}

fn question_def() -> Value {
    json!({
        "type": "object",
        "title": "Question",
        "additionalProperties": false,
        "required": ["label", "type"],
        "properties": {
            "label": {"type": "string", "maxLength": 500},
            "type": {"type": "string", "enum": kind_names(QuestionKind::all())},
            "is_required": {"type": "boolean", "default": false},
            "description": {"type": "string", "maxLength": 1000},
            "select_options": {
                "type": ["array", "null"],
                "items": {"type": "string", "maxLength": 100},
                "minItems": 1,
                "maxItems": MAX_SELECT_OPTIONS,
            },
            "grid_columns": {
                "type": ["array", "null"],
                "items": {"$ref": "#/$defs/grid_column"},
                "minItems": 1,
                "maxItems": MAX_GRID_COLUMNS,
            },
            "grid_max_rows": {
                "type": ["integer", "null"],
                "minimum": 1,
                "maximum": MAX_GRID_ROWS,
            },
        },
    })
}

fn grid_column_def() -> Value {
    json!({
        "type": "object",
        "title": "Grid Column",
        "additionalProperties": false,
        "required": ["label", "type"],
        "properties": {
            "label": {"type": "string", "maxLength": 255},
            "type": {"type": "string", "enum": kind_names(QuestionKind::column_kinds())},
            "description": {"type": "string", "maxLength": 255},
            "select_options": {
                "type": ["array", "null"],
                "items": {"type": "string", "maxLength": 50},
                "minItems": 1,
                "maxItems": MAX_SELECT_OPTIONS,
            },
        },
    })
}

fn section_def() -> Value {
    json!({
        "type": "object",
        "title": "Section",
        "additionalProperties": false,
        "required": ["title", "questions"],
        "properties": {
            "title": {"type": "string", "maxLength": 100},
            "description": {"type": "string", "maxLength": 3000},
            "questions": {
                "type": "array",
                "items": {"$ref": "#/$defs/question"},
                "minItems": 1,
            },
        },
    })
}

fn step_def() -> Value {
    json!({
        "type": "object",
        "title": "Step",
        "additionalProperties": false,
        "required": ["title", "sections"],
        "properties": {
            "title": {"type": "string", "maxLength": 100},
            "description": {"type": "string", "maxLength": 100},
            "sections": {
                "type": "array",
                "items": {"$ref": "#/$defs/section"},
                "minItems": 1,
            },
        },
    })
}

const KNOWN_TYPES: &[&str] = &[
    "object", "array", "string", "integer", "number", "boolean", "null",
];

/// Verifies a composed schema is internally coherent:
/// - every `$ref` resolves to a `$defs` entry
/// - every `required` name is a declared property
/// - every `patternProperties` key compiles
/// - every `type` names a known JSON type
///
/// Run once at startup by callers that load or compose schemas; a failure
/// is a fatal defect in the schema definition, not a request error.
pub fn check(schema: &Value) -> ComposeResult<()> {
    let defs = schema.get("$defs").and_then(Value::as_object);
    check_node(schema, "#", &defs)
}

fn check_node(
    node: &Value,
    location: &str,
    defs: &Option<&serde_json::Map<String, Value>>,
) -> ComposeResult<()> {
    let obj = match node.as_object() {
        Some(obj) => obj,
        None => return Ok(()),
    };

    if let Some(reference) = obj.get("$ref") {
        let target = reference
            .as_str()
            .ok_or_else(|| ComposeError::malformed(location, "$ref must be a string"))?;
        let name = target.strip_prefix("#/$defs/").ok_or_else(|| {
            ComposeError::malformed(location, format!("unsupported $ref '{}'", target))
        })?;
        if !defs.map_or(false, |d| d.contains_key(name)) {
            return Err(ComposeError::malformed(
                location,
                format!("unresolved $ref '{}'", target),
            ));
        }
    }

    if let Some(types) = obj.get("type") {
        let names: Vec<&str> = match types {
            Value::String(s) => vec![s.as_str()],
            Value::Array(entries) => entries.iter().filter_map(Value::as_str).collect(),
            _ => {
                return Err(ComposeError::malformed(
                    location,
                    "type must be a string or an array of strings",
                ))
            }
        };
        for name in names {
            if !KNOWN_TYPES.contains(&name) {
                return Err(ComposeError::malformed(
                    location,
                    format!("unknown type '{}'", name),
                ));
            }
        }
    }

    if let (Some(required), Some(properties)) = (
        obj.get("required").and_then(Value::as_array),
        obj.get("properties").and_then(Value::as_object),
    ) {
        // Pattern-keyed objects declare their open keys elsewhere; a name in
        // `required` must still be an explicitly declared property.
        for name in required.iter().filter_map(Value::as_str) {
            if !properties.contains_key(name) {
                return Err(ComposeError::malformed(
                    location,
                    format!("required property '{}' is not declared", name),
                ));
            }
        }
    }

    if let Some(patterns) = obj.get("patternProperties").and_then(Value::as_object) {
        for (pattern, subschema) in patterns {
            regex::Regex::new(pattern).map_err(|e| {
                ComposeError::malformed(location, format!("bad pattern '{}': {}", pattern, e))
            })?;
            check_node(subschema, &format!("{}/patternProperties", location), defs)?;
        }
    }

    for key in ["properties", "$defs"] {
        if let Some(children) = obj.get(key).and_then(Value::as_object) {
            for (name, child) in children {
                check_node(child, &format!("{}/{}/{}", location, key, name), defs)?;
            }
        }
    }

    if let Some(items) = obj.get("items") {
        check_node(items, &format!("{}/items", location), defs)?;
    }
    if let Some(additional) = obj.get("additionalProperties") {
        if additional.is_object() {
            check_node(additional, &format!("{}/additionalProperties", location), defs)?;
        }
    }
    if let Some(one_of) = obj.get("oneOf").and_then(Value::as_array) {
        for (i, child) in one_of.iter().enumerate() {
            check_node(child, &format!("{}/oneOf/{}", location, i), defs)?;
        }
    }

    Ok(())
}
