//! Structural validator
//!
//! Validates a JSON value against a composed schema, producing the first
//! structural failure encountered with its exact coordinate.
//!
//! Validation semantics:
//! - Objects are closed: undeclared keys fail wherever the schema says
//!   `additionalProperties: false`; keys matching a `patternProperties`
//!   pattern are the one sanctioned opening
//! - Types match exactly, no coercion
//! - The validator never mutates the document or the schema
//! - Validation is deterministic
//!
//! The keyword subset is exactly what the composer emits: `type`,
//! `properties`, `required`, `additionalProperties`, `patternProperties`,
//! `items`, `minItems`/`maxItems`, `minimum`/`maximum`,
//! `minLength`/`maxLength`, `enum`, `oneOf`, and local `$ref`. Annotation
//! keywords are ignored.

use regex::Regex;
use serde_json::{Map, Value};

use super::errors::ValidationFailure;

/// Validates `document` against `schema`.
///
/// Reports the first structural failure encountered; the returned list
/// currently always has length one. Callers must not rely on more than the
/// first entry being present.
pub fn validate(document: &Value, schema: &Value) -> Result<(), Vec<ValidationFailure>> {
    let checker = Checker {
        defs: schema.get("$defs").and_then(Value::as_object),
    };
    checker
        .check(document, schema, "")
        .map_err(|failure| vec![failure])
}

struct Checker<'a> {
    defs: Option<&'a Map<String, Value>>,
}

impl<'a> Checker<'a> {
    /// Follows a local `$ref` to its `$defs` target, if present.
    fn resolve(&self, schema: &'a Value, path: &str) -> Result<&'a Value, ValidationFailure> {
        let Some(reference) = schema.get("$ref").and_then(Value::as_str) else {
            return Ok(schema);
        };
        let target = reference
            .strip_prefix("#/$defs/")
            .and_then(|name| self.defs.and_then(|defs| defs.get(name)));
        match target {
            // Definitions never chain refs at their root, so one hop suffices.
            Some(resolved) => Ok(resolved),
            None => Err(ValidationFailure::new(
                path,
                format!("unresolvable reference {}", reference),
            )),
        }
    }

    fn check(
        &self,
        value: &Value,
        schema: &'a Value,
        path: &str,
    ) -> Result<(), ValidationFailure> {
        let schema = self.resolve(schema, path)?;
        let Some(keywords) = schema.as_object() else {
            return Ok(());
        };

        if let Some(types) = keywords.get("type") {
            self.check_type(value, types, path)?;
        }

        if let Some(allowed) = keywords.get("enum").and_then(Value::as_array) {
            if !allowed.contains(value) {
                return Err(ValidationFailure::new(
                    path,
                    format!("{} is not one of {}", preview(value), Value::Array(allowed.clone())),
                ));
            }
        }

        if let Some(one_of) = keywords.get("oneOf").and_then(Value::as_array) {
            self.check_one_of(value, one_of, path)?;
        }

        match value {
            Value::String(s) => self.check_string(s, keywords, path)?,
            Value::Number(_) => self.check_number(value, keywords, path)?,
            Value::Array(items) => self.check_array(items, keywords, path)?,
            Value::Object(entries) => self.check_object(entries, keywords, path)?,
            _ => {}
        }

        Ok(())
    }

    fn check_type(
        &self,
        value: &Value,
        types: &Value,
        path: &str,
    ) -> Result<(), ValidationFailure> {
        let names: Vec<&str> = match types {
            Value::String(name) => vec![name.as_str()],
            Value::Array(entries) => entries.iter().filter_map(Value::as_str).collect(),
            _ => return Ok(()),
        };
        if names.iter().any(|name| matches_type(value, name)) {
            return Ok(());
        }
        let expected = names
            .iter()
            .map(|name| format!("'{}'", name))
            .collect::<Vec<_>>()
            .join(", ");
        Err(ValidationFailure::new(
            path,
            format!("{} is not of type {}", preview(value), expected),
        ))
    }

    fn check_one_of(
        &self,
        value: &Value,
        subschemas: &'a [Value],
        path: &str,
    ) -> Result<(), ValidationFailure> {
        let mut matched = 0usize;
        for subschema in subschemas {
            if self.accepts(value, subschema, path) {
                matched += 1;
            }
        }
        match matched {
            1 => Ok(()),
            0 => Err(ValidationFailure::new(
                path,
                format!(
                    "{} is not valid under any of the given schemas",
                    preview(value)
                ),
            )),
            _ => Err(ValidationFailure::new(
                path,
                format!(
                    "{} is valid under more than one of the given schemas",
                    preview(value)
                ),
            )),
        }
    }

    /// Whether `value` satisfies `subschema`, discarding the failure detail.
    fn accepts(&self, value: &Value, subschema: &'a Value, path: &str) -> bool {
        self.check(value, subschema, path).is_ok()
    }

    fn check_string(
        &self,
        s: &str,
        keywords: &Map<String, Value>,
        path: &str,
    ) -> Result<(), ValidationFailure> {
        let length = s.chars().count() as u64;
        if let Some(max) = keywords.get("maxLength").and_then(Value::as_u64) {
            if length > max {
                return Err(ValidationFailure::new(path, format!("'{}' is too long", s)));
            }
        }
        if let Some(min) = keywords.get("minLength").and_then(Value::as_u64) {
            if length < min {
                return Err(ValidationFailure::new(path, format!("'{}' is too short", s)));
            }
        }
        Ok(())
    }

    fn check_number(
        &self,
        value: &Value,
        keywords: &Map<String, Value>,
        path: &str,
    ) -> Result<(), ValidationFailure> {
        let Some(number) = value.as_f64() else {
            return Ok(());
        };
        if let Some(min) = keywords.get("minimum").and_then(Value::as_f64) {
            if number < min {
                return Err(ValidationFailure::new(
                    path,
                    format!("{} is less than the minimum of {}", preview(value), min),
                ));
            }
        }
        if let Some(max) = keywords.get("maximum").and_then(Value::as_f64) {
            if number > max {
                return Err(ValidationFailure::new(
                    path,
                    format!("{} is greater than the maximum of {}", preview(value), max),
                ));
            }
        }
        Ok(())
    }

    fn check_array(
        &self,
        items: &[Value],
        keywords: &'a Map<String, Value>,
        path: &str,
    ) -> Result<(), ValidationFailure> {
        if let Some(min) = keywords.get("minItems").and_then(Value::as_u64) {
            if (items.len() as u64) < min {
                return Err(ValidationFailure::new(
                    path,
                    format!("{} is too short", Value::Array(items.to_vec())),
                ));
            }
        }
        if let Some(max) = keywords.get("maxItems").and_then(Value::as_u64) {
            if (items.len() as u64) > max {
                return Err(ValidationFailure::new(
                    path,
                    format!("{} is too long", Value::Array(items.to_vec())),
                ));
            }
        }
        if let Some(item_schema) = keywords.get("items") {
            for (index, item) in items.iter().enumerate() {
                self.check(item, item_schema, &join_path(path, &index.to_string()))?;
            }
        }
        Ok(())
    }

    fn check_object(
        &self,
        entries: &Map<String, Value>,
        keywords: &'a Map<String, Value>,
        path: &str,
    ) -> Result<(), ValidationFailure> {
        let properties = keywords.get("properties").and_then(Value::as_object);
        let patterns = keywords.get("patternProperties").and_then(Value::as_object);
        let additional = keywords.get("additionalProperties");

        if let Some(required) = keywords.get("required").and_then(Value::as_array) {
            for name in required.iter().filter_map(Value::as_str) {
                if !entries.contains_key(name) {
                    return Err(ValidationFailure::new(
                        path,
                        format!("'{}' is a required property", name),
                    ));
                }
            }
        }

        for (key, entry) in entries {
            let entry_path = join_path(path, key);

            if let Some(subschema) = properties.and_then(|p| p.get(key)) {
                self.check(entry, subschema, &entry_path)?;
                continue;
            }

            if let Some(patterns) = patterns {
                let mut matched = false;
                for (pattern, subschema) in patterns {
                    let re = Regex::new(pattern).map_err(|e| {
                        // A non-compiling pattern is a schema defect that the
                        // composer's self-check rejects up front.
                        ValidationFailure::new(path.to_string(), format!("bad pattern '{}': {}", pattern, e))
                    })?;
                    if re.is_match(key) {
                        matched = true;
                        self.check(entry, subschema, &entry_path)?;
                    }
                }
                if matched {
                    continue;
                }
            }

            match additional {
                Some(Value::Bool(false)) => {
                    return Err(ValidationFailure::new(
                        path,
                        format!(
                            "Additional properties are not allowed ('{}' was unexpected)",
                            key
                        ),
                    ));
                }
                Some(subschema) if subschema.is_object() => {
                    self.check(entry, subschema, &entry_path)?;
                }
                _ => {}
            }
        }

        Ok(())
    }
}

/// Dot-joins a path segment onto a coordinate prefix
fn join_path(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", prefix, segment)
    }
}

/// Whether a JSON value satisfies a named schema type
fn matches_type(value: &Value, name: &str) -> bool {
    match name {
        "object" => value.is_object(),
        "array" => value.is_array(),
        "string" => value.is_string(),
        "integer" => value.is_i64() || value.is_u64(),
        "number" => value.is_number(),
        "boolean" => value.is_boolean(),
        "null" => value.is_null(),
        _ => false,
    }
}

/// Short rendering of a value for failure messages
fn preview(value: &Value) -> String {
    let rendered = match value {
        Value::String(s) => format!("'{}'", s),
        other => other.to_string(),
    };
    if rendered.chars().count() > 80 {
        let truncated: String = rendered.chars().take(77).collect();
        format!("{}...", truncated)
    } else {
        rendered
    }
}
