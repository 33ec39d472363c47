//! Conversion of located fragments into `serde_json::Value` trees.
use serde_json::{Map, Number, Value};

use crate::{scanner::Fragment, JsonEntity, JsonKind, JsonStoreError, JsonStoreResult};

/// How far containers are converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Depth {
    /// Scalars are converted, containers stay as their raw text.
    Simple,
    /// Containers are converted recursively.
    Nested,
}

/// Result of resolving without a depth: containers stay lazy.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved<'a> {
    Value(Value),
    Object(JsonEntity<'a>),
    Array(Vec<JsonEntity<'a>>),
}

/// Containers nested deeper than this are refused, as `serde_json` does.
pub const RECURSION_LIMIT: usize = 128;

pub fn resolve(fragment: Fragment<'_>, depth: Depth) -> JsonStoreResult<Value> {
    resolve_within(fragment, depth, RECURSION_LIMIT)
}

fn resolve_within(
    fragment: Fragment<'_>,
    depth: Depth,
    remaining: usize,
) -> JsonStoreResult<Value> {
    if fragment.kind.is_container() {
        if depth == Depth::Simple {
            return Ok(Value::String(fragment.text.to_string()));
        }
        let remaining = remaining
            .checked_sub(1)
            .ok_or(JsonStoreError::RecursionLimit(RECURSION_LIMIT))?;
        let entity = JsonEntity::from(fragment);
        return if fragment.kind == JsonKind::Object {
            let entries = entity.entries("").ok_or_else(|| malformed(fragment))?;
            let mut object = Map::with_capacity(entries.len());
            for (key, child) in entries {
                object.insert(
                    key.to_string(),
                    resolve_within(child.fragment(), depth, remaining)?,
                );
            }
            Ok(Value::Object(object))
        } else {
            entity
                .as_array("")
                .ok_or_else(|| malformed(fragment))?
                .into_iter()
                .map(|child| resolve_within(child.fragment(), depth, remaining))
                .collect::<JsonStoreResult<Vec<Value>>>()
                .map(Value::Array)
        };
    }

    match fragment.kind {
        JsonKind::Number => parse_number(fragment.text)
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| malformed(fragment)),
        JsonKind::Boolean => parse_bool(fragment.text)
            .map(Value::Bool)
            .ok_or_else(|| malformed(fragment)),
        JsonKind::Null => Ok(Value::Null),
        _ => Ok(Value::String(fragment.text.to_string())),
    }
}

pub fn resolve_lazy(fragment: Fragment<'_>) -> JsonStoreResult<Resolved<'_>> {
    match fragment.kind {
        JsonKind::Object => Ok(Resolved::Object(JsonEntity::from(fragment))),
        JsonKind::Array => JsonEntity::from(fragment)
            .as_array("")
            .map(Resolved::Array)
            .ok_or_else(|| malformed(fragment)),
        _ => resolve(fragment, Depth::Simple).map(Resolved::Value),
    }
}

pub(crate) fn parse_number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

pub(crate) fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn malformed(fragment: Fragment<'_>) -> JsonStoreError {
    JsonStoreError::MalformedLiteral(fragment.text.to_string(), fragment.kind)
}
