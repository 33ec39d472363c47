use std::{error::Error, fmt::Display};

use crate::JsonKind;

pub type JsonStoreResult<T> = Result<T, JsonStoreError>;

#[derive(Debug, PartialEq)]
pub enum JsonStoreError {
    /// A span tagged with `JsonKind` whose text can not be converted.
    MalformedLiteral(String, JsonKind),
    /// Containers nested deeper than the given limit.
    RecursionLimit(usize),
    NotFound(String),
    Io(String),
}

impl Error for JsonStoreError {}

impl Display for JsonStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JsonStoreError::MalformedLiteral(text, kind) => {
                f.write_fmt(format_args!("Malformed {} literal: {}", kind, text))
            }
            JsonStoreError::RecursionLimit(limit) => {
                f.write_fmt(format_args!("Nesting exceeds the limit of {} levels", limit))
            }
            JsonStoreError::NotFound(path) => {
                f.write_fmt(format_args!("No value found at path '{}'", path))
            }
            JsonStoreError::Io(e) => f.write_fmt(format_args!("Failed to read input: {}", e)),
        }
    }
}

impl From<std::io::Error> for JsonStoreError {
    fn from(value: std::io::Error) -> Self {
        JsonStoreError::Io(value.to_string())
    }
}
