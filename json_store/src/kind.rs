use std::fmt::Display;

use crate::scanner::constants::{MINUS, OPEN_BRACE, OPEN_SQUARE_BRACKET};

/// The category of a JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonKind {
    String,
    Number,
    Boolean,
    Object,
    Array,
    Null,
}

impl JsonKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            JsonKind::String => "string",
            JsonKind::Number => "number",
            JsonKind::Boolean => "boolean",
            JsonKind::Object => "object",
            JsonKind::Array => "array",
            JsonKind::Null => "null",
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, JsonKind::Object | JsonKind::Array)
    }

    /// Kind of a whole document, judged by its first character only.
    ///
    /// Anything that does not open a container is reported as a string,
    /// including documents such as `true` or `42`.
    pub fn of_document(document: &str) -> JsonKind {
        match document.chars().next() {
            Some(OPEN_BRACE) => JsonKind::Object,
            Some(OPEN_SQUARE_BRACKET) => JsonKind::Array,
            _ => JsonKind::String,
        }
    }

    /// Presumed kind of an unquoted literal starting with `c`.
    pub fn of_scalar(c: char) -> Option<JsonKind> {
        match c {
            c if c.is_ascii_digit() || c == MINUS => Some(JsonKind::Number),
            't' | 'f' => Some(JsonKind::Boolean),
            'n' => Some(JsonKind::Null),
            _ => None,
        }
    }
}

impl Display for JsonKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod test {
    use super::JsonKind;

    #[test]
    fn document_kind_only_looks_at_first_char() {
        assert_eq!(JsonKind::Object, JsonKind::of_document("{\"a\":1}"));
        assert_eq!(JsonKind::Array, JsonKind::of_document("[1]"));
        assert_eq!(JsonKind::String, JsonKind::of_document("true"));
        assert_eq!(JsonKind::String, JsonKind::of_document("12.5"));
        assert_eq!(JsonKind::String, JsonKind::of_document(" {}"));
        assert_eq!(JsonKind::String, JsonKind::of_document(""));
    }

    #[test]
    fn scalar_kind_from_leading_char() {
        assert_eq!(Some(JsonKind::Number), JsonKind::of_scalar('-'));
        assert_eq!(Some(JsonKind::Number), JsonKind::of_scalar('7'));
        assert_eq!(Some(JsonKind::Boolean), JsonKind::of_scalar('f'));
        assert_eq!(Some(JsonKind::Null), JsonKind::of_scalar('n'));
        assert_eq!(None, JsonKind::of_scalar('x'));
    }
}
