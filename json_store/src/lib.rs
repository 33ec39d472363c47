//! Lazy, path-addressed reads over raw JSON text.
//!
//! ```
//! use json_store::JsonEntity;
//!
//! let doc = JsonEntity::new(r#"{"a":{"b":[1,2,3]}}"#);
//! assert_eq!(Some(2.0), doc.as_number("a.b.1"));
//! assert_eq!(3, doc.as_array("a.b").map(|a| a.len()).unwrap_or(0));
//! ```
mod entity;
mod errors;
mod kind;
pub mod resolver;
pub mod scanner;

pub use entity::JsonEntity;
pub use errors::*;
pub use kind::JsonKind;
pub use resolver::{Depth, Resolved};

pub trait JsonPathLookup {
    /// The value at `path`, whatever its kind.
    fn lookup(&self, path: &str) -> Option<JsonEntity<'_>>;
}

impl JsonPathLookup for str {
    fn lookup(&self, path: &str) -> Option<JsonEntity<'_>> {
        JsonEntity::new(self).capture(path)
    }
}
