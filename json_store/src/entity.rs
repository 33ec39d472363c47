use serde_json::Value;

use crate::{
    resolver::{self, Depth, Resolved},
    scanner::{decode, Decoded, Fragment, Path},
    JsonKind, JsonStoreResult,
};

/// A handle on one JSON value inside a raw document.
///
/// The entity only keeps the text of its value and a kind tag; nothing is
/// parsed until an accessor asks for it. Every accessor takes a dot path
/// (`"a.b.2.c"`) relative to this entity, the empty path meaning the
/// entity itself. Lookups that do not resolve, or resolve to a value of
/// another kind, return `None`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JsonEntity<'a> {
    text: &'a str,
    kind: JsonKind,
}

impl<'a> JsonEntity<'a> {
    /// Wraps a whole document. Its kind is guessed from the first character:
    /// `{` is an object, `[` an array, anything else a string. Use
    /// [`JsonEntity::coerce_number`] and [`JsonEntity::coerce_bool`] to read
    /// documents that are a single number or boolean.
    pub fn new(document: &'a str) -> Self {
        JsonEntity {
            text: document,
            kind: JsonKind::of_document(document),
        }
    }

    pub fn from_parts(text: &'a str, kind: JsonKind) -> Self {
        JsonEntity { text, kind }
    }

    pub fn kind(&self) -> JsonKind {
        self.kind
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub(crate) fn fragment(&self) -> Fragment<'a> {
        Fragment {
            text: self.text,
            kind: self.kind,
        }
    }

    fn locate(&self, path: &str) -> Option<Fragment<'a>> {
        let path = Path::parse(path);
        if path.is_empty() {
            return Some(self.fragment());
        }
        match decode(self.text, &path)? {
            Decoded::Value(fragment) => Some(fragment),
            _ => None,
        }
    }

    fn locate_kind(&self, path: &str, kind: JsonKind) -> Option<Fragment<'a>> {
        self.locate(path).filter(|f| f.kind == kind)
    }

    fn harvest(&self, path: &str, kind: JsonKind) -> Option<Decoded<'a>> {
        let path = Path::harvest(path);
        if path.segments().is_empty() && self.kind != kind {
            return None;
        }
        decode(self.text, &path)
    }

    pub fn as_str(&self, path: &str) -> Option<&'a str> {
        self.locate_kind(path, JsonKind::String).map(|f| f.text)
    }

    pub fn as_number(&self, path: &str) -> Option<f64> {
        self.locate_kind(path, JsonKind::Number)
            .and_then(|f| resolver::parse_number(f.text))
    }

    /// Like [`JsonEntity::as_number`] but ignores the kind tag and tries to
    /// parse whatever text is found.
    pub fn coerce_number(&self, path: &str) -> Option<f64> {
        self.locate(path).and_then(|f| resolver::parse_number(f.text))
    }

    pub fn as_bool(&self, path: &str) -> Option<bool> {
        self.locate_kind(path, JsonKind::Boolean)
            .and_then(|f| resolver::parse_bool(f.text))
    }

    /// Like [`JsonEntity::as_bool`] but ignores the kind tag.
    pub fn coerce_bool(&self, path: &str) -> Option<bool> {
        self.locate(path).and_then(|f| resolver::parse_bool(f.text))
    }

    /// `Some(true)` for a null value, `None` when nothing is at `path`.
    pub fn is_null(&self, path: &str) -> Option<bool> {
        self.locate(path).map(|f| f.kind == JsonKind::Null)
    }

    /// The object at `path`. The kind check applies to the empty path too,
    /// so an array document gives `None` for `as_object("")`.
    pub fn as_object(&self, path: &str) -> Option<JsonEntity<'a>> {
        self.locate_kind(path, JsonKind::Object).map(JsonEntity::from)
    }

    /// Every element of the array at `path`, collected in a single pass.
    pub fn as_array(&self, path: &str) -> Option<Vec<JsonEntity<'a>>> {
        match self.harvest(path, JsonKind::Array)? {
            Decoded::Elements(items) => Some(items.into_iter().map(JsonEntity::from).collect()),
            _ => None,
        }
    }

    /// Every member of the object at `path` in document order, collected in
    /// a single pass.
    pub fn entries(&self, path: &str) -> Option<Vec<(&'a str, JsonEntity<'a>)>> {
        match self.harvest(path, JsonKind::Object)? {
            Decoded::Entries(items) => Some(
                items
                    .into_iter()
                    .map(|(key, f)| (key, JsonEntity::from(f)))
                    .collect(),
            ),
            _ => None,
        }
    }

    pub fn exists(&self, path: &str) -> bool {
        self.locate(path).is_some()
    }

    /// The fully converted value at `path` and its kind.
    pub fn value(&self, path: &str) -> Option<(Value, JsonKind)> {
        self.try_value(path).unwrap_or_else(|e| {
            log::warn!("can not resolve '{}': {}", path, e);
            None
        })
    }

    pub fn try_value(&self, path: &str) -> JsonStoreResult<Option<(Value, JsonKind)>> {
        match self.locate(path) {
            Some(f) => Ok(Some((resolver::resolve(f, Depth::Nested)?, f.kind))),
            None => Ok(None),
        }
    }

    /// The value at `path` with containers left as live entities.
    pub fn resolve(&self, path: &str) -> Option<(Resolved<'a>, JsonKind)> {
        let fragment = self.locate(path)?;
        match resolver::resolve_lazy(fragment) {
            Ok(resolved) => Some((resolved, fragment.kind)),
            Err(e) => {
                log::warn!("can not resolve '{}': {}", path, e);
                None
            }
        }
    }

    /// The raw text at `path`. Strings come without their quotes.
    pub fn dump(&self, path: &str) -> Option<&'a str> {
        self.locate(path).map(|f| f.text)
    }

    pub fn serialize(&self, path: &str, depth: Depth) -> Option<Value> {
        self.try_serialize(path, depth).unwrap_or_else(|e| {
            log::warn!("can not serialize '{}': {}", path, e);
            None
        })
    }

    pub fn try_serialize(&self, path: &str, depth: Depth) -> JsonStoreResult<Option<Value>> {
        self.locate(path)
            .map(|f| resolver::resolve(f, depth))
            .transpose()
    }

    /// The value at `path` whatever its kind.
    pub fn capture(&self, path: &str) -> Option<JsonEntity<'a>> {
        self.locate(path).map(JsonEntity::from)
    }
}

impl<'a> From<Fragment<'a>> for JsonEntity<'a> {
    fn from(fragment: Fragment<'a>) -> Self {
        JsonEntity::from_parts(fragment.text, fragment.kind)
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::JsonEntity;
    use crate::{Depth, JsonKind, Resolved};

    #[test]
    fn typed_accessors_check_the_kind() {
        let doc = JsonEntity::new(r#"{"a":{"b":1,"s":"text","t":true,"n":null}}"#);
        assert_eq!(Some(1.0), doc.as_number("a.b"));
        assert_eq!(None, doc.as_str("a.b"));
        assert_eq!(Some("text"), doc.as_str("a.s"));
        assert_eq!(None, doc.as_number("a.s"));
        assert_eq!(Some(true), doc.as_bool("a.t"));
        assert_eq!(None, doc.as_bool("a.b"));
        assert_eq!(None, doc.as_object("a.b"));
        assert_eq!(JsonKind::Object, doc.as_object("a").map(|o| o.kind()).unwrap());
    }

    #[test]
    fn as_object_checks_the_kind_of_the_entity_itself() {
        let object = JsonEntity::new(r#"{"k":1}"#);
        assert_eq!(Some(object), object.as_object(""));
        assert_eq!(None, JsonEntity::new("[1]").as_object(""));
        assert_eq!(None, JsonEntity::new("12").as_object(""));
    }

    #[test]
    fn coercion_ignores_the_kind_tag() {
        let doc = JsonEntity::new(r#"{"a":{"b":1}}"#);
        assert_eq!(Some(1.0), doc.coerce_number("a.b"));
        assert_eq!(None, doc.coerce_bool("a.b"));
    }

    #[test]
    fn scalar_documents_are_tagged_as_strings() {
        let doc = JsonEntity::new("true");
        assert_eq!(JsonKind::String, doc.kind());
        assert_eq!(None, doc.as_bool(""));
        assert_eq!(Some(true), doc.coerce_bool(""));
        assert_eq!(Some("true"), doc.as_str(""));

        let doc = JsonEntity::new("-3.25");
        assert_eq!(None, doc.as_number(""));
        assert_eq!(Some(-3.25), doc.coerce_number(""));
    }

    #[test]
    fn null_is_distinct_from_missing() {
        let doc = JsonEntity::new(r#"{"n":null,"v":0}"#);
        assert_eq!(Some(true), doc.is_null("n"));
        assert_eq!(Some(false), doc.is_null("v"));
        assert_eq!(None, doc.is_null("missing"));
        assert!(doc.exists("n"));
        assert!(!doc.exists("missing"));
        assert!(doc.exists(""));
    }

    #[test]
    fn arrays_and_entries_need_the_right_container() {
        let doc = JsonEntity::new(r#"{"arr":[1,2],"obj":{"k":"v"},"num":3}"#);
        assert_eq!(2, doc.as_array("arr").unwrap().len());
        assert_eq!(None, doc.as_array("obj"));
        assert_eq!(None, doc.as_array("num"));
        assert_eq!(None, doc.as_array(""));
        assert_eq!(None, doc.entries("arr"));
        assert_eq!(None, doc.entries("num"));
        let keys: Vec<&str> = doc.entries("").unwrap().into_iter().map(|(k, _)| k).collect();
        assert_eq!(vec!["arr", "obj", "num"], keys);
        assert_eq!(None, JsonEntity::new("[]").entries(""));
        assert_eq!(Some(vec![]), JsonEntity::new("[]").as_array(""));
    }

    #[test]
    fn children_can_be_navigated_further() {
        let doc = JsonEntity::new(r#"{"a":[{"x":[10,20]},{"x":[30]}]}"#);
        let items = doc.as_array("a").unwrap();
        assert_eq!(Some(20.0), items[0].as_number("x.1"));
        assert_eq!(Some(30.0), items[1].as_number("x.0"));
        let x = doc.capture("a.0").unwrap().as_array("x").unwrap();
        assert_eq!(Some(10.0), x[0].as_number(""));
    }

    #[test]
    fn dump_keeps_raw_text() {
        let doc = JsonEntity::new(r#"{"a":{"b": [1, 2]},"s":"x\"y"}"#);
        assert_eq!(Some(r#"{"b": [1, 2]}"#), doc.dump("a"));
        assert_eq!(Some(r#"x\"y"#), doc.dump("s"));
        assert_eq!(Some(doc.text()), doc.dump(""));
        assert_eq!(None, doc.dump("a.c"));
    }

    #[test]
    fn value_resolves_fully() {
        let doc = JsonEntity::new(r#"{"a":{"b":[1,"two",null]},"c":false}"#);
        assert_eq!(
            Some((json!({"b": [1.0, "two", null]}), JsonKind::Object)),
            doc.value("a")
        );
        assert_eq!(Some((json!(false), JsonKind::Boolean)), doc.value("c"));
        assert_eq!(None, doc.value("d"));
    }

    #[test]
    fn malformed_numbers_are_recoverable() {
        let doc = JsonEntity::new(r#"{"a":1.2.3,"b":[-]}"#);
        assert_eq!(None, doc.as_number("a"));
        assert_eq!(None, doc.value("a"));
        assert!(doc.try_value("a").is_err());
        assert!(doc.try_serialize("b", Depth::Nested).is_err());
        assert_eq!(Some(json!("[-]")), doc.serialize("b", Depth::Simple));
    }

    #[test]
    fn resolve_keeps_containers_lazy() {
        let doc = JsonEntity::new(r#"{"o":{"k":1},"a":[true]}"#);
        match doc.resolve("o") {
            Some((Resolved::Object(o), JsonKind::Object)) => assert_eq!(Some(1.0), o.as_number("k")),
            other => panic!("unexpected {:?}", other),
        }
        match doc.resolve("a") {
            Some((Resolved::Array(items), JsonKind::Array)) => {
                assert_eq!(Some(true), items[0].as_bool(""))
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
