//! The narrow document contract consumed by the mapper.
//!
//! The mapper never walks a document tree itself. It asks an [`Accessor`]
//! whether a path exists, what JSON type sits there, and for a typed scalar.
//! Two implementations ship with the crate:
//!
//! - [`Value`], the crate's own tree (and [`Document`], which owns one)
//! - [`serde_json::Value`], for callers that already hold a `serde_json` tree
//!
//! Both apply the same coercion rules:
//!
//! | Request | Accepted document values |
//! |---------|--------------------------|
//! | string  | strings only |
//! | `i64`   | integers that fit in `i64` |
//! | `u64`   | non-negative integers |
//! | `f64`   | any number |
//! | bool    | `true` / `false` only |
//!
//! The `lookup_*` methods report a miss as `None`. The `get_*` methods return
//! the zero value instead; non-optional target fields rely on that fallback.
//! [`raw_text`](Accessor::raw_text) returns whatever sits at a path as text:
//! strings verbatim, anything else as compact JSON.

use crate::{Error, Kind, Path, Result, Value};
use std::borrow::Cow;
use std::io;
use std::ops::Deref;

/// Path-based, read-only access to a parsed document.
///
/// Only [`kind_of`](Accessor::kind_of) and the `lookup_*` methods are
/// required; everything else has a default built on them.
pub trait Accessor {
    /// Returns the JSON type at `path`, or `None` when the path does not exist.
    fn kind_of(&self, path: &Path) -> Option<Kind>;

    fn lookup_str(&self, path: &Path) -> Option<&str>;

    fn lookup_i64(&self, path: &Path) -> Option<i64>;

    fn lookup_u64(&self, path: &Path) -> Option<u64>;

    fn lookup_f64(&self, path: &Path) -> Option<f64>;

    fn lookup_bool(&self, path: &Path) -> Option<bool>;

    /// Returns the value at `path` as text, or `None` when the path does not exist.
    ///
    /// Strings are borrowed as they are; every other value is rendered as JSON.
    fn raw_text(&self, path: &Path) -> Option<Cow<'_, str>>;

    fn exists(&self, path: &Path) -> bool {
        self.kind_of(path).is_some()
    }

    fn get_str(&self, path: &Path) -> &str {
        self.lookup_str(path).unwrap_or_default()
    }

    fn get_i64(&self, path: &Path) -> i64 {
        self.lookup_i64(path).unwrap_or_default()
    }

    fn get_u64(&self, path: &Path) -> u64 {
        self.lookup_u64(path).unwrap_or_default()
    }

    fn get_f64(&self, path: &Path) -> f64 {
        self.lookup_f64(path).unwrap_or_default()
    }

    fn get_bool(&self, path: &Path) -> bool {
        self.lookup_bool(path).unwrap_or_default()
    }
}

impl Accessor for Value {
    fn kind_of(&self, path: &Path) -> Option<Kind> {
        self.pointer(path).map(Value::kind)
    }

    fn lookup_str(&self, path: &Path) -> Option<&str> {
        self.pointer(path).and_then(Value::as_str)
    }

    fn lookup_i64(&self, path: &Path) -> Option<i64> {
        self.pointer(path).and_then(Value::as_i64)
    }

    fn lookup_u64(&self, path: &Path) -> Option<u64> {
        self.pointer(path).and_then(Value::as_u64)
    }

    fn lookup_f64(&self, path: &Path) -> Option<f64> {
        self.pointer(path).and_then(Value::as_f64)
    }

    fn lookup_bool(&self, path: &Path) -> Option<bool> {
        self.pointer(path).and_then(Value::as_bool)
    }

    fn raw_text(&self, path: &Path) -> Option<Cow<'_, str>> {
        self.pointer(path).map(|value| match value {
            Value::String(s) => Cow::Borrowed(s.as_str()),
            other => Cow::Owned(other.to_string()),
        })
    }
}

fn json_pointer<'a>(root: &'a serde_json::Value, path: &Path) -> Option<&'a serde_json::Value> {
    path.iter().try_fold(root, |node, segment| match node {
        serde_json::Value::Object(map) => map.get(segment),
        serde_json::Value::Array(items) => segment
            .parse::<usize>()
            .ok()
            .and_then(|index| items.get(index)),
        _ => None,
    })
}

fn json_kind(value: &serde_json::Value) -> Kind {
    match value {
        serde_json::Value::Null => Kind::Null,
        serde_json::Value::Bool(_) => Kind::Bool,
        serde_json::Value::Number(_) => Kind::Number,
        serde_json::Value::String(_) => Kind::String,
        serde_json::Value::Array(_) => Kind::Array,
        serde_json::Value::Object(_) => Kind::Object,
    }
}

impl Accessor for serde_json::Value {
    fn kind_of(&self, path: &Path) -> Option<Kind> {
        json_pointer(self, path).map(json_kind)
    }

    fn lookup_str(&self, path: &Path) -> Option<&str> {
        json_pointer(self, path).and_then(serde_json::Value::as_str)
    }

    fn lookup_i64(&self, path: &Path) -> Option<i64> {
        json_pointer(self, path).and_then(serde_json::Value::as_i64)
    }

    fn lookup_u64(&self, path: &Path) -> Option<u64> {
        json_pointer(self, path).and_then(serde_json::Value::as_u64)
    }

    fn lookup_f64(&self, path: &Path) -> Option<f64> {
        json_pointer(self, path).and_then(serde_json::Value::as_f64)
    }

    fn lookup_bool(&self, path: &Path) -> Option<bool> {
        json_pointer(self, path).and_then(serde_json::Value::as_bool)
    }

    fn raw_text(&self, path: &Path) -> Option<Cow<'_, str>> {
        json_pointer(self, path).map(|value| match value {
            serde_json::Value::String(s) => Cow::Borrowed(s.as_str()),
            other => Cow::Owned(other.to_string()),
        })
    }
}

/// An owned, parsed document.
///
/// # Examples
///
/// ```rust
/// use tagmap::{Accessor, Document, Path};
///
/// let doc = Document::parse(br#"{"profile": {"age": 41}}"#).unwrap();
/// assert_eq!(doc.get_i64(&Path::split("profile.age")), 41);
/// assert!(!doc.exists(&Path::split("profile.name")));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    root: Value,
}

impl Document {
    /// Parses raw bytes into a document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] with line and column when the bytes are not valid JSON.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let root = serde_json::from_slice(bytes)?;
        Ok(Document { root })
    }

    /// Parses JSON text into a document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] when the text is not valid JSON.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> Result<Self> {
        Self::parse(text.as_bytes())
    }

    /// Reads and parses a document from an I/O stream.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when reading fails and [`Error::Parse`] for invalid JSON.
    pub fn from_reader<R: io::Read>(mut reader: R) -> Result<Self> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|e| Error::io(&e.to_string()))?;
        Self::parse(&bytes)
    }

    #[must_use]
    pub fn root(&self) -> &Value {
        &self.root
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        self.root
    }
}

impl From<Value> for Document {
    fn from(root: Value) -> Self {
        Document { root }
    }
}

impl Deref for Document {
    type Target = Value;

    fn deref(&self) -> &Value {
        &self.root
    }
}

impl Accessor for Document {
    fn kind_of(&self, path: &Path) -> Option<Kind> {
        self.root.kind_of(path)
    }

    fn lookup_str(&self, path: &Path) -> Option<&str> {
        self.root.lookup_str(path)
    }

    fn lookup_i64(&self, path: &Path) -> Option<i64> {
        self.root.lookup_i64(path)
    }

    fn lookup_u64(&self, path: &Path) -> Option<u64> {
        self.root.lookup_u64(path)
    }

    fn lookup_f64(&self, path: &Path) -> Option<f64> {
        self.root.lookup_f64(path)
    }

    fn lookup_bool(&self, path: &Path) -> Option<bool> {
        self.root.lookup_bool(path)
    }

    fn raw_text(&self, path: &Path) -> Option<Cow<'_, str>> {
        self.root.raw_text(path)
    }
}

/// Input accepted by [`map`](crate::map): an already-parsed document or raw JSON.
#[derive(Clone, Copy)]
pub enum Source<'a> {
    Document(&'a dyn Accessor),
    Bytes(&'a [u8]),
}

impl<'a> From<&'a Value> for Source<'a> {
    fn from(value: &'a Value) -> Self {
        Source::Document(value)
    }
}

impl<'a> From<&'a Document> for Source<'a> {
    fn from(doc: &'a Document) -> Self {
        Source::Document(doc)
    }
}

impl<'a> From<&'a serde_json::Value> for Source<'a> {
    fn from(value: &'a serde_json::Value) -> Self {
        Source::Document(value)
    }
}

impl<'a> From<&'a dyn Accessor> for Source<'a> {
    fn from(accessor: &'a dyn Accessor) -> Self {
        Source::Document(accessor)
    }
}

impl<'a> From<&'a [u8]> for Source<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Source::Bytes(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Source<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Source::Bytes(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for Source<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Source::Bytes(bytes)
    }
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(text: &'a str) -> Self {
        Source::Bytes(text.as_bytes())
    }
}

impl<'a> From<&'a String> for Source<'a> {
    fn from(text: &'a String) -> Self {
        Source::Bytes(text.as_bytes())
    }
}
