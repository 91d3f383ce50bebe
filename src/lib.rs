//! # tagmap
//!
//! Populate plain Rust structs from JSON documents by annotating each field
//! with a dotted path into the document.
//!
//! ## What does it do?
//!
//! Many JSON payloads do not line up with the shape of the structs that
//! consume them: the interesting values sit a few levels deep, or move
//! between API versions. `tagmap` lets each field say where its value lives
//! (`"profile.address.city"`), optionally with alternate paths per
//! *namespace* (`v2 = "user.city"`). One mapping call walks the struct, reads
//! every annotated path and writes what it finds.
//!
//! ## Key Features
//!
//! - **Dotted paths**: `a.b.c` descends objects; numeric segments index arrays
//! - **Namespaces**: alternate annotation families selected per call, optionally
//!   propagated into nested structs
//! - **Best-effort mapping**: missing paths leave fields untouched, `null` leaves
//!   `Option` fields unset, and per-field failures are collected in a [`Report`]
//!   instead of aborting the call
//! - **Tolerant timestamps**: five common date layouts are detected from the
//!   shape of the text and interpreted in a caller-chosen time zone
//! - **No unsafe code**
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! tagmap = "0.1"
//! ```
//!
//! ### Declaring and mapping a struct
//!
//! ```rust
//! use tagmap::{from_str, tagmap, MapOptions, Timestamp};
//!
//! tagmap! {
//!     #[derive(Debug, Default)]
//!     pub struct Address {
//!         pub city: String => "city",
//!     }
//! }
//!
//! tagmap! {
//!     #[derive(Debug, Default)]
//!     pub struct User {
//!         pub id: u64 => "id",
//!         pub name: String => ("profile.name", v2 = "user.full_name"),
//!         pub nickname: Option<String> => "profile.nick",
//!         pub created: Timestamp => "profile.created",
//!         pub address: Address => "profile.address",
//!     }
//! }
//!
//! let json = r#"{
//!     "id": 7,
//!     "profile": {
//!         "name": "Ada",
//!         "nick": null,
//!         "created": "2003-01-02 04:05:06",
//!         "address": { "city": "Berlin" }
//!     }
//! }"#;
//!
//! let (user, report) = from_str::<User, _>(json, &MapOptions::new()).unwrap();
//! assert!(report.is_clean());
//! assert_eq!(user.id, 7);
//! assert_eq!(user.name, "Ada");
//! assert_eq!(user.nickname, None);
//! assert_eq!(user.address.city, "Berlin");
//! ```
//!
//! ### Mapping into an existing value
//!
//! [`map`] only writes fields whose path exists, so it can layer several
//! documents onto one target:
//!
//! ```rust
//! use tagmap::{map, tagmap, MapOptions};
//!
//! tagmap! {
//!     #[derive(Default)]
//!     struct Settings {
//!         host: String => "host",
//!         port: u16 => "port",
//!     }
//! }
//!
//! let mut settings = Settings::default();
//! let options = MapOptions::new();
//! map(r#"{"host": "localhost", "port": 8080}"#, &mut settings, &options).unwrap();
//! map(r#"{"port": 9090}"#, &mut settings, &options).unwrap();
//!
//! assert_eq!(settings.host, "localhost");
//! assert_eq!(settings.port, 9090);
//! ```
//!
//! ## Field kinds
//!
//! | Field type | Behaviour when the path exists |
//! |---|---|
//! | `String`, `bool`, integers, floats | read with the accessor's coercion; zero value on a kind miss |
//! | `Option<` scalar `>` | `null` is skipped; a kind miss is a fault and leaves the field as is |
//! | [`Timestamp`] | parsed; on failure set to the zero timestamp and a fault is recorded |
//! | `Option<Timestamp>` | `null` is skipped; on failure the field is left as is and a fault is recorded |
//! | nested `tagmap!` struct | mapped recursively below the field's path |
//! | `Option<` nested `>` | `null` is skipped; otherwise allocated with `Default` and mapped |
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - A document that fails to parse leaves the target untouched
//! - No panics in the public API

pub mod accessor;
pub mod error;
pub mod field;
pub mod macros;
pub mod map;
mod mapper;
pub mod options;
pub mod path;
pub mod timestamp;
pub mod value;

pub use accessor::{Accessor, Document, Source};
pub use error::{Error, Fault, Report, Result};
pub use field::{
    describe, Field, FieldInfo, FieldKind, FieldSpec, Mapped, OptionalComposite, Scalar,
    ScalarKind, ScalarSlot, Slot,
};
pub use map::Map;
pub use options::MapOptions;
pub use path::Path;
pub use timestamp::{parse_timestamp, Layout, Timestamp};
pub use value::{Kind, Number, Value};

use chrono::TimeZone;
use std::io;

/// Populates `target` from `source`, returning the faults of individual fields.
///
/// `source` is either an already-parsed document (anything implementing
/// [`Accessor`], such as [`Document`], [`Value`] or `serde_json::Value`) or raw
/// JSON as `&str`/`&[u8]`. Raw input is parsed first; if parsing fails the
/// target is not touched.
///
/// Fields whose path is absent keep their current value, so calling `map`
/// twice with the same inputs leaves the target as the first call did.
///
/// # Examples
///
/// ```rust
/// use tagmap::{map, tagmap, Document, MapOptions};
///
/// tagmap! {
///     #[derive(Default)]
///     struct Point {
///         x: i32 => "pos.x",
///         y: i32 => ("pos.y", flat = "y"),
///     }
/// }
///
/// let doc = Document::from_str(r#"{"pos": {"x": 1, "y": 2}, "y": 5}"#).unwrap();
///
/// let mut point = Point::default();
/// let report = map(&doc, &mut point, &MapOptions::new()).unwrap();
/// assert!(report.is_clean());
/// assert_eq!((point.x, point.y), (1, 2));
///
/// let report = map(&doc, &mut point, &MapOptions::new().with_namespace("flat")).unwrap();
/// assert!(report.is_clean());
/// assert_eq!((point.x, point.y), (1, 5));
/// ```
///
/// In the second call `x` has no `flat` annotation, so it is read from the key
/// `""`. That key is absent and `x` keeps its value.
///
/// # Errors
///
/// Returns [`Error::Parse`] when `source` is raw input that is not valid JSON.
/// Per-field failures do not produce an error; they are listed in the [`Report`].
pub fn map<'a, T, Tz>(
    source: impl Into<Source<'a>>,
    target: &mut T,
    options: &MapOptions<Tz>,
) -> Result<Report>
where
    T: Mapped + ?Sized,
    Tz: TimeZone,
{
    match source.into() {
        Source::Document(doc) => Ok(mapper::map_document(doc, target, options)),
        Source::Bytes(bytes) => {
            let doc = Document::parse(bytes)?;
            Ok(mapper::map_document(&doc, target, options))
        }
    }
}

/// Builds a `T` from its default value and maps a JSON string into it.
///
/// # Examples
///
/// ```rust
/// use tagmap::{from_str, tagmap, MapOptions};
///
/// tagmap! {
///     #[derive(Debug, Default, PartialEq)]
///     struct Point { x: i32 => "x", y: i32 => "y" }
/// }
///
/// let (point, report) = from_str::<Point, _>(r#"{"x": 1, "y": 2}"#, &MapOptions::new()).unwrap();
/// assert!(report.is_clean());
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid JSON. Error messages include
/// line and column information.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T, Tz>(s: &str, options: &MapOptions<Tz>) -> Result<(T, Report)>
where
    T: Mapped + Default,
    Tz: TimeZone,
{
    from_slice(s.as_bytes(), options)
}

/// Builds a `T` from its default value and maps JSON bytes into it.
///
/// # Examples
///
/// ```rust
/// use tagmap::{from_slice, tagmap, MapOptions};
///
/// tagmap! {
///     #[derive(Default)]
///     struct Flags { enabled: Option<bool> => "flags.enabled" }
/// }
///
/// let (flags, _) = from_slice::<Flags, _>(br#"{"flags": {"enabled": true}}"#, &MapOptions::new()).unwrap();
/// assert_eq!(flags.enabled, Some(true));
/// ```
///
/// # Errors
///
/// Returns an error if the bytes are not valid JSON.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T, Tz>(v: &[u8], options: &MapOptions<Tz>) -> Result<(T, Report)>
where
    T: Mapped + Default,
    Tz: TimeZone,
{
    let doc = Document::parse(v)?;
    let mut target = T::default();
    let report = mapper::map_document(&doc, &mut target, options);
    Ok((target, report))
}

/// Builds a `T` from its default value and maps a JSON stream into it.
///
/// # Examples
///
/// ```rust
/// use std::io::Cursor;
/// use tagmap::{from_reader, tagmap, MapOptions};
///
/// tagmap! {
///     #[derive(Default)]
///     struct Point { x: i32 => "x" }
/// }
///
/// let (point, _) = from_reader::<_, Point, _>(Cursor::new(b"{\"x\": 3}"), &MapOptions::new()).unwrap();
/// assert_eq!(point.x, 3);
/// ```
///
/// # Errors
///
/// Returns an error if reading from the reader fails or the input is not valid JSON.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T, Tz>(reader: R, options: &MapOptions<Tz>) -> Result<(T, Report)>
where
    R: io::Read,
    T: Mapped + Default,
    Tz: TimeZone,
{
    let doc = Document::from_reader(reader)?;
    let mut target = T::default();
    let report = mapper::map_document(&doc, &mut target, options);
    Ok((target, report))
}
