//! Error types for document parsing and field mapping.
//!
//! Mapping distinguishes two classes of failure:
//!
//! - **Hard errors** stop a mapping call before any field is written. The only
//!   one that can come out of [`map`](crate::map) is [`Error::Parse`], raised when
//!   raw input is not valid JSON. [`Error::Io`] is raised by
//!   [`from_reader`](crate::from_reader) when the input cannot be read.
//! - **Recoverable faults** are collected per field into a [`Report`] while the
//!   rest of the target is still populated: unparseable timestamp text and
//!   kind mismatches on optional scalar fields.
//!
//! Non-optional scalar fields never produce a fault. When the document holds a
//! value of the wrong kind they receive the accessor's zero value, which is the
//! documented best-effort contract of [`Accessor`](crate::Accessor).
//!
//! ## Examples
//!
//! ```rust
//! use tagmap::{map, tagmap, Error, MapOptions};
//!
//! tagmap! {
//!     #[derive(Default)]
//!     struct Point {
//!         x: i32 => "x",
//!     }
//! }
//!
//! let mut point = Point::default();
//! let result = map("{\"x\": ", &mut point, &MapOptions::new());
//! assert!(matches!(result, Err(Error::Parse { .. })));
//! ```

use crate::path::Path;
use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised while parsing documents or mapping fields.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error while reading input
    #[error("IO error: {0}")]
    Io(String),

    /// Raw input is not a valid JSON document
    #[error("Parse error at line {line}, column {col}: {msg}")]
    Parse { line: usize, col: usize, msg: String },

    /// Text did not match any supported timestamp layout
    #[error("failed to parse {text:?} as a timestamp")]
    InvalidTimestamp { text: String },

    /// Document value has a different kind than the optional field expects
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },
}

impl Error {
    /// Creates a parse error with line and column information.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tagmap::Error;
    ///
    /// let err = Error::parse(3, 7, "expected value");
    /// assert!(err.to_string().contains("line 3"));
    /// ```
    pub fn parse(line: usize, col: usize, msg: &str) -> Self {
        Error::Parse {
            line,
            col,
            msg: msg.to_string(),
        }
    }

    /// Creates a timestamp error carrying the offending text for diagnostics.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tagmap::Error;
    ///
    /// let err = Error::invalid_timestamp("next tuesday");
    /// assert!(err.to_string().contains("next tuesday"));
    /// ```
    pub fn invalid_timestamp(text: &str) -> Self {
        Error::InvalidTimestamp {
            text: text.to_string(),
        }
    }

    /// Creates a type mismatch error.
    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates an I/O error for reading failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns `true` for errors that are collected per field instead of aborting a call.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::InvalidTimestamp { .. } | Error::TypeMismatch { .. }
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            return Error::io(&err.to_string());
        }
        Error::Parse {
            line: err.line(),
            col: err.column(),
            msg: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// A recoverable failure recorded against one target field.
#[derive(Debug, Clone, PartialEq)]
pub struct Fault {
    /// Dotted trail of Rust field names from the top-level target, e.g. `address.moved_in`.
    pub field: String,
    /// Effective document path that was read.
    pub path: Path,
    pub error: Error,
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.field, self.path, self.error)
    }
}

/// Outcome of a mapping call that got as far as walking the target.
///
/// A clean report means every visited field was either written or skipped by
/// the existence/null rules. Faults never undo the writes of other fields.
///
/// # Examples
///
/// ```rust
/// use tagmap::{map, tagmap, MapOptions, Timestamp};
///
/// tagmap! {
///     #[derive(Default)]
///     struct Event {
///         at: Option<Timestamp> => "at",
///         name: String => "name",
///     }
/// }
///
/// let mut event = Event::default();
/// let report = map(r#"{"at": "soon", "name": "launch"}"#, &mut event, &MapOptions::new()).unwrap();
///
/// assert_eq!(event.name, "launch");
/// assert_eq!(event.at, None);
/// assert_eq!(report.len(), 1);
/// assert_eq!(report.faults()[0].field, "at");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[must_use = "a report may carry field faults that should be inspected"]
pub struct Report {
    faults: Vec<Fault>,
}

impl Report {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, fault: Fault) {
        self.faults.push(fault);
    }

    /// Returns `true` when no field faulted.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.faults.is_empty()
    }

    /// Number of recorded faults.
    #[must_use]
    pub fn len(&self) -> usize {
        self.faults.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faults.is_empty()
    }

    /// Recorded faults, in field visiting order.
    #[must_use]
    pub fn faults(&self) -> &[Fault] {
        &self.faults
    }

    #[must_use]
    pub fn into_faults(self) -> Vec<Fault> {
        self.faults
    }

    /// Converts the report into a `Result`, failing when any fault was recorded.
    ///
    /// # Errors
    ///
    /// Returns every recorded fault when the report is not clean.
    pub fn into_result(self) -> std::result::Result<(), Vec<Fault>> {
        if self.faults.is_empty() {
            Ok(())
        } else {
            Err(self.faults)
        }
    }
}

impl IntoIterator for Report {
    type Item = Fault;
    type IntoIter = std::vec::IntoIter<Fault>;

    fn into_iter(self) -> Self::IntoIter {
        self.faults.into_iter()
    }
}
