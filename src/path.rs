//! Dotted path annotations and their resolved lookup paths.
//!
//! An annotation such as `"profile.created"` is split on `.` into the segments
//! `["profile", "created"]`. No escaping or trimming is applied, so an empty
//! annotation resolves to the single empty segment `[""]`, which looks up the
//! key `""` rather than meaning "no path".
//!
//! While descending into nested targets the mapper carries a prefix; the path a
//! leaf field actually reads is `prefix ++ own segments`.
//!
//! ```rust
//! use tagmap::Path;
//!
//! let prefix = Path::split("customer");
//! let own = Path::split("address.city");
//! assert_eq!(prefix.join(&own).to_string(), "customer.address.city");
//!
//! assert_eq!(Path::split("").segments(), [""]);
//! ```

use std::fmt;

/// Separator between annotation segments.
pub const DIVIDER: char = '.';

/// An ordered sequence of document keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path(Vec<String>);

impl Path {
    /// The empty path, addressing the document root.
    #[must_use]
    pub const fn root() -> Self {
        Path(Vec::new())
    }

    /// Splits an annotation strictly on `.`.
    #[must_use]
    pub fn split(annotation: &str) -> Self {
        Path(annotation.split(DIVIDER).map(str::to_string).collect())
    }

    /// Returns `self ++ other` without deduplicating or validating segments.
    #[must_use]
    pub fn join(&self, other: &Path) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + other.0.len());
        segments.extend_from_slice(&self.0);
        segments.extend_from_slice(&other.0);
        Path(segments)
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", DIVIDER)?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl From<&str> for Path {
    fn from(annotation: &str) -> Self {
        Path::split(annotation)
    }
}

impl From<Vec<String>> for Path {
    fn from(segments: Vec<String>) -> Self {
        Path(segments)
    }
}

impl From<&[&str]> for Path {
    fn from(segments: &[&str]) -> Self {
        segments.iter().copied().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for Path {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Path(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
