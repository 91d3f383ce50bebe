//! Configuration options for a mapping call.
//!
//! [`MapOptions`] carries everything besides the document and the target:
//!
//! - `zone`: the time zone timestamp text is interpreted in
//! - `namespace`: which annotation family to read (`""` is the default family)
//! - `propagate`: whether nested targets inherit `namespace`
//! - `base_path`: a prefix prepended to every top-level field path
//!
//! ## Examples
//!
//! ```rust
//! use chrono::FixedOffset;
//! use tagmap::MapOptions;
//!
//! let options = MapOptions::new()
//!     .with_namespace("v2")
//!     .with_propagation(true)
//!     .with_base_path("payload.data");
//! assert_eq!(options.base_path.to_string(), "payload.data");
//!
//! let east = FixedOffset::east_opt(3600).unwrap();
//! let options = options.with_zone(east);
//! assert_eq!(options.namespace, "v2");
//! ```

use crate::Path;
use chrono::{TimeZone, Utc};

/// Options for [`map`](crate::map).
///
/// `Tz` is any `chrono` time zone: `Utc`, `Local`, `FixedOffset`, or a zone
/// database type supplied by the caller.
#[derive(Clone, Debug)]
pub struct MapOptions<Tz: TimeZone = Utc> {
    pub zone: Tz,
    pub namespace: String,
    pub propagate: bool,
    pub base_path: Path,
}

impl Default for MapOptions<Utc> {
    fn default() -> Self {
        MapOptions::in_zone(Utc)
    }
}

impl MapOptions<Utc> {
    /// Creates default options: UTC, default namespace, no propagation, empty base path.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tagmap::MapOptions;
    ///
    /// let options = MapOptions::new();
    /// assert_eq!(options.namespace, "");
    /// assert!(!options.propagate);
    /// assert!(options.base_path.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<Tz: TimeZone> MapOptions<Tz> {
    /// Creates default options interpreting timestamps in `zone`.
    #[must_use]
    pub fn in_zone(zone: Tz) -> Self {
        MapOptions {
            zone,
            namespace: String::new(),
            propagate: false,
            base_path: Path::root(),
        }
    }

    /// Replaces the time zone, keeping every other option.
    #[must_use]
    pub fn with_zone<Z: TimeZone>(self, zone: Z) -> MapOptions<Z> {
        MapOptions {
            zone,
            namespace: self.namespace,
            propagate: self.propagate,
            base_path: self.base_path,
        }
    }

    /// Selects the annotation family to read, e.g. `"v2"` for `v2 = "..."` annotations.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// When `true`, nested targets are read with the same namespace; when
    /// `false`, they fall back to the default namespace.
    #[must_use]
    pub fn with_propagation(mut self, propagate: bool) -> Self {
        self.propagate = propagate;
        self
    }

    /// Sets the prefix prepended to every top-level field path.
    #[must_use]
    pub fn with_base_path(mut self, base_path: impl Into<Path>) -> Self {
        self.base_path = base_path.into();
        self
    }
}
