//! Heuristic multi-layout timestamp parsing.
//!
//! Timestamp text is matched against a fixed, ordered table of layouts. Each
//! layout is a whole-string shape (exact digit counts) plus a `chrono` format.
//! The first layout whose shape matches decides how the text is parsed; if the
//! calendar values are then invalid (`99/99/9999`) the text is rejected rather
//! than retried against later layouts.
//!
//! | # | Layout | Example |
//! |---|--------|---------|
//! | 1 | `MM/DD/YYYY HH:MM:SS` | `01/02/2003 04:05:06` |
//! | 2 | `MM/DD/YYYY` | `01/02/2003` |
//! | 3 | `YYYY-MM-DD HH:MM:SS` | `2003-01-02 04:05:06` |
//! | 4 | `YYYY-MM-DD` | `2003-01-02` |
//! | 5 | `YYYY-MM` | `2003-01` (first of the month) |
//!
//! Parsed values are civil times in the supplied zone, not UTC instants with
//! an offset: `2003-01-02` in `Europe/Berlin` is midnight Berlin time. The
//! result keeps the zone's offset at that instant.
//!
//! ```rust
//! use chrono::{FixedOffset, Timelike};
//! use tagmap::{parse_timestamp, Layout};
//!
//! let zone = FixedOffset::east_opt(2 * 3600).unwrap();
//! let ts = parse_timestamp("2003-01-02 04:05:06", &zone).unwrap();
//! assert_eq!(ts.hour(), 4);
//! assert_eq!(ts.offset().local_minus_utc(), 7200);
//!
//! assert_eq!(Layout::detect("2003-01"), Some(Layout::YearMonth));
//! assert!(parse_timestamp("99/99/9999", &zone).is_err());
//! ```

use crate::{Error, Result};
use chrono::{
    DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Timelike,
};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Timestamp field type: a civil time together with the offset it was read in.
///
/// The zero timestamp is `Timestamp::default()`, the Unix epoch at UTC.
pub type Timestamp = DateTime<FixedOffset>;

/// A supported textual timestamp layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layout {
    /// `MM/DD/YYYY HH:MM:SS`
    UsDateTime,
    /// `MM/DD/YYYY`
    UsDate,
    /// `YYYY-MM-DD HH:MM:SS`
    IsoDateTime,
    /// `YYYY-MM-DD`
    IsoDate,
    /// `YYYY-MM`
    YearMonth,
}

struct Shapes {
    us_date_time: Regex,
    us_date: Regex,
    iso_date_time: Regex,
    iso_date: Regex,
    year_month: Regex,
}

static SHAPES: LazyLock<Shapes> = LazyLock::new(|| Shapes {
    us_date_time: shape(r"^[0-9]{2}/[0-9]{2}/[0-9]{4} [0-9]{2}:[0-9]{2}:[0-9]{2}$"),
    us_date: shape(r"^[0-9]{2}/[0-9]{2}/[0-9]{4}$"),
    iso_date_time: shape(r"^[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}$"),
    iso_date: shape(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$"),
    year_month: shape(r"^[0-9]{4}-[0-9]{2}$"),
});

fn shape(pattern: &str) -> Regex {
    Regex::new(pattern).expect("layout patterns are valid regexes")
}

impl Layout {
    /// All layouts, in the order they are tried.
    pub const ALL: [Layout; 5] = [
        Layout::UsDateTime,
        Layout::UsDate,
        Layout::IsoDateTime,
        Layout::IsoDate,
        Layout::YearMonth,
    ];

    /// The `chrono` format string for this layout.
    #[must_use]
    pub const fn format(self) -> &'static str {
        match self {
            Layout::UsDateTime => "%m/%d/%Y %H:%M:%S",
            Layout::UsDate => "%m/%d/%Y",
            Layout::IsoDateTime => "%Y-%m-%d %H:%M:%S",
            Layout::IsoDate => "%Y-%m-%d",
            Layout::YearMonth => "%Y-%m",
        }
    }

    fn regex(self) -> &'static Regex {
        let shapes = &*SHAPES;
        match self {
            Layout::UsDateTime => &shapes.us_date_time,
            Layout::UsDate => &shapes.us_date,
            Layout::IsoDateTime => &shapes.iso_date_time,
            Layout::IsoDate => &shapes.iso_date,
            Layout::YearMonth => &shapes.year_month,
        }
    }

    /// Returns `true` if the whole of `raw` has this layout's shape.
    #[must_use]
    pub fn matches(self, raw: &str) -> bool {
        self.regex().is_match(raw)
    }

    /// Returns the first layout, in table order, whose shape matches `raw`.
    #[must_use]
    pub fn detect(raw: &str) -> Option<Layout> {
        Layout::ALL.into_iter().find(|layout| layout.matches(raw))
    }

    /// Parses `raw` as a civil date-time with this layout, without shape checking.
    fn parse_naive(self, raw: &str) -> Option<NaiveDateTime> {
        match self {
            // chrono reads second 60 as a leap second; reject it like any other
            // out-of-range field
            Layout::UsDateTime | Layout::IsoDateTime => {
                NaiveDateTime::parse_from_str(raw, self.format())
                    .ok()
                    .filter(|naive| naive.nanosecond() < 1_000_000_000)
            }
            Layout::UsDate | Layout::IsoDate => NaiveDate::parse_from_str(raw, self.format())
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0)),
            Layout::YearMonth => NaiveDate::parse_from_str(&format!("{}-01", raw), "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0)),
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Layout::UsDateTime => "MM/DD/YYYY HH:MM:SS",
            Layout::UsDate => "MM/DD/YYYY",
            Layout::IsoDateTime => "YYYY-MM-DD HH:MM:SS",
            Layout::IsoDate => "YYYY-MM-DD",
            Layout::YearMonth => "YYYY-MM",
        };
        f.write_str(text)
    }
}

/// Parses timestamp text with the first matching [`Layout`], as civil time in `zone`.
///
/// An ambiguous local time (clocks turned back) resolves to the earlier
/// instant. A local time that does not exist (clocks turned forward) is moved
/// one hour later.
///
/// # Errors
///
/// Returns [`Error::InvalidTimestamp`] carrying `raw` when no layout shape
/// matches, or when the matching layout holds an impossible calendar value.
pub fn parse_timestamp<Tz: TimeZone>(raw: &str, zone: &Tz) -> Result<Timestamp> {
    let naive = Layout::detect(raw)
        .and_then(|layout| layout.parse_naive(raw))
        .ok_or_else(|| Error::invalid_timestamp(raw))?;

    let local = zone
        .from_local_datetime(&naive)
        .earliest()
        .or_else(|| {
            naive
                .checked_add_signed(Duration::hours(1))
                .and_then(|shifted| zone.from_local_datetime(&shifted).earliest())
        })
        .ok_or_else(|| Error::invalid_timestamp(raw))?;

    let offset = local.offset().fix();
    Ok(local.with_timezone(&offset))
}
