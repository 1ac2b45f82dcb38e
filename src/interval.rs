//! Work-interval data model.
//!
//! A work interval (one pomodoro) is described entirely by externally
//! supplied, text-valued attributes: the unix second it started, its nominal
//! duration in minutes, and the grace minutes allowed past that duration
//! before the interval counts as overflowed. This module parses those
//! attributes and derives the visual state for a single captured wall-clock
//! instant.
//!
//! Nothing here is stored between refresh passes; a [`Snapshot`] is
//! recomputed from the attributes and the clock every time, so the display
//! self-corrects after missed ticks.
//!
//! # Examples
//!
//! ```rust
//! use taskstack_widgets::interval::{RawAttrs, Snapshot, WorkInterval};
//!
//! let attrs = RawAttrs::new("1700000000", "25", "5");
//! let interval = WorkInterval::from_attrs(&attrs).unwrap();
//!
//! // 30 seconds in: one elapsed minute, 4% of a 25-minute interval.
//! let snap = Snapshot::compute(&interval, 1_700_000_030);
//! assert_eq!(snap.elapsed_minutes, 1);
//! assert_eq!(snap.percent, 4.0);
//! assert!(!snap.overflowed);
//! ```

use thiserror::Error;

/// A data-contract violation in the supplied interval attributes.
///
/// Attribute errors are contained per element: the refresher leaves the
/// affected bar's derived fields unchanged and moves on to the next entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttrError {
    /// A required attribute is absent.
    #[error("missing attribute `{0}`")]
    Missing(&'static str),
    /// An attribute is present but not a usable number.
    #[error("attribute `{name}` is not a usable number: {value:?}")]
    Invalid {
        /// Name of the offending attribute.
        name: &'static str,
        /// The raw text that failed to parse.
        value: String,
    },
}

/// The raw, text-valued attributes of one work interval, exactly as
/// supplied by the surrounding markup. Read-only to this crate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawAttrs {
    /// Unix timestamp (seconds) when the interval began.
    pub start: Option<String>,
    /// Nominal duration of the interval, in minutes.
    pub unit: Option<String>,
    /// Additional minutes allowed past `unit` before overflow.
    pub grace: Option<String>,
}

impl RawAttrs {
    /// Builds a fully populated attribute set.
    pub fn new(start: &str, unit: &str, grace: &str) -> Self {
        Self {
            start: Some(start.to_string()),
            unit: Some(unit.to_string()),
            grace: Some(grace.to_string()),
        }
    }
}

/// A parsed work interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkInterval {
    /// Unix second the interval began.
    pub start: i64,
    /// Nominal duration in minutes. Always at least 1.
    pub unit: u32,
    /// Grace minutes past `unit` before overflow.
    pub grace: u32,
}

fn require<'a>(name: &'static str, value: &'a Option<String>) -> Result<&'a str, AttrError> {
    value.as_deref().ok_or(AttrError::Missing(name))
}

fn numeric<T: std::str::FromStr>(name: &'static str, raw: &str) -> Result<T, AttrError> {
    raw.trim().parse().map_err(|_| AttrError::Invalid {
        name,
        value: raw.to_string(),
    })
}

impl WorkInterval {
    /// Parses the raw attributes, enforcing the data contract.
    ///
    /// A missing attribute yields [`AttrError::Missing`]; non-numeric text
    /// yields [`AttrError::Invalid`]. A zero `unit` is rejected as invalid
    /// too, since it would poison the percentage with a division by zero.
    pub fn from_attrs(attrs: &RawAttrs) -> Result<Self, AttrError> {
        let start = numeric("start", require("start", &attrs.start)?)?;
        let unit: u32 = numeric("unit", require("unit", &attrs.unit)?)?;
        let grace = numeric("grace", require("grace", &attrs.grace)?)?;
        if unit == 0 {
            return Err(AttrError::Invalid {
                name: "unit",
                value: "0".to_string(),
            });
        }
        Ok(Self { start, unit, grace })
    }
}

/// The derived visual state of one interval at a single captured instant.
///
/// The fields are mutually consistent because they are all computed from
/// the same `now`; the clock is never re-read mid-computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    /// Minutes elapsed since the interval started, rounded up. Negative
    /// when the start time lies in the future.
    pub elapsed_minutes: i64,
    /// Completion percentage, clamped to `0.0..=100.0`.
    pub percent: f64,
    /// Whether the interval has run past `unit + grace` minutes.
    pub overflowed: bool,
}

impl Snapshot {
    /// Computes the derived state of `interval` as of `now_secs`.
    pub fn compute(interval: &WorkInterval, now_secs: i64) -> Self {
        // Ceiling division; a partial minute counts as elapsed.
        let delta = now_secs - interval.start;
        let elapsed_minutes = delta / 60 + i64::from(delta % 60 > 0);
        let raw = elapsed_minutes as f64 / interval.unit as f64 * 100.0;
        let percent = raw.clamp(0.0, 100.0);
        let overflowed = elapsed_minutes > interval.unit as i64 + interval.grace as i64;
        Self {
            elapsed_minutes,
            percent,
            overflowed,
        }
    }
}
