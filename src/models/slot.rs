//! Time slot model and the weekly slot catalog.
//!
//! # Time Model
//! Time of day is minutes since midnight internally; external I/O uses
//! `"HH:MM"` strings. Days are numbered 1 (Monday) through 5 (Friday).
//!
//! # Overlap semantics
//! Two ranges `[s1, e1)` and `[s2, e2)` overlap iff `s1 < e2 && s2 < e1`.
//! Touching endpoints (one slot ending exactly when another starts) do
//! not count as overlap.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::SynthesisError;

/// A weekly time slot: a day-of-week plus a time-of-day range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    /// Day of week, 1 (Monday) through 5 (Friday).
    #[serde(rename = "dayOfWeek")]
    pub day: u8,
    /// Range start, minutes since midnight (inclusive).
    #[serde(rename = "startTime", with = "hhmm")]
    pub start_min: u16,
    /// Range end, minutes since midnight (exclusive).
    #[serde(rename = "endTime", with = "hhmm")]
    pub end_min: u16,
}

impl Slot {
    /// Creates a new slot.
    pub fn new(day: u8, start_min: u16, end_min: u16) -> Self {
        Self {
            day,
            start_min,
            end_min,
        }
    }

    /// Duration of this slot in minutes.
    #[inline]
    pub fn duration_min(&self) -> u16 {
        self.end_min - self.start_min
    }

    /// Duration of this slot in hours.
    #[inline]
    pub fn duration_hours(&self) -> f64 {
        f64::from(self.duration_min()) / 60.0
    }

    /// Whether the time-of-day ranges overlap, ignoring the day.
    ///
    /// Strict on both sides: touching endpoints do not overlap.
    #[inline]
    pub fn overlaps_time(&self, other: &Slot) -> bool {
        self.start_min < other.end_min && other.start_min < self.end_min
    }

    /// Whether two slots collide: same day and overlapping time ranges.
    #[inline]
    pub fn overlaps(&self, other: &Slot) -> bool {
        self.day == other.day && self.overlaps_time(other)
    }
}

/// Parses an `"HH:MM"` string into minutes since midnight.
pub fn parse_hhmm(s: &str) -> Result<u16, SynthesisError> {
    let invalid = || SynthesisError::InvalidTime(s.to_string());
    let (h, m) = s.split_once(':').ok_or_else(invalid)?;
    let hours: u16 = h.parse().map_err(|_| invalid())?;
    let minutes: u16 = m.parse().map_err(|_| invalid())?;
    if h.len() != 2 || m.len() != 2 || hours > 23 || minutes > 59 {
        return Err(invalid());
    }
    Ok(hours * 60 + minutes)
}

/// Formats minutes since midnight as `"HH:MM"`.
pub fn format_hhmm(minutes: u16) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Serde codec mapping minutes-since-midnight to `"HH:MM"` strings.
pub mod hhmm {
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::{format_hhmm, parse_hhmm};

    /// Serializes minutes as `"HH:MM"`.
    pub fn serialize<S: Serializer>(minutes: &u16, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_hhmm(*minutes))
    }

    /// Deserializes `"HH:MM"` into minutes.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u16, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_hhmm(&s).map_err(de::Error::custom)
    }
}

/// The fixed weekly catalog slots are drawn from.
///
/// The default is the reference catalog: 5 weekdays × 5 periods
/// (09:00–10:30, 10:45–12:15, 13:00–14:30, 14:45–16:15, 16:30–18:00).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotCatalog {
    /// Number of scheduling days per week (days 1..=days).
    pub days: u8,
    /// Daily periods, in scan order.
    pub periods: Vec<Period>,
}

/// One daily period within the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// Period start, minutes since midnight.
    #[serde(with = "hhmm")]
    pub start_min: u16,
    /// Period end, minutes since midnight.
    #[serde(with = "hhmm")]
    pub end_min: u16,
}

impl Default for SlotCatalog {
    fn default() -> Self {
        Self {
            days: 5,
            periods: vec![
                Period { start_min: 540, end_min: 630 },   // 09:00-10:30
                Period { start_min: 645, end_min: 735 },   // 10:45-12:15
                Period { start_min: 780, end_min: 870 },   // 13:00-14:30
                Period { start_min: 885, end_min: 975 },   // 14:45-16:15
                Period { start_min: 990, end_min: 1080 },  // 16:30-18:00
            ],
        }
    }
}

impl SlotCatalog {
    /// Creates an empty catalog for the given number of days.
    pub fn new(days: u8) -> Self {
        Self {
            days,
            periods: Vec::new(),
        }
    }

    /// Adds a period (minutes since midnight).
    pub fn with_period(mut self, start_min: u16, end_min: u16) -> Self {
        self.periods.push(Period { start_min, end_min });
        self
    }

    /// Adds a period from `"HH:MM"` strings.
    pub fn with_period_hhmm(self, start: &str, end: &str) -> Result<Self, SynthesisError> {
        let start_min = parse_hhmm(start)?;
        let end_min = parse_hhmm(end)?;
        Ok(self.with_period(start_min, end_min))
    }

    /// Number of periods per day.
    pub fn period_count(&self) -> usize {
        self.periods.len()
    }

    /// Whether the catalog has no periods.
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Draws a uniformly random slot: day 1..=days, any period.
    ///
    /// Returns `None` when the catalog is empty.
    pub fn random_slot<R: Rng>(&self, rng: &mut R) -> Option<Slot> {
        if self.periods.is_empty() || self.days == 0 {
            return None;
        }
        let day = rng.random_range(1..=self.days);
        let period = self.periods[rng.random_range(0..self.periods.len())];
        Some(Slot::new(day, period.start_min, period.end_min))
    }

    /// Iterates all slots in fixed scan order: day-major, then period.
    pub fn iter_slots(&self) -> impl Iterator<Item = Slot> + '_ {
        (1..=self.days).flat_map(move |day| {
            self.periods
                .iter()
                .map(move |p| Slot::new(day, p.start_min, p.end_min))
        })
    }
}
