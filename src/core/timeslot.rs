use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors raised when a time slot cannot be built from wall-clock strings
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeSlotError {
    #[error("invalid time '{0}', expected HH:MM")]
    InvalidTime(String),

    #[error("slot start {start} must be before end {end}")]
    EmptyRange { start: String, end: String },

    #[error("{0} minutes is past the end of the day (latest is 23:59)")]
    PastEndOfDay(u16),
}

/// Last representable minute of a day, 23:59
pub const LAST_MINUTE_OF_DAY: u16 = 23 * 60 + 59;

/// A contiguous interval inside one nominal day
///
/// Both ends are stored as minutes since midnight. `start < end` always holds;
/// slots crossing midnight are not representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawTimeSlot", into = "RawTimeSlot")]
pub struct TimeSlot {
    start: u16,
    end: u16,
}

/// Wire shape of a slot: `{ "start": "HH:MM", "end": "HH:MM" }`
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawTimeSlot {
    start: String,
    end: String,
}

impl TimeSlot {
    /// Build a slot from `HH:MM` strings
    pub fn parse(start: &str, end: &str) -> Result<Self, TimeSlotError> {
        Self::from_minutes(parse_clock(start)?, parse_clock(end)?)
    }

    /// Build a slot from minutes since midnight
    pub fn from_minutes(start: u16, end: u16) -> Result<Self, TimeSlotError> {
        if end > LAST_MINUTE_OF_DAY {
            return Err(TimeSlotError::PastEndOfDay(end));
        }
        if start >= end {
            return Err(TimeSlotError::EmptyRange {
                start: format_clock(start),
                end: format_clock(end),
            });
        }
        Ok(Self { start, end })
    }

    #[inline]
    pub fn start(&self) -> u16 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> u16 {
        self.end
    }

    #[inline]
    pub fn duration_minutes(&self) -> u32 {
        u32::from(self.end - self.start)
    }

    #[inline]
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        overlaps(self, other)
    }

    #[inline]
    pub fn overlap_minutes(&self, other: &TimeSlot) -> u32 {
        overlap_minutes(self, other)
    }

    #[inline]
    pub fn fully_covers(&self, inner: &TimeSlot) -> bool {
        fully_covers(self, inner)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", format_clock(self.start), format_clock(self.end))
    }
}

impl TryFrom<RawTimeSlot> for TimeSlot {
    type Error = TimeSlotError;

    fn try_from(raw: RawTimeSlot) -> Result<Self, Self::Error> {
        TimeSlot::parse(&raw.start, &raw.end)
    }
}

impl From<TimeSlot> for RawTimeSlot {
    fn from(slot: TimeSlot) -> Self {
        RawTimeSlot {
            start: format_clock(slot.start),
            end: format_clock(slot.end),
        }
    }
}

/// True iff the two slots share at least one minute
#[inline]
pub fn overlaps(a: &TimeSlot, b: &TimeSlot) -> bool {
    a.start < b.end && b.start < a.end
}

/// Length of the shared interval in minutes, 0 when disjoint
#[inline]
pub fn overlap_minutes(a: &TimeSlot, b: &TimeSlot) -> u32 {
    let start = a.start.max(b.start);
    let end = a.end.min(b.end);
    u32::from(end.saturating_sub(start))
}

/// True iff `outer` starts no later and ends no earlier than `inner`
#[inline]
pub fn fully_covers(outer: &TimeSlot, inner: &TimeSlot) -> bool {
    outer.start <= inner.start && outer.end >= inner.end
}

fn parse_clock(value: &str) -> Result<u16, TimeSlotError> {
    let time = NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|_| TimeSlotError::InvalidTime(value.to_string()))?;
    // hour <= 23 and minute <= 59, so this fits in u16
    Ok((time.hour() * 60 + time.minute()) as u16)
}

fn format_clock(minutes: u16) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
