//! Checked newtypes for the integer quantities that flow through the zone
//! processor: epoch-relative counters and UTC-offset/DST-delta minutes.
//!
//! Small `Copy` wrapper types with `const fn` constructors instead of bare
//! `i32`s, so that a UTC-offset-in-minutes can never be silently added to an
//! epoch-seconds count. Unlike the on-disk schema (`crate::zone::schema`),
//! these are always full-width; 15-minute "codes" are an encoding detail
//! that stops at the table-reading boundary.
use crate::calendar::{self, LocalDate, LocalTime};
use std::fmt;
use std::ops::Add;

/// Seconds since the internal epoch, 2000-01-01T00:00:00 UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EpochSeconds(i32);

impl EpochSeconds {
    pub const MIN: EpochSeconds = EpochSeconds(i32::MIN);
    pub const MAX: EpochSeconds = EpochSeconds(i32::MAX);

    pub const fn new(secs: i32) -> Self {
        Self(secs)
    }

    pub const fn get(self) -> i32 {
        self.0
    }

    pub fn from_local(date: LocalDate, time: LocalTime) -> Self {
        Self(calendar::to_epoch_seconds(date, time))
    }

    pub fn to_local(self) -> (LocalDate, LocalTime) {
        calendar::from_epoch_seconds(self.0)
    }

    /// Add a signed minute count, saturating at the representable range
    /// instead of wrapping. Used for transition arithmetic near the edges
    /// of the configured year range.
    pub fn saturating_add_minutes(self, minutes: i32) -> Self {
        Self(self.0.saturating_add(minutes.saturating_mul(60)))
    }

    pub fn saturating_add_seconds(self, secs: i32) -> Self {
        Self(self.0.saturating_add(secs))
    }
}

impl fmt::Display for EpochSeconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Days since the internal epoch, 2000-01-01.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EpochDays(i32);

impl EpochDays {
    pub const fn new(days: i32) -> Self {
        Self(days)
    }

    pub const fn get(self) -> i32 {
        self.0
    }

    pub fn from_date(date: LocalDate) -> Self {
        Self(calendar::to_epoch_days(date))
    }

    pub fn date(self) -> LocalDate {
        calendar::from_epoch_days(self.0)
    }
}

impl Add<i32> for EpochDays {
    type Output = EpochDays;
    fn add(self, rhs: i32) -> EpochDays {
        EpochDays(self.0 + rhs)
    }
}

/// A UTC offset or DST delta, in whole minutes. Both the base `GMTOFF` of a
/// zone era and the `SAVE` of a rule share this representation; the on-disk
/// schema encodes both as `code * 15`, with `code: i8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct UtcOffset(i32);

impl UtcOffset {
    pub const ZERO: UtcOffset = UtcOffset(0);
    /// The representable offset range is ±16 hours.
    pub const MIN: UtcOffset = UtcOffset(-16 * 60);
    pub const MAX: UtcOffset = UtcOffset(16 * 60);

    pub const fn from_minutes(minutes: i32) -> Self {
        debug_assert!(minutes >= Self::MIN.0 && minutes <= Self::MAX.0);
        Self(minutes)
    }

    /// Decode a 15-minute offset code as stored in [`crate::zone::schema`].
    pub const fn from_code(code: i8) -> Self {
        Self::from_minutes(code as i32 * 15)
    }

    pub const fn minutes(self) -> i32 {
        self.0
    }

    pub const fn seconds(self) -> i32 {
        self.0 * 60
    }

    pub fn shift(self, delta: UtcOffset) -> UtcOffset {
        UtcOffset::from_minutes(self.0 + delta.0)
    }

    pub fn sub(self, other: UtcOffset) -> UtcOffset {
        UtcOffset::from_minutes(self.0 - other.0)
    }
}

impl fmt::Display for UtcOffset {
    /// Render as `+HH:MM`, extending to `+HH:MM:SS` only when the value
    /// carries a non-zero seconds remainder (never happens for 15-minute
    /// codes, but the formatter stays exact for directly-constructed
    /// offsets too).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (sign, secs) = if self.0 < 0 { ('-', -self.seconds()) } else { ('+', self.seconds()) };
        if secs % 60 == 0 {
            write!(f, "{}{:02}:{:02}", sign, secs / 3600, (secs % 3600) / 60)
        } else {
            write!(f, "{}{:02}:{:02}:{:02}", sign, secs / 3600, (secs % 3600) / 60, secs % 60)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_code_roundtrip() {
        for code in [-32i8, -4, 0, 4, 37] {
            let off = UtcOffset::from_code(code);
            assert_eq!(off.minutes(), code as i32 * 15);
        }
    }

    #[test]
    fn kolkata_offset_is_plus_330() {
        let off = UtcOffset::from_code(22); // 22 * 15 = 330
        assert_eq!(off.minutes(), 330);
        assert_eq!(off.to_string(), "+05:30");
    }

    #[test]
    fn shift_and_sub_are_inverse() {
        let a = UtcOffset::from_minutes(-480);
        let d = UtcOffset::from_minutes(60);
        assert_eq!(a.shift(d).sub(d), a);
    }
}
