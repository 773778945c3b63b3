//! The compact, read-only zone information model.
//!
//! Tables are plain `'static` Rust data — a flat arena of parallel slices
//! keyed by small integer indices, rendered as ordinary slices and
//! `Option<&'static _>` references rather than raw pointers. Every numeric
//! field keeps the on-disk 15-minute/tiny-year encoding needed to fit a
//! zone's rules in a few hundred bytes of flash, so a compiled-in TZDB
//! snapshot stays small even though the API surface
//! (`crate::zone::processor`) only ever hands callers full-width values.
use crate::calendar::LocalDate;

/// Offset to convert a `tiny_year` byte to a full calendar year.
pub const TINY_YEAR_BASE: i16 = 2000;

/// Sentinel `to_year_tiny`/`until_year_tiny` meaning "no upper bound".
pub const MAX_YEAR_TINY: i8 = 127;

pub const fn tiny_to_year(tiny: i8) -> i16 {
    TINY_YEAR_BASE + tiny as i16
}

/// How a rule's or era's AT/UNTIL time is anchored, per the TZ database's
/// 'w' (wall), 's' (standard) and 'u' (UTC) suffixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeModifier {
    Wall,
    Standard,
    Utc,
}

/// A time-of-day encoded in 15-minute units, 0..=100 (code 100 is the
/// "25:00" end-of-day convention).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeCode(pub u8);

impl TimeCode {
    /// Minutes past midnight on the *nominal* day, plus the number of extra
    /// days to roll over (0 or 1) for an end-of-day AT/UNTIL time. Callers
    /// must add `extra_days` to whichever date this time is attached to and
    /// then use `minutes` as ordinary 00:00-based minutes.
    pub fn resolve(self) -> (i32, i32) {
        let total_minutes = self.0 as i32 * 15;
        (total_minutes / 1440, total_minutes % 1440)
    }

    pub fn minutes_since_epoch_midnight(self, date: LocalDate) -> crate::scalar::EpochSeconds {
        let (extra_days, minutes) = self.resolve();
        let epoch_days = crate::scalar::EpochDays::from_date(date).get() + extra_days;
        crate::scalar::EpochSeconds::new(crate::calendar::days_and_seconds_to_epoch_seconds(epoch_days, minutes * 60))
    }
}

/// One TZ database RULE line: a recurring transition within `[from_year,
/// to_year]` inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneRule {
    pub from_year_tiny: i8,
    pub to_year_tiny: i8,
    pub in_month: u8,
    /// 0 means "exact day of month"; 1..=7 is a ISO weekday (1=Mon..7=Sun)
    /// used together with `on_day_of_month`.
    pub on_day_of_week: u8,
    /// 0 means "last `on_day_of_week` of the month" when `on_day_of_week`
    /// is set.
    pub on_day_of_month: u8,
    pub at_time_code: TimeCode,
    pub at_time_modifier: TimeModifier,
    /// DST delta in 15-minute units. May be negative or zero.
    pub delta_code: i8,
    /// Index into the zone context's letter table, or `None` for '-'.
    pub letter_index: Option<u8>,
}

impl ZoneRule {
    pub fn from_year(self) -> i16 {
        tiny_to_year(self.from_year_tiny)
    }

    pub fn to_year(self) -> i16 {
        if self.to_year_tiny == MAX_YEAR_TINY {
            i16::MAX
        } else {
            tiny_to_year(self.to_year_tiny)
        }
    }

    pub fn active_in_year(self, year: i16) -> bool {
        self.from_year() <= year && year <= self.to_year()
    }

    pub fn delta_minutes(self) -> i32 {
        self.delta_code as i32 * 15
    }

    /// Resolve the `(in_month, on_day_of_week, on_day_of_month)` triple to
    /// a concrete date within `year`; the only supported tie-break
    /// operator is `>=`.
    pub fn transition_date(self, year: i16) -> LocalDate {
        resolve_on_day(year, self.in_month, self.on_day_of_week, self.on_day_of_month)
    }
}

/// Resolve month/day-of-week/day-of-month encoding into a concrete date.
pub fn resolve_on_day(year: i16, month: u8, on_day_of_week: u8, on_day_of_month: u8) -> LocalDate {
    if on_day_of_week == 0 {
        return LocalDate { year, month, day: on_day_of_month };
    }
    if on_day_of_month == 0 {
        // Last `on_day_of_week` of the month: start from the last day and
        // walk backwards to the target weekday.
        let last = last_day_of_month(year, month);
        let last_date = LocalDate { year, month, day: last };
        let diff = (last_date.day_of_week() + 7 - on_day_of_week) % 7;
        return LocalDate { year, month, day: last - diff };
    }
    // First `on_day_of_week` on or after `on_day_of_month`.
    let start = LocalDate { year, month, day: on_day_of_month };
    let diff = (7 + on_day_of_week - start.day_of_week()) % 7;
    LocalDate { year, month, day: on_day_of_month + diff }
}

fn last_day_of_month(year: i16, month: u8) -> u8 {
    const DAYS: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    if month == 2 && ((year % 4 == 0 && year % 100 != 0) || year % 400 == 0) {
        29
    } else {
        DAYS[month as usize]
    }
}

/// A set of rules a zone follows during one or more eras. Rules are sorted
/// ascending by `(from_year, in_month, on_day)` but may overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZonePolicy {
    pub rules: &'static [ZoneRule],
}

/// One TZ database ZONE line: governs a half-open interval `[prev.UNTIL,
/// this.UNTIL)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneEra {
    pub offset_code: i8,
    /// `None` means a fixed `delta_code` applies for the whole era (the
    /// RULES column was '-' or an explicit `hh:mm` shift).
    pub policy: Option<&'static ZonePolicy>,
    pub delta_code: i8,
    /// May contain a single `%` placeholder (substituted with the active
    /// rule's letter) or be the literal string `"%z"` (substituted with the
    /// numeric UTC offset).
    pub format: &'static str,
    pub until_year_tiny: i8,
    pub until_month: u8,
    pub until_day: u8,
    pub until_time_code: TimeCode,
    pub until_time_modifier: TimeModifier,
}

impl ZoneEra {
    pub fn offset(self) -> crate::scalar::UtcOffset {
        crate::scalar::UtcOffset::from_code(self.offset_code)
    }

    pub fn until_year(self) -> i16 {
        if self.until_year_tiny == MAX_YEAR_TINY {
            i16::MAX
        } else {
            tiny_to_year(self.until_year_tiny)
        }
    }

    /// `true` for the sentinel final era of a zone, which never ends.
    pub fn is_open_ended(self) -> bool {
        self.until_year_tiny == MAX_YEAR_TINY
    }

    pub fn fixed_delta_minutes(self) -> i32 {
        self.delta_code as i32 * 15
    }
}

/// One named time zone: a strictly UNTIL-ascending sequence of eras, the
/// last of which is open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneInfo {
    pub name: &'static str,
    pub eras: &'static [ZoneEra],
}

/// Metadata shared by an entire compiled zone database (spec §3).
#[derive(Debug, Clone, Copy)]
pub struct ZoneContext {
    pub start_year: i16,
    pub until_year: i16,
    pub tz_version: &'static str,
    pub letters: &'static [&'static str],
}

/// Render a zone era's `format` string, substituting the rule's letter (for
/// a `%` placeholder) or the numeric UTC offset (for the literal `"%z"`
/// format). Per spec §9's open question, any other unrecognized specifier
/// is a hard error rather than passed through.
pub fn render_format(format: &str, letter: &str, offset: crate::scalar::UtcOffset) -> String {
    if format == "%z" {
        return format_numeric_offset(offset);
    }
    // Per spec §9's open question: a `%` placeholder is substituted exactly
    // once, with no printf semantics. A format with more than one `%` is a
    // table-authoring bug, not user input, so this is a debug assertion
    // rather than a propagated error.
    debug_assert!(format.matches('%').count() <= 1, "format {format:?} has more than one %");
    match format.find('%') {
        Some(idx) => {
            let mut out = String::with_capacity(format.len() + letter.len());
            out.push_str(&format[..idx]);
            out.push_str(letter);
            out.push_str(&format[idx + 1..]);
            out
        }
        None => format.to_string(),
    }
}

fn format_numeric_offset(offset: crate::scalar::UtcOffset) -> String {
    let total_seconds = offset.seconds();
    let (sign, secs) = if total_seconds < 0 { ('-', -total_seconds) } else { ('+', total_seconds) };
    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;
    if s == 0 {
        format!("{sign}{h:02}{m:02}")
    } else {
        format!("{sign}{h:02}{m:02}{s:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_sunday_in_march() {
        // 2018-03-25 is the last Sunday of March 2018.
        let d = resolve_on_day(2018, 3, 7, 0);
        assert_eq!(d, LocalDate { year: 2018, month: 3, day: 25 });
    }

    #[test]
    fn sun_ge_8_in_march() {
        // first Sunday on or after the 8th, March 2018 -> March 11.
        let d = resolve_on_day(2018, 3, 7, 8);
        assert_eq!(d, LocalDate { year: 2018, month: 3, day: 11 });
    }

    #[test]
    fn exact_day_of_month() {
        let d = resolve_on_day(2018, 3, 0, 15);
        assert_eq!(d, LocalDate { year: 2018, month: 3, day: 15 });
    }

    #[test]
    fn format_letter_substitution() {
        let offset = crate::scalar::UtcOffset::from_minutes(-300);
        assert_eq!(render_format("E%T", "S", offset), "EST");
        assert_eq!(render_format("E%T", "D", offset), "EDT");
        assert_eq!(render_format("E%T", "", offset), "ET");
    }

    #[test]
    fn format_numeric_z() {
        let offset = crate::scalar::UtcOffset::from_minutes(330);
        assert_eq!(render_format("%z", "", offset), "+0530");
    }

    #[test]
    fn tiny_year_roundtrip() {
        assert_eq!(tiny_to_year(0), 2000);
        assert_eq!(tiny_to_year(-127), 1873);
        assert_eq!(tiny_to_year(126), 2126);
    }
}
