//! Hand-authored zone policies for a small illustrative slice of the TZ
//! database, in the shape an offline TZDB compiler would emit into a
//! generated `zone_policies` table. This is a sample, not the full
//! compiled TZDB — see DESIGN.md.
use crate::zone::schema::{TimeCode, TimeModifier, ZonePolicy, ZoneRule};

const SUN: u8 = 7;

/// US DST rules in effect since the Energy Policy Act of 2005 (2007
/// onward): second Sunday in March at 02:00 wall to first Sunday in
/// November at 02:00 wall.
pub static US_RULES: &[ZoneRule] = &[
    ZoneRule {
        from_year_tiny: 7, // 2007
        to_year_tiny: crate::zone::schema::MAX_YEAR_TINY,
        in_month: 3,
        on_day_of_week: SUN,
        on_day_of_month: 8,
        at_time_code: TimeCode(8), // 02:00
        at_time_modifier: TimeModifier::Wall,
        delta_code: 4, // +60 min
        letter_index: Some(1), // "D"
    },
    ZoneRule {
        from_year_tiny: 7,
        to_year_tiny: crate::zone::schema::MAX_YEAR_TINY,
        in_month: 11,
        on_day_of_week: SUN,
        on_day_of_month: 1,
        at_time_code: TimeCode(8), // 02:00
        at_time_modifier: TimeModifier::Wall,
        delta_code: 0,
        letter_index: Some(0), // "S"
    },
];

pub static US_POLICY: ZonePolicy = ZonePolicy { rules: US_RULES };
pub static US_LETTERS: &[&str] = &["S", "D"];

/// Australian DST rules in effect since 2008: first Sunday in October at
/// 02:00 standard (gap) to first Sunday in April at 03:00 wall (fold).
pub static AU_RULES: &[ZoneRule] = &[
    ZoneRule {
        from_year_tiny: 8, // 2008
        to_year_tiny: crate::zone::schema::MAX_YEAR_TINY,
        in_month: 10,
        on_day_of_week: SUN,
        on_day_of_month: 1,
        at_time_code: TimeCode(8), // 02:00
        at_time_modifier: TimeModifier::Standard,
        delta_code: 4,
        letter_index: Some(1), // "D"
    },
    ZoneRule {
        from_year_tiny: 8,
        to_year_tiny: crate::zone::schema::MAX_YEAR_TINY,
        in_month: 4,
        on_day_of_week: SUN,
        on_day_of_month: 1,
        at_time_code: TimeCode(12), // 03:00
        at_time_modifier: TimeModifier::Wall,
        delta_code: 0,
        letter_index: Some(0), // "S"
    },
];

pub static AU_POLICY: ZonePolicy = ZonePolicy { rules: AU_RULES };
pub static AU_LETTERS: &[&str] = &["S", "D"];

/// Modern EU rules: last Sunday in March / October at 01:00 UTC. Used with
/// the `%z` numeric format to exercise that rendering path.
pub static EU_RULES: &[ZoneRule] = &[
    ZoneRule {
        from_year_tiny: -19, // 1981
        to_year_tiny: crate::zone::schema::MAX_YEAR_TINY,
        in_month: 3,
        on_day_of_week: SUN,
        on_day_of_month: 0, // last
        at_time_code: TimeCode(4), // 01:00
        at_time_modifier: TimeModifier::Utc,
        delta_code: 4,
        letter_index: None,
    },
    ZoneRule {
        from_year_tiny: -19,
        to_year_tiny: crate::zone::schema::MAX_YEAR_TINY,
        in_month: 10,
        on_day_of_week: SUN,
        on_day_of_month: 0,
        at_time_code: TimeCode(4),
        at_time_modifier: TimeModifier::Utc,
        delta_code: 0,
        letter_index: None,
    },
];

pub static EU_POLICY: ZonePolicy = ZonePolicy { rules: EU_RULES };
