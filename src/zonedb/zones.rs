//! A small, hand-authored zone database: one DST zone per hemisphere, a
//! fixed-offset zone, a zone with a historical fixed-format era followed
//! by a ruled one, and a link. Scaled down to what this crate's test suite
//! needs rather than the full compiled TZDB (out of scope — see
//! DESIGN.md).
use crate::zone::registry::{zone_id, ZoneEntry};
use crate::zone::schema::{MAX_YEAR_TINY, TimeCode, TimeModifier, ZoneContext, ZoneEra, ZoneInfo};
use crate::zone::ZoneRegistry;
use crate::zonedb::policies::{AU_LETTERS, AU_POLICY, EU_POLICY, US_LETTERS, US_POLICY};

static LA_ERAS: &[ZoneEra] = &[ZoneEra {
    offset_code: -32, // -480 min
    policy: Some(&US_POLICY),
    delta_code: 0,
    format: "P%sT",
    until_year_tiny: MAX_YEAR_TINY,
    until_month: 1,
    until_day: 1,
    until_time_code: TimeCode(0),
    until_time_modifier: TimeModifier::Utc,
}];

static SYDNEY_ERAS: &[ZoneEra] = &[ZoneEra {
    offset_code: 40, // +600 min
    policy: Some(&AU_POLICY),
    delta_code: 0,
    format: "AE%sT",
    until_year_tiny: MAX_YEAR_TINY,
    until_month: 1,
    until_day: 1,
    until_time_code: TimeCode(0),
    until_time_modifier: TimeModifier::Utc,
}];

static KOLKATA_ERAS: &[ZoneEra] = &[ZoneEra {
    offset_code: 22, // +330 min
    policy: None,
    delta_code: 0,
    format: "IST",
    until_year_tiny: MAX_YEAR_TINY,
    until_month: 1,
    until_day: 1,
    until_time_code: TimeCode(0),
    until_time_modifier: TimeModifier::Utc,
}];

static LONDON_ERAS: &[ZoneEra] = &[
    ZoneEra {
        offset_code: 0,
        policy: None,
        delta_code: 0,
        format: "GMT",
        until_year_tiny: -29, // 1971
        until_month: 10,
        until_day: 31,
        until_time_code: TimeCode(8), // 02:00
        until_time_modifier: TimeModifier::Utc,
    },
    ZoneEra {
        offset_code: 0,
        policy: Some(&EU_POLICY),
        delta_code: 0,
        format: "%z",
        until_year_tiny: MAX_YEAR_TINY,
        until_month: 1,
        until_day: 1,
        until_time_code: TimeCode(0),
        until_time_modifier: TimeModifier::Utc,
    },
];

pub static LOS_ANGELES: ZoneInfo = ZoneInfo { name: "America/Los_Angeles", eras: LA_ERAS };
pub static US_PACIFIC_LINK: ZoneInfo = ZoneInfo { name: "US/Pacific", eras: LA_ERAS };
pub static SYDNEY: ZoneInfo = ZoneInfo { name: "Australia/Sydney", eras: SYDNEY_ERAS };
pub static KOLKATA: ZoneInfo = ZoneInfo { name: "Asia/Kolkata", eras: KOLKATA_ERAS };
pub static LONDON: ZoneInfo = ZoneInfo { name: "Europe/London", eras: LONDON_ERAS };

pub static US_CONTEXT: ZoneContext =
    ZoneContext { start_year: 1872, until_year: 2087, tz_version: "2024a-sample", letters: US_LETTERS };
pub static AU_CONTEXT: ZoneContext =
    ZoneContext { start_year: 1872, until_year: 2087, tz_version: "2024a-sample", letters: AU_LETTERS };
pub static NO_LETTER_CONTEXT: ZoneContext =
    ZoneContext { start_year: 1872, until_year: 2087, tz_version: "2024a-sample", letters: &[] };

static REGISTRY_ENTRIES_UNSORTED: &[ZoneEntry] = &[
    ZoneEntry { id: zone_id("America/Los_Angeles"), info: LOS_ANGELES },
    ZoneEntry { id: zone_id("US/Pacific"), info: US_PACIFIC_LINK },
    ZoneEntry { id: zone_id("Australia/Sydney"), info: SYDNEY },
    ZoneEntry { id: zone_id("Asia/Kolkata"), info: KOLKATA },
    ZoneEntry { id: zone_id("Europe/London"), info: LONDON },
];

/// Returns the sample registry's entries sorted ascending by zone id, as
/// the registry invariant requires. Sorting a small `const` array at
/// runtime keeps the source data declared in one readable, unsorted block;
/// a real compiled TZDB would emit it pre-sorted.
fn sorted_entries() -> Vec<ZoneEntry> {
    let mut v = REGISTRY_ENTRIES_UNSORTED.to_vec();
    v.sort_by_key(|e| e.id);
    v
}

pub fn sample_registry_static() -> &'static ZoneRegistry {
    use std::sync::OnceLock;
    static REGISTRY: OnceLock<ZoneRegistry> = OnceLock::new();
    static CTX: ZoneContext =
        ZoneContext { start_year: 1872, until_year: 2087, tz_version: "2024a-sample", letters: US_LETTERS };
    REGISTRY.get_or_init(|| {
        // Leak the sorted entries once so the registry can hold a `'static`
        // slice; acceptable for a process-lifetime table of compiled-in zones.
        let entries: &'static [ZoneEntry] = Box::leak(sorted_entries().into_boxed_slice());
        ZoneRegistry { context: CTX, entries }
    })
}

pub fn sample_registry() -> ZoneRegistry {
    let registry = sample_registry_static();
    ZoneRegistry { context: registry.context, entries: registry.entries }
}

/// A single zone bundled with the context (letter table) its rules index
/// into, the shape every caller of `crate::zone::transition` and
/// `crate::zone::processor` needs together.
#[derive(Debug, Clone, Copy)]
pub struct SampleZone {
    pub info: ZoneInfo,
    pub context: ZoneContext,
}

pub fn america_los_angeles() -> SampleZone {
    SampleZone { info: LOS_ANGELES, context: US_CONTEXT }
}

pub fn australia_sydney() -> SampleZone {
    SampleZone { info: SYDNEY, context: AU_CONTEXT }
}

pub fn asia_kolkata() -> SampleZone {
    SampleZone { info: KOLKATA, context: NO_LETTER_CONTEXT }
}

pub fn europe_london() -> SampleZone {
    // EU_POLICY rules carry no letter index, so the empty letter table is
    // never indexed into.
    SampleZone { info: LONDON, context: NO_LETTER_CONTEXT }
}
