//! A small, compiled-in sample zone database of statically compiled zone
//! tables. The full IANA TZ database has roughly 350 zones and runs to
//! hundreds of kilobytes; reproducing it is explicitly out of scope (see
//! DESIGN.md). What's here is enough to exercise every relevant code path:
//! a northern-hemisphere DST zone, a southern-hemisphere one, a zone with
//! no DST, a zone whose format switches from a literal string to `%z`, and
//! a link.
pub mod policies;
pub mod zones;

pub use zones::{
    america_los_angeles, asia_kolkata, australia_sydney, europe_london, sample_registry, sample_registry_static,
    SampleZone, KOLKATA, LONDON, LOS_ANGELES, SYDNEY, US_PACIFIC_LINK,
};
