//! acetime: an embedded-friendly date/time library built around IANA TZ
//! Database zone resolution.
//!
//! The crate follows its own resolution pipeline: a pure [`calendar`]
//! kernel converts between Gregorian dates and epoch counters; [`zone`]
//! holds the compact zone-info schema, the transition finder, the stateful
//! processor, and the registry/manager that bound a cache of processors
//! over it; [`zonedb`] is a small compiled-in sample database; [`clock`] is
//! the system-clock core with its sync loop and backup keeper; [`testing`]
//! holds fakes and validation helpers shared by this crate's own tests and
//! by downstream embedders.
pub mod calendar;
pub mod clock;
pub mod config;
pub mod error;
pub mod scalar;
pub mod testing;
pub mod zone;
pub mod zonedb;

pub use config::Config;
pub use error::{Error, Result};

use crate::calendar::{LocalDate, LocalTime};
use crate::scalar::EpochSeconds;
use crate::zone::{Match, OffsetInfo, ZoneProcessor};

/// How a local-to-instant conversion was resolved, alongside the
/// `zoned_components_to_epoch_seconds` return value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disambiguation {
    Unique,
    Gap,
    OverlapEarlier,
    OverlapLater,
}

/// The full zoned breakdown of an instant, as returned by
/// `epoch_seconds_to_zoned`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZonedDateTime {
    pub date: LocalDate,
    pub time: LocalTime,
    pub offset_minutes: i32,
    pub dst_minutes: i32,
    pub abbrev: String,
    pub fold: u8,
}

/// Convert an instant to its zoned calendar breakdown. `fold` is always `0`
/// here: converting *from* an instant can never be ambiguous, since every
/// instant has exactly one wall-clock representation in a given zone.
pub fn epoch_seconds_to_zoned(t: EpochSeconds, processor: &mut ZoneProcessor) -> Result<ZonedDateTime> {
    let info = processor.offset_for_epoch_seconds(t)?;
    let local = t.saturating_add_minutes(info.total_offset().minutes());
    let (date, time) = local.to_local();
    Ok(ZonedDateTime {
        date,
        time,
        offset_minutes: info.offset.minutes(),
        dst_minutes: info.delta.minutes(),
        abbrev: info.abbrev,
        fold: 0,
    })
}

/// Convert zoned calendar components to an instant, resolving gaps and
/// overlaps with the caller-supplied `fold` (`0` picks the
/// earlier/pre-transition offset, `1` the later/post-transition one).
pub fn zoned_components_to_epoch_seconds(
    date: LocalDate,
    time: LocalTime,
    processor: &mut ZoneProcessor,
    fold: u8,
) -> Result<(EpochSeconds, Disambiguation)> {
    if !date.is_valid() {
        return Err(Error::InvalidDate);
    }
    let m = processor.offsets_for_local(date, time)?;
    let disambiguation = match &m {
        Match::Unique(_) => Disambiguation::Unique,
        Match::Gap { .. } => Disambiguation::Gap,
        Match::Overlap { .. } => {
            if fold == 0 {
                Disambiguation::OverlapEarlier
            } else {
                Disambiguation::OverlapLater
            }
        }
    };
    let chosen: &OffsetInfo = m.with_fold(fold);
    let naive = EpochSeconds::from_local(date, time);
    let t = naive.saturating_add_minutes(-chosen.total_offset().minutes());
    Ok((t, disambiguation))
}
