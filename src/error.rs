//! Error kinds surfaced by the calendar kernel, zone processor, and registry.
//!
//! Sync failures are absorbed inside [`crate::clock`] and never appear here;
//! gaps and overlaps are not errors either — they are carried in the tagged
//! [`crate::zone::Match`] result of local-time queries.
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The (year, month, day[, hour, minute, second]) is not a valid Gregorian
    /// date, or lies outside the configured `[start_year, until_year)` range.
    #[error("invalid date or time outside the supported range")]
    InvalidDate,

    /// No zone with the given name or ID exists in the registry.
    #[error("unknown time zone")]
    UnknownZone,

    /// The transition finder's fixed-capacity buffer overflowed while
    /// resolving a year. Indicates table corruption or a misconfigured
    /// capacity; a well-formed deployment may treat this as fatal.
    #[error("transition buffer overflow")]
    BufferOverflow,
}

pub type Result<T> = core::result::Result<T, Error>;
