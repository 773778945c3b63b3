//! Bulk validation of a zone processor's output against a table of known-
//! good `(epoch_seconds, offset, delta)` triples, grounded in
//! `original_source/tests/ValidationTest/{ValidationDataType.h,
//! TransitionTest.h}` and `src/ace_time/testing/DstValidationType.h`. The
//! original drives this from a generated `validation_data.json`; here
//! callers supply the table directly; it's the comparison logic that's
//! carried over.
use crate::scalar::EpochSeconds;
use crate::zone::ZoneProcessor;

/// One known-good data point, the Rust analogue of `ValidationItem`.
#[derive(Debug, Clone, Copy)]
pub struct ValidationItem {
    pub epoch_seconds: EpochSeconds,
    pub utc_offset_minutes: i32,
    pub delta_minutes: i32,
}

/// How thoroughly to validate DST behavior (`DstValidationType`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DstValidationLevel {
    /// Skip delta comparison entirely; only the total UTC offset matters.
    None,
    /// Compare only external transitions, where the total UTC offset
    /// changes — the behavior every datetime library agrees on.
    External,
    /// Compare every item, including ones where only the DST delta moves
    /// but the total offset doesn't.
    All,
}

/// One mismatch found while validating a table (the Rust analogue of a
/// failed `assertEqual` inside `TransitionTest::assertValid`). `field`
/// names which comparison failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MismatchField {
    TotalOffset,
    Delta,
    Lookup,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub epoch_seconds: EpochSeconds,
    pub field: MismatchField,
    pub expected_minutes: i32,
    pub actual_minutes: i32,
}

/// Check every item in `table` against `processor`, returning every
/// mismatch found (empty means the table validated cleanly).
pub fn validate(
    processor: &mut ZoneProcessor,
    table: &[ValidationItem],
    level: DstValidationLevel,
) -> Vec<Mismatch> {
    let mut mismatches = Vec::new();
    for item in table {
        let info = match processor.offset_for_epoch_seconds(item.epoch_seconds) {
            Ok(info) => info,
            Err(_) => {
                mismatches.push(Mismatch {
                    epoch_seconds: item.epoch_seconds,
                    field: MismatchField::Lookup,
                    expected_minutes: item.utc_offset_minutes,
                    actual_minutes: 0,
                });
                continue;
            }
        };
        let actual_total = info.total_offset().minutes();
        if actual_total != item.utc_offset_minutes {
            mismatches.push(Mismatch {
                epoch_seconds: item.epoch_seconds,
                field: MismatchField::TotalOffset,
                expected_minutes: item.utc_offset_minutes,
                actual_minutes: actual_total,
            });
            continue;
        }
        if level == DstValidationLevel::All && info.delta.minutes() != item.delta_minutes {
            mismatches.push(Mismatch {
                epoch_seconds: item.epoch_seconds,
                field: MismatchField::Delta,
                expected_minutes: item.delta_minutes,
                actual_minutes: info.delta.minutes(),
            });
        }
    }
    mismatches
}
