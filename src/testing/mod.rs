//! Test doubles and validation helpers (spec §9's testability concerns),
//! grounded in `original_source/src/ace_time/testing/` and
//! `original_source/tests/ValidationTest/`. Not `#[cfg(test)]`-gated:
//! downstream crates embedding this one need the same fakes for their own
//! tests, the way AceTime ships `testing/` as an ordinary importable
//! namespace rather than hiding it behind a test-only build.
pub mod fake_clock;
pub mod validation;

pub use fake_clock::{FakeMillis, ScriptedSyncProvider};
pub use validation::{validate, DstValidationLevel, Mismatch, MismatchField, ValidationItem};

/// Install a `tracing-subscriber` `fmt` subscriber for the duration of the
/// test process, so the `tracing::debug!`/`info!`/`trace!` events emitted
/// by the zone manager's cache path and the clock's sync loop are visible
/// under `cargo test -- --nocapture`. Safe to call from multiple tests;
/// only the first call installs anything.
#[cfg(test)]
pub(crate) fn init_test_logging() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}
