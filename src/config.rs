//! Deployment configuration (spec §6's configuration table). Purely
//! programmatic — no environment or file parsing, since this is an
//! embeddable library rather than a standalone binary (SPEC_FULL.md §2).
use crate::clock::provider::{MillisSource, SyncProvider};
use crate::clock::sync::SyncLoop;
use crate::zone::manager::ZoneManager;
use crate::zone::registry::ZoneRegistry;

/// Builder-style configuration bundling every tunable spec §6 names.
/// `Default` matches the defaults given in that table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Inclusive lower bound of supported date resolution.
    pub start_year: i16,
    /// Exclusive upper bound of supported date resolution.
    pub until_year: i16,
    /// Number of LRU `ZoneProcessor` slots the zone manager keeps.
    pub cache_size: usize,
    /// Nominal interval between clock sync attempts, once synced.
    pub sync_period_seconds: u32,
    /// Interval between sync attempts before the clock has ever been set.
    pub initial_sync_period_seconds: u32,
    /// Timeout for a single sync provider call.
    pub request_timeout_millis: u32,
    /// Interval between anti-wrap heartbeat calls to `get_now()`.
    pub heartbeat_period_millis: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start_year: 1872,
            until_year: 2087,
            cache_size: 2,
            sync_period_seconds: 3600,
            initial_sync_period_seconds: 5,
            request_timeout_millis: 1000,
            heartbeat_period_millis: 5000,
        }
    }
}

impl Config {
    pub fn with_year_range(mut self, start_year: i16, until_year: i16) -> Self {
        self.start_year = start_year;
        self.until_year = until_year;
        self
    }

    pub fn with_cache_size(mut self, cache_size: usize) -> Self {
        self.cache_size = cache_size;
        self
    }

    pub fn with_sync_periods(mut self, initial_sync_period_seconds: u32, sync_period_seconds: u32) -> Self {
        self.initial_sync_period_seconds = initial_sync_period_seconds;
        self.sync_period_seconds = sync_period_seconds;
        self
    }

    /// `true` if `year` falls within `[start_year, until_year)`.
    pub fn year_in_range(&self, year: i16) -> bool {
        year >= self.start_year && year < self.until_year
    }

    /// Build a [`ZoneManager`] sized by `cache_size`.
    pub fn build_zone_manager(&self, registry: &'static ZoneRegistry) -> ZoneManager {
        ZoneManager::new(registry, self.cache_size.max(1))
    }

    /// Build a [`SyncLoop`] carrying `sync_period_seconds`,
    /// `initial_sync_period_seconds`, `heartbeat_period_millis`, and
    /// `request_timeout_millis` from this config, so a host never has to
    /// repeat the table from spec §6 at the call site.
    pub fn build_sync_loop<M: MillisSource, P: SyncProvider>(&self, provider: P) -> SyncLoop<M, P> {
        SyncLoop::new(
            provider,
            self.sync_period_seconds,
            self.initial_sync_period_seconds,
            self.heartbeat_period_millis,
            self.request_timeout_millis,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_table() {
        let c = Config::default();
        assert_eq!(c.start_year, 1872);
        assert_eq!(c.until_year, 2087);
        assert_eq!(c.sync_period_seconds, 3600);
        assert_eq!(c.initial_sync_period_seconds, 5);
        assert_eq!(c.request_timeout_millis, 1000);
        assert_eq!(c.heartbeat_period_millis, 5000);
    }

    #[test]
    fn year_in_range_is_half_open() {
        let c = Config::default();
        assert!(c.year_in_range(1872));
        assert!(c.year_in_range(2086));
        assert!(!c.year_in_range(2087));
        assert!(!c.year_in_range(1871));
    }

    #[test]
    fn builder_methods_override_defaults() {
        let c = Config::default().with_year_range(2000, 2040).with_cache_size(4);
        assert_eq!(c.start_year, 2000);
        assert_eq!(c.until_year, 2040);
        assert_eq!(c.cache_size, 4);
    }

    #[test]
    fn build_sync_loop_carries_the_configured_timeout() {
        use crate::clock::system_clock::SystemClock;
        use crate::testing::{FakeMillis, ScriptedSyncProvider};

        let c = Config::default();
        let millis = FakeMillis::new(0);
        let mut clock = SystemClock::new(millis, None);
        let mut loop_ = c.build_sync_loop::<FakeMillis, _>(ScriptedSyncProvider::new([1_700_000_000]));

        loop_.tick(&mut clock);
        assert!(clock.is_initialized());
    }
}
