//! Capability traits the system clock core depends on: a monotonic
//! millisecond source, a sync provider, and a backup keeper. Each is a
//! trait with default method bodies rather than a boxed virtual interface,
//! so callers that don't need the opt-out behavior pay nothing for it.

/// An injected source of monotonic milliseconds. The production binding
/// wraps the platform's monotonic clock; tests use a fake that advances on
/// command.
pub trait MillisSource {
    fn millis(&self) -> u32;
}

/// A blocking or asynchronous source of epoch seconds used to keep the
/// system clock correct over time (an NTP client, a GPS receiver, a user
/// prompt). Returns `0` to indicate failure.
///
/// `send_request`/`is_response_ready`/`read_response` support a
/// cooperative-coroutine pattern: a caller that can't block sends a
/// request, polls until ready, then reads the result. Providers that only
/// support the blocking `get_now` pattern can leave these at their
/// defaults, which make every request synchronously "ready".
pub trait SyncProvider {
    fn get_now(&mut self) -> u32;

    fn send_request(&mut self) {}

    fn is_response_ready(&self) -> bool {
        true
    }

    fn read_response(&mut self) -> u32 {
        self.get_now()
    }
}

/// Persists `epoch_seconds` across a reset, generalized from "EEPROM
/// block" to any store that can save/load a byte blob.
pub trait BackupKeeper {
    fn save(&mut self, epoch_seconds: i32);
    fn load(&self) -> Option<i32>;
}
