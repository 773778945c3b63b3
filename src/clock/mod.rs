//! System clock core: a monotonic-millis-driven `epoch_seconds` clock, its
//! sync loop, and an optional persisted backup.
pub mod backup;
pub mod provider;
pub mod sync;
pub mod system_clock;

pub use backup::{MemoryBackupKeeper, PersistedState};
pub use provider::{BackupKeeper, MillisSource, SyncProvider};
pub use sync::SyncLoop;
pub use system_clock::SystemClock;
