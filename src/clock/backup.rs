//! The backup keeper's on-wire record layout: `{ version: u8,
//! epoch_seconds: i32, crc: u32 }`, CRC trailing the payload rather than
//! leading it. The record's size tends to grow as fields are added, and a
//! trailing CRC means only the newly-added bytes see fresh write wear
//! instead of shifting every write onto a fixed CRC location at the front
//! of the block.
use crate::clock::provider::BackupKeeper;

const VERSION: u8 = 1;
const RECORD_LEN: usize = 1 + 4 + 4;

/// The decoded form of a backup record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistedState {
    pub version: u8,
    pub epoch_seconds: i32,
}

impl PersistedState {
    pub fn new(epoch_seconds: i32) -> Self {
        Self { version: VERSION, epoch_seconds }
    }

    /// Encode as `version || epoch_seconds || crc32(version || epoch_seconds)`,
    /// all integers little-endian.
    pub fn to_bytes(self) -> [u8; RECORD_LEN] {
        let mut buf = [0u8; RECORD_LEN];
        buf[0] = self.version;
        buf[1..5].copy_from_slice(&self.epoch_seconds.to_le_bytes());
        let crc = crc32fast::hash(&buf[..5]);
        buf[5..9].copy_from_slice(&crc.to_le_bytes());
        buf
    }

    /// Decode a record, rejecting it if the trailing CRC doesn't match the
    /// payload that precedes it (a torn or corrupted write).
    pub fn from_bytes(buf: &[u8]) -> Option<Self> {
        if buf.len() != RECORD_LEN {
            return None;
        }
        let crc = u32::from_le_bytes(buf[5..9].try_into().ok()?);
        if crc32fast::hash(&buf[..5]) != crc {
            return None;
        }
        let version = buf[0];
        let epoch_seconds = i32::from_le_bytes(buf[1..5].try_into().ok()?);
        Some(Self { version, epoch_seconds })
    }
}

/// An in-memory [`BackupKeeper`], standing in for the flash/EEPROM-backed
/// keeper a real deployment would use. Round-trips through
/// [`PersistedState::to_bytes`]/`from_bytes` so corruption handling is
/// exercised the same way it would be against real storage.
#[derive(Debug, Default)]
pub struct MemoryBackupKeeper {
    record: Option<[u8; RECORD_LEN]>,
}

impl BackupKeeper for MemoryBackupKeeper {
    fn save(&mut self, epoch_seconds: i32) {
        self.record = Some(PersistedState::new(epoch_seconds).to_bytes());
    }

    fn load(&self) -> Option<i32> {
        self.record.and_then(|r| PersistedState::from_bytes(&r)).map(|s| s.epoch_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_through_bytes() {
        let state = PersistedState::new(123_456_789);
        let bytes = state.to_bytes();
        assert_eq!(PersistedState::from_bytes(&bytes), Some(state));
    }

    #[test]
    fn rejects_corrupted_payload() {
        let mut bytes = PersistedState::new(42).to_bytes();
        bytes[1] ^= 0xFF;
        assert_eq!(PersistedState::from_bytes(&bytes), None);
    }

    #[test]
    fn memory_keeper_saves_and_loads() {
        let mut keeper = MemoryBackupKeeper::default();
        assert_eq!(keeper.load(), None);
        keeper.save(1_000);
        assert_eq!(keeper.load(), Some(1_000));
    }
}
