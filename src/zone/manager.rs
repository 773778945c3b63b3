//! Zone manager (spec §4.5): owns a small, bounded LRU cache of
//! [`ZoneProcessor`] slots so that repeated queries against a handful of
//! zones don't pay for transition recomputation on every call.
//!
//! The teacher's `tz::cache::TZifCache` solves the analogous problem with a
//! `VecDeque` of strong references plus a weak-reference lookup table, all
//! sized to avoid ever-growing memory in a long-running Python process.
//! AceTime's constraint is the opposite extreme (a fixed handful of bytes
//! on a microcontroller), so spec §4.5 and §9 call for an array with
//! integer generation bookkeeping rather than a linked structure; a
//! `Vec` used as a fixed-capacity most-recently-used list gets the same
//! effect without unsafe code.
use crate::error::Result;
use crate::zone::processor::ZoneProcessor;
use crate::zone::registry::ZoneRegistry;

struct Slot {
    zone_id: u32,
    processor: ZoneProcessor,
}

/// Owns `cache_size` [`ZoneProcessor`] slots, handing out a rebound
/// processor for whichever zone was most recently requested and evicting
/// the least-recently-used slot on a miss.
pub struct ZoneManager {
    registry: &'static ZoneRegistry,
    slots: Vec<Slot>,
    capacity: usize,
}

impl ZoneManager {
    /// `capacity` is the LRU's `cache_size` (spec §6's `cache_size N`
    /// configuration option, typically 1-4).
    pub fn new(registry: &'static ZoneRegistry, capacity: usize) -> Self {
        assert!(capacity >= 1, "zone manager needs at least one cache slot");
        Self { registry, slots: Vec::with_capacity(capacity), capacity }
    }

    /// Look up `name` and hand back a processor bound to it, promoting it
    /// to most-recently-used. Evicts the least-recently-used slot on a
    /// miss once the cache is full.
    pub fn get_processor_by_name(&mut self, name: &str) -> Result<&mut ZoneProcessor> {
        let zone = self.registry.find_by_name(name)?;
        let id = crate::zone::registry::zone_id(name);
        self.get_processor(id, zone)
    }

    pub fn get_processor_by_id(&mut self, id: u32) -> Result<&mut ZoneProcessor> {
        let zone = self.registry.find_by_id(id)?;
        self.get_processor(id, zone)
    }

    fn get_processor(&mut self, id: u32, zone: crate::zone::schema::ZoneInfo) -> Result<&mut ZoneProcessor> {
        if let Some(pos) = self.slots.iter().position(|s| s.zone_id == id) {
            tracing::trace!(zone = zone.name, "zone processor cache hit");
            let slot = self.slots.remove(pos);
            self.slots.push(slot);
            return Ok(&mut self.slots.last_mut().unwrap().processor);
        }

        tracing::debug!(zone = zone.name, "zone processor cache miss");
        if self.slots.len() >= self.capacity {
            // Evict the least-recently-used (front of the MRU-ordered
            // list) and rebind it to the new zone rather than allocating a
            // fresh processor.
            let mut lru = self.slots.remove(0);
            lru.processor.rebind(zone, self.registry.context.letters);
            lru.zone_id = id;
            self.slots.push(lru);
        } else {
            self.slots.push(Slot { zone_id: id, processor: ZoneProcessor::new(zone, self.registry.context.letters) });
        }
        Ok(&mut self.slots.last_mut().unwrap().processor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{LocalDate, LocalTime};
    use crate::scalar::EpochSeconds;

    #[test]
    fn cache_hit_reuses_the_same_processor_state() {
        crate::testing::init_test_logging();
        let registry = crate::zonedb::sample_registry_static();
        let mut mgr = ZoneManager::new(registry, 2);
        let t = EpochSeconds::from_local(LocalDate { year: 2020, month: 1, day: 1 }, LocalTime::MIDNIGHT);
        let a = mgr.get_processor_by_name("America/Los_Angeles").unwrap().offset_for_epoch_seconds(t).unwrap();
        let b = mgr.get_processor_by_name("America/Los_Angeles").unwrap().offset_for_epoch_seconds(t).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn eviction_kicks_out_the_least_recently_used_slot() {
        let registry = crate::zonedb::sample_registry_static();
        let mut mgr = ZoneManager::new(registry, 1);
        mgr.get_processor_by_name("America/Los_Angeles").unwrap();
        // With capacity 1, requesting a second zone must evict the first.
        let p = mgr.get_processor_by_name("Australia/Sydney").unwrap();
        assert_eq!(p.zone_name(), "Australia/Sydney");
        assert_eq!(mgr.slots.len(), 1);
    }

    #[test]
    fn link_and_target_agree_on_every_sampled_instant() {
        let registry = crate::zonedb::sample_registry_static();
        let mut mgr = ZoneManager::new(registry, 2);
        for year in 2018..=2021 {
            let t = EpochSeconds::from_local(LocalDate { year, month: 6, day: 1 }, LocalTime::MIDNIGHT);
            let a = mgr.get_processor_by_name("US/Pacific").unwrap().offset_for_epoch_seconds(t).unwrap();
            let b = mgr.get_processor_by_name("America/Los_Angeles").unwrap().offset_for_epoch_seconds(t).unwrap();
            assert_eq!(a, b, "mismatch in {year}");
        }
    }
}
