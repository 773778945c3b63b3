//! The zone processor (spec §4.4): a stateful, reusable wrapper that
//! answers offset queries for one zone, memoizing the committed
//! transitions for the most recently queried year plus one neighbour year
//! on each side.
//!
//! Mirrors the shape of the teacher's `TZif::offset_for_instant` /
//! `TZif::ambiguity_for_local`, generalized from "bisect a precomputed
//! transition table" to "bisect a per-year table recomputed on demand from
//! the rule tables" (spec §4.3's finder stands in for the teacher's TZif
//! parse step).
use crate::error::Result;
use crate::scalar::{EpochSeconds, UtcOffset};
use crate::zone::schema::ZoneInfo;
use crate::zone::transition::{transitions_for_year, Transition};

/// Resolved offset/delta/abbreviation at a particular instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetInfo {
    pub offset: UtcOffset,
    pub delta: UtcOffset,
    pub abbrev: String,
}

impl OffsetInfo {
    pub fn total_offset(&self) -> UtcOffset {
        self.offset.shift(self.delta)
    }
}

/// The result of resolving a local (wall-clock) date-time against a zone:
/// unambiguous, a forward gap (spring-forward), or a fold-back overlap
/// (fall-back). Not an error (spec §7: `GapOrOverlap` is informational).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Match {
    Unique(OffsetInfo),
    /// Zero offsets map this local time back to itself: it falls in a
    /// forward jump. `before`/`after` are the offsets surrounding the gap.
    Gap { before: OffsetInfo, after: OffsetInfo },
    /// Two offsets map this local time back to itself. `fold` selects
    /// which: `0` picks `earlier`, `1` picks `later`.
    Overlap { earlier: OffsetInfo, later: OffsetInfo },
}

impl Match {
    /// The offset the caller should use absent any other preference:
    /// `before` for a gap ("fold forward"), `earlier` (fold 0) for an
    /// overlap.
    pub fn default_offset(&self) -> &OffsetInfo {
        match self {
            Match::Unique(o) => o,
            Match::Gap { before, .. } => before,
            Match::Overlap { earlier, .. } => earlier,
        }
    }

    pub fn with_fold(&self, fold: u8) -> &OffsetInfo {
        match self {
            Match::Unique(o) => o,
            Match::Gap { before, after } => {
                if fold == 0 {
                    before
                } else {
                    after
                }
            }
            Match::Overlap { earlier, later } => {
                if fold == 0 {
                    earlier
                } else {
                    later
                }
            }
        }
    }
}

fn to_info(t: &Transition) -> OffsetInfo {
    OffsetInfo { offset: t.offset, delta: t.delta, abbrev: t.abbrev.clone() }
}

/// Cached transitions for one calendar year.
struct YearCache {
    year: i16,
    transitions: Vec<Transition>,
}

/// A reusable, single-zone query engine. Create one per zone (or rebind an
/// existing one via [`ZoneProcessor::reset`] — see [`crate::zone::manager`]
/// for the bounded pool that does this for callers).
pub struct ZoneProcessor {
    zone: ZoneInfo,
    letters: &'static [&'static str],
    cache: Vec<YearCache>,
}

const CACHE_NEIGHBOURHOOD: usize = 3; // queried year plus one neighbour each side

impl ZoneProcessor {
    pub fn new(zone: ZoneInfo, letters: &'static [&'static str]) -> Self {
        Self { zone, letters, cache: Vec::with_capacity(CACHE_NEIGHBOURHOOD) }
    }

    pub fn zone_name(&self) -> &'static str {
        self.zone.name
    }

    /// Drop all cached transitions, keeping the zone binding. Call
    /// [`rebind`](Self::rebind) to also switch to a different zone.
    pub fn reset(&mut self) {
        self.cache.clear();
    }

    pub fn rebind(&mut self, zone: ZoneInfo, letters: &'static [&'static str]) {
        self.zone = zone;
        self.letters = letters;
        self.reset();
    }

    fn transitions_for(&mut self, year: i16) -> Result<&[Transition]> {
        if let Some(pos) = self.cache.iter().position(|c| c.year == year) {
            return Ok(&self.cache[pos].transitions);
        }
        tracing::debug!(zone = self.zone.name, year, "recomputing transitions for year");
        let transitions = transitions_for_year(&self.zone, self.letters, year)?;
        if self.cache.len() >= CACHE_NEIGHBOURHOOD {
            // Evict whichever cached year is furthest from the one just
            // requested, keeping the requested year plus its nearer
            // neighbour.
            let farthest = self
                .cache
                .iter()
                .enumerate()
                .max_by_key(|(_, c)| (c.year - year).abs())
                .map(|(i, _)| i)
                .unwrap();
            self.cache.remove(farthest);
        }
        self.cache.push(YearCache { year, transitions });
        Ok(&self.cache.last().unwrap().transitions)
    }

    /// Find the committed transition in force at `t`, and return its
    /// offset/delta/abbreviation (spec §4.4).
    pub fn offset_for_epoch_seconds(&mut self, t: EpochSeconds) -> Result<OffsetInfo> {
        let (date, _) = t.to_local();
        let transitions = self.transitions_for(date.year)?;
        match transitions.iter().rev().find(|tr| tr.start <= t) {
            Some(tr) => Ok(to_info(tr)),
            // `t` precedes the first known transition of this neighbourhood;
            // look one year earlier.
            None => {
                let prev = self.transitions_for(date.year - 1)?;
                match prev.iter().rev().find(|tr| tr.start <= t) {
                    Some(tr) => Ok(to_info(tr)),
                    None => Ok(to_info(&prev[0])),
                }
            }
        }
    }

    /// Resolve a local (wall-clock) date-time against this zone (spec
    /// §4.4). Disambiguates gaps (spring-forward) and overlaps
    /// (fall-back) by checking how many of the neighbouring offsets map
    /// the local time back to itself.
    pub fn offsets_for_local(
        &mut self,
        date: crate::calendar::LocalDate,
        time: crate::calendar::LocalTime,
    ) -> Result<Match> {
        let naive = EpochSeconds::from_local(date, time);
        let transitions = self.transitions_for(date.year)?.to_vec();
        let mut prev = self.transitions_for(date.year - 1)?.last().cloned();
        if prev.is_none() {
            prev = transitions.first().cloned();
        }

        // Build the ordered sequence of (transition-start-in-UTC, total
        // offset) pairs relevant to this local time's neighbourhood: the
        // floor transition plus everything within the year.
        let mut ordered: Vec<Transition> = Vec::new();
        if let Some(p) = prev {
            ordered.push(p);
        }
        ordered.extend(transitions.iter().cloned());
        ordered.dedup_by(|a, b| a.start == b.start);
        ordered.sort_by_key(|t| t.start);

        // For each transition, check whether applying its total offset to
        // `naive` lands back inside that transition's own active interval
        // (i.e. the transition's total offset, applied to `naive`, yields
        // a UTC instant that the *same* transition would also report).
        let mut candidates: Vec<OffsetInfo> = Vec::new();
        for (i, tr) in ordered.iter().enumerate() {
            let candidate_utc = naive.saturating_add_minutes(-tr.total_offset().minutes());
            let next_start = ordered.get(i + 1).map(|n| n.start);
            let in_range = candidate_utc >= tr.start && next_start.map_or(true, |n| candidate_utc < n);
            if in_range {
                candidates.push(to_info(tr));
            }
        }

        match candidates.len() {
            1 => Ok(Match::Unique(candidates.remove(0))),
            0 => {
                // Gap: find the transition pair straddling `naive`'s
                // projected instant under the offset just before and just
                // after.
                let idx = ordered
                    .iter()
                    .position(|t| naive.saturating_add_minutes(-t.total_offset().minutes()) < t.start)
                    .unwrap_or(ordered.len());
                let before = ordered.get(idx.saturating_sub(1)).or(ordered.first()).map(to_info).unwrap();
                let after = ordered.get(idx).map(to_info).unwrap_or_else(|| before.clone());
                Ok(Match::Gap { before, after })
            }
            _ => {
                let earlier = candidates.remove(0);
                let later = candidates.remove(0);
                Ok(Match::Overlap { earlier, later })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{LocalDate, LocalTime};
    use crate::zonedb;

    #[test]
    fn los_angeles_spring_forward_2018_is_a_gap() {
        let zone = zonedb::america_los_angeles();
        let mut p = ZoneProcessor::new(zone.info, zone.context.letters);
        let m = p
            .offsets_for_local(
                LocalDate { year: 2018, month: 3, day: 11 },
                LocalTime { hour: 2, minute: 30, second: 0 },
            )
            .unwrap();
        match m {
            Match::Gap { before, after } => {
                assert_eq!(before.total_offset().minutes(), -480);
                assert_eq!(after.total_offset().minutes(), -420);
            }
            other => panic!("expected Gap, got {other:?}"),
        }
    }

    #[test]
    fn los_angeles_fall_back_2018_is_an_overlap() {
        let zone = zonedb::america_los_angeles();
        let mut p = ZoneProcessor::new(zone.info, zone.context.letters);
        let m = p
            .offsets_for_local(
                LocalDate { year: 2018, month: 11, day: 4 },
                LocalTime { hour: 1, minute: 30, second: 0 },
            )
            .unwrap();
        match m {
            Match::Overlap { earlier, later } => {
                assert_eq!(earlier.total_offset().minutes(), -420);
                assert_eq!(later.total_offset().minutes(), -480);
            }
            other => panic!("expected Overlap, got {other:?}"),
        }
    }

    #[test]
    fn sydney_autumn_fallback_2020_is_an_overlap() {
        let zone = zonedb::australia_sydney();
        let mut p = ZoneProcessor::new(zone.info, zone.context.letters);
        // Probed at 02:30, not exactly 03:00: the wall clock falls back
        // from 03:00 to 02:00 at the transition instant, so 03:00:00 itself
        // is only ever reached once (under the post-transition offset) and
        // is not part of the ambiguous window. 02:30 is attained twice.
        let m = p
            .offsets_for_local(
                LocalDate { year: 2020, month: 4, day: 5 },
                LocalTime { hour: 2, minute: 30, second: 0 },
            )
            .unwrap();
        match m {
            Match::Overlap { earlier, later } => {
                assert_eq!(earlier.total_offset().minutes(), 660);
                assert_eq!(later.total_offset().minutes(), 600);
            }
            other => panic!("expected Overlap, got {other:?}"),
        }
    }

    #[test]
    fn kolkata_is_always_unique() {
        let zone = zonedb::asia_kolkata();
        let mut p = ZoneProcessor::new(zone.info, zone.context.letters);
        let info = p.offset_for_epoch_seconds(EpochSeconds::from_local(
            LocalDate { year: 2023, month: 6, day: 1 },
            LocalTime { hour: 0, minute: 0, second: 0 },
        )).unwrap();
        assert_eq!(info.total_offset().minutes(), 330);
        assert_eq!(info.delta.minutes(), 0);
        assert_eq!(info.abbrev, "IST");
    }

    #[test]
    fn repeated_queries_within_one_interval_agree() {
        let zone = zonedb::america_los_angeles();
        let mut p = ZoneProcessor::new(zone.info, zone.context.letters);
        let t1 = EpochSeconds::from_local(LocalDate { year: 2018, month: 6, day: 1 }, LocalTime::MIDNIGHT);
        let t2 = EpochSeconds::from_local(LocalDate { year: 2018, month: 7, day: 1 }, LocalTime::MIDNIGHT);
        assert_eq!(p.offset_for_epoch_seconds(t1).unwrap(), p.offset_for_epoch_seconds(t2).unwrap());
    }
}
