//! The transition finder (spec §4.3): enumerates the committed
//! `(offset, delta, abbreviation)` changes for a zone within a query year.
//!
//! This is the algorithmic heart of the crate — the same role
//! `tz::tzif::parse_content`'s `offsets_by_utc`/`offsets_by_local`
//! construction plays in the teacher, except transitions are derived from
//! live zone-era/rule tables on every query instead of once from a parsed
//! TZif blob, since AceTime's tables encode *rules*, not precomputed
//! transition instants.
use crate::calendar::{LocalDate, LocalTime};
use crate::error::{Error, Result};
use crate::scalar::{EpochSeconds, UtcOffset};
use crate::zone::schema::{TimeModifier, ZoneEra, ZoneInfo, ZoneRule};

/// Maximum number of committed transitions considered concurrently for one
/// zone (spec §4.3 observes at most 7 across the full TZDB 1980-2200).
pub const MAX_TRANSITIONS: usize = 8;

/// A committed transition: from `start` onwards, `(offset, delta, abbrev)`
/// hold until the next transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub start: EpochSeconds,
    pub offset: UtcOffset,
    pub delta: UtcOffset,
    pub abbrev: String,
}

impl Transition {
    pub fn total_offset(&self) -> UtcOffset {
        self.offset.shift(self.delta)
    }
}

/// One not-yet-committed candidate transition, tagged with enough state to
/// resolve its wall/standard/UTC AT time once the previously committed
/// transition is known.
struct Candidate<'a> {
    wall_date: LocalDate,
    wall_minutes: i32,
    modifier: TimeModifier,
    era: &'a ZoneEra,
    delta_minutes: i32,
    letter: &'a str,
    is_era_boundary: bool,
}

fn era_letter<'a>(ctx_letters: &'a [&'static str], idx: Option<u8>) -> &'a str {
    match idx {
        None => "",
        Some(i) => ctx_letters.get(i as usize).copied().unwrap_or(""),
    }
}

/// Era active-interval boundaries: `start` is the previous era's UNTIL (or
/// `None` for the very first era, meaning unbounded in the past); `end` is
/// this era's own UNTIL (or `None` for the open-ended final era).
struct EraSpan<'a> {
    era: &'a ZoneEra,
    start: Option<EpochSeconds>,
    end: Option<EpochSeconds>,
}

fn era_until_instant(era: &ZoneEra, prior_offset: UtcOffset, prior_delta: UtcOffset) -> EpochSeconds {
    let date = LocalDate { year: era.until_year(), month: era.until_month, day: era.until_day };
    resolve_at(date, era.until_time_code, era.until_time_modifier, prior_offset, prior_delta)
}

/// Resolve a wall/standard/UTC-anchored AT time to a UTC instant, given the
/// offset/delta that were in force just before this transition (spec
/// §4.3 step 3).
fn resolve_at(
    nominal_date: LocalDate,
    time_code: crate::zone::schema::TimeCode,
    modifier: TimeModifier,
    prior_offset: UtcOffset,
    prior_delta: UtcOffset,
) -> EpochSeconds {
    let (extra_days, minutes) = time_code.resolve();
    let epoch_days = crate::scalar::EpochDays::from_date(nominal_date).get() + extra_days;
    let naive = EpochSeconds::new(crate::calendar::days_and_seconds_to_epoch_seconds(epoch_days, minutes * 60));
    match modifier {
        TimeModifier::Utc => naive,
        TimeModifier::Standard => naive.saturating_add_minutes(-prior_offset.minutes()),
        TimeModifier::Wall => {
            naive.saturating_add_minutes(-(prior_offset.minutes() + prior_delta.minutes()))
        }
    }
}

/// Collect the eras of `zone` that could contribute a transition within
/// `[from_year, to_year]` inclusive, along with their active-interval
/// boundaries.
fn active_era_spans(zone: &ZoneInfo, from_year: i16, to_year: i16) -> Vec<EraSpan<'_>> {
    let mut spans = Vec::new();
    let mut prev_until: Option<EpochSeconds> = None;
    for (i, era) in zone.eras.iter().enumerate() {
        let end = if era.is_open_ended() {
            None
        } else {
            // The UNTIL instant depends on the offset in force just before
            // it, which is this era's own (offset, fixed-or-zero delta) —
            // the era boundary itself carries no DST, only the rules that
            // follow it do.
            Some(era_until_instant(era, era.offset(), UtcOffset::ZERO))
        };
        let start = prev_until;
        let year_start = EpochSeconds::from_local(LocalDate { year: from_year, month: 1, day: 1 }, LocalTime::MIDNIGHT);
        let year_end = EpochSeconds::from_local(LocalDate { year: to_year + 1, month: 1, day: 1 }, LocalTime::MIDNIGHT);
        let intersects = end.map_or(true, |e| e > year_start) && start.map_or(true, |s| s < year_end);
        if intersects {
            spans.push(EraSpan { era, start, end });
        }
        prev_until = end;
        let _ = i;
    }
    spans
}

/// Generate every candidate transition touching `[from_year, to_year]` for
/// one era, including the era's own boundary transition if it starts
/// within the window.
fn candidates_for_era<'a>(
    span: &EraSpan<'a>,
    ctx_letters: &'a [&'static str],
    from_year: i16,
    to_year: i16,
) -> Vec<Candidate<'a>> {
    let mut out = Vec::new();
    if let Some(start) = span.start {
        let (date, time) = start.to_local();
        out.push(Candidate {
            wall_date: date,
            wall_minutes: time.seconds_since_midnight() / 60,
            modifier: TimeModifier::Utc,
            era: span.era,
            delta_minutes: 0,
            letter: "",
            is_era_boundary: true,
        });
    }
    if let Some(policy) = span.era.policy {
        for rule in policy.rules {
            for year in from_year..=to_year {
                if rule.active_in_year(year) {
                    out.push(candidate_from_rule(span.era, rule, year, ctx_letters));
                }
            }
        }
    }
    out
}

fn candidate_from_rule<'a>(era: &'a ZoneEra, rule: &ZoneRule, year: i16, ctx_letters: &'a [&'static str]) -> Candidate<'a> {
    let nominal = rule.transition_date(year);
    let (extra_days, minutes) = rule.at_time_code.resolve();
    let date = if extra_days != 0 {
        (crate::scalar::EpochDays::from_date(nominal) + extra_days).date()
    } else {
        nominal
    };
    Candidate {
        wall_date: date,
        wall_minutes: minutes,
        modifier: rule.at_time_modifier,
        era,
        delta_minutes: rule.delta_minutes(),
        letter: era_letter(ctx_letters, rule.letter_index),
        is_era_boundary: false,
    }
}

/// Compute every committed transition whose effective instant falls within
/// `[from_year, to_year]` (inclusive), in ascending order.
pub fn compute_transitions(
    zone: &ZoneInfo,
    ctx_letters: &[&'static str],
    from_year: i16,
    to_year: i16,
) -> Result<Vec<Transition>> {
    let spans = active_era_spans(zone, from_year, to_year);
    let mut candidates: Vec<(EpochSeconds, Candidate)> = Vec::new();

    for span in &spans {
        // Running state: the offset/delta in force just before the
        // earliest not-yet-committed candidate of *this* era. The base
        // offset is constant for the whole era; the delta resets to the
        // era's fixed value (or zero, for a ruled era) at the era's own
        // start and then tracks whichever rule most recently committed.
        let era_offset = span.era.offset();
        let mut running_delta = if span.era.policy.is_none() {
            UtcOffset::from_minutes(span.era.fixed_delta_minutes())
        } else {
            UtcOffset::ZERO
        };

        let mut era_candidates = candidates_for_era(span, ctx_letters, from_year, to_year);
        // Resolve strictly in ascending nominal-date order: spec §4.3 step
        // 3 requires each Wall/Standard AT to be converted using the
        // offset/delta "in force just before" it, i.e. whatever the most
        // recently committed transition within this era left behind, not
        // just the era's starting delta. `candidates_for_era` emits rules
        // grouped by rule-then-year, not chronologically, so this must be
        // sorted before the left-to-right dependency can be resolved.
        era_candidates.sort_by_key(|c| (crate::scalar::EpochDays::from_date(c.wall_date).get(), c.wall_minutes));

        for cand in era_candidates {
            let naive_offset = if cand.is_era_boundary { UtcOffset::ZERO } else { era_offset };
            let naive_delta = if cand.is_era_boundary { UtcOffset::ZERO } else { running_delta };
            let epoch_days = crate::scalar::EpochDays::from_date(cand.wall_date).get();
            let naive =
                EpochSeconds::new(crate::calendar::days_and_seconds_to_epoch_seconds(epoch_days, cand.wall_minutes * 60));
            let tentative = match cand.modifier {
                TimeModifier::Utc => naive,
                TimeModifier::Standard => naive.saturating_add_minutes(-naive_offset.minutes()),
                TimeModifier::Wall => naive.saturating_add_minutes(-(naive_offset.minutes() + naive_delta.minutes())),
            };
            if !cand.is_era_boundary {
                running_delta = UtcOffset::from_minutes(cand.delta_minutes);
            }
            candidates.push((tentative, cand));
        }
    }

    // Stable sort by tentative UTC instant; ties: rules precede era
    // boundaries (spec §4.3 step 3).
    candidates.sort_by(|a, b| a.0.cmp(&b.0).then((a.1.is_era_boundary).cmp(&b.1.is_era_boundary)));
    // Collapse same-instant ties, keeping the first (a rule, if any beats
    // an era boundary per the ordering above).
    candidates.dedup_by(|a, b| a.0 == b.0);

    if candidates.len() > MAX_TRANSITIONS * 4 {
        // A year's raw candidate pool can be larger than the committed
        // count; the hard cap applies to the *committed* result returned
        // to callers (see transitions_for_year). This generous multiple
        // only guards against genuinely corrupt tables.
        return Err(Error::BufferOverflow);
    }

    let mut result = Vec::with_capacity(candidates.len());
    for (start, cand) in candidates {
        let offset = cand.era.offset();
        let delta = UtcOffset::from_minutes(cand.delta_minutes);
        let abbrev = crate::zone::schema::render_format(cand.era.format, cand.letter, offset);
        result.push(Transition { start, offset, delta, abbrev });
    }
    Ok(result)
}

/// Compute the transitions needed to answer any query within `year`: the
/// transitions strictly inside `year` plus the one most recent transition
/// at or before the start of `year` (the "floor", covering queries at the
/// very start of the year).
pub fn transitions_for_year(zone: &ZoneInfo, ctx_letters: &[&'static str], year: i16) -> Result<Vec<Transition>> {
    let all = compute_transitions(zone, ctx_letters, year - 1, year + 1)?;
    let year_start = EpochSeconds::from_local(LocalDate { year, month: 1, day: 1 }, LocalTime::MIDNIGHT);
    let next_year_start = EpochSeconds::from_local(LocalDate { year: year + 1, month: 1, day: 1 }, LocalTime::MIDNIGHT);

    let mut result = Vec::new();
    if let Some(floor) = all.iter().rev().find(|t| t.start <= year_start) {
        result.push(floor.clone());
    }
    for t in &all {
        if t.start > year_start && t.start < next_year_start {
            result.push(t.clone());
        }
    }
    if result.is_empty() {
        // No transition at all before the year started: fall back to the
        // era active at year start with no delta (spec §4.4).
        if let Some(span) = active_era_spans(zone, year, year).into_iter().next() {
            result.push(Transition {
                start: EpochSeconds::MIN,
                offset: span.era.offset(),
                delta: UtcOffset::from_minutes(if span.era.policy.is_none() { span.era.fixed_delta_minutes() } else { 0 }),
                abbrev: crate::zone::schema::render_format(span.era.format, "", span.era.offset()),
            });
        }
    }
    if result.len() > MAX_TRANSITIONS {
        return Err(Error::BufferOverflow);
    }
    // Strictly monotonic in start_epoch_seconds (spec §8 testable property).
    debug_assert!(result.windows(2).all(|w| w[0].start < w[1].start));
    Ok(result)
}
