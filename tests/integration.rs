use acetime::calendar::{LocalDate, LocalTime};
use acetime::scalar::EpochSeconds;
use acetime::zone::ZoneProcessor;
use acetime::zonedb;
use acetime::{zoned_components_to_epoch_seconds, Disambiguation};

#[test]
fn los_angeles_spring_forward_2018() {
    let zone = zonedb::america_los_angeles();
    let mut p = ZoneProcessor::new(zone.info, zone.context.letters);
    let (_, disambiguation) = zoned_components_to_epoch_seconds(
        LocalDate { year: 2018, month: 3, day: 11 },
        LocalTime { hour: 2, minute: 30, second: 0 },
        &mut p,
        0,
    )
    .unwrap();
    assert_eq!(disambiguation, Disambiguation::Gap);

    let m = p
        .offsets_for_local(LocalDate { year: 2018, month: 3, day: 11 }, LocalTime { hour: 2, minute: 30, second: 0 })
        .unwrap();
    match m {
        acetime::zone::Match::Gap { before, after } => {
            assert_eq!(before.total_offset().minutes(), -480);
            assert_eq!(after.total_offset().minutes(), -420);
        }
        other => panic!("expected Gap, got {other:?}"),
    }
}

#[test]
fn los_angeles_fall_back_2018() {
    let zone = zonedb::america_los_angeles();
    let mut p = ZoneProcessor::new(zone.info, zone.context.letters);
    let (_, disambiguation) = zoned_components_to_epoch_seconds(
        LocalDate { year: 2018, month: 11, day: 4 },
        LocalTime { hour: 1, minute: 30, second: 0 },
        &mut p,
        0,
    )
    .unwrap();
    assert!(matches!(disambiguation, Disambiguation::OverlapEarlier));
}

#[test]
fn sydney_autumn_fallback_2020_is_an_overlap_of_plus_660_and_plus_600() {
    let zone = zonedb::australia_sydney();
    let mut p = ZoneProcessor::new(zone.info, zone.context.letters);
    let m = p
        .offsets_for_local(LocalDate { year: 2020, month: 4, day: 5 }, LocalTime { hour: 2, minute: 30, second: 0 })
        .unwrap();
    match m {
        acetime::zone::Match::Overlap { earlier, later } => {
            assert_eq!(earlier.total_offset().minutes(), 660);
            assert_eq!(later.total_offset().minutes(), 600);
        }
        other => panic!("expected Overlap, got {other:?}"),
    }
}

#[test]
fn kolkata_fractional_offset_is_stable_at_any_epoch() {
    let zone = zonedb::asia_kolkata();
    let mut p = ZoneProcessor::new(zone.info, zone.context.letters);
    for (year, month, day) in [(1980, 1, 1), (2000, 6, 15), (2087, 12, 31)] {
        let t = EpochSeconds::from_local(LocalDate { year, month, day }, LocalTime::MIDNIGHT);
        let info = p.offset_for_epoch_seconds(t).unwrap();
        assert_eq!(info.offset.minutes(), 330);
        assert_eq!(info.delta.minutes(), 0);
        assert_eq!(info.abbrev, "IST");
    }
}

#[test]
fn london_historical_pre_epoch_uses_the_literal_gmt_era() {
    let zone = zonedb::europe_london();
    let mut p = ZoneProcessor::new(zone.info, zone.context.letters);
    let t = EpochSeconds::from_local(LocalDate { year: 1968, month: 2, day: 18 }, LocalTime::MIDNIGHT);
    let info = p.offset_for_epoch_seconds(t).unwrap();
    assert_eq!(info.offset.minutes(), 0);
    assert_eq!(info.abbrev, "GMT");
}

#[test]
fn london_modern_era_renders_a_numeric_offset() {
    let zone = zonedb::europe_london();
    let mut p = ZoneProcessor::new(zone.info, zone.context.letters);
    let t = EpochSeconds::from_local(LocalDate { year: 2023, month: 1, day: 1 }, LocalTime::MIDNIGHT);
    let info = p.offset_for_epoch_seconds(t).unwrap();
    assert_eq!(info.abbrev, "+0000");
    let summer = EpochSeconds::from_local(LocalDate { year: 2023, month: 7, day: 1 }, LocalTime::MIDNIGHT);
    let summer_info = p.offset_for_epoch_seconds(summer).unwrap();
    assert_eq!(summer_info.total_offset().minutes(), 60);
    assert_eq!(summer_info.abbrev, "+0100");
}

#[test]
fn us_pacific_link_agrees_with_america_los_angeles_for_every_sampled_instant() {
    let registry = zonedb::sample_registry();
    let link = registry.find_by_name("US/Pacific").unwrap();
    let target = registry.find_by_name("America/Los_Angeles").unwrap();
    assert_eq!(link.eras.as_ptr(), target.eras.as_ptr());

    let zone = zonedb::america_los_angeles();
    let mut link_p = ZoneProcessor::new(link, zone.context.letters);
    let mut target_p = ZoneProcessor::new(target, zone.context.letters);
    for year in (1980..=2200).step_by(17) {
        let t = EpochSeconds::from_local(LocalDate { year, month: 6, day: 1 }, LocalTime::MIDNIGHT);
        assert_eq!(
            link_p.offset_for_epoch_seconds(t).unwrap(),
            target_p.offset_for_epoch_seconds(t).unwrap(),
            "mismatch in {year}"
        );
    }
}

#[test]
fn epoch_day_literal_scenarios() {
    assert_eq!(acetime::calendar::to_epoch_days(LocalDate { year: 2000, month: 1, day: 1 }), 0);
    assert_eq!(acetime::calendar::to_epoch_days(LocalDate { year: 1970, month: 1, day: 1 }), -10_957);
    assert_eq!(acetime::calendar::to_epoch_days(LocalDate { year: 2100, month: 2, day: 28 }), 36_584);
}
