use acetime::calendar::{LocalDate, LocalTime};
use acetime::scalar::EpochSeconds;
use acetime::zone::ZoneProcessor;
use acetime::zonedb;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_epoch_days_roundtrip(c: &mut Criterion) {
    let date = black_box(LocalDate { year: 2023, month: 6, day: 15 });
    c.bench_function("to_epoch_days", |b| {
        b.iter(|| black_box(acetime::calendar::to_epoch_days(date)))
    });
}

fn bench_offset_for_epoch_seconds(c: &mut Criterion) {
    let zone = zonedb::america_los_angeles();
    let mut processor = ZoneProcessor::new(zone.info, zone.context.letters);
    let t = EpochSeconds::from_local(LocalDate { year: 2023, month: 6, day: 15 }, LocalTime::MIDNIGHT);
    c.bench_function("offset_for_epoch_seconds/cached_year", |b| {
        b.iter(|| black_box(processor.offset_for_epoch_seconds(black_box(t)).unwrap()))
    });
}

fn bench_offsets_for_local_near_dst_boundary(c: &mut Criterion) {
    let zone = zonedb::america_los_angeles();
    let mut processor = ZoneProcessor::new(zone.info, zone.context.letters);
    let date = black_box(LocalDate { year: 2018, month: 3, day: 11 });
    let time = black_box(LocalTime { hour: 2, minute: 30, second: 0 });
    c.bench_function("offsets_for_local/spring_forward_gap", |b| {
        b.iter(|| black_box(processor.offsets_for_local(date, time).unwrap()))
    });
}

criterion_group!(
    benches,
    bench_epoch_days_roundtrip,
    bench_offset_for_epoch_seconds,
    bench_offsets_for_local_near_dst_boundary
);
criterion_main!(benches);
