use catbench_core::concat;
use catbench_core::fixture::Fixture;
use catbench_core::perf::cases;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

// The six fixed-name registrations over the canonical fixture. The routines
// are called directly so every case pays the same (direct) call cost.
fn bench_concat_strategies(c: &mut Criterion) {
    let fixture = Fixture::canonical();

    c.bench_function("naive", |b| b.iter(|| black_box(concat::naive(fixture))));

    c.bench_function("append", |b| b.iter(|| black_box(concat::append(fixture))));

    c.bench_function("appendWithReserve", |b| {
        b.iter(|| black_box(concat::append_with_reserve(fixture)))
    });

    c.bench_function("format", |b| b.iter(|| black_box(concat::format(fixture))));

    c.bench_function("format_to", |b| {
        b.iter(|| {
            let mut out = String::new();
            concat::format_to(fixture, &mut out);
            black_box(out);
        })
    });

    // Timer/loop floor: no work beyond the per-iteration barrier.
    c.bench_function("nullop", |b| {
        b.iter(|| concat::nullop(black_box(fixture)))
    });
}

// How the ranking shifts as the five values grow from short labels to
// kilobyte payloads.
fn bench_payload_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("concat_scaling");

    for len in [5_usize, 64, 1024] {
        let fixture = Fixture::with_value_len(len);
        group.throughput(Throughput::Bytes(fixture.expected().len() as u64));

        for case in cases::concat_cases() {
            group.bench_with_input(BenchmarkId::new(case.key(), len), &fixture, |b, fixture| {
                b.iter(|| black_box(case.build(fixture)));
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_concat_strategies, bench_payload_scaling);
criterion_main!(benches);
