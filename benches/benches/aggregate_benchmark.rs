//! Aggregation and NDJSON decoding throughput.
//!
//! Run with: `cargo bench --package elokline-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use elokline_bench::{PLAYER, ndjson_body, synthetic_games};
use elokline_lib::{LineDecoder, RawGame, aggregate_daily};
use std::hint::black_box;

/// (days, games per day) pairs.
const SIZES: [(u32, u32); 3] = [(30, 10), (365, 10), (3650, 10)];

fn aggregate_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate_daily");

    for (days, per_day) in SIZES {
        let games = synthetic_games(days, per_day);
        group.throughput(Throughput::Elements(games.len() as u64));

        group.bench_with_input(BenchmarkId::from_parameter(days), &games, |b, games| {
            b.iter(|| aggregate_daily(black_box(games), PLAYER).unwrap());
        });
    }

    group.finish();
}

fn decode_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("ndjson_decode");

    for (days, per_day) in SIZES {
        let body = ndjson_body(&synthetic_games(days, per_day));
        group.throughput(Throughput::Bytes(body.len() as u64));

        // Network-sized chunks that split records at arbitrary offsets
        group.bench_with_input(BenchmarkId::from_parameter(days), &body, |b, body| {
            b.iter(|| {
                let mut decoder = LineDecoder::new();
                let mut games = 0usize;
                for chunk in body.chunks(16 * 1024) {
                    for line in decoder.push(chunk) {
                        let game: RawGame = serde_json::from_slice(&line.bytes).unwrap();
                        black_box(&game);
                        games += 1;
                    }
                }
                games
            });
        });
    }

    group.finish();
}

criterion_group!(benches, aggregate_benchmark, decode_benchmark);
criterion_main!(benches);
