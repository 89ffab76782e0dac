use core::hint::black_box;
use core::num::NonZeroU32;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use smyte_id::SmyteId;

// Number of ids processed per benchmark iteration.
const TOTAL_IDS: usize = 4096;

fn ids() -> Vec<SmyteId> {
    (0..TOTAL_IDS as i64)
        .map(|offset| {
            SmyteId::generate_from_offset(
                offset,
                SmyteId::TIMESTAMP_EPOCH + offset * 7,
                (offset % 1024) as u16,
            )
        })
        .collect()
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));
    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            for offset in 0..TOTAL_IDS as i64 {
                black_box(SmyteId::generate_from_offset(
                    black_box(offset),
                    black_box(SmyteId::TIMESTAMP_EPOCH + offset),
                    black_box(3),
                ));
            }
        });
    });
    group.finish();
}

fn bench_bytes(c: &mut Criterion) {
    let ids = ids();
    let mut group = c.benchmark_group("bytes");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));
    group.bench_function("encode", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(TOTAL_IDS * SmyteId::SIZE);
            for id in &ids {
                id.append_to(&mut out);
            }
            black_box(out)
        });
    });
    let encoded: Vec<[u8; SmyteId::SIZE]> = ids.iter().map(SmyteId::to_bytes).collect();
    group.bench_function("decode", |b| {
        b.iter(|| {
            for bytes in &encoded {
                black_box(SmyteId::from_bytes(black_box(bytes)).ok());
            }
        });
    });
    group.finish();
}

#[cfg(feature = "base32")]
fn bench_base32(c: &mut Criterion) {
    let ids = ids();
    let mut group = c.benchmark_group("base32");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));
    group.bench_function("encode_to_buf", |b| {
        let mut buf = SmyteId::base32_buf();
        b.iter(|| {
            for id in &ids {
                black_box(id.encode_to_buf(&mut buf));
            }
        });
    });
    let encoded: Vec<String> = ids.iter().map(SmyteId::encode).collect();
    group.bench_function("decode", |b| {
        b.iter(|| {
            for s in &encoded {
                black_box(SmyteId::decode(black_box(s)).ok());
            }
        });
    });
    group.finish();
}

#[cfg(not(feature = "base32"))]
fn bench_base32(_c: &mut Criterion) {}

fn bench_shard_index(c: &mut Criterion) {
    let ids = ids();
    let mut group = c.benchmark_group("shard_index");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));
    for shard_count in [16, 1000] {
        let count = NonZeroU32::new(shard_count).expect("non-zero");
        group.bench_function(format!("shards/{shard_count}"), |b| {
            b.iter(|| {
                for id in &ids {
                    black_box(id.shard_index(black_box(count)));
                    black_box(id.virtual_shard());
                }
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_generate,
    bench_bytes,
    bench_base32,
    bench_shard_index
);
criterion_main!(benches);
