// benches/access_patterns.rs

use std::io::{Read, Seek, SeekFrom, Write};
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use pooled_bytes::{LinearStream, ReverseStream, RingStream, SharedPool};
use rand::RngCore;

fn payload(size: usize) -> Vec<u8> {
    let mut data = vec![0u8; size];
    rand::rng().fill_bytes(&mut data);
    data
}

fn bench_linear_writes(c: &mut Criterion) {
    let sizes = vec![1_000, 10_000, 100_000];
    let pool = Arc::new(SharedPool::new());

    let mut group = c.benchmark_group("linear_writes");
    for size in sizes {
        let data = payload(size);

        group.bench_with_input(BenchmarkId::new("byte_at_a_time", size), &size, |b, _| {
            b.iter(|| {
                let mut s = LinearStream::with_pool(pool.clone(), 16);
                for &byte in &data {
                    s.write_byte(byte).unwrap();
                }
                black_box(s.len())
            });
        });

        group.bench_with_input(BenchmarkId::new("chunks_of_64", size), &size, |b, _| {
            b.iter(|| {
                let mut s = LinearStream::with_pool(pool.clone(), 16);
                for chunk in data.chunks(64) {
                    s.write_all(chunk).unwrap();
                }
                black_box(s.len())
            });
        });

        group.bench_with_input(BenchmarkId::new("presized", size), &size, |b, &s| {
            b.iter(|| {
                let mut stream = LinearStream::with_pool(pool.clone(), s);
                stream.write_all(&data).unwrap();
                black_box(stream.len())
            });
        });
    }
    group.finish();
}

fn bench_reverse_prepend(c: &mut Criterion) {
    let sizes = vec![1_000, 10_000, 100_000];
    let pool = Arc::new(SharedPool::new());

    let mut group = c.benchmark_group("reverse_prepend");
    for size in sizes {
        let data = payload(size);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let mut s = ReverseStream::with_pool(pool.clone(), 16);
                for chunk in data.chunks(64) {
                    s.write_from(chunk).unwrap();
                }
                black_box(s.len())
            });
        });
    }
    group.finish();
}

fn bench_ring_wrap(c: &mut Criterion) {
    let sizes = vec![1_000, 10_000, 100_000];

    let mut group = c.benchmark_group("ring_wrap");
    for size in sizes {
        let data = payload(size);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let mut ring = RingStream::new(4096).unwrap();
                for chunk in data.chunks(100) {
                    ring.write_all(chunk).unwrap();
                }
                black_box(ring.len())
            });
        });
    }
    group.finish();
}

fn bench_sequential_read(c: &mut Criterion) {
    let sizes = vec![1_000, 10_000, 100_000];

    let mut group = c.benchmark_group("sequential_read");
    for size in sizes {
        let mut stream = LinearStream::from_slice(&payload(size));
        let mut out = [0u8; 256];

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                stream.seek(SeekFrom::Start(0)).unwrap();
                let mut total = 0;
                loop {
                    let n = stream.read(&mut out).unwrap();
                    if n == 0 {
                        break;
                    }
                    total += n;
                }
                black_box(total)
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_linear_writes,
    bench_reverse_prepend,
    bench_ring_wrap,
    bench_sequential_read,
);
criterion_main!(benches);
