//! Benchmarks for the accumulate-then-swap hot path
//!
//! These benchmarks verify that:
//! 1. Appending is constant time plus the push itself
//! 2. The flush swap is O(1) regardless of batch size
//! 3. Bulk appends don't regress against repeated single appends

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use rivulet_messaging::{FlushPolicy, MessageBuffer, TaskMessage};

/// Build a message with a payload of the given size
fn message(size: usize) -> TaskMessage {
    TaskMessage::new(1, vec![0xABu8; size])
}

/// Benchmark steady-state accumulation with periodic flushes
fn bench_add_flush_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_flush_cycle");

    for payload_size in [64, 1024] {
        let msg = message(payload_size);

        group.throughput(Throughput::Elements(1000));
        group.bench_function(format!("{}b_payload", payload_size), |b| {
            b.iter(|| {
                let mut buffer = MessageBuffer::new(64 * 1024).unwrap();
                for _ in 0..1000 {
                    if let Some(batch) = buffer.add(msg.clone(), FlushPolicy::FlushOnFull) {
                        black_box(batch);
                    }
                }
                black_box(buffer.drain())
            })
        });
    }

    group.finish();
}

/// Benchmark bulk append against the same load as single appends
fn bench_add_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_all");

    let msgs: Vec<TaskMessage> = (0..500).map(|_| message(100)).collect();

    group.throughput(Throughput::Elements(500));
    group.bench_function("burst_500", |b| {
        b.iter(|| {
            let mut buffer = MessageBuffer::new(1024 * 1024).unwrap();
            black_box(buffer.add_all(msgs.clone(), FlushPolicy::FlushOnFull));
            black_box(buffer.drain())
        })
    });

    group.bench_function("single_500", |b| {
        b.iter(|| {
            let mut buffer = MessageBuffer::new(1024 * 1024).unwrap();
            for msg in msgs.clone() {
                black_box(buffer.add(msg, FlushPolicy::FlushOnFull));
            }
            black_box(buffer.drain())
        })
    });

    group.finish();
}

/// Benchmark the swap itself by flushing every append
fn bench_swap(c: &mut Criterion) {
    let msg = message(64);

    c.bench_function("flush_every_append", |b| {
        b.iter(|| {
            let mut buffer = MessageBuffer::new(1).unwrap();
            for _ in 0..100 {
                let batch = buffer.add(msg.clone(), FlushPolicy::FlushOnFull);
                black_box(batch);
            }
        })
    });
}

criterion_group!(benches, bench_add_flush_cycle, bench_add_all, bench_swap);

criterion_main!(benches);
