use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use tokio::runtime::Runtime;
use relayq::{MessageQueue, QueueRegistry};

/// Benchmark: Single-threaded enqueue operations
fn bench_enqueue_single_thread(c: &mut Criterion) {
    let mut group = c.benchmark_group("enqueue_single_thread");
    group.throughput(Throughput::Elements(1000));

    group.bench_function("1000_messages", |b| {
        let payload = serde_json::json!({"test": "data", "id": 123});

        b.iter(|| {
            let queue = MessageQueue::new("bench");
            for _ in 0..1000 {
                black_box(queue.enqueue(black_box(payload.clone())));
            }
        });
    });
    group.finish();
}

/// Benchmark: Enqueue/Dequeue round-trip latency
fn bench_roundtrip_latency(c: &mut Criterion) {
    let mut group = c.benchmark_group("roundtrip_latency");

    group.bench_function("enqueue_then_dequeue", |b| {
        let queue = MessageQueue::new("bench");
        let payload = serde_json::json!({"test": "data"});

        b.iter(|| {
            queue.enqueue(black_box(payload.clone()));
            black_box(queue.dequeue());
        });
    });

    group.finish();
}

/// Benchmark: Concurrent producers on one queue versus one queue each
fn bench_concurrent_producers(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("concurrent_producers");

    for num_producers in [2u64, 4, 8, 16].iter() {
        group.throughput(Throughput::Elements(*num_producers * 1000));

        for shared in [true, false] {
            let label = if shared { "same_queue" } else { "own_queue" };
            group.bench_with_input(
                BenchmarkId::new(label, num_producers),
                num_producers,
                |b, &num_producers| {
                    b.iter(|| {
                        rt.block_on(async {
                            let registry = Arc::new(QueueRegistry::new());
                            let payload = serde_json::json!({"test": "data"});

                            let mut handles = vec![];
                            for p in 0..num_producers {
                                let registry = registry.clone();
                                let payload = payload.clone();
                                let name = if shared { "bench".to_string() } else { format!("bench-{}", p) };

                                handles.push(tokio::spawn(async move {
                                    for _ in 0..1000 {
                                        registry.publish(&name, black_box(payload.clone()));
                                    }
                                }));
                            }

                            for handle in handles {
                                handle.await.unwrap();
                            }
                        });
                    });
                },
            );
        }
    }
    group.finish();
}

/// Benchmark: Concurrent consumers draining one queue
fn bench_concurrent_consumers(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("concurrent_consumers");

    for num_consumers in [2u64, 4, 8, 16].iter() {
        group.throughput(Throughput::Elements(*num_consumers * 1000));
        group.bench_with_input(
            BenchmarkId::from_parameter(num_consumers),
            num_consumers,
            |b, &num_consumers| {
                b.iter(|| {
                    rt.block_on(async {
                        let registry = Arc::new(QueueRegistry::new());
                        let payload = serde_json::json!({"test": "data"});

                        for _ in 0..(num_consumers * 1000) {
                            registry.publish("bench", payload.clone());
                        }

                        let mut handles = vec![];
                        for _ in 0..num_consumers {
                            let registry = registry.clone();
                            handles.push(tokio::spawn(async move {
                                for _ in 0..1000 {
                                    black_box(registry.consume("bench"));
                                }
                            }));
                        }

                        for handle in handles {
                            handle.await.unwrap();
                        }
                    });
                });
            },
        );
    }
    group.finish();
}

/// Benchmark: Message size impact
fn bench_message_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("message_sizes");

    for size in [100, 1000, 10000, 100000].iter() {
        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let queue = MessageQueue::new("bench");
            let payload = serde_json::json!({"data": "x".repeat(size)});

            b.iter(|| {
                queue.enqueue(black_box(payload.clone()));
                black_box(queue.dequeue());
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_enqueue_single_thread,
    bench_roundtrip_latency,
    bench_concurrent_producers,
    bench_concurrent_consumers,
    bench_message_sizes,
);

criterion_main!(benches);
