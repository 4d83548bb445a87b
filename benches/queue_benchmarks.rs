//! Queue Performance Benchmarks
//!
//! Measures enqueue/dequeue throughput of the engine, command parsing
//! overhead through the gateway, and contention with several producers.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use std::sync::Arc;
use std::thread;

use pmq::gateway::{ChannelHandle, CommandGateway};
use pmq::queue::{PriorityMessageQueue, QueueConfig};

/// Fill then empty the queue with a mix of high and normal messages
fn bench_enqueue_dequeue(c: &mut Criterion) {
    let mut group = c.benchmark_group("enqueue_dequeue");

    for count in [100usize, 1_000, 10_000] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("messages", count), &count, |b, &count| {
            let queue = PriorityMessageQueue::default();
            b.iter(|| {
                for i in 0..count {
                    queue.enqueue(i as i32, (i % 10) as i32, "benchmark payload").unwrap();
                }
                while let Ok(message) = queue.dequeue() {
                    black_box(message);
                }
            });
        });
    }

    group.finish();
}

/// Same workload driven through textual commands
fn bench_gateway_commands(c: &mut Criterion) {
    let config = QueueConfig::default();
    let queue = Arc::new(PriorityMessageQueue::from_config(&config));
    let mut channel = ChannelHandle::new(Arc::new(CommandGateway::new(queue, &config)));
    let commands: Vec<String> = (0..1_000)
        .map(|i| format!("S {} {} gateway payload {}", i, i % 10, i))
        .collect();

    let mut group = c.benchmark_group("gateway_commands");
    group.throughput(Throughput::Elements(commands.len() as u64));
    group.bench_function("send_then_receive", |b| {
        b.iter(|| {
            for command in &commands {
                channel.write_command(command.as_bytes()).unwrap();
            }
            for _ in 0..commands.len() {
                black_box(channel.write_command(b"R").unwrap());
            }
        });
    });
    group.finish();
}

/// Several producers contending for the guard
fn bench_concurrent_producers(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_producers");
    let per_producer = 2_000usize;

    for producers in [2usize, 4, 8] {
        group.throughput(Throughput::Elements((producers * per_producer) as u64));
        group.bench_with_input(BenchmarkId::new("producers", producers), &producers, |b, &producers| {
            b.iter(|| {
                let queue = Arc::new(PriorityMessageQueue::default());
                let handles: Vec<_> = (0..producers)
                    .map(|p| {
                        let queue = Arc::clone(&queue);
                        thread::spawn(move || {
                            for i in 0..per_producer {
                                queue.enqueue(p as i32, (i % 10) as i32, "contended").unwrap();
                            }
                        })
                    })
                    .collect();
                for handle in handles {
                    handle.join().unwrap();
                }
                black_box(queue.drain());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_enqueue_dequeue, bench_gateway_commands, bench_concurrent_producers);
criterion_main!(benches);
