use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use keyqueue::KeyQueue;

const SIZES: [u64; 3] = [1_000, 10_000, 100_000];

fn bench_move_to_tail(c: &mut Criterion) {
    let mut group = c.benchmark_group("move_to_tail");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    for size in SIZES {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut queue: KeyQueue<u64> = (0..size).collect();

            // Always touch the current head so the node comes from the far end
            b.iter(|| {
                let head = *queue.peek_head().unwrap();
                black_box(queue.move_to_tail(&head));
            });
        });
    }

    group.finish();
}

fn bench_remove_middle(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_middle");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    for size in SIZES {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut queue: KeyQueue<u64> = (0..size).collect();
            let middle = size / 2;

            b.iter(|| {
                black_box(queue.remove(&middle));
                queue.enqueue_tail(middle);
            });
        });
    }

    group.finish();
}

fn bench_rotate(c: &mut Criterion) {
    let mut group = c.benchmark_group("rotate");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("dequeue_enqueue_10k", |b| {
        let mut queue: KeyQueue<u64> = (0..10_000).collect();
        let mut next = 10_000u64;

        b.iter(|| {
            black_box(queue.dequeue_head());
            queue.enqueue_tail(next);
            next += 1;
        });
    });

    group.finish();
}

criterion_group!(benches, bench_move_to_tail, bench_remove_middle, bench_rotate);
criterion_main!(benches);
