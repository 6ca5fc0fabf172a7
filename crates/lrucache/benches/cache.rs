use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use lrucache::LruCache;

fn bench_cached_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("cached_get");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_1kb_cached", |b| {
        let mut cache = LruCache::new(1000).unwrap();
        let data = vec![b'x'; 1024];

        // Pre-populate, all keys fit
        for key in 0..100u64 {
            cache.set(key, data.clone());
        }

        let mut counter = 0u64;
        b.iter(|| {
            black_box(cache.get(&(counter % 100)));
            counter += 1;
        });
    });

    group.finish();
}

fn bench_mixed_50_50(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("50_read_50_write", |b| {
        let mut cache = LruCache::new(1000).unwrap();
        let data = vec![b'x'; 1024];

        for key in 0..100u64 {
            cache.set(key, data.clone());
        }

        // Writes overwrite the same 100 keys, so every read stays a hit
        let mut counter = 0u64;
        b.iter(|| {
            let key = counter % 100;
            if counter % 2 == 0 {
                black_box(cache.get(&key));
            } else {
                cache.set(key, data.clone());
            }
            counter += 1;
        });
    });

    group.finish();
}

fn bench_cache_miss(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache_miss");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_miss_then_fill", |b| {
        let mut cache = LruCache::new(10).unwrap(); // Small cache
        let data = vec![b'x'; 1024];

        let mut counter = 0u64;
        b.iter(|| {
            // Cycling through 100 keys guarantees misses and evictions
            let key = counter % 100;
            if cache.get(&key).is_none() {
                cache.set(key, data.clone());
            }
            counter += 1;
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_cached_get,
    bench_mixed_50_50,
    bench_cache_miss
);
criterion_main!(benches);
