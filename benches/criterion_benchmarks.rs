use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ordered_lru::config::LruCacheConfig;
use ordered_lru::LruCache;

fn make_lru<K: Ord, V>(cap: usize) -> LruCache<K, V> {
    LruCache::init(LruCacheConfig { capacity: cap })
}

fn filled(cap: usize) -> LruCache<usize, usize> {
    let mut cache = make_lru(cap);
    for i in 0..cap {
        cache.insert(i, i);
    }
    cache
}

pub fn criterion_benchmark(c: &mut Criterion) {
    const CACHE_SIZE: usize = 1000;
    let mut group = c.benchmark_group("Cache Operations");

    {
        let mut cache = filled(CACHE_SIZE);

        group.bench_function("LRU find hit", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.find(&(i % CACHE_SIZE)));
                }
            });
        });

        group.bench_function("LRU find miss", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.find(&(i + CACHE_SIZE)));
                }
            });
        });

        group.bench_function("LRU peek", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.peek(&(i % CACHE_SIZE)));
                }
            });
        });
    }

    group.bench_function("LRU insert with eviction", |b| {
        let mut cache = filled(CACHE_SIZE);
        let mut next = CACHE_SIZE;
        b.iter(|| {
            for _ in 0..100 {
                black_box(cache.insert(next, next));
                next += 1;
            }
        });
    });

    group.bench_function("LRU duplicate insert", |b| {
        let mut cache = filled(CACHE_SIZE);
        b.iter(|| {
            for i in 0..100 {
                black_box(cache.insert(i, 0));
            }
        });
    });

    group.bench_function("LRU erase and reinsert", |b| {
        let mut cache = filled(CACHE_SIZE);
        b.iter(|| {
            for i in 0..100 {
                let at = cache.find(&i);
                let (k, v) = cache.erase(at);
                black_box(cache.insert(k, v));
            }
        });
    });

    group.finish();

    let mut group = c.benchmark_group("Ordered Traversal");
    for size in [100usize, 1_000, 10_000] {
        let cache = filled(size);

        group.bench_with_input(BenchmarkId::new("iter", size), &cache, |b, cache| {
            b.iter(|| black_box(cache.iter().map(|(k, _)| *k).sum::<usize>()));
        });

        group.bench_with_input(BenchmarkId::new("cursor walk", size), &cache, |b, cache| {
            b.iter(|| {
                let mut sum = 0usize;
                let mut at = cache.begin();
                while at != cache.end() {
                    sum += *cache.get(at).0;
                    at = cache.advance(at);
                }
                black_box(sum)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
