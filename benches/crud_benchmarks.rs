use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::{BTreeMap, BTreeSet};
use yama_tree::{AvlMap, AvlSet};

const N: usize = 10_000;

// ─── Key sequence generators ────────────────────────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn reverse_ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).rev().collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Simple LCG for a deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

fn key_patterns() -> [(&'static str, Vec<i64>); 3] {
    [
        ("ordered", ordered_keys(N)),
        ("reverse", reverse_ordered_keys(N)),
        ("random", random_keys(N)),
    ]
}

// ─── Map Benchmarks ─────────────────────────────────────────────────────────

fn bench_map_insert(c: &mut Criterion) {
    let patterns = key_patterns();
    let mut group = c.benchmark_group("map_insert");

    for (pattern, keys) in &patterns {
        group.bench_with_input(BenchmarkId::new("AvlMap", pattern), keys, |b, keys| {
            b.iter(|| {
                let mut map = AvlMap::new();
                for &k in keys {
                    map.insert(k, k);
                }
                map
            });
        });

        group.bench_with_input(BenchmarkId::new("BTreeMap", pattern), keys, |b, keys| {
            b.iter(|| {
                let mut map = BTreeMap::new();
                for &k in keys {
                    map.insert(k, k);
                }
                map
            });
        });
    }

    group.finish();
}

fn bench_map_get(c: &mut Criterion) {
    let patterns = key_patterns();
    let mut group = c.benchmark_group("map_get");

    for (pattern, keys) in &patterns {
        let avl_map: AvlMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
        let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

        group.bench_with_input(BenchmarkId::new("AvlMap", pattern), keys, |b, keys| {
            b.iter(|| {
                let mut sum = 0i64;
                for k in keys {
                    if let Some(&v) = avl_map.get(k) {
                        sum = sum.wrapping_add(v);
                    }
                }
                sum
            });
        });

        group.bench_with_input(BenchmarkId::new("BTreeMap", pattern), keys, |b, keys| {
            b.iter(|| {
                let mut sum = 0i64;
                for k in keys {
                    if let Some(&v) = bt_map.get(k) {
                        sum = sum.wrapping_add(v);
                    }
                }
                sum
            });
        });
    }

    group.finish();
}

fn bench_map_remove(c: &mut Criterion) {
    let patterns = key_patterns();
    let mut group = c.benchmark_group("map_remove");

    for (pattern, keys) in &patterns {
        group.bench_with_input(BenchmarkId::new("AvlMap", pattern), keys, |b, keys| {
            b.iter_batched(
                || keys.iter().map(|&k| (k, k)).collect::<AvlMap<i64, i64>>(),
                |mut map| {
                    for k in keys {
                        map.remove(k);
                    }
                    map
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("BTreeMap", pattern), keys, |b, keys| {
            b.iter_batched(
                || keys.iter().map(|&k| (k, k)).collect::<BTreeMap<i64, i64>>(),
                |mut map| {
                    for k in keys {
                        map.remove(k);
                    }
                    map
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_map_iterate(c: &mut Criterion) {
    let keys = random_keys(N);
    let avl_map: AvlMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

    let mut group = c.benchmark_group("map_iterate");

    group.bench_function(BenchmarkId::new("AvlMap", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for (_, &v) in avl_map.iter() {
                sum = sum.wrapping_add(v);
            }
            sum
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for (_, &v) in bt_map.iter() {
                sum = sum.wrapping_add(v);
            }
            sum
        });
    });

    group.finish();
}

/// Steady-state churn: every key is removed and reinserted, so each iteration
/// pays the full rebalancing cost of a delete and an insert at constant size.
fn bench_map_churn(c: &mut Criterion) {
    let keys = random_keys(N);

    let mut group = c.benchmark_group("map_churn");

    group.bench_function(BenchmarkId::new("AvlMap", N), |b| {
        let mut map: AvlMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
        b.iter(|| {
            for &k in &keys {
                map.remove(&k);
                map.insert(k, k);
            }
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        let mut map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
        b.iter(|| {
            for &k in &keys {
                map.remove(&k);
                map.insert(k, k);
            }
        });
    });

    group.finish();
}

// ─── Set Benchmarks ─────────────────────────────────────────────────────────

fn bench_set_insert(c: &mut Criterion) {
    let patterns = key_patterns();
    let mut group = c.benchmark_group("set_insert");

    for (pattern, keys) in &patterns {
        group.bench_with_input(BenchmarkId::new("AvlSet", pattern), keys, |b, keys| {
            b.iter(|| {
                let mut set = AvlSet::new();
                for &k in keys {
                    set.insert(k);
                }
                set
            });
        });

        group.bench_with_input(BenchmarkId::new("BTreeSet", pattern), keys, |b, keys| {
            b.iter(|| {
                let mut set = BTreeSet::new();
                for &k in keys {
                    set.insert(k);
                }
                set
            });
        });
    }

    group.finish();
}

fn bench_set_contains(c: &mut Criterion) {
    let patterns = key_patterns();
    let mut group = c.benchmark_group("set_contains");

    for (pattern, keys) in &patterns {
        let avl_set: AvlSet<i64> = keys.iter().copied().collect();
        let bt_set: BTreeSet<i64> = keys.iter().copied().collect();

        group.bench_with_input(BenchmarkId::new("AvlSet", pattern), keys, |b, keys| {
            b.iter(|| {
                let mut count = 0usize;
                for k in keys {
                    if avl_set.contains(k) {
                        count += 1;
                    }
                }
                count
            });
        });

        group.bench_with_input(BenchmarkId::new("BTreeSet", pattern), keys, |b, keys| {
            b.iter(|| {
                let mut count = 0usize;
                for k in keys {
                    if bt_set.contains(k) {
                        count += 1;
                    }
                }
                count
            });
        });
    }

    group.finish();
}

fn bench_set_remove(c: &mut Criterion) {
    let patterns = key_patterns();
    let mut group = c.benchmark_group("set_remove");

    for (pattern, keys) in &patterns {
        group.bench_with_input(BenchmarkId::new("AvlSet", pattern), keys, |b, keys| {
            b.iter_batched(
                || keys.iter().copied().collect::<AvlSet<i64>>(),
                |mut set| {
                    for k in keys {
                        set.remove(k);
                    }
                    set
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("BTreeSet", pattern), keys, |b, keys| {
            b.iter_batched(
                || keys.iter().copied().collect::<BTreeSet<i64>>(),
                |mut set| {
                    for k in keys {
                        set.remove(k);
                    }
                    set
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

// ─── Criterion Groups ───────────────────────────────────────────────────────

criterion_group!(map_benches, bench_map_insert, bench_map_get, bench_map_remove, bench_map_iterate, bench_map_churn,);

criterion_group!(set_benches, bench_set_insert, bench_set_contains, bench_set_remove,);

criterion_main!(map_benches, set_benches);
