use criterion::{Criterion, black_box, criterion_group, criterion_main};
use casc_hashmatch::{HashIndex, hash_path};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

const PATH_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_\\";

/// Generates random normalised paths.
/// Uses a fixed seed for reproducible benchmark results.
fn generate_random_paths(count: usize) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..count)
        .map(|_| {
            let length = rng.gen_range(16..=80);
            let mut path: String = (0..length)
                .map(|_| PATH_CHARS[rng.gen_range(0..PATH_CHARS.len())] as char)
                .collect();
            path.push_str(".BLP");
            path
        })
        .collect()
}

/// Roughly the size of a current unknown-hash dump.
fn target_index(count: usize) -> HashIndex {
    let mut rng = StdRng::seed_from_u64(7);
    HashIndex::from_hashes((0..count).map(|_| rng.next_u64())).unwrap()
}

fn bench_hash_path(c: &mut Criterion) {
    let paths = generate_random_paths(1_000);

    c.bench_function("hash_path_1k", |b| {
        b.iter(|| {
            for path in &paths {
                black_box(hash_path(black_box(path)));
            }
        })
    });
}

fn bench_probe(c: &mut Criterion) {
    let index = target_index(1_000_000);
    let mut rng = StdRng::seed_from_u64(99);
    let probes: Vec<u64> = (0..10_000).map(|_| rng.next_u64()).collect();

    let mut group = c.benchmark_group("probe");
    group.bench_function("miss_10k", |b| {
        b.iter(|| {
            for &probe in &probes {
                black_box(index.contains(black_box(probe)));
            }
        })
    });
    group.finish();
}

fn bench_hash_and_probe(c: &mut Criterion) {
    let index = target_index(1_000_000);
    let paths = generate_random_paths(10_000);

    c.bench_function("hash_and_probe_10k", |b| {
        b.iter(|| {
            for path in &paths {
                black_box(index.contains(hash_path(black_box(path))));
            }
        })
    });
}

criterion_group!(benches, bench_hash_path, bench_probe, bench_hash_and_probe);
criterion_main!(benches);
