//! Storage backend benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lexidb_storage::{
    DirSnapshotStore, FileBackend, InMemoryBackend, SnapshotStore, StorageBackend,
};
use tempfile::TempDir;

/// Create data of given size.
fn sample_data(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 256) as u8).collect()
}

/// Benchmark InMemoryBackend whole-file replacement.
fn bench_inmemory_replace(c: &mut Criterion) {
    let mut group = c.benchmark_group("inmemory_replace");

    for size in [1024, 16 * 1024, 256 * 1024].iter() {
        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let mut backend = InMemoryBackend::new();
            let data = sample_data(size);

            b.iter(|| backend.replace(black_box(&data)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark FileBackend atomic replacement.
fn bench_file_replace(c: &mut Criterion) {
    let mut group = c.benchmark_group("file_replace");

    // Use smaller sample size for file operations
    group.sample_size(30);

    for sync in [false, true] {
        for size in [1024, 64 * 1024].iter() {
            let id = format!("{size}/sync={sync}");
            group.throughput(Throughput::Bytes(*size as u64));
            group.bench_with_input(BenchmarkId::from_parameter(id), size, |b, &size| {
                let temp_dir = TempDir::new().unwrap();
                let mut backend =
                    FileBackend::new(&temp_dir.path().join("vocab.json")).sync_on_write(sync);
                let data = sample_data(size);

                b.iter(|| backend.replace(black_box(&data)).unwrap());
            });
        }
    }

    group.finish();
}

/// Benchmark FileBackend whole-file reads.
fn bench_file_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("file_read");

    for size in [1024, 64 * 1024].iter() {
        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let temp_dir = TempDir::new().unwrap();
            let mut backend = FileBackend::new(&temp_dir.path().join("vocab.json"));
            backend.replace(&sample_data(size)).unwrap();

            b.iter(|| black_box(backend.read_all().unwrap()));
        });
    }

    group.finish();
}

/// Benchmark backup snapshot writes.
fn bench_snapshot_put(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot_put");
    group.sample_size(30);

    let temp_dir = TempDir::new().unwrap();
    let mut snapshots = DirSnapshotStore::new(temp_dir.path()).sync_on_write(false);
    let data = sample_data(16 * 1024);
    let mut n = 0u64;

    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function("16KiB", |b| {
        b.iter(|| {
            n += 1;
            snapshots
                .put(&format!("vocab_{n:08}.json"), black_box(&data))
                .unwrap();
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_inmemory_replace,
    bench_file_replace,
    bench_file_read,
    bench_snapshot_put,
);

criterion_main!(benches);
