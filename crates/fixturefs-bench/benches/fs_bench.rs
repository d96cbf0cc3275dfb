//! Listing and reading benchmarks.

use std::ffi::{CStr, CString};
use std::fs;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use fixturefs_abi::io_abi::{freefile, readfile};
use fixturefs_core::config::{DiagnosticLevel, set_diagnostic_level};
use fixturefs_core::{dirent, io};

fn bench_list_directory(c: &mut Criterion) {
    let sizes: &[usize] = &[8, 64, 512, 4096];
    let mut group = c.benchmark_group("list_directory");

    for &size in sizes {
        let dir = tempfile::tempdir().expect("tempdir");
        for i in 0..size {
            fs::write(dir.path().join(format!("entry_{i:05}")), b"").expect("write");
        }
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("collect", size), &size, |b, _| {
            b.iter(|| black_box(dirent::list_directory(dir.path()).expect("list")));
        });
        group.bench_with_input(BenchmarkId::new("write_listing", size), &size, |b, _| {
            b.iter(|| {
                let mut sink = Vec::with_capacity(size * 12);
                dirent::write_listing(dir.path(), &mut sink).expect("list");
                black_box(sink);
            });
        });
    }
    group.finish();
}

fn bench_read_file(c: &mut Criterion) {
    set_diagnostic_level(DiagnosticLevel::Off);
    let line_counts: &[usize] = &[1, 64, 4096, 65536];
    let mut group = c.benchmark_group("read_file");

    for &lines in line_counts {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("lines.txt");
        let body = "the quick brown fox jumps over the lazy dog\n".repeat(lines);
        fs::write(&path, &body).expect("write");
        group.throughput(Throughput::Bytes(body.len() as u64));

        group.bench_with_input(BenchmarkId::new("core", lines), &lines, |b, _| {
            b.iter(|| black_box(io::read_file(&path).expect("read")));
        });

        let raw = CString::new(path.to_str().expect("utf8 path")).expect("no NUL");
        group.bench_with_input(BenchmarkId::new("export", lines), &lines, |b, _| {
            b.iter(|| {
                let ptr = unsafe { readfile(raw.as_ptr()) };
                let len = unsafe { CStr::from_ptr(ptr) }.to_bytes().len();
                unsafe { freefile(ptr) };
                black_box(len);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_list_directory, bench_read_file);
criterion_main!(benches);
