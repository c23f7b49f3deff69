//! Benchmark harness for compile sessions.
//!
//! Uses criterion for reliable benchmarking.
//! Run with: cargo bench -p quill_compiler

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use quill_compiler::{CompileSession, CompilerOptions};

/// Small Quill source for micro-benchmarks.
const SMALL_SOURCE: &str = r#"
const x = 42;
let greeting = "hello";
let result = add(x, 2) * 3;
"#;

/// Medium Quill source for realistic benchmarks.
const MEDIUM_SOURCE: &str = r#"
// Session setup
const limit = 0x1000;
let counter = 0, total = 0;
var label = 'items';

counter = counter + 1;
total += counter * limit / 2;
let ready = counter >= limit && total !== 0 || !label;
let fallback = label ?? "none";
let ratio = total / (limit - counter);

log.info(label, counter, total);
config.server.start(limit, ratio);
let next = ready ? compute(total) : fallback;
counter++;
--total;
let seq = (first(), second(), third());
"#;

fn session_with(files: usize, source: &str, options: CompilerOptions) -> CompileSession {
    let mut session = CompileSession::new(options);
    for i in 0..files {
        session.add_source(format!("file{i}.ql"), source);
    }
    session
}

fn bench_parse_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_all");
    for &files in &[1usize, 16, 128] {
        group.bench_with_input(BenchmarkId::new("small", files), &files, |b, &files| {
            b.iter(|| {
                let mut session = session_with(files, SMALL_SOURCE, CompilerOptions::default());
                black_box(session.parse_all().map(|parsed| parsed.len()).ok())
            });
        });
        group.bench_with_input(BenchmarkId::new("medium", files), &files, |b, &files| {
            b.iter(|| {
                let mut session = session_with(files, MEDIUM_SOURCE, CompilerOptions::default());
                black_box(session.parse_all().map(|parsed| parsed.len()).ok())
            });
        });
    }
    group.finish();
}

fn bench_interner_sharing(c: &mut Criterion) {
    let unshared = CompilerOptions {
        strict: None,
        shared_interner: Some(false),
    };
    c.bench_function("parse_all_unshared_interner", |b| {
        b.iter(|| {
            let mut session = session_with(64, MEDIUM_SOURCE, unshared.clone());
            black_box(session.parse_all().map(|parsed| parsed.len()).ok())
        });
    });
}

criterion_group!(benches, bench_parse_all, bench_interner_sharing);
criterion_main!(benches);
