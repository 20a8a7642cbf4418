//! Benchmarks for building and matching expressions

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use verex::{verex, EngineType, Expression};

fn url_expression() -> Expression {
    let mut ex = verex();
    ex.start_of_line()
        .then("http")
        .maybe("s")
        .then("://")
        .maybe("www.")
        .anything_but(" ")
        .end_of_line();
    ex
}

fn bench_build(c: &mut Criterion) {
    c.bench_function("build_url_expression", |b| {
        b.iter(|| black_box(url_expression()).pattern())
    });
}

fn bench_sanitize(c: &mut Criterion) {
    let input = r"$a^b\c|d(e)f[g]h{i}j.k*l+m?n:o=p".repeat(100);

    c.bench_function("sanitize_special_characters", |b| {
        b.iter(|| verex::sanitize(black_box(input.as_str())))
    });
}

fn bench_compiled_match(c: &mut Criterion) {
    let pattern = url_expression().to_regex().unwrap();
    let input = "https://www.example.com/some/long/path";

    c.bench_function("url_match_compiled", |b| {
        b.iter(|| pattern.test(black_box(input)).unwrap())
    });
}

fn bench_large_input(c: &mut Criterion) {
    let mut ex = verex();
    ex.word();
    let pattern = ex.to_regex().unwrap();
    let input = "word ".repeat(10000);

    c.bench_function("large_input_10k_words", |b| {
        b.iter(|| pattern.matches(black_box(&input)).unwrap().len())
    });
}

fn bench_compilation(c: &mut Criterion) {
    let mut not_foo = verex();
    not_foo.start_of_line().not("foo").anything().end_of_line();

    let mut group = c.benchmark_group("compilation");
    for engine in [EngineType::Regex, EngineType::FancyRegex] {
        let ex = url_expression();
        group.bench_with_input(BenchmarkId::new("url", engine), &ex, |b, ex| {
            b.iter(|| ex.to_regex_with(black_box(engine)).unwrap())
        });
    }
    group.bench_function("lookahead_auto", |b| {
        b.iter(|| black_box(&not_foo).to_regex().unwrap())
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_build,
    bench_sanitize,
    bench_compiled_match,
    bench_large_input,
    bench_compilation,
);

criterion_main!(benches);
