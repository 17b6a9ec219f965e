use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glispy::{parse_expression, Interpreter};

fn benchmark_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    let test_cases = vec![
        ("number", "42"),
        ("add", "(+ 1 3 (+ 2 5))"),
        ("defun", "(defun square (x) (* x x))"),
        ("conditional", "(if (> 5 3) \"yes\" \"no\")"),
    ];

    for (name, source) in test_cases {
        group.bench_with_input(BenchmarkId::from_parameter(name), &source, |b, &source| {
            b.iter(|| parse_expression(black_box(source)));
        });
    }

    group.finish();
}

/// Parse-and-evaluate on every iteration.
fn benchmark_reparse(c: &mut Criterion) {
    let mut group = c.benchmark_group("eval_with_parse");
    let interp = Interpreter::new();
    interp
        .eval_str("(defun square (x) (* x x))")
        .expect("square should define");

    group.bench_function("add", |b| {
        b.iter(|| interp.eval_str(black_box("(+ 1 3 (+ 2 5))")))
    });
    group.bench_function("square", |b| {
        b.iter(|| interp.eval_str(black_box("(square 12)")))
    });

    group.finish();
}

/// Evaluate one parsed tree repeatedly.
fn benchmark_preparsed(c: &mut Criterion) {
    let mut group = c.benchmark_group("eval_preparsed");
    let interp = Interpreter::new();
    interp
        .eval_str("(defun square (x) (* x x)) (defun fact (n) (if (<= n 1) 1 (* n (fact (- n 1)))))")
        .expect("helpers should define");

    let test_cases = vec![
        ("add", "(+ 1 3 (+ 2 5))"),
        ("square", "(square 12)"),
        ("fact_20", "(fact 20)"),
    ];

    for (name, source) in test_cases {
        let parsed = parse_expression(source).expect("benchmark source should parse");
        group.bench_with_input(BenchmarkId::from_parameter(name), &parsed, |b, parsed| {
            b.iter(|| interp.eval(black_box(parsed)));
        });
    }

    group.finish();
}

fn benchmark_host_bridge(c: &mut Criterion) {
    let interp = Interpreter::new();
    interp
        .eval_str("(make-hash-map store)")
        .expect("map should be created");
    let round_trip = parse_expression("(begin (set-value store \"k\" 1337) (get-value store \"k\"))")
        .expect("benchmark source should parse");

    c.bench_function("host_map_round_trip", |b| {
        b.iter(|| interp.eval(black_box(&round_trip)))
    });
}

criterion_group!(
    benches,
    benchmark_parsing,
    benchmark_reparse,
    benchmark_preparsed,
    benchmark_host_bridge
);
criterion_main!(benches);
