use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sqlprep::{Array, MySqlDriver, Preprocessor, PreprocessorConfig, Value, array};

fn preprocessor() -> Preprocessor {
    Preprocessor::new(MySqlDriver).with_config(PreprocessorConfig::new().no_logging())
}

/// `n` conditions: {col0: 0, col1: 1, ...}
fn conditions(n: i64) -> Array {
    (0..n).map(|i| (format!("col{i}"), i)).collect()
}

fn bench_where_and(c: &mut Criterion) {
    let pre = preprocessor();
    let mut group = c.benchmark_group("preprocess/where_and");

    for n in [1, 5, 10, 50, 100] {
        let params = vec![Value::from("SELECT * FROM t WHERE"), Value::from(conditions(n))];
        group.bench_with_input(BenchmarkId::from_parameter(n), &params, |b, params| {
            b.iter(|| black_box(pre.process(params, false).unwrap()));
        });
    }

    group.finish();
}

fn bench_in_list(c: &mut Criterion) {
    let pre = preprocessor();
    let mut group = c.benchmark_group("preprocess/in_list");

    for n in [5, 20, 100, 500] {
        let params = vec![
            Value::from("SELECT * FROM t WHERE id IN ?"),
            Value::from(Array::list(0..n)),
        ];
        group.bench_with_input(BenchmarkId::from_parameter(n), &params, |b, params| {
            b.iter(|| black_box(pre.process(params, false).unwrap()));
        });
    }

    group.finish();
}

fn bench_multi_insert(c: &mut Criterion) {
    let pre = preprocessor();
    let mut group = c.benchmark_group("preprocess/multi_insert");

    for n in [1, 10, 100] {
        let rows = Array::list((0..n).map(|i| array! { "id" => i, "name" => format!("user{i}") }));
        let params = vec![Value::from("INSERT INTO users ?values"), Value::from(rows)];
        group.bench_with_input(BenchmarkId::from_parameter(n), &params, |b, params| {
            b.iter(|| black_box(pre.process(params, false).unwrap()));
        });
    }

    group.finish();
}

fn bench_inline_literals(c: &mut Criterion) {
    let pre = preprocessor();
    let mut group = c.benchmark_group("preprocess/inline_literals");

    for n in [1, 10, 50] {
        let mut params = vec![Value::from(
            (0..n).map(|i| format!("c{i} = ?")).collect::<Vec<_>>().join(" AND "),
        )];
        params.extend((0..n).map(|i| Value::from(format!("it's {i}"))));
        group.bench_with_input(BenchmarkId::from_parameter(n), &params, |b, params| {
            b.iter(|| black_box(pre.process(params, false).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_where_and,
    bench_in_list,
    bench_multi_insert,
    bench_inline_literals
);
criterion_main!(benches);
