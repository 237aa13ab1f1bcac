use criterion::{black_box, criterion_group, criterion_main, Criterion};
use csv_inspect::data::type_converter::{to_datetime, to_numeric, NumericOptions, TemporalOptions};
use csv_inspect::data::type_inference::{is_col_numeric, DEFAULT_TEST_SIZE};

fn create_numeric_column(rows: usize) -> Vec<String> {
    (0..rows)
        .map(|i| {
            // Every seventh cell is missing
            if i % 7 == 0 {
                String::new()
            } else {
                format!("{}.{}", i, i % 10)
            }
        })
        .collect()
}

fn create_datetime_column(rows: usize) -> Vec<String> {
    (0..rows)
        .map(|i| {
            if i % 7 == 0 {
                String::new()
            } else {
                format!("2019-05-06 {:02}:{:02}:00", (i / 60) % 24, i % 60)
            }
        })
        .collect()
}

fn benchmark_classification(c: &mut Criterion) {
    let column = create_numeric_column(10_000);
    c.bench_function("is_col_numeric", |b| {
        b.iter(|| is_col_numeric(black_box(&column), DEFAULT_TEST_SIZE))
    });
}

fn benchmark_conversion(c: &mut Criterion) {
    let numeric = create_numeric_column(10_000);
    let temporal = create_datetime_column(10_000);
    let numeric_options = NumericOptions::default();
    let temporal_options = TemporalOptions {
        format: "%Y-%m-%d %H:%M:%S".to_string(),
        ..Default::default()
    };

    let mut group = c.benchmark_group("convert_10k");
    group.bench_function("numeric", |b| {
        b.iter(|| {
            let column = to_numeric("n", black_box(&numeric), &numeric_options);
            assert!(column.is_ok());
        });
    });
    group.bench_function("datetime", |b| {
        b.iter(|| {
            let column = to_datetime("t", black_box(&temporal), &temporal_options);
            assert!(column.is_ok());
        });
    });
    group.finish();
}

criterion_group!(benches, benchmark_classification, benchmark_conversion);
criterion_main!(benches);
