use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gridline::*;

const STATUSES: [&str; 3] = ["New", "Qualified", "Negotiation"];

fn make_rows(size: usize) -> Vec<Row> {
    (0..size)
        .map(|i| {
            Row::new()
                .with("id", format!("lead-{}", i))
                .with("company", format!("Company {}", i % 997))
                .with("status", STATUSES[i % 3])
                .with("amount", ((i * 7919) % 100_000) as i64)
                .with("tags", vec!["inbound", "fintech"])
        })
        .collect()
}

fn columns() -> Columns {
    Columns::new(vec![
        ColumnDescriptor::new("company").text_filter(),
        ColumnDescriptor::new("status").select_filter(STATUSES),
        ColumnDescriptor::new("amount").range_filter(),
        ColumnDescriptor::new("tags").select_filter(["inbound", "fintech"]),
    ])
    .unwrap()
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");
    let columns = columns();
    let filters = FilterState::new()
        .with("status", FilterValue::select(["Qualified", "New"]))
        .with("amount", FilterValue::range(Some(10_000.0), Some(80_000.0)));

    for size in [100, 1000, 10000].iter() {
        let rows = make_rows(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| filter_rows(black_box(&rows), "company 1", &filters, &columns).unwrap().len());
        });
    }
    group.finish();
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");

    for size in [100, 1000, 10000].iter() {
        let rows = make_rows(*size);
        for key in ["amount", "company"] {
            let sort = SortState::descending(key);
            group.bench_with_input(BenchmarkId::new(key, size), size, |b, _| {
                b.iter(|| sorted_rows(black_box(&rows), &sort).len());
            });
        }
    }
    group.finish();
}

fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine");
    let config = TableConfig::new(columns().iter().cloned().collect());

    for size in [1000, 10000].iter() {
        let rows = RowSet::new(make_rows(*size));
        let query = TableQuery::new(25)
            .search("company")
            .filter("status", FilterValue::select(["Qualified"]))
            .sort(SortState::ascending("amount"))
            .page(3);

        group.bench_with_input(BenchmarkId::new("cold", size), size, |b, _| {
            b.iter(|| {
                let mut engine = TableEngine::new(config.clone()).unwrap();
                engine.run(&rows, black_box(&query)).unwrap().result_count
            });
        });

        let mut engine = TableEngine::new(config.clone()).unwrap();
        group.bench_with_input(BenchmarkId::new("memoized", size), size, |b, _| {
            b.iter(|| engine.run(&rows, black_box(&query)).unwrap().page_rows.len());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_filter, bench_sort, bench_engine);

criterion_main!(benches);
