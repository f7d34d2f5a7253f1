use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use pgentity::{
    Consumer, EntityOptions, Filter, Filters, MatchMode, Property, PropertyType, Record,
    SortOrder, SqlEntity, record,
};

fn entity() -> SqlEntity {
    SqlEntity::with_options(
        "persons",
        vec![
            Property::new("name", PropertyType::String),
            Property::new("age", PropertyType::Integer),
            Property::new("email", PropertyType::Email),
            Property::new("createdAt", PropertyType::Timestamp),
        ],
        EntityOptions::new().log_summary(false),
    )
    .expect("valid entity")
}

fn rows(n: usize) -> Vec<Record> {
    (0..n)
        .map(|i| {
            record! {
                "id" => i as i64,
                "name" => format!("person{i}"),
                "age" => (i % 90) as i64,
                "email" => format!("person{i}@example.com"),
            }
        })
        .collect()
}

fn bench_select(c: &mut Criterion) {
    let entity = entity();
    let filters = Filters::new()
        .with("name", Filter::new("pe", MatchMode::StartsWith))
        .with("age", Filter::new(vec![18, 21, 30, 40], MatchMode::In))
        .with("email", Filter::new("example", MatchMode::Contains));

    c.bench_function("statement_builder/select_filtered", |b| {
        b.iter(|| {
            black_box(entity.build_select(
                true,
                20,
                Some(10),
                Some("name"),
                SortOrder::Desc,
                Some(&filters),
            ))
        });
    });
}

fn bench_insert(c: &mut Criterion) {
    let entity = entity();
    let consumer = Consumer::new(1, "bench");
    let mut group = c.benchmark_group("statement_builder/insert");

    for n in [1, 10, 100] {
        let rows = rows(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &rows, |b, rows| {
            b.iter(|| black_box(entity.build_insert(rows, Some(&consumer), Some(r#"RETURNING "id""#))));
        });
    }

    group.finish();
}

fn bench_update(c: &mut Criterion) {
    let entity = entity();
    let consumer = Consumer::new(1, "bench");
    let mut group = c.benchmark_group("statement_builder/update");

    for n in [1, 10, 100] {
        let rows = rows(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &rows, |b, rows| {
            b.iter(|| black_box(entity.build_update(rows, Some(&consumer))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_select, bench_insert, bench_update);
criterion_main!(benches);
