use bson::{doc, Document};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mongocriteria::{
    map,
    options::TranslateOptions,
    schema::{FieldType, Schema},
    translate_criteria, Translation,
};
use pprof::criterion::{Output, PProfProfiler};

fn translate(criteria: &Document, schema: &Schema) -> Translation {
    translate_criteria(criteria, schema, TranslateOptions::default())
}

fn criterion_benchmark(c: &mut Criterion) {
    let schema: Schema = map! {
        "age" => FieldType::Integer,
        "born" => FieldType::Date,
        "active" => FieldType::Boolean,
    };
    let simple = doc! {"where": {"age": {">": "5"}}};
    let nested = doc! {
        "where": {
            "or": [
                {"name": {"contains": "smith"}, "active": "true"},
                {"$and": [{"age": {"not": [1, 2, 3]}}, {"born": {"lessThan": "2001-02-03"}}]},
            ],
            "like": {"email": "%@example.com"},
            "id": {"!": {"startsWith": "tmp"}},
        },
        "sort": {"id": -1, "age": 1},
        "limit": 50,
    };

    c.bench_function("translate_simple", |b| {
        b.iter(|| translate(black_box(&simple), &schema))
    });
    c.bench_function("translate_nested", |b| {
        b.iter(|| translate(black_box(&nested), &schema))
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets = criterion_benchmark
);
criterion_main!(benches);
