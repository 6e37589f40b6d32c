//! Schema generation benchmarks
//!
//! Measures descriptor validation and transformation for a flat object, a
//! wide object and a deeply nested container chain.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use koja_core::{
    DocMetadata, DocRegistry, Element, JsonSchema, TypeDescriptor, Validator, to_schema,
};
use std::collections::HashMap;
use std::hint::black_box;

fn person() -> TypeDescriptor {
    TypeDescriptor::object("bench::Person")
        .eligible()
        .field(Element::new("name", String::descriptor()))
        .field(Element::new("age", Option::<u32>::descriptor()))
        .field(Element::new("emails", Vec::<String>::descriptor()).with_default())
        .field(Element::new("tags", HashMap::<String, String>::descriptor()))
}

fn wide(fields: usize) -> TypeDescriptor {
    (0..fields).fold(TypeDescriptor::object("bench::Wide").eligible(), |d, i| {
        d.field(Element::new(format!("field_{i}"), f64::descriptor()))
    })
}

fn nested(depth: usize) -> TypeDescriptor {
    (0..depth).fold(String::descriptor(), |d, _| TypeDescriptor::list(d))
}

fn bench_person(c: &mut Criterion) {
    let descriptor = person();
    let registry: DocRegistry = vec![(
        "bench::Person".to_string(),
        DocMetadata::new(Some("A person".into()), [("name", "Full name")]),
    )]
    .into_iter()
    .collect();

    let mut group = c.benchmark_group("person");
    group.bench_function("validate", |b| {
        b.iter(|| Validator::new().validate(black_box(&descriptor)))
    });
    group.bench_function("to_schema", |b| {
        b.iter(|| to_schema(black_box(&descriptor), &registry))
    });
    group.bench_function("to_json", |b| {
        b.iter(|| {
            to_schema(black_box(&descriptor), &registry)
                .map(|s| serde_json::to_string(&s))
        })
    });
    group.finish();
}

fn bench_wide(c: &mut Criterion) {
    let registry = DocRegistry::empty();
    let mut group = c.benchmark_group("wide_object");
    for fields in [10, 100, 1000] {
        let descriptor = wide(fields);
        group.bench_with_input(BenchmarkId::from_parameter(fields), &descriptor, |b, d| {
            b.iter(|| to_schema(black_box(d), &registry))
        });
    }
    group.finish();
}

fn bench_nested(c: &mut Criterion) {
    let registry = DocRegistry::empty();
    let mut group = c.benchmark_group("nested_lists");
    for depth in [4, 16, 60] {
        let descriptor = nested(depth);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &descriptor, |b, d| {
            b.iter(|| to_schema(black_box(d), &registry))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_person, bench_wide, bench_nested);
criterion_main!(benches);
