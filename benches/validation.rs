use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dictkit::{to_value, validate, Descriptor, KindRegistry, TypedDict, Value};
use serde::Serialize;

#[derive(Serialize, Clone)]
struct Product {
    sku: String,
    name: String,
    price: f64,
    quantity: u32,
}

fn products(size: u32) -> Vec<Product> {
    (0..size)
        .map(|i| Product {
            sku: format!("SKU{}", i),
            name: format!("Product {}", i),
            price: 9.99 + f64::from(i),
            quantity: i,
        })
        .collect()
}

fn product_descriptor() -> Descriptor {
    Descriptor::list(Descriptor::dict(
        Descriptor::str(),
        Descriptor::union([Descriptor::str(), Descriptor::int(), Descriptor::float()]),
    ))
}

fn benchmark_validate_primitive(c: &mut Criterion) {
    let value = Value::from(42);
    let optional = Descriptor::optional(Descriptor::int());

    c.bench_function("validate_int", |b| {
        b.iter(|| validate(black_box(&value), black_box(&Descriptor::int())))
    });
    c.bench_function("validate_optional_int", |b| {
        b.iter(|| validate(black_box(&value), black_box(&optional)))
    });
}

fn benchmark_validate_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate_product_list");
    let descriptor = product_descriptor();

    for size in [10, 50, 100, 500].iter() {
        let value = to_value(&products(*size)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &value, |b, value| {
            b.iter(|| validate(black_box(value), black_box(&descriptor)))
        });
    }
    group.finish();
}

fn benchmark_validate_iterable(c: &mut Criterion) {
    let text = Value::from("x".repeat(1000));
    let descriptor = Descriptor::iterable(Descriptor::str());

    c.bench_function("validate_iterable_str", |b| {
        b.iter(|| validate(black_box(&text), black_box(&descriptor)))
    });
}

fn benchmark_kind_lookup(c: &mut Criterion) {
    let registry = KindRegistry::new();
    let value_type = Descriptor::dict(
        Descriptor::str(),
        Descriptor::list(Descriptor::optional(Descriptor::int())),
    );
    registry.kind(Descriptor::str(), value_type.clone()).unwrap();

    c.bench_function("kind_cache_hit", |b| {
        b.iter(|| registry.kind(Descriptor::str(), black_box(value_type.clone())))
    });
}

fn benchmark_typed_dict_insert(c: &mut Criterion) {
    let registry = KindRegistry::new();
    let kind = registry
        .kind(Descriptor::str(), Descriptor::list(Descriptor::int()))
        .unwrap();
    let keys: Vec<Value> = (0..100).map(|i| Value::from(format!("k{}", i))).collect();
    let row = Value::list((0..10).map(Value::from));

    c.bench_function("typed_dict_insert_100", |b| {
        b.iter(|| {
            let mut dict = TypedDict::new(kind.clone());
            for key in &keys {
                dict.insert(key.clone(), row.clone()).unwrap();
            }
            dict
        })
    });
}

criterion_group!(
    benches,
    benchmark_validate_primitive,
    benchmark_validate_list,
    benchmark_validate_iterable,
    benchmark_kind_lookup,
    benchmark_typed_dict_insert
);
criterion_main!(benches);
