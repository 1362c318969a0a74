use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::{Deserialize, Serialize};
use serde_ziggy::{from_str, parse, to_string, to_string_pretty, Value};

#[derive(Serialize, Deserialize, Clone)]
struct User {
    id: u32,
    name: String,
    email: String,
    active: bool,
}

#[derive(Serialize, Deserialize, Clone)]
struct Product {
    sku: String,
    name: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Deserialize, Clone)]
enum Status {
    Draft,
    Published(u32),
}

#[derive(Serialize, Deserialize, Clone)]
struct Document {
    id: u32,
    status: Status,
    body: String,
    metadata: Metadata,
    tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone)]
struct Metadata {
    created: String,
    updated: String,
    version: u32,
}

fn document() -> Document {
    Document {
        id: 42,
        status: Status::Published(3),
        body: "First paragraph.\nSecond paragraph.\n\nSigned, the author".to_string(),
        metadata: Metadata {
            created: "2023-01-01T00:00:00Z".to_string(),
            updated: "2023-12-31T23:59:59Z".to_string(),
            version: 3,
        },
        tags: vec![
            "important".to_string(),
            "verified".to_string(),
            "production".to_string(),
        ],
    }
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

fn benchmark_serialize_simple(c: &mut Criterion) {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        active: true,
    };

    c.bench_function("serialize_simple_struct", |b| {
        b.iter(|| to_string(black_box(&user)))
    });
}

fn benchmark_deserialize_simple(c: &mut Criterion) {
    let text = r#"User {.id = 123, .name = "Alice", .email = "alice@example.com", .active = true}"#;

    c.bench_function("deserialize_simple_struct", |b| {
        b.iter(|| from_str::<User>(black_box(text)))
    });
}

fn benchmark_serialize_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize_array");

    for size in [10, 50, 100, 500].iter() {
        let products = products(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| to_string(black_box(&products)))
        });
    }
    group.finish();
}

fn benchmark_deserialize_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("deserialize_array");

    for size in [10, 50, 100, 500].iter() {
        let text = to_string_pretty(&products(*size)).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| from_str::<Vec<Product>>(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("document");
    let doc = document();
    let text = to_string_pretty(&doc).unwrap();

    group.bench_function("serialize", |b| b.iter(|| to_string(black_box(&doc))));
    group.bench_function("serialize_pretty", |b| {
        b.iter(|| to_string_pretty(black_box(&doc)))
    });
    group.bench_function("deserialize", |b| {
        b.iter(|| from_str::<Document>(black_box(&text)))
    });
    group.bench_function("parse_untyped", |b| b.iter(|| parse(black_box(&text))));
    group.bench_function("deserialize_value", |b| {
        b.iter(|| from_str::<Value>(black_box(&text)))
    });

    let draft = Document {
        status: Status::Draft,
        ..doc.clone()
    };
    group.bench_function("serialize_unit_variant", |b| {
        b.iter(|| to_string(black_box(&draft)))
    });

    group.finish();
}

fn benchmark_byte_strings(c: &mut Criterion) {
    let mut group = c.benchmark_group("byte_strings");

    let quoted = "A \"quoted\" string with\ttabs and \\ backslashes".repeat(8);
    let multiline = "line of prose that keeps going\n".repeat(32);
    let binary: Vec<u8> = (0..=255u8).cycle().take(1024).filter(|b| *b != b'\n').collect();
    let binary = Value::Bytes(binary);

    group.bench_function("write_quoted", |b| b.iter(|| to_string(black_box(&quoted))));
    group.bench_function("write_multiline", |b| {
        b.iter(|| to_string(black_box(&multiline)))
    });
    group.bench_function("write_binary", |b| b.iter(|| to_string(black_box(&binary))));

    let quoted_text = to_string(&quoted).unwrap();
    let multiline_text = to_string(&multiline).unwrap();
    let binary_text = to_string(&binary).unwrap();

    group.bench_function("read_quoted", |b| {
        b.iter(|| from_str::<String>(black_box(&quoted_text)))
    });
    group.bench_function("read_multiline", |b| {
        b.iter(|| from_str::<String>(black_box(&multiline_text)))
    });
    group.bench_function("read_binary", |b| b.iter(|| parse(black_box(&binary_text))));

    group.finish();
}

fn benchmark_primitive_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("primitive_array");

    let numbers: Vec<i64> = (0..100).map(|i| i * 1_000_003 - 50_000_000).collect();
    let floats: Vec<f64> = (0..100).map(|i| i as f64 * 1.5).collect();

    group.bench_function("serialize_integers", |b| {
        b.iter(|| to_string(black_box(&numbers)))
    });

    group.bench_function("serialize_floats", |b| {
        b.iter(|| to_string(black_box(&floats)))
    });

    let numbers_text = to_string(&numbers).unwrap();
    let floats_text = to_string(&floats).unwrap();

    group.bench_function("deserialize_integers", |b| {
        b.iter(|| from_str::<Vec<i64>>(black_box(&numbers_text)))
    });

    group.bench_function("deserialize_floats", |b| {
        b.iter(|| from_str::<Vec<f64>>(black_box(&floats_text)))
    });

    group.finish();
}

fn benchmark_comparison_with_json(c: &mut Criterion) {
    let mut group = c.benchmark_group("ziggy_vs_json");
    let items = products(100);
    let ziggy_text = to_string(&items).unwrap();
    let json_text = serde_json::to_string(&items).unwrap();

    group.bench_function("ziggy_serialize", |b| b.iter(|| to_string(black_box(&items))));
    group.bench_function("json_serialize", |b| {
        b.iter(|| serde_json::to_string(black_box(&items)))
    });
    group.bench_function("ziggy_deserialize", |b| {
        b.iter(|| from_str::<Vec<Product>>(black_box(&ziggy_text)))
    });
    group.bench_function("json_deserialize", |b| {
        b.iter(|| serde_json::from_str::<Vec<Product>>(black_box(&json_text)))
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_serialize_simple,
    benchmark_deserialize_simple,
    benchmark_serialize_array,
    benchmark_deserialize_array,
    benchmark_document,
    benchmark_byte_strings,
    benchmark_primitive_array,
    benchmark_comparison_with_json
);
criterion_main!(benches);
