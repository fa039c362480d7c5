use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use container_codec::{from_str, to_string, Deserializer, Shape};
use std::collections::{BTreeMap, HashMap};

fn sample_map(size: u32) -> BTreeMap<u32, String> {
    (0..size).map(|i| (i, format!("item {}", i))).collect()
}

fn benchmark_encode_sequence(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_sequence");

    for size in [10, 100, 1000, 10000].iter() {
        let numbers: Vec<i64> = (0..*size).map(|i| i * 7 - 3).collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &numbers, |b, numbers| {
            b.iter(|| to_string(black_box(numbers)))
        });
    }
    group.finish();
}

fn benchmark_decode_sequence(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_sequence");

    for size in [10, 100, 1000, 10000].iter() {
        let numbers: Vec<i64> = (0..*size).map(|i| i * 7 - 3).collect();
        let text = to_string(&numbers).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| from_str::<Vec<i64>>(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_mapping(c: &mut Criterion) {
    let mut group = c.benchmark_group("mapping");

    let map = sample_map(500);
    let text = to_string(&map).unwrap();

    group.bench_function("encode_btree_map", |b| b.iter(|| to_string(black_box(&map))));

    group.bench_function("decode_btree_map", |b| {
        b.iter(|| from_str::<BTreeMap<u32, String>>(black_box(&text)))
    });

    group.bench_function("decode_hash_map", |b| {
        b.iter(|| from_str::<HashMap<u32, String>>(black_box(&text)))
    });

    group.finish();
}

fn benchmark_nested(c: &mut Criterion) {
    let nested: Vec<(u16, Vec<Vec<u8>>)> = (0..100)
        .map(|i| (i, vec![vec![1, 2, 3], vec![], vec![u8::MAX]]))
        .collect();
    let text = to_string(&nested).unwrap();

    c.bench_function("encode_nested", |b| b.iter(|| to_string(black_box(&nested))));

    c.bench_function("decode_nested", |b| {
        b.iter(|| from_str::<Vec<(u16, Vec<Vec<u8>>)>>(black_box(&text)))
    });
}

fn benchmark_lazy_sum(c: &mut Criterion) {
    let numbers: Vec<u64> = (0..10000).collect();
    let text = to_string(&numbers).unwrap();

    c.bench_function("lazy_sum_without_collecting", |b| {
        b.iter(|| {
            let mut de = Deserializer::from_str(black_box(&text));
            de.elements::<u64>(Shape::SEQUENCE)
                .unwrap()
                .map(|r| r.unwrap())
                .sum::<u64>()
        })
    });
}

fn benchmark_quoted_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("text");

    let bare: Vec<String> = (0..200).map(|i| format!("word{}", i)).collect();
    let quoted: Vec<String> = (0..200).map(|i| format!("two words, {}", i)).collect();
    let bare_text = to_string(&bare).unwrap();
    let quoted_text = to_string(&quoted).unwrap();

    group.bench_function("encode_bare", |b| b.iter(|| to_string(black_box(&bare))));
    group.bench_function("encode_quoted", |b| b.iter(|| to_string(black_box(&quoted))));
    group.bench_function("decode_bare", |b| {
        b.iter(|| from_str::<Vec<String>>(black_box(&bare_text)))
    });
    group.bench_function("decode_quoted", |b| {
        b.iter(|| from_str::<Vec<String>>(black_box(&quoted_text)))
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_encode_sequence,
    benchmark_decode_sequence,
    benchmark_mapping,
    benchmark_nested,
    benchmark_lazy_sum,
    benchmark_quoted_text
);
criterion_main!(benches);
