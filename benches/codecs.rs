use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use num_bigint::BigInt;
use stax_codec::{
    compress_int_array, compress_literals, cram, decompress_literals, pack, parse, uncram, unpack,
    HuffmanTable,
};

const PROGRAM: &str = "\"the quick brown fox\"{zA+20+30+40+m}1000000000 2+|E:s{1+}F}\"ok\"p";

fn program_of_size(size: usize) -> String {
    PROGRAM.chars().cycle().take(size).collect()
}

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for size in [64, 512, 4096].iter() {
        let source = program_of_size(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &source, |b, source| {
            b.iter(|| parse(black_box(source)).tokens_flat().len())
        });
    }

    group.finish();
}

fn benchmark_pack(c: &mut Criterion) {
    let mut group = c.benchmark_group("pack");

    for size in [16, 128, 1024].iter() {
        let source = program_of_size(*size);
        let packed = pack(&source).unwrap();
        group.bench_with_input(BenchmarkId::new("pack", size), &source, |b, source| {
            b.iter(|| pack(black_box(source)))
        });
        group.bench_with_input(BenchmarkId::new("unpack", size), &packed, |b, packed| {
            b.iter(|| unpack(black_box(packed)))
        });
    }

    group.finish();
}

fn benchmark_cram(c: &mut Criterion) {
    let mut group = c.benchmark_group("cram");

    for size in [10, 100, 1000].iter() {
        let values: Vec<BigInt> = (0..*size).map(|n: i64| BigInt::from(n * n - 50 * n)).collect();
        let crammed = cram(&values);
        group.bench_with_input(BenchmarkId::new("cram", size), &values, |b, values| {
            b.iter(|| cram(black_box(values)))
        });
        group.bench_with_input(BenchmarkId::new("uncram", size), &crammed, |b, crammed| {
            b.iter(|| uncram(black_box(crammed)))
        });
        group.bench_with_input(
            BenchmarkId::new("compress_int_array", size),
            &values,
            |b, values| b.iter(|| compress_int_array(black_box(values))),
        );
    }

    group.finish();
}

fn benchmark_huffman(c: &mut Criterion) {
    let table = HuffmanTable::english().unwrap();
    let text = "The quick brown fox jumps over the lazy dog, again and again.";
    let code = table.compress(text).unwrap();

    c.bench_function("huffman_compress", |b| {
        b.iter(|| table.compress(black_box(text)))
    });

    c.bench_function("huffman_decompress", |b| {
        b.iter(|| table.decompress(black_box(&code)))
    });

    c.bench_function("huffman_load_table", |b| {
        let spec = include_str!("../data/huffman_trees.txt");
        b.iter(|| HuffmanTable::from_spec(black_box(spec)))
    });
}

fn benchmark_literals(c: &mut Criterion) {
    let compressed = compress_literals(PROGRAM).unwrap();

    c.bench_function("compress_literals", |b| {
        b.iter(|| compress_literals(black_box(PROGRAM)))
    });

    c.bench_function("decompress_literals", |b| {
        b.iter(|| decompress_literals(black_box(&compressed)))
    });
}

criterion_group!(
    benches,
    benchmark_parse,
    benchmark_pack,
    benchmark_cram,
    benchmark_huffman,
    benchmark_literals
);
criterion_main!(benches);
