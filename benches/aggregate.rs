use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use patent_class_counter::{ClassCounts, merge, parse, subtract};

const MAJORS: [&str; 6] = ["A01B", "B62D", "C07K", "G06F", "H04L", "H04N"];

/// ベンチマーク用の分類テキスト（1 行おきにメモ行を混ぜる）
fn sample_text(lines: usize) -> String {
    (0..lines)
        .map(|i| {
            if i % 2 == 0 {
                format!(
                    "{}  {}/{}  sample description {}",
                    MAJORS[i % MAJORS.len()],
                    i % 97,
                    i % 13,
                    i
                )
            } else {
                format!("free note {}", i)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for lines in [10, 100, 1_000].iter() {
        let text = sample_text(*lines);
        group.bench_with_input(BenchmarkId::from_parameter(lines), &text, |b, text| {
            b.iter(|| parse(black_box(text)))
        });
    }

    group.finish();
}

fn benchmark_merge_subtract(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_subtract");

    // 登録済みレコード数を変えて、1 件分の加算・減算を測る
    for records in [10, 100, 1_000].iter() {
        let base = (0..*records).fold(ClassCounts::new(), |acc, i| {
            merge(&acc, &parse(&sample_text(20 + i % 7)))
        });
        let delta = parse(&sample_text(20));

        group.bench_with_input(BenchmarkId::new("merge", records), &base, |b, base| {
            b.iter(|| merge(black_box(base), black_box(&delta)))
        });
        let merged = merge(&base, &delta);
        group.bench_with_input(BenchmarkId::new("subtract", records), &merged, |b, merged| {
            b.iter(|| subtract(black_box(merged), black_box(&delta)))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_parse, benchmark_merge_subtract);
criterion_main!(benches);
