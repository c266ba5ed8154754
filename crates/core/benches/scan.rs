use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use polycount_core::language::Language;
use polycount_core::measure::measure;
use std::hint::black_box;

fn synthetic_c_source(lines: usize) -> Vec<u8> {
    let mut src = String::new();
    for i in 0..lines {
        match i % 5 {
            0 => src.push_str("// line comment\n"),
            1 => src.push_str("/* block\n   comment */\n"),
            2 => src.push_str(&format!("int value_{i} = {i};\n")),
            3 => src.push('\n'),
            _ => src.push_str("printf(\"%d\\n\", value);\n"),
        }
    }
    src.into_bytes()
}

fn benchmark_scan_c(c: &mut Criterion) {
    let src = synthetic_c_source(2000);
    let mut group = c.benchmark_group("scan");
    group.throughput(Throughput::Bytes(src.len() as u64));
    group.bench_function("measure_c_2000_lines", |b| {
        b.iter(|| {
            let comp = measure(Language::C, black_box(&src));
            black_box(comp);
        })
    });
    group.finish();
}

fn benchmark_scan_embedded(c: &mut Criterion) {
    let mut src = String::from("<html>\n<body>\n");
    for i in 0..500 {
        src.push_str(&format!("<p>para {i}</p>\n<?php\n$x = {i}; // inline\n?>\n"));
    }
    src.push_str("</body>\n</html>\n");
    let src = src.into_bytes();

    let mut group = c.benchmark_group("scan");
    group.throughput(Throughput::Bytes(src.len() as u64));
    group.bench_function("measure_html_php_embedded", |b| {
        b.iter(|| {
            let comp = measure(Language::Html, black_box(&src));
            black_box(comp);
        })
    });
    group.finish();
}

criterion_group!(benches, benchmark_scan_c, benchmark_scan_embedded);
criterion_main!(benches);
