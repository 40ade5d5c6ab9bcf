use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use distill_core::{Document, ExtractConfig, dedupe, encode, extract, locate_main_content, render_html, walk};

const URL: &str = "https://crumbnotes.example/2024/sourdough";

fn fixture() -> String {
    std::fs::read_to_string("../../tests/fixtures/article.html").unwrap()
}

/// The article body repeated `times` over, to stress the walker.
fn large_fixture(times: usize) -> String {
    let html = fixture();
    let start = html.find("<main>").unwrap();
    let end = html.find("</main>").unwrap() + "</main>".len();
    let body = &html[start..end];
    format!("<html><body>{}</body></html>", body.repeat(times))
}

fn bench_parse(c: &mut Criterion) {
    let small = fixture();
    let large = large_fixture(50);

    let mut group = c.benchmark_group("parse");
    group.bench_with_input(BenchmarkId::new("article", "1x"), &small, |b, html| {
        b.iter(|| Document::parse(black_box(html)))
    });
    group.bench_with_input(BenchmarkId::new("article", "50x"), &large, |b, html| {
        b.iter(|| Document::parse(black_box(html)))
    });
    group.finish();
}

fn bench_locate_and_walk(c: &mut Criterion) {
    let doc = Document::parse_with_url(&large_fixture(50), URL).unwrap();
    let config = ExtractConfig::default();

    c.bench_function("locate", |b| b.iter(|| locate_main_content(black_box(&doc), config.min_root_chars)));
    c.bench_function("walk_and_dedupe", |b| {
        b.iter(|| {
            let root = locate_main_content(&doc, config.min_root_chars);
            dedupe(walk(black_box(root.element), doc.base_url(), &config))
        })
    });
}

fn bench_encode_and_render(c: &mut Criterion) {
    let content = extract(&large_fixture(50), URL);
    let text = encode(&content);

    c.bench_function("encode", |b| b.iter(|| encode(black_box(&content))));
    c.bench_function("render", |b| b.iter(|| render_html(black_box(&text), Some(content.title()))));
}

criterion_group!(benches, bench_parse, bench_locate_and_walk, bench_encode_and_render);
criterion_main!(benches);
