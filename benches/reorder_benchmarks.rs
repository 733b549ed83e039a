use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use folio_oxide::layout::{Page, WordToken};
use folio_oxide::text::reorder;
use folio_oxide::DocumentPipeline;

// One mixed line: Hebrew words with a Latin run every fifth word
fn generate_line(word_count: usize) -> Vec<WordToken> {
    (0..word_count)
        .map(|i| {
            let left = 1100.0 - 60.0 * i as f64;
            let text = if i % 5 == 3 { "Studies" } else { "מחקר" };
            WordToken::new(left, 500.0, 55.0, 30.0, 90.0, text)
        })
        .collect()
}

// A page with body paragraphs and a footnote block of `footnotes` notes
fn generate_page(number: usize, paragraphs: usize, footnotes: usize) -> Page {
    let mut rows = Vec::new();
    let mut top = 100.0;

    for _ in 0..paragraphs {
        for _ in 0..3 {
            rows.push(WordToken::structural(150.0, top, 950.0, 40.0));
        }
        for _ in 0..4 {
            for w in 0..8 {
                rows.push(WordToken::new(1000.0 - 110.0 * w as f64, top, 100.0, 40.0, 90.0, "אבג"));
            }
            rows.push(WordToken::structural(150.0, top + 45.0, 950.0, 40.0));
            top += 45.0;
        }
        top += 60.0;
    }

    for _ in 0..3 {
        rows.push(WordToken::structural(150.0, top, 950.0, 25.0));
    }
    for f in 0..footnotes {
        if f > 0 {
            rows.push(WordToken::structural(150.0, top, 950.0, 25.0));
            rows.push(WordToken::structural(150.0, top, 950.0, 25.0));
        }
        rows.push(WordToken::new(1130.0, top, 20.0, 25.0, 90.0, "1"));
        for w in 0..6 {
            rows.push(WordToken::new(1000.0 - 100.0 * w as f64, top, 90.0, 25.0, 90.0, "אבג"));
        }
        top += 30.0;
    }

    Page::new(format!("p{:03}", number), rows)
}

fn benchmark_reorder(c: &mut Criterion) {
    let mut group = c.benchmark_group("reorder_line");

    for size in [8, 32, 128] {
        let line = generate_line(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &line, |b, line| {
            b.iter(|| black_box(reorder(black_box(line), true)));
        });
    }

    group.finish();
}

fn benchmark_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("document_pages");
    let pipeline = DocumentPipeline::new();

    for pages in [1, 10, 40] {
        let document: Vec<Page> = (2..pages + 2).map(|n| generate_page(n, 4, 5)).collect();
        group.bench_with_input(BenchmarkId::from_parameter(pages), &document, |b, document| {
            b.iter(|| black_box(pipeline.process(black_box(document))));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_reorder, benchmark_document);
criterion_main!(benches);
