//! Benchmarks for rendering and highlighting.
//!
//! Run with: cargo bench

use criterion::{Criterion, criterion_group, criterion_main};

use notare::Article;

/// A long synthetic article: headings, paragraphs with inline markup, lists.
fn sample_article() -> String {
    let mut html = String::new();
    for section in 0..40 {
        html.push_str(&format!("<h2>Section {section} heading</h2>"));
        for para in 0..5 {
            html.push_str(&format!(
                "<p>Paragraph {para} opens here. It has <em>some emphasis, \
                 and a clause.</em> Then <a href=\"#s{section}\">a link to follow</a> \
                 ends it! Does it ask a question? No.</p>"
            ));
        }
        html.push_str("<ul><li>First item. Second half</li><li>Another item</li></ul>");
    }
    html
}

// ============================================================================
// Rendering
// ============================================================================

fn bench_render(c: &mut Criterion) {
    let html = sample_article();

    c.bench_function("render", |b| {
        b.iter(|| Article::render(&html));
    });
}

fn bench_rerender_export(c: &mut Criterion) {
    let mut article = Article::render(&sample_article());
    for index in (0..article.words().len()).step_by(97) {
        article.click_word(index);
    }
    let exported = article.to_html();

    c.bench_function("rerender_export", |b| {
        b.iter(|| Article::render(&exported));
    });
}

// ============================================================================
// Highlighting
// ============================================================================

fn bench_toggle(c: &mut Criterion) {
    let mut article = Article::render(&sample_article());
    let count = article.words().len();

    c.bench_function("toggle", |b| {
        let mut index = 0;
        b.iter(|| {
            article.click_word(index);
            article.click_word(index);
            index = (index + 13) % count;
        });
    });
}

fn bench_to_html(c: &mut Criterion) {
    let article = Article::render(&sample_article());

    c.bench_function("to_html", |b| {
        b.iter(|| article.to_html());
    });
}

criterion_group!(
    benches,
    // Rendering
    bench_render,
    bench_rerender_export,
    // Highlighting
    bench_toggle,
    bench_to_html,
);
criterion_main!(benches);
