//! Microbenchmarks for the hot editing paths.

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use ted::{Document, Redraw, Screen, Window, edit, motion};

const WIN: Window = Window { cols: 80, rows: 24 };

fn bench_insert(c: &mut Criterion) {
    c.bench_function("insert_100_chars", |b| {
        b.iter(|| {
            let mut doc = Document::new();
            for ch in ('a'..='z').cycle().take(100) {
                edit::insert_char(&mut doc, WIN, black_box(ch)).expect("insert");
            }
            doc
        });
    });

    c.bench_function("insert_tabs", |b| {
        b.iter(|| {
            let mut doc = Document::new();
            for _ in 0..20 {
                edit::insert_tab(&mut doc, WIN).expect("tab");
            }
            doc
        });
    });
}

fn bench_delete(c: &mut Criterion) {
    let text = vec!["the quick brown fox jumps over the lazy dog"; 50].join("\n");
    c.bench_function("delete_backward_across_lines", |b| {
        b.iter(|| {
            let mut doc = Document::from_text(&text).expect("load");
            motion::document_end(&mut doc, WIN);
            motion::line_end(&mut doc, WIN);
            for _ in 0..200 {
                edit::delete_backward(&mut doc, WIN).expect("delete");
            }
            doc
        });
    });
}

fn bench_kill_yank(c: &mut Criterion) {
    c.bench_function("kill_yank_cycle", |b| {
        b.iter(|| {
            let mut doc = Document::from_text("alpha beta\tgamma delta").expect("load");
            let mut yank = edit::YankRegister::new();
            for _ in 0..50 {
                edit::kill_to_end_of_line(&mut doc, &mut yank).expect("kill");
                edit::yank(&mut doc, WIN, &yank).expect("yank");
                motion::line_start(&mut doc, WIN);
            }
            doc
        });
    });
}

fn bench_redraw(c: &mut Criterion) {
    let text = vec!["some representative line of editor text"; 200].join("\n");
    let doc = Document::from_text(&text).expect("load");
    c.bench_function("whole_window_redraw", |b| {
        b.iter(|| {
            let mut screen = Screen::new(Vec::with_capacity(16384), WIN);
            screen.refresh(black_box(&doc), Redraw::Whole).expect("refresh");
            screen.into_inner()
        });
    });
}

criterion_group!(benches, bench_insert, bench_delete, bench_kill_yank, bench_redraw);
criterion_main!(benches);
