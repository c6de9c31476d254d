// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the page operations in pdftool-document.
// Uses a synthetic 20-page document sharing one font resource.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use pdftool_document::{PdfReader, merge_documents};

const PAGE_COUNT: u32 = 20;

// ---------------------------------------------------------------------------
// Fixture
// ---------------------------------------------------------------------------

fn synthetic_pdf(pages: u32) -> Vec<u8> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids = Vec::new();
    for number in 1..=pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(format!("Page {number}"))]),
                Operation::new("ET", vec![]),
            ],
        };
        let encoded = content.encode().expect("encode content");
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Count" => kids.len() as i64,
            "Kids" => kids,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("serialise fixture");
    bytes
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Extract every page of the fixture as its own document.
fn bench_split(c: &mut Criterion) {
    let reader = PdfReader::from_bytes(&synthetic_pdf(PAGE_COUNT)).expect("load fixture");

    c.bench_function("split (20 pages)", |b| {
        b.iter(|| {
            for page in 1..=PAGE_COUNT {
                black_box(reader.extract_page(black_box(page)).expect("extract"));
            }
        });
    });
}

/// Merge three copies of the fixture.
fn bench_merge(c: &mut Criterion) {
    let bytes = synthetic_pdf(PAGE_COUNT);
    let readers: Vec<PdfReader> = (0..3)
        .map(|_| PdfReader::from_bytes(&bytes).expect("load fixture"))
        .collect();

    c.bench_function("merge (3 x 20 pages)", |b| {
        b.iter(|| black_box(merge_documents(black_box(&readers)).expect("merge")));
    });
}

criterion_group!(benches, bench_split, bench_merge);
criterion_main!(benches);
