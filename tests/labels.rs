use std::fs;
use std::path::PathBuf;

use pdf_labels::label::{
    generate, generate_to_path, tile, Captions, FontSource, LabelFonts, LabelLayoutConfig,
    LabelRecord, TypeScale,
};
use pdf_labels::report::{generate_report, generate_report_to_path, ReportConfig, ReportRow};
use pdf_labels::{LabelError, Mm};

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("pdf-labels-it-{}-{name}", std::process::id()))
}

fn record(order_id: &str, file_name: &str) -> LabelRecord {
    LabelRecord::new(order_id, "Unidade Campinas", file_name, 10).expect("valid record")
}

fn order_ids_on_page(doc: &pdf_labels::Document, page: usize) -> Vec<String> {
    doc.page_at(page)
        .expect("page exists")
        .spans()
        .filter_map(|s| s.text.strip_prefix("OP: ").map(str::to_string))
        .collect()
}

#[test]
fn a4_grid_of_23_labels_spans_three_pages() {
    let config = LabelLayoutConfig::default();
    let placements = tile(23, &config).unwrap();

    let mut fill = [0usize; 3];
    for placement in placements.iter() {
        fill[placement.page_index] += 1;
    }
    assert_eq!(fill, [10, 10, 3]);

    let dims = config.dimensions().unwrap();
    assert_eq!(
        (dims.labels_per_row, dims.labels_per_col, dims.labels_per_page),
        (2, 5, 10)
    );
}

#[test]
fn single_per_page_tiles_one_label_per_page() {
    let config = LabelLayoutConfig::zebra();
    let placements = tile(7, &config).unwrap();
    assert_eq!(placements.len(), 7);
    assert!(placements
        .iter()
        .enumerate()
        .all(|(i, p)| p.page_index == i && p.width == config.page_width && p.height == config.page_height));
}

#[test]
fn zebra_batch_renders_one_page_per_record_in_order() {
    let records = vec![
        record("1001", "a.pdf"),
        record("1002", "b.pdf"),
        record("1003", "c.pdf"),
    ];
    let doc = generate(&records, &LabelLayoutConfig::zebra(), None).unwrap();

    assert_eq!(doc.page_count(), 3);
    for (i, expected) in ["1001", "1002", "1003"].iter().enumerate() {
        assert_eq!(order_ids_on_page(&doc, i), vec![expected.to_string()]);
    }

    let mut pdf: Vec<u8> = Vec::new();
    doc.write(&mut pdf).unwrap();
    assert!(pdf.starts_with(b"%PDF-"));
    assert!(String::from_utf8_lossy(&pdf).contains("/Count 3"));
}

#[test]
fn long_file_name_is_capped_at_three_lines() {
    let file_name = "arquivo ".repeat(15);
    assert_eq!(file_name.len(), 120);

    // a wide logo narrows the text column to roughly twenty characters
    let config = LabelLayoutConfig::zebra().with_logo_size(Mm(60.0), Mm(8.0));
    let doc = generate(&[record("1", &file_name)], &config, None).unwrap();

    let file_lines: Vec<String> = doc
        .page_at(0)
        .unwrap()
        .spans()
        .filter(|s| s.font.size == config.type_scale.body)
        .map(|s| s.text.clone())
        .collect();
    assert_eq!(file_lines.len(), 3);
    assert!(file_lines[0].starts_with("File: "));
    assert!(file_lines[2].ends_with("..."));
}

#[test]
fn captions_and_sizes_come_from_the_config() {
    let captions = Captions {
        order_id: "Pedido: ".into(),
        unit_name: "Unidade: ".into(),
        quantity: "Qtd: ".into(),
        ..Captions::default()
    };
    let type_scale = TypeScale {
        title: pdf_labels::Pt(14.0),
        ..TypeScale::default()
    };
    let config = LabelLayoutConfig::zebra()
        .with_captions(captions)
        .with_type_scale(type_scale);
    let doc = generate(&[record("77", "f.pdf")], &config, None).unwrap();

    let page = doc.page_at(0).unwrap();
    let title = page.spans().find(|s| s.text == "Pedido: 77").expect("title span");
    assert_eq!(title.font.size, pdf_labels::Pt(14.0));
    assert!(page.spans().any(|s| s.text.starts_with("Unidade: ")));
    assert!(page.spans().any(|s| s.text == "Qtd: 10"));
}

#[test]
fn empty_batch_writes_nothing() {
    let output = scratch_path("empty.pdf");
    let _ = fs::remove_file(&output);

    let result = generate_to_path(&[], &LabelLayoutConfig::default(), None, &output);
    assert!(matches!(result, Err(LabelError::EmptyInput)));
    assert!(!output.exists());
}

#[test]
fn batch_is_written_to_disk() {
    let output = scratch_path("labels.pdf");
    let records: Vec<LabelRecord> = (1..=12).map(|i| record(&i.to_string(), "f.pdf")).collect();
    generate_to_path(&records, &LabelLayoutConfig::default(), None, &output).unwrap();

    let bytes = fs::read(&output).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    let _ = fs::remove_file(&output);
}

#[test]
fn unusable_logos_fall_back_to_the_synthesized_block() {
    let missing = scratch_path("no-such-dir");
    let doc = generate(&[record("1", "f.pdf")], &LabelLayoutConfig::zebra(), Some(&missing)).unwrap();
    assert_eq!(doc.images.len(), 0);
    assert!(doc.page_at(0).unwrap().spans().any(|s| s.text == "LOGO"));

    let corrupt = scratch_path("corrupt-logo");
    fs::create_dir_all(&corrupt).unwrap();
    fs::write(corrupt.join("logo.png"), b"\x89PNG but not really").unwrap();
    let doc = generate(&[record("1", "f.pdf")], &LabelLayoutConfig::zebra(), Some(&corrupt)).unwrap();
    assert_eq!(doc.images.len(), 0);
    assert!(doc.page_at(0).unwrap().spans().any(|s| s.text == "LOGO"));
    let _ = fs::remove_dir_all(&corrupt);
}

#[test]
fn svg_logo_is_embedded_once_for_the_whole_batch() {
    let dir = scratch_path("svg-logo");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("logo.svg"),
        br##"<svg xmlns="http://www.w3.org/2000/svg" width="150" height="80"><rect width="150" height="80" fill="#003399"/></svg>"##,
    )
    .unwrap();

    let records: Vec<LabelRecord> = (1..=4).map(|i| record(&i.to_string(), "f.pdf")).collect();
    let doc = generate(&records, &LabelLayoutConfig::default(), Some(&dir)).unwrap();
    assert_eq!(doc.images.len(), 1);

    let mut pdf: Vec<u8> = Vec::new();
    doc.write(&mut pdf).unwrap();
    assert!(pdf.starts_with(b"%PDF-"));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_truetype_font_fails_the_batch() {
    let fonts = LabelFonts {
        regular: FontSource::TrueType(scratch_path("missing.ttf")),
        ..LabelFonts::default()
    };
    let config = LabelLayoutConfig::default().with_fonts(fonts);
    assert!(matches!(
        generate(&[record("1", "f.pdf")], &config, None),
        Err(LabelError::Io(_))
    ));
}

#[test]
fn report_paginates_and_totals() {
    let rows: Vec<ReportRow> = (1..=150)
        .map(|i| ReportRow {
            id: i,
            order_id: format!("OP{i}"),
            unit_name: "Unidade Regional de Campinas".into(),
            file_name: lipsum::lipsum_words(6),
            quantity: 1,
        })
        .collect();

    let doc = generate_report(&rows, &ReportConfig::default()).unwrap();
    assert!(doc.page_count() > 1);

    let last = doc.page_at(doc.page_count() - 1).unwrap();
    assert_eq!(
        last.spans().last().map(|s| s.text.as_str()),
        Some("Total records: 150")
    );
    let first_texts: Vec<&str> = doc.page_at(0).unwrap().spans().map(|s| s.text.as_str()).collect();
    assert!(first_texts.contains(&"Unidade Regiona..."));

    let output = scratch_path("report.pdf");
    generate_report_to_path(&rows, &ReportConfig::default(), &output).unwrap();
    assert!(fs::read(&output).unwrap().starts_with(b"%PDF-"));
    let _ = fs::remove_file(&output);

    assert!(matches!(
        generate_report(&[], &ReportConfig::default()),
        Err(LabelError::EmptyInput)
    ));
}
