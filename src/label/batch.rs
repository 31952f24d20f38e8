use crate::document::Document;
use crate::info::Info;
use crate::label::config::LabelLayoutConfig;
use crate::label::logo::LogoChain;
use crate::label::record::LabelRecord;
use crate::label::render::{LabelFontIds, LabelRenderer};
use crate::label::tile::tile;
use crate::layout::Margins;
use crate::page::Page;
use crate::LabelError;
use chrono::Local;
use std::path::Path;

/// Render `records` into a new document, one label per record in input order.
///
/// The logo is looked up in `assets_dir` with the default [LogoChain]. Nothing
/// is returned unless every label rendered; an empty batch is an error.
pub fn generate(
    records: &[LabelRecord],
    config: &LabelLayoutConfig,
    assets_dir: Option<&Path>,
) -> Result<Document, LabelError> {
    generate_with_logos(records, config, &LogoChain::default(), assets_dir)
}

/// Like [generate], with a custom logo lookup
pub fn generate_with_logos(
    records: &[LabelRecord],
    config: &LabelLayoutConfig,
    logos: &LogoChain,
    assets_dir: Option<&Path>,
) -> Result<Document, LabelError> {
    if records.is_empty() {
        return Err(LabelError::EmptyInput);
    }

    config.validate()?;
    let placements = tile(records.len(), config)?;
    log::debug!(
        "tiled {} labels over {} pages",
        placements.len(),
        placements.last().map(|p| p.page_index + 1).unwrap_or(0)
    );

    let now = Local::now();
    let timestamp = config.format_timestamp(&now)?;

    let mut doc = Document::default();
    let font_ids = LabelFontIds {
        regular: doc.add_font(config.fonts.regular.load()?),
        bold: doc.add_font(config.fonts.bold.load()?),
    };
    let logo = logos.resolve(assets_dir).install(&mut doc);

    let page_size = (config.page_width, config.page_height);
    let mut pages: Vec<Page> = Vec::new();
    {
        let renderer = LabelRenderer::new(&doc.fonts, font_ids, &logo, &timestamp);
        for (record, placement) in records.iter().zip(placements.iter()) {
            while pages.len() <= placement.page_index {
                pages.push(Page::new(page_size, Some(Margins::all(config.margin))));
            }
            let page = &mut pages[placement.page_index];
            renderer.render(page, record, config, placement.pdf_origin(config.page_height))?;
        }
    }

    let page_count = pages.len();
    for page in pages {
        doc.add_page(page);
    }

    let mut info = Info::new();
    info.title("Production labels")
        .subject(format!("{} labels", records.len()))
        .created(now);
    doc.set_info(info);

    log::info!("rendered {} labels on {} pages", records.len(), page_count);
    Ok(doc)
}

/// Render `records` and write the PDF to `output`. The file is only created
/// once the whole document has been built and serialized in memory.
pub fn generate_to_path<P: AsRef<Path>>(
    records: &[LabelRecord],
    config: &LabelLayoutConfig,
    assets_dir: Option<&Path>,
    output: P,
) -> Result<(), LabelError> {
    generate(records, config, assets_dir)?.write_to_path(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(n: usize) -> Vec<LabelRecord> {
        (1..=n)
            .map(|i| LabelRecord::new(format!("OP{i}"), "Unit", "file.pdf", i as u32).unwrap())
            .collect()
    }

    #[test]
    fn empty_batch_is_rejected() {
        assert!(matches!(
            generate(&[], &LabelLayoutConfig::default(), None),
            Err(LabelError::EmptyInput)
        ));
    }

    #[test]
    fn grid_batch_breaks_pages_at_capacity() {
        let doc = generate(&records(23), &LabelLayoutConfig::default(), None).unwrap();
        assert_eq!(doc.page_count(), 3);

        let titles_on = |i: usize| {
            doc.page_at(i)
                .unwrap()
                .spans()
                .filter(|s| s.text.starts_with("OP: "))
                .count()
        };
        assert_eq!((titles_on(0), titles_on(1), titles_on(2)), (10, 10, 3));
    }

    #[test]
    fn labels_keep_input_order() {
        let doc = generate(&records(12), &LabelLayoutConfig::default(), None).unwrap();
        let titles: Vec<String> = (0..doc.page_count())
            .flat_map(|i| {
                doc.page_at(i)
                    .unwrap()
                    .spans()
                    .filter(|s| s.text.starts_with("OP: "))
                    .map(|s| s.text.clone())
                    .collect::<Vec<_>>()
            })
            .collect();
        let expected: Vec<String> = (1..=12).map(|i| format!("OP: OP{i}")).collect();
        assert_eq!(titles, expected);
    }

    #[test]
    fn every_label_carries_the_same_timestamp() {
        let config = LabelLayoutConfig::zebra().with_timestamp_format("%Y");
        let doc = generate(&records(3), &config, None).unwrap();
        let year = Local::now().format("%Y").to_string();
        for i in 0..3 {
            assert!(doc.page_at(i).unwrap().spans().any(|s| s.text == year));
        }
    }

    #[test]
    fn bad_configuration_fails_before_rendering() {
        let config = LabelLayoutConfig::default().with_margin(crate::units::Mm(200.0));
        assert!(matches!(
            generate(&records(1), &config, None),
            Err(LabelError::Configuration(_))
        ));
    }

    #[test]
    fn info_is_set() {
        let doc = generate(&records(2), &LabelLayoutConfig::default(), None).unwrap();
        let info = doc.info.as_ref().unwrap();
        assert_eq!(info.title.as_deref(), Some("Production labels"));
        assert!(info.created.is_some());
    }
}
