use anyhow::{Context, Result};
use pdf_labels::label::{generate_with_logos, LabelLayoutConfig, LabelRecord, LogoChain, SynthesizedLogo};

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = LabelLayoutConfig::default();
    let dims = config.dimensions()?;
    log::info!(
        "{}×{} mm labels, {} per row, {} per column, {} per page",
        dims.label_width_mm,
        dims.label_height_mm,
        dims.labels_per_row,
        dims.labels_per_col,
        dims.labels_per_page
    );

    let records = (1..=23)
        .map(|i| {
            LabelRecord::new(
                format!("OP {}", 4500 + i),
                format!("Unit {}", i % 4 + 1),
                lipsum::lipsum_words(4 + i % 12),
                i as u32,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    let logos = LogoChain::new().with_strategy(SynthesizedLogo::with_text("CDG"));
    let doc = generate_with_logos(&records, &config, &logos, None)
        .context("failed to lay out labels")?;
    log::info!("{} labels on {} pages", records.len(), doc.page_count());

    doc.write_to_path("sheet-labels.pdf")
        .context("failed to write sheet-labels.pdf")?;
    Ok(())
}
