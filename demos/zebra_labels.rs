use anyhow::{Context, Result};
use pdf_labels::label::{generate_to_path, LabelLayoutConfig, LabelRecord};
use std::path::PathBuf;

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    // optional first argument: a directory holding logo.png / logo.svg
    let assets_dir: Option<PathBuf> = std::env::args().nth(1).map(PathBuf::from);

    let records = vec![
        LabelRecord::new("GoA Jr + N1 + N2 + N3 (27/08)", "Visão Campinas", "Caderno de atividades.pdf", 15)?,
        LabelRecord::new("4512", "Unidade Sorocaba", "Quantidade Total - Arquivo com nome extremamente longo para testar quebra de linhas e posicionamento da logo", 3)?
            .with_person_name("Maria Souza"),
        LabelRecord::new("4513", "Unidade Jundiaí", "apostila-fisica.pdf", 40)?,
    ];

    let config = LabelLayoutConfig::zebra();
    generate_to_path(&records, &config, assets_dir.as_deref(), "zebra-labels.pdf")
        .context("failed to generate zebra labels")?;

    log::info!("wrote zebra-labels.pdf");
    Ok(())
}
