use anyhow::{Context, Result};
use pdf_labels::label::{validate_records, RecordDraft};
use pdf_labels::report::{generate_report_to_path, ReportConfig, ReportRow};

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let drafts: Vec<RecordDraft> = (1..=120)
        .map(|i| {
            RecordDraft::new(
                format!("OP{}", 9000 + i),
                if i % 17 == 0 { String::new() } else { format!("Unidade Regional {i}") },
                format!("material-didatico-volume-{i}-revisado.pdf"),
                (i % 9) as i64,
            )
        })
        .collect();

    let quality = validate_records(&drafts);
    log::info!(
        "{} rows, {} valid, {} with problems",
        quality.total,
        quality.valid,
        quality.with_problems
    );
    for problem in quality.problems.iter() {
        log::warn!("{problem}");
    }

    let rows: Vec<ReportRow> = drafts
        .into_iter()
        .enumerate()
        .filter_map(|(i, draft)| draft.into_record().ok().map(|r| (i, r)))
        .map(|(i, record)| ReportRow {
            id: i as i64 + 1,
            order_id: record.order_id().to_string(),
            unit_name: record.unit_name().to_string(),
            file_name: record.file_name().to_string(),
            quantity: record.quantity(),
        })
        .collect();

    generate_report_to_path(&rows, &ReportConfig::default(), "records-report.pdf")
        .context("failed to write records-report.pdf")?;
    log::info!("wrote records-report.pdf");
    Ok(())
}
