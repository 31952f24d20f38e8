//! Batch generation is one blocking call; a caller with an event loop can hand
//! it to a worker thread and pick up the result later.

use anyhow::{anyhow, Result};
use pdf_labels::label::{generate_to_path, LabelLayoutConfig, LabelRecord};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let records = (1..=200)
        .map(|i| LabelRecord::new(format!("{}", 7000 + i), "Campinas", "apostila.pdf", 1))
        .collect::<Result<Vec<_>, _>>()?;

    let (tx, rx) = mpsc::channel();
    let worker = thread::spawn(move || {
        let result = generate_to_path(
            &records,
            &LabelLayoutConfig::default(),
            None,
            "worker-labels.pdf",
        );
        let _ = tx.send(result);
    });

    loop {
        match rx.recv_timeout(Duration::from_millis(50)) {
            Ok(result) => {
                result?;
                log::info!("wrote worker-labels.pdf");
                break;
            }
            Err(mpsc::RecvTimeoutError::Timeout) => log::debug!("still rendering..."),
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                return Err(anyhow!("worker exited without a result"))
            }
        }
    }

    worker
        .join()
        .map_err(|_| anyhow!("label worker panicked"))?;
    Ok(())
}
