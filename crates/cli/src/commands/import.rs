use anyhow::Result;
use exam_results_service::BatchLoader;
use std::path::Path;

use crate::open_storage;

pub(crate) async fn run_import(file: &Path, progress_every: u64) -> Result<()> {
    let storage = open_storage().await?;
    let report = BatchLoader::new(storage).with_progress_every(progress_every).load_file(file).await?;
    println!(
        "Imported {} of {} records ({} failed)",
        report.imported, report.total, report.failed
    );
    Ok(())
}

pub(crate) async fn run_seed_sample() -> Result<()> {
    let storage = open_storage().await?;
    let written = BatchLoader::new(storage).seed_sample().await?;
    println!("Seeded {written} sample records");
    Ok(())
}
