//! Offline export of a participants JSON file to CSV.
//!
//! Usage: `ugclab-export-csv [json_path]` (default `data/participants.json`).
//! Writes `<name>.csv` next to the input.

use std::path::PathBuf;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ugclab_engine::infrastructure::csv_export::export_file;
use ugclab_engine::CollectorConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ugclab_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let json_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| CollectorConfig::from_env().store_path());

    tracing::info!(path = %json_path.display(), "Exporting");
    let output = export_file(&json_path, None).await?;
    println!("Successfully exported CSV to: {}", output.display());

    Ok(())
}
