use log::{error, info};
use tokio::time::sleep;

use crate::{api::AmaeKoromoClient, archive::Archive, config::Config, schema::FetchWindow};

#[derive(Default, Debug, PartialEq, Eq)]
pub struct CollectSummary {
    pub fetched: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Fetches and saves every quarter-day window of the configured month,
/// strictly in order.  Windows already present in the archive are not
/// fetched again.  A failed window is reported and does not stop the run.
pub async fn collect_month(
    client: &AmaeKoromoClient,
    archive: &Archive,
    config: &Config,
) -> anyhow::Result<CollectSummary> {
    let windows = FetchWindow::month_windows(config.input_year, config.input_month)?;
    let mode = config.game_mode;
    let mut summary = CollectSummary::default();
    for window in windows {
        let (date, quarter) = (window.start().date(), window.quarter() + 1);
        if let Some(path) = archive.existing_file(window, mode)? {
            info!("File already exists: {path:?}.  Skipping.");
            summary.skipped += 1;
            continue;
        }
        match client.fetch_game_list(window, mode).await {
            Ok(games) => {
                let path = archive.save(window, mode, &games)?;
                info!("{} matches on {date} (quarter {quarter}/4).", games.len());
                info!("Successfully saved to {path:?}.");
                summary.fetched += 1;
            }
            Err(e) => {
                error!("Failed to fetch the game list for {date} (quarter {quarter}/4): {e:#}");
                summary.failed += 1;
            }
        }
        sleep(config.fetch_interval()).await;
    }
    Ok(summary)
}
