use std::path::PathBuf;

use clap::Parser;
use log::info;
use majsoul_scraping::{
    api::AmaeKoromoClient, archive::Archive, config::Config, data_collector::collect_month,
};

#[derive(Parser)]
struct Opts {
    #[arg(long, default_value = "config.json")]
    config_path: PathBuf,
    /// Overrides the archive root in the config file.
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let opts = Opts::parse();
    let mut config = Config::load(&opts.config_path)?;
    if let Some(data_dir) = opts.data_dir {
        config.data_dir = data_dir;
    }
    info!(
        "Fetching game lists for {}-{:02} (mode {}).",
        config.input_year, config.input_month, config.game_mode
    );

    let client = AmaeKoromoClient::new(config.rate_limit_wait())?;
    let archive = Archive::new(&config.data_dir);
    let summary = collect_month(&client, &archive, &config).await?;
    info!(
        "Done: {} windows fetched, {} skipped, {} failed.",
        summary.fetched, summary.skipped, summary.failed
    );
    Ok(())
}
