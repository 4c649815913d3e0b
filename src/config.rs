use std::{path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::{fs_json_util::read_json, schema::GameMode};

/// Batch job configuration, usually loaded from `config.json`.
#[derive(Debug, TypedBuilder, Serialize, Deserialize)]
pub struct Config {
    pub input_year: i32,
    pub input_month: u32,
    pub game_mode: GameMode,
    #[builder(default = default_data_dir())]
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[builder(default = DEFAULT_FETCH_INTERVAL_SECONDS)]
    #[serde(default = "default_fetch_interval_seconds")]
    pub fetch_interval_seconds: u64,
    #[builder(default = DEFAULT_RATE_LIMIT_WAIT_SECONDS)]
    #[serde(default = "default_rate_limit_wait_seconds")]
    pub rate_limit_wait_seconds: u64,
}

const DEFAULT_FETCH_INTERVAL_SECONDS: u64 = 10;
const DEFAULT_RATE_LIMIT_WAIT_SECONDS: u64 = 100;

fn default_data_dir() -> PathBuf {
    "./sapk_data".into()
}
fn default_fetch_interval_seconds() -> u64 {
    DEFAULT_FETCH_INTERVAL_SECONDS
}
fn default_rate_limit_wait_seconds() -> u64 {
    DEFAULT_RATE_LIMIT_WAIT_SECONDS
}

impl Config {
    pub fn load(path: impl Into<PathBuf> + std::fmt::Debug) -> anyhow::Result<Self> {
        read_json(path)
    }

    /// Pause between consecutive window fetches.
    pub fn fetch_interval(&self) -> Duration {
        Duration::from_secs(self.fetch_interval_seconds)
    }

    /// Pause before retrying a rate-limited request.
    pub fn rate_limit_wait(&self) -> Duration {
        Duration::from_secs(self.rate_limit_wait_seconds)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::schema::GameMode;

    use super::Config;

    #[test]
    fn minimal_config_falls_back_to_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"input_year": 2024, "input_month": 2, "game_mode": 16}"#)
                .unwrap();
        assert_eq!(config.input_year, 2024);
        assert_eq!(config.input_month, 2);
        assert_eq!(config.game_mode, GameMode::from(16));
        assert_eq!(config.data_dir, std::path::PathBuf::from("./sapk_data"));
        assert_eq!(config.fetch_interval(), Duration::from_secs(10));
        assert_eq!(config.rate_limit_wait(), Duration::from_secs(100));
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = Config::builder()
            .input_year(2023)
            .input_month(12)
            .game_mode(12.into())
            .fetch_interval_seconds(1)
            .build();
        assert_eq!(config.fetch_interval(), Duration::from_secs(1));
        assert_eq!(config.rate_limit_wait(), Duration::from_secs(100));
    }
}
