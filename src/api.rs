use std::time::Duration;

use anyhow::bail;
use log::{debug, warn};
use reqwest::StatusCode;
use serde_json::Value;
use tokio::time::sleep;
use url::Url;

use crate::chrono_util::to_epoch_millis;
use crate::schema::{FetchWindow, GameMode};

const GAME_LIST_BASE_URL: &str = "https://5-data.amae-koromo.com/api/v2/pl4";
const GAME_LIST_LIMIT: u32 = 1000;

pub struct AmaeKoromoClient {
    client: reqwest::Client,
    rate_limit_wait: Duration,
}

impl AmaeKoromoClient {
    pub fn new(rate_limit_wait: Duration) -> reqwest::Result<Self> {
        Ok(Self {
            client: reqwest_client()?,
            rate_limit_wait,
        })
    }

    /// Fetches the list of games played within the given window.
    /// While the server keeps rate-limiting us, the same request is retried
    /// indefinitely with a fixed pause in between.
    /// Any other non-success status is an error.
    pub async fn fetch_game_list(
        &self,
        window: FetchWindow,
        mode: GameMode,
    ) -> anyhow::Result<Vec<Value>> {
        let url = game_list_url(window, mode)?;
        loop {
            debug!("Fetching {url}");
            let response = self.client.get(url.clone()).send().await?;
            match response.status() {
                StatusCode::OK => return Ok(response.json().await?),
                StatusCode::TOO_MANY_REQUESTS => {
                    warn!(
                        "Rate limit exceeded.  Waiting for {} seconds...",
                        self.rate_limit_wait.as_secs()
                    );
                    sleep(self.rate_limit_wait).await;
                }
                status => bail!("Unable to fetch game list: server returned {status:?}"),
            }
        }
    }
}

/// The endpoint takes the window end first, then the start, in Unix milliseconds.
pub fn game_list_url(window: FetchWindow, mode: GameMode) -> anyhow::Result<Url> {
    Ok(Url::parse(&format!(
        "{GAME_LIST_BASE_URL}/games/{}/{}?limit={GAME_LIST_LIMIT}&descending=true&mode={mode}",
        to_epoch_millis(window.end()),
        to_epoch_millis(window.start()),
    ))?)
}

fn reqwest_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder().connection_verbose(true).build()
}
