//! Builds a local copy of one activity's scoreboard and the stats of everyone on it by
//! reading from a running API.

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::{Map, Value};
use thiserror::Error;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::{config::RunConfiguration, context::Context};

use self::{
    files::{append_records, max_page, pending_players, ScrapeFiles},
    retry::{retry, Attempt, Backoff},
};

pub mod files;
pub mod retry;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("No activity to scrape, set SCRAPE_ACTIVITY")]
    MissingActivity,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },

    #[error("Player not found: {0}")]
    MissingPlayer(String),

    #[error("Hiscores are throttled")]
    Throttled,

    #[error("Unexpected record: {0}")]
    UnexpectedRecord(String),
}

pub struct Scraper {
    client: reqwest::Client,
    api_url: String,
    activity: String,
    files: ScrapeFiles,
    page_goal: i64,
    pause: Duration,
    page_backoff: Backoff,
    player_backoff: Backoff,
}

impl Scraper {
    pub fn new(config: &RunConfiguration, activity: String) -> Result<Self, ScrapeError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            api_url: config.scrape_api_url.trim_end_matches('/').to_string(),
            files: ScrapeFiles::new(&config.scrape_data_dir, &activity),
            activity,
            page_goal: config.scrape_page_goal,
            pause: Duration::from_secs(config.scrape_pause_secs),
            page_backoff: Backoff::Constant {
                interval: Duration::from_secs(10),
                max_tries: 2,
            },
            player_backoff: Backoff::Exponential {
                base: Duration::from_secs(1),
                max_tries: 5,
            },
        })
    }

    pub async fn run(&self) -> Result<(), ScrapeError> {
        loop {
            let max_page = max_page(&self.files.scoreboard)?;
            if max_page >= self.page_goal {
                info!(
                    "Reached page {} of {}, nothing left to scrape",
                    max_page, self.activity
                );
                return Ok(());
            }

            info!("Resuming scraping from page {}", max_page + 1);
            let scraped = self.scrape_scoreboard(max_page + 1).await?;

            info!("Taking a {} second break...", self.pause.as_secs());
            sleep(self.pause).await;

            self.scrape_players().await?;

            if scraped == 0 {
                warn!(
                    "No new pages of {} after page {}, stopping",
                    self.activity, max_page
                );
                return Ok(());
            }
        }
    }

    /// Appends pages from `start` up to the goal, stopping at the first page that can't be
    /// fetched. Returns how many pages were added.
    async fn scrape_scoreboard(&self, start: i64) -> Result<i64, ScrapeError> {
        let mut scraped = 0;

        for page in start..=self.page_goal {
            let rows = match self.download_page(page).await {
                Ok(rows) => rows,
                Err(e) => {
                    warn!("Stopped scraping {} at page {}: {}", self.activity, page, e);
                    break;
                }
            };

            let records = rows
                .into_iter()
                .map(|row| match row {
                    Value::Object(mut record) => {
                        record.insert("page".to_string(), Value::from(page));
                        Ok(Value::Object(record))
                    }
                    other => Err(other),
                })
                .collect::<Result<Vec<_>, _>>();

            let records = match records {
                Ok(records) => records,
                Err(row) => {
                    warn!(
                        "Stopped scraping {} at page {}: unexpected record {}",
                        self.activity, page, row
                    );
                    break;
                }
            };

            append_records(&self.files.scoreboard, &records)?;
            scraped += 1;
        }

        Ok(scraped)
    }

    async fn scrape_players(&self) -> Result<(), ScrapeError> {
        let players = pending_players(&self.files)?;
        info!("Downloading {} players...", players.len());

        for name in players {
            let stats = match self.download_player(&name).await {
                Ok(stats) => stats,
                Err(e) => {
                    warn!("Skipping {}: {}", name, e);
                    continue;
                }
            };

            let mut record = Map::new();
            record.insert("name".to_string(), Value::from(name.as_str()));
            match stats {
                Value::Object(stats) => record.extend(stats),
                other => return Err(ScrapeError::UnexpectedRecord(other.to_string())),
            }

            append_records(&self.files.players, &[Value::Object(record)])?;
        }

        Ok(())
    }

    async fn download_page(&self, page: i64) -> Result<Vec<Value>, ScrapeError> {
        let url = format!("{}/activity/{}", self.api_url, self.activity);

        retry(&self.page_backoff, || async {
            let response = self
                .client
                .get(&url)
                .query(&[("page", page)])
                .send()
                .await
                .map_err(|e| Attempt::Stop(ScrapeError::from(e)))?;

            let status = response.status();
            if !status.is_success() {
                return Err(Attempt::Retry(ScrapeError::Status {
                    url: url.clone(),
                    status: status.as_u16(),
                }));
            }

            response
                .json::<Vec<Value>>()
                .await
                .map_err(|e| Attempt::Stop(ScrapeError::from(e)))
        })
        .await
    }

    /// The API answers 500 for players the hiscores don't know and 503 when the hiscores
    /// came back empty, which usually means throttling.
    async fn download_player(&self, name: &str) -> Result<Value, ScrapeError> {
        let url = format!("{}/player/{}", self.api_url, name);

        retry(&self.player_backoff, || async {
            let response = self
                .client
                .get(&url)
                .send()
                .await
                .map_err(|e| Attempt::Stop(ScrapeError::from(e)))?;

            match response.status() {
                StatusCode::INTERNAL_SERVER_ERROR => {
                    return Err(Attempt::Stop(ScrapeError::MissingPlayer(name.to_string())))
                }
                StatusCode::SERVICE_UNAVAILABLE => {
                    return Err(Attempt::Retry(ScrapeError::Throttled))
                }
                status if !status.is_success() => {
                    return Err(Attempt::Retry(ScrapeError::Status {
                        url: url.clone(),
                        status: status.as_u16(),
                    }))
                }
                _ => {}
            }

            response
                .json::<Value>()
                .await
                .map_err(|e| Attempt::Stop(ScrapeError::from(e)))
        })
        .await
    }
}

pub async fn run_scrape(ctx: Context) -> Result<(), ScrapeError> {
    let activity = ctx
        .config
        .scrape_activity
        .clone()
        .ok_or(ScrapeError::MissingActivity)?;

    Scraper::new(&ctx.config, activity)?.run().await
}
