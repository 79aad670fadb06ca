//! JSON schedule source over HTTP.

use std::time::Duration;

use anyhow::{Context, Result};
use golfcal_core::source::{
    FetchOutcome, ScheduleEntry, ScheduleSource, parse_schedule, retain_tracked,
};
use reqwest::blocking::Client;
use tracing::{debug, warn};

/// Some schedule hosts reject requests without a browser-like agent.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Fetches a JSON schedule from a URL template containing `{tour}`.
pub struct HttpScheduleSource {
    client: Client,
    url_template: String,
    tracked_events: Vec<String>,
}

impl HttpScheduleSource {
    pub fn new(
        url_template: &str,
        timeout: Duration,
        tracked_events: Vec<String>,
    ) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(HttpScheduleSource {
            client,
            url_template: url_template.to_string(),
            tracked_events,
        })
    }

    fn url_for(&self, tour: &str) -> String {
        self.url_template.replace("{tour}", tour)
    }

    fn try_fetch(&self, tour: &str) -> Result<Vec<ScheduleEntry>> {
        let url = self.url_for(tour);
        debug!("Fetching schedule from {}", url);

        let body = self
            .client
            .get(&url)
            .send()
            .with_context(|| format!("request to {} failed", url))?
            .error_for_status()?
            .text()?;
        debug!("Fetched {} bytes", body.len());

        let entries = parse_schedule(&body).context("malformed schedule")?;
        let total = entries.len();
        let entries = retain_tracked(entries, &self.tracked_events);
        debug!("Keeping {} of {} scheduled events", entries.len(), total);

        Ok(entries)
    }
}

impl ScheduleSource for HttpScheduleSource {
    fn fetch(&self, tour: &str) -> FetchOutcome {
        match self.try_fetch(tour) {
            Ok(entries) => FetchOutcome::Available(entries),
            Err(e) => {
                warn!("Could not fetch {} schedule: {:#}", tour, e);
                FetchOutcome::unavailable(format!("{:#}", e))
            }
        }
    }
}
