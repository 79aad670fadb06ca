pub mod generate;
pub mod upcoming;

use std::path::Path;

use anyhow::{Context as _, Result};
use chrono::{NaiveDate, Utc};
use golfcal_core::catalog::Catalog;
use golfcal_core::constants::DISPLAY_TIMEZONE;
use golfcal_core::settings::Settings;
use golfcal_core::source::{FetchOutcome, ScheduleSource};
use tracing::debug;

use crate::http_source::HttpScheduleSource;
use crate::utils::tui::create_spinner;

/// Number of upcoming tournaments listed after a run
pub const UPCOMING_LIMIT: usize = 5;

/// Settings and catalog, loaded once per process.
pub struct Context {
    pub settings: Settings,
    pub catalog: Catalog,
}

impl Context {
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let settings = Settings::load(config_path).context("Failed to load configuration")?;

        let catalog = match settings.catalog_path() {
            Some(path) => Catalog::from_path(&path)
                .with_context(|| format!("Failed to load catalog from {}", path.display()))?,
            None => Catalog::builtin().context("Built-in tournament catalog is invalid")?,
        };
        debug!(
            "Loaded catalog {} with {} tournaments",
            catalog.version(),
            catalog.len()
        );

        Ok(Context { settings, catalog })
    }
}

/// Today's date in the feed's display zone.
pub fn today() -> NaiveDate {
    Utc::now().with_timezone(&DISPLAY_TIMEZONE).date_naive()
}

/// Ask the configured schedule source for extra tournaments. Never fails.
pub fn fetch_external(settings: &Settings) -> FetchOutcome {
    let Some(template) = settings.source.url_template() else {
        return FetchOutcome::unavailable("no schedule source configured");
    };

    let timeout = match settings.source.timeout() {
        Ok(timeout) => timeout,
        Err(e) => return FetchOutcome::unavailable(e.to_string()),
    };

    let source = match HttpScheduleSource::new(
        template,
        timeout,
        settings.source.tracked_events.clone(),
    ) {
        Ok(source) => source,
        Err(e) => return FetchOutcome::unavailable(format!("could not create HTTP client: {}", e)),
    };

    let spinner = create_spinner(format!("   Fetching {} schedule", settings.source.tour));
    let outcome = source.fetch(&settings.source.tour);
    spinner.finish_and_clear();

    outcome
}
