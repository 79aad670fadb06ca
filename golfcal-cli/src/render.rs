//! Colored terminal rendering for golfcal types.

use golfcal_core::EventRecord;
use golfcal_core::source::FetchOutcome;
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for EventRecord {
    fn render(&self) -> String {
        let dates = if self.start_date == self.end_date {
            self.start_date.format("%Y-%m-%d").to_string()
        } else {
            format!(
                "{} → {}",
                self.start_date.format("%Y-%m-%d"),
                self.end_date.format("%m-%d")
            )
        };

        let name = if self.is_featured {
            self.name.bold().to_string()
        } else {
            self.name.clone()
        };

        format!("{} {}", dates.dimmed(), name)
    }
}

impl Render for FetchOutcome {
    fn render(&self) -> String {
        match self {
            FetchOutcome::Available(entries) => format!(
                "{} external {} fetched",
                entries.len().green(),
                pluralize("tournament", entries.len())
            ),
            FetchOutcome::Unavailable { reason } => format!("No external tournaments ({})", reason)
                .dimmed()
                .to_string(),
        }
    }
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
