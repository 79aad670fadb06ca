//! External schedule sources.
//!
//! A source is best-effort: it never returns an error to the caller. Instead
//! `FetchOutcome` says whether data was obtained at all, so "the source is
//! down" is never confused with "the source has no upcoming events".

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{GolfCalError, GolfCalResult};
use crate::event::EventRecord;

/// DP World Tour events worth tracking (Rolex Series and other big events).
pub const DEFAULT_TRACKED_EVENTS: &[&str] = &[
    "Dubai Desert Classic",
    "Irish Open",
    "Scottish Open",
    "BMW PGA Championship",
    "Alfred Dunhill Links",
    "DP World Tour Championship",
    "Abu Dhabi",
    "Open de France",
    "Italian Open",
    "Andalucia Masters",
];

/// A tournament as delivered by an external schedule, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id: Option<String>,
    pub name: Option<String>,
    /// `YYYY-MM-DD`
    pub start: Option<String>,
    /// `YYYY-MM-DD`, last playing day
    pub end: Option<String>,
    pub venue: Option<String>,
    pub location: Option<String>,
    pub channel: Option<String>,
    pub window: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

impl TryFrom<ScheduleEntry> for EventRecord {
    type Error = GolfCalError;

    fn try_from(entry: ScheduleEntry) -> GolfCalResult<Self> {
        let id = entry.id.unwrap_or_default();
        let name = entry
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| GolfCalError::validation(&id, "name is missing"))?;
        let start = parse_entry_date(&id, "start", entry.start.as_deref())?;
        let end = parse_entry_date(&id, "end", entry.end.as_deref())?;

        let mut record = EventRecord::new(id, name, start, end)?
            .with_venue(entry.venue.unwrap_or_default())
            .with_location(entry.location.unwrap_or_default())
            .with_description(entry.description.unwrap_or_default())
            .featured(entry.featured);

        if let (Some(channel), Some(window)) = (entry.channel, entry.window) {
            record = record.with_broadcast(channel, window);
        }

        Ok(record)
    }
}

fn parse_entry_date(id: &str, field: &str, value: Option<&str>) -> GolfCalResult<NaiveDate> {
    let value = value.ok_or_else(|| GolfCalError::validation(id, format!("{} date is missing", field)))?;
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        GolfCalError::validation(
            id,
            format!("invalid {} date '{}'. Expected YYYY-MM-DD", field, value),
        )
    })
}

/// Result of asking a source for its schedule.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The source answered; the list may legitimately be empty
    Available(Vec<ScheduleEntry>),
    /// Nothing could be obtained this run
    Unavailable { reason: String },
}

impl FetchOutcome {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        FetchOutcome::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, FetchOutcome::Available(_))
    }

    /// Entries from an available source; empty when unavailable.
    pub fn entries(&self) -> &[ScheduleEntry] {
        match self {
            FetchOutcome::Available(entries) => entries,
            FetchOutcome::Unavailable { .. } => &[],
        }
    }
}

/// A best-effort provider of tournaments for one tour.
///
/// Implementations must bound their own running time and turn every failure
/// into `FetchOutcome::Unavailable`.
pub trait ScheduleSource {
    fn fetch(&self, tour: &str) -> FetchOutcome;
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SchedulePayload {
    List(Vec<ScheduleEntry>),
    Wrapped { events: Vec<ScheduleEntry> },
}

/// Decode a JSON schedule: either a bare array of entries or `{"events": [...]}`.
pub fn parse_schedule(body: &str) -> Result<Vec<ScheduleEntry>, serde_json::Error> {
    let payload: SchedulePayload = serde_json::from_str(body)?;
    Ok(match payload {
        SchedulePayload::List(entries) => entries,
        SchedulePayload::Wrapped { events } => events,
    })
}

/// Keep entries whose name contains one of `tracked` (case-insensitive).
/// An empty `tracked` list keeps everything.
pub fn retain_tracked(entries: Vec<ScheduleEntry>, tracked: &[String]) -> Vec<ScheduleEntry> {
    if tracked.is_empty() {
        return entries;
    }
    let tracked: Vec<String> = tracked.iter().map(|t| t.to_lowercase()).collect();

    entries
        .into_iter()
        .filter(|entry| {
            let name = entry.name.as_deref().unwrap_or_default().to_lowercase();
            tracked.iter().any(|t| name.contains(t.as_str()))
        })
        .collect()
}
