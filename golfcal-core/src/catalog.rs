//! The curated tournament catalog.
//!
//! Majors and Ryder Cups are announced years ahead and are maintained by
//! hand in `data/tournaments.toml`, which is compiled into the binary. A
//! catalog is loaded once at startup and never changes afterwards.

use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{GolfCalError, GolfCalResult};
use crate::event::EventRecord;

static BUILTIN_CATALOG: &str = include_str!("../data/tournaments.toml");

#[derive(Debug, Deserialize)]
struct CatalogFile {
    version: String,
    #[serde(default, rename = "tournament")]
    tournaments: Vec<TournamentEntry>,
}

#[derive(Debug, Deserialize)]
struct TournamentEntry {
    id: String,
    name: String,
    start: NaiveDate,
    end: NaiveDate,
    #[serde(default)]
    venue: String,
    #[serde(default)]
    location: String,
    channel: Option<String>,
    window: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    featured: bool,
}

impl TournamentEntry {
    fn into_record(self) -> GolfCalResult<EventRecord> {
        let mut record = EventRecord::new(self.id, self.name, self.start, self.end)?
            .with_venue(self.venue)
            .with_location(self.location)
            .with_description(self.description)
            .featured(self.featured);

        // Half-specified broadcast info falls back to the location heuristic.
        if let (Some(channel), Some(window)) = (self.channel, self.window) {
            record = record.with_broadcast(channel, window);
        }

        Ok(record)
    }
}

/// A validated, versioned set of fixed tournaments.
#[derive(Debug, Clone)]
pub struct Catalog {
    version: String,
    records: Vec<EventRecord>,
}

impl Catalog {
    /// The catalog compiled into the binary.
    pub fn builtin() -> GolfCalResult<Self> {
        Self::from_toml(BUILTIN_CATALOG)
    }

    /// Load a catalog file that replaces the built-in one.
    pub fn from_path(path: &Path) -> GolfCalResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
            .map_err(|e| GolfCalError::Catalog(format!("{}: {}", path.display(), e)))
    }

    /// Parse and validate catalog TOML.
    ///
    /// Catalog records are hand-curated, so any invalid record or repeated id
    /// is an authoring bug and rejects the whole catalog.
    pub fn from_toml(content: &str) -> GolfCalResult<Self> {
        let file: CatalogFile =
            toml::from_str(content).map_err(|e| GolfCalError::Catalog(e.to_string()))?;

        let mut seen = HashSet::new();
        let mut records = Vec::with_capacity(file.tournaments.len());
        for entry in file.tournaments {
            let record = entry.into_record()?;
            if !seen.insert(record.id.clone()) {
                return Err(GolfCalError::DuplicateId(record.id));
            }
            records.push(record);
        }

        Ok(Catalog {
            version: file.version,
            records,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
