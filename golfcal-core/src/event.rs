//! The normalized tournament record.
//!
//! Records come either from the built-in catalog or from an external
//! schedule. They are read-only once constructed and only live for one
//! generation run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::broadcast;
use crate::error::{GolfCalError, GolfCalResult};

/// Where and when a tournament airs in Denmark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Broadcast {
    pub channel: String,
    pub window: String,
}

/// One occurrence of a tournament.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    /// Stable identifier, unique across the whole record set
    pub id: String,
    pub name: String,
    /// First playing day (inclusive)
    pub start_date: NaiveDate,
    /// Last playing day (inclusive)
    pub end_date: NaiveDate,
    pub venue: String,
    /// Free text, only used to guess the broadcast window
    pub location: String,
    /// Pre-populated broadcast info; resolved from `location` when absent
    pub broadcast: Option<Broadcast>,
    pub description: String,
    /// Majors and the Ryder Cup get a trophy marker in the title
    pub is_featured: bool,
}

impl EventRecord {
    /// Create a validated record. Optional details start out empty.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> GolfCalResult<Self> {
        let record = EventRecord {
            id: id.into(),
            name: name.into(),
            start_date,
            end_date,
            venue: String::new(),
            location: String::new(),
            broadcast: None,
            description: String::new(),
            is_featured: false,
        };
        record.validate()?;
        Ok(record)
    }

    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = venue.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_broadcast(mut self, channel: impl Into<String>, window: impl Into<String>) -> Self {
        self.broadcast = Some(Broadcast {
            channel: channel.into(),
            window: window.into(),
        });
        self
    }

    pub fn featured(mut self, is_featured: bool) -> Self {
        self.is_featured = is_featured;
        self
    }

    /// Check the structural invariants: non-empty id, start on or before end.
    ///
    /// Id uniqueness is a property of a batch and is checked at assembly.
    pub fn validate(&self) -> GolfCalResult<()> {
        if self.id.trim().is_empty() {
            return Err(GolfCalError::validation(&self.id, "id is empty"));
        }
        if self.start_date > self.end_date {
            return Err(GolfCalError::validation(
                &self.id,
                format!(
                    "start date {} is after end date {}",
                    self.start_date, self.end_date
                ),
            ));
        }
        Ok(())
    }

    /// Broadcast info for this record, falling back to the location heuristic.
    pub fn resolved_broadcast(&self) -> Broadcast {
        match &self.broadcast {
            Some(b) => b.clone(),
            None => broadcast::resolve(&self.location),
        }
    }

    /// Number of playing days, both ends included.
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

impl std::fmt::Display for EventRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
