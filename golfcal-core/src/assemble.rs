//! Feed assembly: merge, dedupe, order, prune, encode.

use std::collections::HashSet;

use chrono::{Days, NaiveDate};
use tracing::{debug, info, warn};

use crate::constants::{DEFAULT_PRUNE_DAYS, DEFAULT_REMINDER_DAYS};
use crate::error::{GolfCalError, GolfCalResult};
use crate::event::EventRecord;
use crate::ics::{self, EncodeOptions};
use crate::source::FetchOutcome;

/// Knobs for one generation run.
#[derive(Debug, Clone)]
pub struct FeedPolicy {
    /// Keep records that ended at most this many days before the run date
    pub prune_days: u64,
    pub reminder_days: u32,
}

impl Default for FeedPolicy {
    fn default() -> Self {
        FeedPolicy {
            prune_days: DEFAULT_PRUNE_DAYS,
            reminder_days: DEFAULT_REMINDER_DAYS,
        }
    }
}

/// A fully rendered feed.
#[derive(Debug)]
pub struct Feed {
    /// The complete VCALENDAR document
    pub document: String,
    /// Records that made it into the document, in document order
    pub records: Vec<EventRecord>,
    /// Records dropped because they could not be encoded
    pub skipped: Vec<GolfCalError>,
}

impl Feed {
    /// Re-read the document and check it holds exactly `records`, in order.
    pub fn verify(&self) -> GolfCalResult<()> {
        let entries = ics::parse_feed(&self.document)?;

        if entries.len() != self.records.len() {
            return Err(GolfCalError::IcsParse(format!(
                "expected {} events, document has {}",
                self.records.len(),
                entries.len()
            )));
        }

        for (entry, record) in entries.iter().zip(&self.records) {
            let expected_uid = ics::event_uid(&record.id);
            if entry.uid != expected_uid {
                return Err(GolfCalError::IcsParse(format!(
                    "expected {}, found {}",
                    expected_uid, entry.uid
                )));
            }
            let expected_end = record.end_date.checked_add_days(Days::new(1));
            if entry.start != record.start_date || expected_end != Some(entry.end) {
                return Err(GolfCalError::IcsParse(format!(
                    "{} has dates {}..{}",
                    entry.uid, entry.start, entry.end
                )));
            }
            if entry.alarm_triggers.len() != 1 {
                return Err(GolfCalError::IcsParse(format!(
                    "{} has {} reminders",
                    entry.uid,
                    entry.alarm_triggers.len()
                )));
            }
        }

        Ok(())
    }
}

/// Merge fixed and external records into the ordered, pruned feed set.
///
/// External entries that fail validation are dropped. A repeated id anywhere
/// in the union is fatal: the feed would be ambiguous otherwise.
pub fn assemble(
    fixed: &[EventRecord],
    external: &FetchOutcome,
    as_of: NaiveDate,
    policy: &FeedPolicy,
) -> GolfCalResult<Vec<EventRecord>> {
    let mut records: Vec<EventRecord> = fixed.to_vec();

    match external {
        FetchOutcome::Available(entries) => {
            let before = records.len();
            for entry in entries {
                match EventRecord::try_from(entry.clone()) {
                    Ok(record) => records.push(record),
                    Err(e) => warn!("Skipping external event: {}", e),
                }
            }
            debug!(
                "Accepted {} of {} external events",
                records.len() - before,
                entries.len()
            );
        }
        FetchOutcome::Unavailable { reason } => {
            info!("External schedule unavailable, using fixed events only: {}", reason);
        }
    }

    let mut seen = HashSet::new();
    for record in &records {
        if !seen.insert(record.id.as_str()) {
            return Err(GolfCalError::DuplicateId(record.id.clone()));
        }
    }

    // Stable: ties keep fixed-before-external, then source order.
    records.sort_by_key(|r| r.start_date);

    let cutoff = as_of
        .checked_sub_days(Days::new(policy.prune_days))
        .unwrap_or(NaiveDate::MIN);
    records.retain(|r| {
        let keep = r.end_date >= cutoff;
        if !keep {
            debug!("Pruning {} (ended {})", r.id, r.end_date);
        }
        keep
    });

    Ok(records)
}

/// Encode assembled records into one document.
///
/// A record that fails to encode is left out and reported in
/// `Feed::skipped`; the rest of the document is unaffected.
pub fn render(records: Vec<EventRecord>, as_of: NaiveDate, policy: &FeedPolicy) -> Feed {
    let options = EncodeOptions {
        reminder_days: policy.reminder_days,
        stamp: as_of,
    };

    let mut events = Vec::with_capacity(records.len());
    let mut included = Vec::with_capacity(records.len());
    let mut skipped = Vec::new();

    for record in records {
        let broadcast = record.resolved_broadcast();
        match ics::encode_event(&record, &broadcast.channel, &broadcast.window, &options) {
            Ok(event) => {
                events.push(event);
                included.push(record);
            }
            Err(e) => {
                warn!("{}", e);
                skipped.push(e);
            }
        }
    }

    Feed {
        document: ics::wrap_calendar(events),
        records: included,
        skipped,
    }
}

/// Assemble and render in one go.
pub fn build_feed(
    fixed: &[EventRecord],
    external: &FetchOutcome,
    as_of: NaiveDate,
    policy: &FeedPolicy,
) -> GolfCalResult<Feed> {
    let records = assemble(fixed, external, as_of, policy)?;
    Ok(render(records, as_of, policy))
}

/// The next `limit` records starting on or after `today`.
pub fn upcoming(records: &[EventRecord], today: NaiveDate, limit: usize) -> Vec<&EventRecord> {
    records
        .iter()
        .filter(|r| r.start_date >= today)
        .take(limit)
        .collect()
}
