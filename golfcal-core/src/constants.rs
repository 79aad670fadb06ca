//! Fixed values shared across the feed pipeline.

use chrono_tz::Tz;

/// Records whose last day is more than this many days before the run date
/// are dropped from the feed.
pub const DEFAULT_PRUNE_DAYS: u64 = 7;

/// How many days before the first round the reminder fires.
pub const DEFAULT_REMINDER_DAYS: u32 = 1;

/// Appended to every record id to form the calendar UID.
pub const UID_NAMESPACE: &str = "golf-kalender";

pub const PRODUCT_ID: &str = "-//Golf Notifier//DA";

pub const CALENDAR_NAME: &str = "⛳ Golf TV Danmark";

pub const CALENDAR_DESCRIPTION: &str =
    "Golf turneringer på dansk TV - PGA Championship, US Open, DP World Tour, Ryder Cup";

/// Display zone announced to subscribers. All entries are whole-day, so this
/// never shifts a date.
pub const DISPLAY_TIMEZONE: Tz = chrono_tz::Europe::Copenhagen;

/// `{when}` is replaced with the lead ("I morgen", "Om 3 dage"), `{name}`
/// with the tournament name.
pub const REMINDER_TEMPLATE: &str = "{when}: {name} på Viaplay!";

pub const FEATURED_MARKER: &str = "⛳🏆";

pub const PLAIN_MARKER: &str = "⛳";
