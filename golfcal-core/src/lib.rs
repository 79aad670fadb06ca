//! Core of golfcal: turns golf tournament records into a subscribable
//! iCalendar feed.
//!
//! - `event` holds the normalized `EventRecord`
//! - `broadcast` maps a location to the Danish TV channel and airing window
//! - `ics` encodes records into VEVENT blocks and reads feeds back
//! - `assemble` merges, dedupes, orders and prunes records into a feed
//! - `catalog` is the curated built-in tournament list
//! - `source` is the contract for best-effort external schedules

pub mod assemble;
pub mod broadcast;
pub mod catalog;
pub mod constants;
pub mod error;
pub mod event;
pub mod ics;
pub mod settings;
pub mod source;

pub use error::{GolfCalError, GolfCalResult};
pub use event::{Broadcast, EventRecord};
