//! ICS feed encoding and read-back.
//!
//! Both directions go through the `icalendar` crate: events are built with its
//! component builders and the finished feed is read back with its parser.

mod generate;
mod parse;

pub use generate::{EncodeOptions, encode_event, event_uid, reminder_text, wrap_calendar};
pub use parse::{ParsedEntry, parse_feed};
