//! Feed read-back using the icalendar crate's parser.

use chrono::NaiveDate;
use icalendar::{
    DatePerhapsTime,
    parser::{Component, read_calendar, unfold},
};

use crate::error::{GolfCalError, GolfCalResult};

/// The parts of a VEVENT needed to check a generated feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEntry {
    pub uid: String,
    pub summary: String,
    pub start: NaiveDate,
    /// Exclusive end, as written in DTEND
    pub end: NaiveDate,
    /// TRIGGER values of the nested VALARMs
    pub alarm_triggers: Vec<String>,
}

/// Parse every VEVENT in `content`, in document order.
pub fn parse_feed(content: &str) -> GolfCalResult<Vec<ParsedEntry>> {
    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded).map_err(|e| GolfCalError::IcsParse(e.to_string()))?;

    let mut vevents = Vec::new();
    collect_vevents(&calendar.components, &mut vevents);

    vevents.into_iter().map(parse_entry).collect()
}

/// The parser may or may not strip the VCALENDAR wrapper, so descend into it.
fn collect_vevents<'a, 'c>(components: &'c [Component<'a>], out: &mut Vec<&'c Component<'a>>) {
    for component in components {
        if component.name == "VEVENT" {
            out.push(component);
        } else if component.name == "VCALENDAR" {
            collect_vevents(&component.components, out);
        }
    }
}

fn parse_entry(vevent: &Component<'_>) -> GolfCalResult<ParsedEntry> {
    let uid = vevent
        .find_prop("UID")
        .map(|p| p.val.to_string())
        .ok_or_else(|| GolfCalError::IcsParse("VEVENT without UID".into()))?;

    let summary = vevent
        .find_prop("SUMMARY")
        .map(|p| p.val.to_string())
        .unwrap_or_default();

    let start = read_date(vevent, "DTSTART", &uid)?;
    let end = read_date(vevent, "DTEND", &uid)?;

    let alarm_triggers = vevent
        .components
        .iter()
        .filter(|c| c.name == "VALARM")
        .filter_map(|alarm| alarm.find_prop("TRIGGER").map(|p| p.val.to_string()))
        .collect();

    Ok(ParsedEntry {
        uid,
        summary,
        start,
        end,
        alarm_triggers,
    })
}

fn read_date(vevent: &Component<'_>, name: &str, uid: &str) -> GolfCalResult<NaiveDate> {
    let prop = vevent
        .find_prop(name)
        .ok_or_else(|| GolfCalError::IcsParse(format!("{} missing {}", uid, name)))?;

    match DatePerhapsTime::try_from(prop) {
        Ok(DatePerhapsTime::Date(d)) => Ok(d),
        Ok(DatePerhapsTime::DateTime(_)) => Err(GolfCalError::IcsParse(format!(
            "{} has a timed {}, expected a date",
            uid, name
        ))),
        Err(_) => Err(GolfCalError::IcsParse(format!("{} has an invalid {}", uid, name))),
    }
}
