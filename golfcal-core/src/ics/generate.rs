//! ICS feed generation.

use chrono::{Days, NaiveDate};
use icalendar::{Alarm, Calendar, Component, EventLike, Property, Trigger, ValueType};

use crate::constants::{
    CALENDAR_DESCRIPTION, CALENDAR_NAME, DEFAULT_REMINDER_DAYS, DISPLAY_TIMEZONE,
    FEATURED_MARKER, PLAIN_MARKER, PRODUCT_ID, REMINDER_TEMPLATE, UID_NAMESPACE,
};
use crate::error::{GolfCalError, GolfCalResult};
use crate::event::EventRecord;

/// Per-run encoding parameters.
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    /// Days before `start_date` the reminder fires
    pub reminder_days: u32,
    /// Date used for DTSTAMP, normally the run's as-of date
    pub stamp: NaiveDate,
}

impl EncodeOptions {
    pub fn new(stamp: NaiveDate) -> Self {
        EncodeOptions {
            reminder_days: DEFAULT_REMINDER_DAYS,
            stamp,
        }
    }
}

/// The calendar UID for a record id.
pub fn event_uid(id: &str) -> String {
    format!("{}@{}", id, UID_NAMESPACE)
}

/// Build the VEVENT for one record.
pub fn encode_event(
    record: &EventRecord,
    channel: &str,
    window: &str,
    options: &EncodeOptions,
) -> GolfCalResult<icalendar::Event> {
    if record.id.trim().is_empty() {
        return Err(GolfCalError::encoding(&record.id, "id is empty"));
    }
    if record.id.chars().any(char::is_control) {
        return Err(GolfCalError::encoding(&record.id, "id contains control characters"));
    }
    if record.name.trim().is_empty() {
        return Err(GolfCalError::encoding(&record.id, "name is empty"));
    }
    if record.start_date > record.end_date {
        return Err(GolfCalError::encoding(&record.id, "start date is after end date"));
    }
    // All-day DTEND is exclusive, so the last playing day needs one more day.
    let end_exclusive = record
        .end_date
        .checked_add_days(Days::new(1))
        .ok_or_else(|| GolfCalError::encoding(&record.id, "end date out of range"))?;

    let marker = if record.is_featured {
        FEATURED_MARKER
    } else {
        PLAIN_MARKER
    };
    let summary = format!("{} {}", marker, record.name);
    let description = format!(
        "{}\n\n📺 {}\n🕐 {}\n📍 {}\n🌍 {}",
        record.description, channel, window, record.venue, record.location
    );
    let location = [record.venue.as_str(), record.location.as_str()]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(", ");

    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&event_uid(&record.id));
    ics_event.add_property("DTSTAMP", options.stamp.format("%Y%m%dT000000Z").to_string());
    add_date_property(&mut ics_event, "DTSTART", record.start_date);
    add_date_property(&mut ics_event, "DTEND", end_exclusive);
    ics_event.summary(&normalize_newlines(&summary));
    ics_event.description(&normalize_newlines(&description));
    ics_event.location(&normalize_newlines(&location));
    ics_event.add_property("TRANSP", "TRANSPARENT");

    let lead = options.reminder_days;
    let trigger = Trigger::before_start(chrono::Duration::days(i64::from(lead)));
    let mut alarm = Alarm::display(&normalize_newlines(&reminder_text(&record.name, lead)), trigger);
    // Plain duration without RELATED=START, which is the default anyway.
    alarm.add_property("TRIGGER", format!("-P{}D", lead));
    ics_event.alarm(alarm);

    Ok(ics_event.done())
}

/// Wrap VEVENTs in the VCALENDAR container and render the document.
pub fn wrap_calendar(events: Vec<icalendar::Event>) -> String {
    let mut cal = Calendar::empty();
    cal.append_property(("VERSION", "2.0"));
    cal.append_property(("PRODID", PRODUCT_ID));
    cal.append_property(("CALSCALE", "GREGORIAN"));
    cal.append_property(("METHOD", "PUBLISH"));
    cal.append_property(("X-WR-CALNAME", CALENDAR_NAME));
    cal.append_property(("X-WR-CALDESC", CALENDAR_DESCRIPTION));
    cal.append_property(("X-WR-TIMEZONE", DISPLAY_TIMEZONE.name()));
    cal.extend(events);

    strip_alarm_stamps(&cal.done().to_string())
}

/// The reminder message for an alarm firing `lead_days` before the start.
pub fn reminder_text(name: &str, lead_days: u32) -> String {
    let when = match lead_days {
        0 => "I dag".to_string(),
        1 => "I morgen".to_string(),
        n => format!("Om {} dage", n),
    };
    REMINDER_TEMPLATE
        .replace("{when}", &when)
        .replace("{name}", name)
}

/// Remove the DTSTAMP and UID lines the icalendar crate fills into VALARM
/// sections. They are not part of an alarm and the generated UID is random.
fn strip_alarm_stamps(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());
    let mut in_valarm = false;

    for line in ics.lines() {
        if line == "BEGIN:VALARM" {
            in_valarm = true;
        } else if line == "END:VALARM" {
            in_valarm = false;
        }

        if in_valarm && (line.starts_with("DTSTAMP:") || line.starts_with("UID:")) {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

fn add_date_property(ics_event: &mut icalendar::Event, name: &str, date: NaiveDate) {
    let mut prop = Property::new(name, date.format("%Y%m%d").to_string());
    prop.append_parameter(ValueType::Date);
    ics_event.append_property(prop);
}

/// icalendar escapes LF only; CRLF and lone CR must become LF first.
fn normalize_newlines(value: &str) -> String {
    value.replace("\r\n", "\n").replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn masters() -> EventRecord {
        EventRecord::new("masters-2026", "The Masters 2026", date(2026, 4, 9), date(2026, 4, 12))
            .unwrap()
            .with_venue("Augusta National Golf Club")
            .with_location("Augusta, Georgia, USA")
            .with_description("MAJOR - Første major i 2026")
            .featured(true)
    }

    fn options() -> EncodeOptions {
        EncodeOptions::new(date(2026, 1, 10))
    }

    /// Render a single record as a complete document.
    fn render(record: &EventRecord, options: &EncodeOptions) -> String {
        wrap_calendar(vec![encode_event(record, "c", "w", options).unwrap()])
    }

    /// Undo line folding so assertions can look at whole content lines.
    fn unfold(text: &str) -> String {
        text.replace("\r\n ", "")
    }

    fn content_line<'a>(text: &'a str, prefix: &str) -> &'a str {
        text.split("\r\n")
            .find(|l| l.starts_with(prefix))
            .unwrap_or_else(|| panic!("No line starting with {}. ICS:\n{}", prefix, text))
    }

    fn alarm_section(ics: &str) -> &str {
        ics.split("BEGIN:VALARM")
            .nth(1)
            .unwrap()
            .split("END:VALARM")
            .next()
            .unwrap()
    }

    #[test]
    fn test_end_date_is_exclusive() {
        let ics = render(&masters(), &options());
        assert!(
            ics.contains("DTSTART;VALUE=DATE:20260409\r\n"),
            "DTSTART should be the first playing day. ICS:\n{}",
            ics
        );
        assert!(
            ics.contains("DTEND;VALUE=DATE:20260413\r\n"),
            "DTEND should be the day after the last playing day. ICS:\n{}",
            ics
        );
    }

    #[test]
    fn test_end_date_crosses_month_and_year() {
        let record = EventRecord::new("nye", "New Year Classic", date(2026, 12, 28), date(2026, 12, 31))
            .unwrap();
        let ics = render(&record, &options());
        assert!(ics.contains("DTEND;VALUE=DATE:20270101\r\n"), "ICS:\n{}", ics);
    }

    #[test]
    fn test_uid_has_namespace_suffix() {
        let ics = render(&masters(), &options());
        assert_eq!(content_line(&ics, "UID:"), "UID:masters-2026@golf-kalender");
    }

    #[test]
    fn test_description_escapes_reserved_characters() {
        let record = masters().with_description("Par 72, links; a\\b\nsecond line");
        let ics = unfold(&render(&record, &options()));
        let line = content_line(&ics, "DESCRIPTION:");

        assert!(
            line.starts_with(r"DESCRIPTION:Par 72\, links\; a\\b\nsecond line\n\n📺 c\n🕐 w"),
            "Unexpected description line: {}",
            line
        );
        assert!(line.ends_with(r"\n🌍 Augusta\, Georgia\, USA"), "Got: {}", line);
    }

    #[test]
    fn test_no_raw_newlines_inside_content_lines() {
        let record = masters().with_description("one\r\ntwo\rthree\nfour");
        let ics = render(&record, &options());

        // Every LF must be part of a CRLF line terminator.
        let bare_lf = ics
            .char_indices()
            .filter(|(i, c)| *c == '\n' && (*i == 0 || ics.as_bytes()[i - 1] != b'\r'))
            .count();
        assert_eq!(bare_lf, 0, "Found bare line feeds. ICS:\n{}", ics);
        assert!(!ics.contains("\r\r"), "Found a stray CR. ICS:\n{}", ics);
        assert!(unfold(&ics).contains(r"one\ntwo\nthree\nfour"));
    }

    #[test]
    fn test_reserved_characters_are_escaped_once() {
        let record = EventRecord::new("x", r"a,b;c\d", date(2026, 5, 1), date(2026, 5, 3)).unwrap();
        let ics = render(&record, &options());
        assert_eq!(content_line(&ics, "SUMMARY:"), r"SUMMARY:⛳ a\,b\;c\\d");
    }

    #[test]
    fn test_summary_decoration() {
        let featured = render(&masters(), &options());
        assert_eq!(content_line(&featured, "SUMMARY:"), "SUMMARY:⛳🏆 The Masters 2026");

        let plain = render(&masters().featured(false), &options());
        assert_eq!(content_line(&plain, "SUMMARY:"), "SUMMARY:⛳ The Masters 2026");
    }

    #[test]
    fn test_location_joins_venue_and_place() {
        let ics = unfold(&render(&masters(), &options()));
        assert_eq!(
            content_line(&ics, "LOCATION:"),
            r"LOCATION:Augusta National Golf Club\, Augusta\, Georgia\, USA"
        );

        let bare = EventRecord::new("x", "X", date(2026, 1, 1), date(2026, 1, 2)).unwrap();
        let ics = render(&bare, &options());
        assert_eq!(content_line(&ics, "LOCATION:"), "LOCATION:");
    }

    #[test]
    fn test_event_is_transparent() {
        let ics = render(&masters(), &options());
        assert!(ics.contains("TRANSP:TRANSPARENT\r\n"), "ICS:\n{}", ics);
    }

    #[test]
    fn test_single_reminder_one_day_before() {
        let ics = render(&masters(), &options());
        assert_eq!(ics.matches("BEGIN:VALARM").count(), 1);
        assert_eq!(ics.matches("END:VALARM").count(), 1);

        let alarm = alarm_section(&ics);
        assert!(alarm.contains("ACTION:DISPLAY\r\n"), "Alarm:\n{}", alarm);
        assert!(alarm.contains("TRIGGER:-P1D\r\n"), "Alarm:\n{}", alarm);
        assert!(
            alarm.contains("DESCRIPTION:I morgen: The Masters 2026 på Viaplay!\r\n"),
            "Alarm:\n{}",
            alarm
        );
    }

    #[test]
    fn test_alarm_has_no_generated_stamps() {
        let ics = render(&masters(), &options());
        let alarm = alarm_section(&ics);
        assert!(!alarm.contains("UID:"), "VALARM should not have UID. Got:\n{}", alarm);
        assert!(!alarm.contains("DTSTAMP:"), "VALARM should not have DTSTAMP. Got:\n{}", alarm);
    }

    #[test]
    fn test_reminder_lead_follows_options() {
        let opts = EncodeOptions {
            reminder_days: 3,
            stamp: date(2026, 1, 10),
        };
        let ics = render(&masters(), &opts);
        let alarm = alarm_section(&ics);
        assert!(alarm.contains("TRIGGER:-P3D\r\n"), "Alarm:\n{}", alarm);
        assert!(
            alarm.contains("DESCRIPTION:Om 3 dage: The Masters 2026 på Viaplay!\r\n"),
            "Alarm text should match its trigger. Alarm:\n{}",
            alarm
        );
    }

    #[test]
    fn test_reminder_text_by_lead() {
        assert_eq!(reminder_text("Irish Open", 0), "I dag: Irish Open på Viaplay!");
        assert_eq!(reminder_text("Irish Open", 1), "I morgen: Irish Open på Viaplay!");
        assert_eq!(reminder_text("Irish Open", 7), "Om 7 dage: Irish Open på Viaplay!");
    }

    #[test]
    fn test_output_is_byte_stable() {
        let a = render(&masters(), &options());
        std::thread::sleep(std::time::Duration::from_millis(1100));
        let b = render(&masters(), &options());
        assert_eq!(a, b);
        assert_eq!(content_line(&a, "DTSTAMP:"), "DTSTAMP:20260110T000000Z");
    }

    #[test]
    fn test_encode_rejects_missing_name() {
        let mut record = masters();
        record.name = String::new();
        let err = encode_event(&record, "c", "w", &options()).unwrap_err();
        assert!(matches!(err, GolfCalError::Encoding { .. }), "Got {:?}", err);
    }

    #[test]
    fn test_encode_rejects_control_characters_in_id() {
        let mut record = masters();
        record.id = "bad\nid".to_string();
        let err = encode_event(&record, "c", "w", &options()).unwrap_err();
        assert!(matches!(err, GolfCalError::Encoding { .. }), "Got {:?}", err);
    }

    #[test]
    fn test_encode_rejects_unrepresentable_end() {
        let mut record = masters();
        record.start_date = NaiveDate::MAX;
        record.end_date = NaiveDate::MAX;
        let err = encode_event(&record, "c", "w", &options()).unwrap_err();
        assert!(matches!(err, GolfCalError::Encoding { .. }), "Got {:?}", err);
    }

    #[test]
    fn test_long_lines_are_folded_within_octet_limit() {
        let long = "Søndag ⛳ ".repeat(30);
        let record = masters().with_description(long.clone());
        let ics = render(&record, &options());

        for physical in ics.split("\r\n") {
            assert!(
                physical.len() <= 75,
                "Line has {} octets: {}",
                physical.len(),
                physical
            );
        }
        let unfolded = unfold(&ics);
        let line = content_line(&unfolded, "DESCRIPTION:");
        assert!(line.starts_with(&format!("DESCRIPTION:{}", long)), "Got: {}", line);
    }

    #[test]
    fn test_wrap_calendar_metadata() {
        let doc = wrap_calendar(Vec::new());
        assert!(doc.starts_with("BEGIN:VCALENDAR\r\nVERSION:2.0\r\n"));
        assert!(doc.ends_with("END:VCALENDAR\r\n"));
        assert!(doc.contains("PRODID:-//Golf Notifier//DA\r\n"));
        assert!(doc.contains("CALSCALE:GREGORIAN\r\n"));
        assert!(doc.contains("METHOD:PUBLISH\r\n"));
        assert!(doc.contains("X-WR-CALNAME:⛳ Golf TV Danmark\r\n"));
        assert!(doc.contains("X-WR-TIMEZONE:Europe/Copenhagen\r\n"));
        assert!(
            unfold(&doc).contains(r"X-WR-CALDESC:Golf turneringer på dansk TV - PGA Championship\, US Open"),
            "ICS:\n{}",
            doc
        );
        assert!(!doc.contains("BEGIN:VEVENT"));
    }
}
