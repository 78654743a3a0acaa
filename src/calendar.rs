//! Add-to-calendar outputs: the Google Calendar render URL and the
//! downloadable .ics payload, both derived from the fixed event record.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use icalendar::{Calendar, Component, EventLike};

/// Suggested filename for the downloadable calendar file.
pub const ICS_FILENAME: &str = "Majlis_Kenduri.ics";

/// Compact UTC basic format used for DTSTART/DTEND and the Google
/// `dates` parameter (`YYYYMMDDTHHMMSSZ`).
const COMPACT_UTC: &str = "%Y%m%dT%H%M%SZ";

/// The event being announced. Built once from settings and never mutated.
#[derive(Debug, Clone)]
pub struct EventDetails {
    pub title: String,
    pub description: String,
    pub location: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// The .ics output: the document itself, its data-URI embedding and the
/// filename offered for the download.
#[derive(Debug, Clone)]
pub struct IcsPayload {
    pub document: String,
    pub uri: String,
    pub filename: &'static str,
}

/// Link slots on the invitation page. `None` means the slot still shows
/// its loading marker.
#[derive(Debug, Default)]
pub struct CalendarLinks {
    google: Option<String>,
    ics: Option<IcsPayload>,
}

impl CalendarLinks {
    /// Build both outputs and clear the loading markers.
    pub fn fill(&mut self, details: &EventDetails, generated_at: DateTime<Utc>) {
        self.google = Some(google_calendar_url(details));
        let document = ics_document(details, generated_at);
        let uri = ics_data_uri(&document);
        self.ics = Some(IcsPayload { document, uri, filename: ICS_FILENAME });
    }

    pub fn google(&self) -> Option<&str> {
        self.google.as_deref()
    }

    pub fn ics(&self) -> Option<&IcsPayload> {
        self.ics.as_ref()
    }
}

/// Google Calendar "render" URL with percent-encoded free-text fields.
/// The `dates` pair stays raw so the `/` separator survives.
pub fn google_calendar_url(details: &EventDetails) -> String {
    format!(
        "https://calendar.google.com/calendar/render?action=TEMPLATE&text={}&dates={}/{}&details={}&location={}",
        urlencoding::encode(&details.title),
        details.start.format(COMPACT_UTC),
        details.end.format(COMPACT_UTC),
        urlencoding::encode(&details.description),
        urlencoding::encode(&details.location),
    )
}

/// Generate the .ics document for the event.
///
/// `generated_at` feeds both the DTSTAMP and the timestamp part of the
/// UID, so a fixed clock yields a byte-identical document.
pub fn ics_document(details: &EventDetails, generated_at: DateTime<Utc>) -> String {
    let uid = format!("kenduri-kktjmppp-{}@example.com", generated_at.timestamp_millis());
    let dtstamp = generated_at.format(COMPACT_UTC).to_string();

    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&uid);
    ics_event.add_property("DTSTAMP", &dtstamp);
    ics_event.add_property("DTSTART", details.start.format(COMPACT_UTC).to_string());
    ics_event.add_property("DTEND", details.end.format(COMPACT_UTC).to_string());
    ics_event.summary(&details.title);
    ics_event.description(&details.description);
    ics_event.location(&details.location);

    let mut cal = Calendar::new();
    cal.push(ics_event.done());
    let cal = cal.done();

    polish_ics(&cal.to_string())
}

/// Clean up the icalendar crate's output:
/// - swap PRODID for ours
/// - drop CALSCALE:GREGORIAN (it is the default)
/// - normalize every line ending to CRLF
fn polish_ics(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:-//Kenduri//EN\r\n");
            continue;
        }
        if line == "CALSCALE:GREGORIAN" {
            continue;
        }
        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

/// Embed the document as an inline `data:` payload.
pub fn ics_data_uri(document: &str) -> String {
    format!("data:text/calendar;charset=utf-8,{}", urlencoding::encode(document))
}

/// Write the .ics document into `dir` under its suggested filename.
pub fn save_ics(dir: &Path, payload: &IcsPayload) -> io::Result<PathBuf> {
    let path = dir.join(payload.filename);
    fs::write(&path, &payload.document)?;
    Ok(path)
}
