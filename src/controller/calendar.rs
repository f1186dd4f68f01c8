//! Reservation Calendar
//!
//! Event feed for the calendar widget and the details dialog shown on click.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::debug;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use super::Controller;
use crate::dialog::{DialogConfig, Icon};
use crate::error::{ConsoleError, Result};
use crate::models::CalendarEvent;
use crate::platform::{Dialogs, HttpClient, KeyValueStore, PageHost};

const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Feed URL for the visible range
pub fn events_url(base: &str, start: &str, end: &str) -> String {
    format!(
        "{}?start={}&end={}",
        base,
        utf8_percent_encode(start, QUERY_VALUE),
        utf8_percent_encode(end, QUERY_VALUE)
    )
}

/// Human-readable timestamp, "N/A" when absent; unparseable input is shown as-is
pub fn display_time(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return "N/A".to_string();
    };
    const SHOWN: &str = "%m/%d/%Y, %-I:%M:%S %p";
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.format(SHOWN).to_string();
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return ts.format(SHOWN).to_string();
    }
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return day.format("%m/%d/%Y").to_string();
    }
    raw.to_string()
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Body of the "Reservation Details" dialog
pub fn details_html(event: &CalendarEvent) -> String {
    let props = &event.extended_props;
    let rows = [
        ("Room", escape_html(&props.room)),
        ("Full Name", escape_html(&props.name)),
        ("Start", display_time(event.start.as_deref())),
        ("End", display_time(event.end.as_deref())),
        ("Last Update", display_time(props.last_updated.as_deref())),
    ];
    rows.iter()
        .map(|(label, value)| format!("<p><strong>{label}:</strong> {value}</p>"))
        .collect::<Vec<_>>()
        .join("\n")
}

impl<S, H, D, P> Controller<S, H, D, P>
where
    S: KeyValueStore,
    H: HttpClient,
    D: Dialogs,
    P: PageHost,
{
    pub async fn calendar_events(&self, start: &str, end: &str) -> Result<Vec<CalendarEvent>> {
        let url = events_url(&self.config.endpoints.calendar_events, start, end);
        let response = self.http.get(&url).await?;
        if !response.is_success() {
            return Err(ConsoleError::http_status(response.status));
        }
        let events: Vec<CalendarEvent> =
            serde_json::from_str(&response.body).map_err(|e| ConsoleError::Malformed(e.to_string()))?;
        debug!("[calendar] {} events for {}..{}", events.len(), start, end);
        Ok(events)
    }

    /// Show details; "Edit" opens the reservation. Returns whether it navigated.
    pub async fn open_reservation(&self, event: &CalendarEvent) -> Result<bool> {
        let dialog = DialogConfig::builder()
            .icon(Icon::Info)
            .title("Reservation Details")
            .html(details_html(event))
            .cancel_button(true)
            .allow_outside_click(true)
            .button_texts("Edit", "Close")
            .build()?;
        if !self.dialogs.confirm(&dialog).await || event.url.is_empty() {
            return Ok(false);
        }
        self.page.assign_location(&event.url);
        Ok(true)
    }
}
