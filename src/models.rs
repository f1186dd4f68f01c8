//! Wire Models
//!
//! Data structures exchanged with the server.

use serde::{Deserialize, Serialize};

/// Reply of every JSON mutation endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub ok: bool,
    #[serde(default)]
    pub message: String,
}

/// Body of an administrative POST
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IdPayload {
    pub id: i64,
}

/// Calendar event as served by the calendar feed and handed back by the widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub extended_props: ReservationProps,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationProps {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub room: String,
    #[serde(default)]
    pub last_updated: Option<String>,
}

/// Name/value pairs of a submitted form, in document order
pub type FormFields = Vec<(String, String)>;
