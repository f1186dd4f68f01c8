//! Console Configuration
//!
//! Page-level settings. Defaults match the server-rendered templates; a page
//! may override any field with a JSON block in
//! `<script type="application/json" id="console-config">`.

use std::str::FromStr;

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::error::{ConsoleError, Result};

/// Id of the optional JSON override block
pub const CONFIG_ELEMENT_ID: &str = "console-config";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConsoleConfig {
    /// Id of the swappable main-content region
    pub content_region_id: String,
    /// CSS selector of the sidebar root
    pub sidebar_selector: String,
    /// localStorage key holding the dropdown snapshot
    pub storage_key: String,
    /// Name of the hidden input carrying the CSRF token
    pub csrf_field: String,
    /// Delay before following up a successful delete
    pub redirect_delay_ms: u32,
    pub toast_duration_ms: u32,
    pub log_level: String,
    pub endpoints: Endpoints,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            content_region_id: "main-content".to_string(),
            sidebar_selector: ".sidebar".to_string(),
            storage_key: "dropdownState".to_string(),
            csrf_field: "csrf_token".to_string(),
            redirect_delay_ms: 2000,
            toast_duration_ms: 3000,
            log_level: "info".to_string(),
            endpoints: Endpoints::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Endpoints {
    pub calendar_events: String,
    pub mark_processed: String,
    pub delete_reservation: String,
    pub delete_user: String,
    pub availability: String,
    /// Prefix for the reservation list a deleted reservation came from
    pub reservations_index: String,
    pub users_index: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            calendar_events: "/admin/reservations/calendar/json".to_string(),
            mark_processed: "/admin/reservations/processed".to_string(),
            delete_reservation: "/admin/reservations/delete".to_string(),
            delete_user: "/admin/users/delete".to_string(),
            availability: "/availability/json".to_string(),
            reservations_index: "/admin/reservations".to_string(),
            users_index: "/admin/users".to_string(),
        }
    }
}

impl Endpoints {
    fn all(&self) -> [(&'static str, &str); 7] {
        [
            ("calendarEvents", self.calendar_events.as_str()),
            ("markProcessed", self.mark_processed.as_str()),
            ("deleteReservation", self.delete_reservation.as_str()),
            ("deleteUser", self.delete_user.as_str()),
            ("availability", self.availability.as_str()),
            ("reservationsIndex", self.reservations_index.as_str()),
            ("usersIndex", self.users_index.as_str()),
        ]
    }
}

impl ConsoleConfig {
    /// Parse and validate a JSON override
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw).map_err(|e| ConsoleError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("contentRegionId", &self.content_region_id),
            ("sidebarSelector", &self.sidebar_selector),
            ("storageKey", &self.storage_key),
            ("csrfField", &self.csrf_field),
        ] {
            if value.trim().is_empty() {
                return Err(ConsoleError::Config(format!("{name} must not be empty")));
            }
        }
        for (name, path) in self.endpoints.all() {
            if !path.starts_with('/') || path.starts_with("//") {
                return Err(ConsoleError::Config(format!("{name} must be an absolute path, got {path:?}")));
            }
        }
        self.level_filter()?;
        Ok(())
    }

    pub fn level_filter(&self) -> Result<LevelFilter> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| ConsoleError::Config(format!("unknown log level {:?}", self.log_level)))
    }
}
