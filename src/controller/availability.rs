//! Availability Search
//!
//! The public "Search Availability" dialog posts its form as multipart data.

use log::warn;

use super::Controller;
use crate::dialog::DialogConfig;
use crate::error::{ConsoleError, Result};
use crate::models::{ActionResponse, FormFields};
use crate::platform::{Dialogs, HttpClient, KeyValueStore, PageHost, PostBody, PostRequest};

pub const AVAILABILITY_ERROR: &str = "An error occurred while checking availability.";

#[derive(Debug, Clone, PartialEq)]
pub enum AvailabilityOutcome {
    Available { message: String },
    Unavailable { message: String },
    Failed(ConsoleError),
}

impl<S, H, D, P> Controller<S, H, D, P>
where
    S: KeyValueStore,
    H: HttpClient,
    D: Dialogs,
    P: PageHost,
{
    /// Dialog wrapping the page's availability form markup
    pub fn availability_dialog(&self, form_markup: &str) -> Result<DialogConfig> {
        DialogConfig::builder()
            .title("Search Availability")
            .html(form_markup)
            .allow_outside_click(true)
            .loader_on_confirm(true)
            .confirm_button(false)
            .build()
    }

    pub async fn search_availability(&self, form: FormFields) -> AvailabilityOutcome {
        match self.post_availability(form).await {
            Ok(response) if response.ok => {
                self.alert_success(&response.message);
                AvailabilityOutcome::Available { message: response.message }
            }
            Ok(response) => {
                self.alert_error(&response.message);
                AvailabilityOutcome::Unavailable { message: response.message }
            }
            Err(e) => {
                warn!("[availability] search failed: {}", e);
                self.alert_error(AVAILABILITY_ERROR);
                AvailabilityOutcome::Failed(e)
            }
        }
    }

    async fn post_availability(&self, form: FormFields) -> Result<ActionResponse> {
        let response = self
            .http
            .post(PostRequest {
                url: self.config.endpoints.availability.clone(),
                headers: vec![("X-Requested-With".to_string(), "XMLHttpRequest".to_string())],
                body: PostBody::Form(form),
            })
            .await?;
        if !response.is_success() {
            return Err(ConsoleError::http_status(response.status));
        }
        serde_json::from_str(&response.body).map_err(|e| ConsoleError::Malformed(e.to_string()))
    }
}
