//! Confirmed Administrative Actions
//!
//! Mark-processed and delete controls: confirm, POST `{id}` with the CSRF
//! token, report the server's answer, then apply the control's follow-up.

use log::{info, warn};

use super::Controller;
use crate::config::Endpoints;
use crate::dialog::DialogConfig;
use crate::error::{ConsoleError, Result};
use crate::models::{ActionResponse, IdPayload};
use crate::platform::{Dialogs, HttpClient, KeyValueStore, PageHost, PostBody, PostRequest};

pub const GENERIC_ACTION_ERROR: &str = "An unknown error happened";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    MarkProcessed,
    DeleteReservation,
    DeleteUser,
}

impl ActionKind {
    pub const ALL: [ActionKind; 3] = [ActionKind::MarkProcessed, ActionKind::DeleteReservation, ActionKind::DeleteUser];

    /// Element id of the page's single control of this kind
    pub fn control_id(&self) -> &'static str {
        match self {
            ActionKind::MarkProcessed => "markProcessed",
            ActionKind::DeleteReservation => "deleteRes",
            ActionKind::DeleteUser => "deleteUsr",
        }
    }

    pub fn endpoint<'a>(&self, endpoints: &'a Endpoints) -> &'a str {
        match self {
            ActionKind::MarkProcessed => &endpoints.mark_processed,
            ActionKind::DeleteReservation => &endpoints.delete_reservation,
            ActionKind::DeleteUser => &endpoints.delete_user,
        }
    }
}

/// What happens to the page after a successful action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowUp {
    DisableControl,
    /// Navigate away after the configured delay
    Redirect(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionState {
    Idle,
    AwaitingConfirmation,
    Submitting,
    Completed,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionRequest {
    pub kind: ActionKind,
    pub id: i64,
    /// Reservation list the control was rendered from (`new`, `all`)
    pub source: Option<String>,
    state: ActionState,
}

impl ActionRequest {
    /// Build from the control's `data-id` / `data-source` attributes
    pub fn new(kind: ActionKind, id: Option<&str>, source: Option<&str>) -> Result<Self> {
        let raw = id.ok_or_else(|| ConsoleError::InvalidControl(format!("#{} has no data-id", kind.control_id())))?;
        let id = raw
            .trim()
            .parse::<i64>()
            .map_err(|_| ConsoleError::InvalidControl(format!("#{} data-id {:?} is not numeric", kind.control_id(), raw)))?;

        let source = source.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);
        if kind == ActionKind::DeleteReservation {
            let valid = source
                .as_deref()
                .is_some_and(|s| s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
            if !valid {
                return Err(ConsoleError::InvalidControl(format!(
                    "#{} needs a data-source path segment",
                    kind.control_id()
                )));
            }
        }

        Ok(Self { kind, id, source, state: ActionState::Idle })
    }

    pub fn state(&self) -> ActionState {
        self.state
    }

    pub fn follow_up(&self, endpoints: &Endpoints) -> FollowUp {
        match self.kind {
            ActionKind::MarkProcessed => FollowUp::DisableControl,
            ActionKind::DeleteReservation => FollowUp::Redirect(format!(
                "{}/{}",
                endpoints.reservations_index.trim_end_matches('/'),
                self.source.as_deref().unwrap_or_default()
            )),
            ActionKind::DeleteUser => FollowUp::Redirect(endpoints.users_index.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// Dialog dismissed, nothing sent
    Cancelled,
    Completed { message: String },
    /// Server answered `ok: false`
    Rejected { message: String },
    Failed(ConsoleError),
}

impl<S, H, D, P> Controller<S, H, D, P>
where
    S: KeyValueStore,
    H: HttpClient,
    D: Dialogs,
    P: PageHost,
{
    /// Drive one action from confirmation to its follow-up
    pub async fn run_action(&self, request: &mut ActionRequest) -> ActionOutcome {
        request.state = ActionState::AwaitingConfirmation;
        if !self.dialogs.confirm(&DialogConfig::action_confirmation()).await {
            request.state = ActionState::Idle;
            return ActionOutcome::Cancelled;
        }

        request.state = ActionState::Submitting;
        match self.submit_action(request).await {
            Ok(response) if response.ok => {
                request.state = ActionState::Completed;
                info!("[action] {:?} #{} completed", request.kind, request.id);
                self.alert_success(&response.message);
                self.apply_follow_up(request).await;
                ActionOutcome::Completed { message: response.message }
            }
            Ok(response) => {
                request.state = ActionState::Failed;
                info!("[action] {:?} #{} rejected: {}", request.kind, request.id, response.message);
                self.alert_error(&response.message);
                ActionOutcome::Rejected { message: response.message }
            }
            Err(e) => {
                request.state = ActionState::Failed;
                warn!("[action] {:?} #{} failed: {}", request.kind, request.id, e);
                self.alert_error(GENERIC_ACTION_ERROR);
                ActionOutcome::Failed(e)
            }
        }
    }

    async fn submit_action(&self, request: &ActionRequest) -> Result<ActionResponse> {
        let token = self
            .page
            .hidden_input(&self.config.csrf_field)
            .ok_or_else(|| ConsoleError::InvalidControl(format!("no {} field on page", self.config.csrf_field)))?;
        let body = serde_json::to_string(&IdPayload { id: request.id }).map_err(|e| ConsoleError::Malformed(e.to_string()))?;

        let response = self
            .http
            .post(PostRequest {
                url: request.kind.endpoint(&self.config.endpoints).to_string(),
                headers: vec![
                    ("Content-Type".to_string(), "application/json".to_string()),
                    ("X-Requested-With".to_string(), "XMLHttpRequest".to_string()),
                    ("X-CSRF-Token".to_string(), token),
                ],
                body: PostBody::Json(body),
            })
            .await?;
        if !response.is_success() {
            return Err(ConsoleError::http_status(response.status));
        }
        serde_json::from_str(&response.body).map_err(|e| ConsoleError::Malformed(e.to_string()))
    }

    async fn apply_follow_up(&self, request: &ActionRequest) {
        match request.follow_up(&self.config.endpoints) {
            FollowUp::DisableControl => self.page.disable_control(request.kind.control_id()),
            FollowUp::Redirect(url) => {
                self.page.sleep(self.config.redirect_delay_ms).await;
                self.page.assign_location(&url);
            }
        }
    }
}
