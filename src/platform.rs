//! Platform Seams
//!
//! Everything the controller needs from the browser, expressed as traits so the
//! controller can run against in-memory fakes. The browser implementations
//! live in `crate::browser`.

#![allow(async_fn_in_trait)]

use crate::dialog::{AlertConfig, DialogConfig, ToastConfig};
use crate::error::Result;
use crate::models::FormFields;
use crate::sidebar::Sidebar;

/// Origin-scoped persistent key/value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    /// Fire-and-forget; failures are the store's to log
    fn set(&self, key: &str, value: &str);
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Outgoing POST body
#[derive(Debug, Clone, PartialEq)]
pub enum PostBody {
    Json(String),
    /// Sent as multipart form data
    Form(FormFields),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: PostBody,
}

/// Client for the opaque HTTP collaborator
///
/// `Err` means the request never produced a response.
pub trait HttpClient {
    async fn get(&self, url: &str) -> Result<HttpResponse>;
    async fn post(&self, request: PostRequest) -> Result<HttpResponse>;
}

/// Alert/dialog library
pub trait Dialogs {
    /// Resolves to true only on an explicit confirm
    async fn confirm(&self, config: &DialogConfig) -> bool;
    fn alert(&self, config: &AlertConfig);
    fn toast(&self, config: &ToastConfig);
}

/// The page the controller drives
pub trait PageHost {
    fn origin(&self) -> String;
    fn current_path(&self) -> String;

    /// Whether the swappable content region exists on this page
    fn has_content_region(&self) -> bool;
    fn content_html(&self) -> String;
    fn set_content_html(&self, html: &str);
    fn show_placeholder(&self);
    /// Inner HTML of element `id` in a full HTML document
    fn extract_fragment(&self, document_html: &str, id: &str) -> Option<String>;

    fn push_history(&self, path: &str);
    fn assign_location(&self, url: &str);

    /// Value of the hidden input named `field`
    fn hidden_input(&self, field: &str) -> Option<String>;
    /// Disable the action control with this element id
    fn disable_control(&self, control_id: &str);

    fn render_sidebar(&self, sidebar: &Sidebar);

    async fn sleep(&self, ms: u32);
}
