//! In-memory fakes for the platform traits

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};

use futures::channel::oneshot;

use crate::dialog::{AlertConfig, DialogConfig, ToastConfig};
use crate::error::{ConsoleError, Result};
use crate::platform::{Dialogs, HttpClient, HttpResponse, KeyValueStore, PageHost, PostRequest};
use crate::sidebar::Sidebar;

pub const ORIGIN: &str = "https://inn.example";
pub const SPINNER: &str = "<div class=\"spinner\"></div>";

#[derive(Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
    writes: Cell<usize>,
}

impl MemoryStore {
    pub fn with(key: &str, value: &str) -> Self {
        let store = Self::default();
        store.values.borrow_mut().insert(key.to_string(), value.to_string());
        store
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.value(key)
    }

    fn set(&self, key: &str, value: &str) {
        self.writes.set(self.writes.get() + 1);
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
    }
}

/// Replays queued replies per URL and records every request
#[derive(Default)]
pub struct ScriptedHttp {
    replies: RefCell<HashMap<String, VecDeque<Result<HttpResponse>>>>,
    held: RefCell<HashMap<String, oneshot::Receiver<()>>>,
    gates: RefCell<HashMap<String, oneshot::Sender<()>>>,
    pub gets: RefCell<Vec<String>>,
    pub posts: RefCell<Vec<PostRequest>>,
}

impl ScriptedHttp {
    pub fn reply(&self, url: &str, status: u16, body: &str) {
        self.push(url, Ok(HttpResponse { status, body: body.to_string() }));
    }

    pub fn fail(&self, url: &str) {
        self.push(url, Err(ConsoleError::Network("connection reset".to_string())));
    }

    /// The next GET of `url` stays pending until `release`
    pub fn hold(&self, url: &str) {
        let (tx, rx) = oneshot::channel();
        self.gates.borrow_mut().insert(url.to_string(), tx);
        self.held.borrow_mut().insert(url.to_string(), rx);
    }

    pub fn release(&self, url: &str) {
        if let Some(tx) = self.gates.borrow_mut().remove(url) {
            let _ = tx.send(());
        }
    }

    fn push(&self, url: &str, reply: Result<HttpResponse>) {
        self.replies.borrow_mut().entry(url.to_string()).or_default().push_back(reply);
    }

    fn next(&self, url: &str) -> Result<HttpResponse> {
        self.replies
            .borrow_mut()
            .get_mut(url)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Ok(HttpResponse { status: 404, body: String::new() }))
    }
}

impl HttpClient for ScriptedHttp {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        self.gets.borrow_mut().push(url.to_string());
        let gate = self.held.borrow_mut().remove(url);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.next(url)
    }

    async fn post(&self, request: PostRequest) -> Result<HttpResponse> {
        let url = request.url.clone();
        self.posts.borrow_mut().push(request);
        self.next(&url)
    }
}

pub struct RecordingDialogs {
    pub answer: Cell<bool>,
    pub prompts: RefCell<Vec<DialogConfig>>,
    pub alerts: RefCell<Vec<AlertConfig>>,
    pub toasts: RefCell<Vec<ToastConfig>>,
}

impl RecordingDialogs {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer: Cell::new(answer),
            prompts: RefCell::default(),
            alerts: RefCell::default(),
            toasts: RefCell::default(),
        }
    }
}

impl Dialogs for RecordingDialogs {
    async fn confirm(&self, config: &DialogConfig) -> bool {
        self.prompts.borrow_mut().push(config.clone());
        self.answer.get()
    }

    fn alert(&self, config: &AlertConfig) {
        self.alerts.borrow_mut().push(config.clone());
    }

    fn toast(&self, config: &ToastConfig) {
        self.toasts.borrow_mut().push(config.clone());
    }
}

/// Page with a content region, history stack and a virtual clock
pub struct FakePage {
    pub path: RefCell<String>,
    pub content: RefCell<String>,
    pub region: Cell<bool>,
    pub history: RefCell<Vec<String>>,
    pub location: RefCell<Option<String>>,
    pub hidden: RefCell<HashMap<String, String>>,
    pub disabled: RefCell<Vec<String>>,
    pub rendered: RefCell<Option<Sidebar>>,
    pub clock_ms: Cell<u64>,
    /// Clock reading when `assign_location` ran
    pub location_at_ms: Cell<Option<u64>>,
}

impl FakePage {
    pub fn at(path: &str, content: &str) -> Self {
        Self {
            path: RefCell::new(path.to_string()),
            content: RefCell::new(content.to_string()),
            region: Cell::new(true),
            history: RefCell::default(),
            location: RefCell::default(),
            hidden: RefCell::new(HashMap::from([("csrf_token".to_string(), "tok-123".to_string())])),
            disabled: RefCell::default(),
            rendered: RefCell::default(),
            clock_ms: Cell::new(0),
            location_at_ms: Cell::new(None),
        }
    }
}

impl PageHost for FakePage {
    fn origin(&self) -> String {
        ORIGIN.to_string()
    }

    fn current_path(&self) -> String {
        self.path.borrow().clone()
    }

    fn has_content_region(&self) -> bool {
        self.region.get()
    }

    fn content_html(&self) -> String {
        self.content.borrow().clone()
    }

    fn set_content_html(&self, html: &str) {
        *self.content.borrow_mut() = html.to_string();
    }

    fn show_placeholder(&self) {
        *self.content.borrow_mut() = SPINNER.to_string();
    }

    /// Finds `<main id="..">…</main>` without nesting support
    fn extract_fragment(&self, document_html: &str, id: &str) -> Option<String> {
        let open = format!("<main id=\"{id}\">");
        let start = document_html.find(&open)? + open.len();
        let end = document_html[start..].find("</main>")? + start;
        Some(document_html[start..end].to_string())
    }

    fn push_history(&self, path: &str) {
        self.history.borrow_mut().push(path.to_string());
        *self.path.borrow_mut() = path.to_string();
    }

    fn assign_location(&self, url: &str) {
        *self.location.borrow_mut() = Some(url.to_string());
        self.location_at_ms.set(Some(self.clock_ms.get()));
    }

    fn hidden_input(&self, field: &str) -> Option<String> {
        self.hidden.borrow().get(field).cloned()
    }

    fn disable_control(&self, control_id: &str) {
        self.disabled.borrow_mut().push(control_id.to_string());
    }

    fn render_sidebar(&self, sidebar: &Sidebar) {
        *self.rendered.borrow_mut() = Some(sidebar.clone());
    }

    async fn sleep(&self, ms: u32) {
        self.clock_ms.set(self.clock_ms.get() + u64::from(ms));
    }
}

pub fn page_html(content: &str) -> String {
    format!("<html><body><nav></nav><main id=\"main-content\">{content}</main></body></html>")
}
