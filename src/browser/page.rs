//! Page adapter over the live document

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::http::js_error;
use super::sidebar_dom::SidebarDom;
use crate::components::LoadingSpinner;
use crate::platform::PageHost;
use crate::sidebar::Sidebar;

pub struct DomPage {
    document: web_sys::Document,
    region_id: String,
    sidebar: Option<SidebarDom>,
}

impl DomPage {
    pub fn new(document: web_sys::Document, region_id: impl Into<String>, sidebar: Option<SidebarDom>) -> Self {
        Self {
            document,
            region_id: region_id.into(),
            sidebar,
        }
    }

    pub fn document(&self) -> &web_sys::Document {
        &self.document
    }

    pub fn region(&self) -> Option<web_sys::Element> {
        self.document.get_element_by_id(&self.region_id)
    }

    pub fn sidebar_dom(&self) -> Option<&SidebarDom> {
        self.sidebar.as_ref()
    }

    fn location(&self) -> Option<web_sys::Location> {
        web_sys::window().map(|w| w.location())
    }
}

impl PageHost for DomPage {
    fn origin(&self) -> String {
        self.location().and_then(|l| l.origin().ok()).unwrap_or_default()
    }

    fn current_path(&self) -> String {
        let Some(location) = self.location() else { return "/".to_string() };
        let path = location.pathname().unwrap_or_else(|_| "/".to_string());
        let search = location.search().unwrap_or_default();
        format!("{path}{search}")
    }

    fn has_content_region(&self) -> bool {
        self.region().is_some()
    }

    fn content_html(&self) -> String {
        self.region().map(|r| r.inner_html()).unwrap_or_default()
    }

    fn set_content_html(&self, html: &str) {
        if let Some(region) = self.region() {
            region.set_inner_html(html);
        }
    }

    fn show_placeholder(&self) {
        let Some(region) = self.region() else { return };
        region.set_inner_html("");
        if let Ok(region) = region.dyn_into::<web_sys::HtmlElement>() {
            // The next swap replaces the nodes wholesale
            leptos::mount::mount_to(region, || view! { <LoadingSpinner /> }).forget();
        }
    }

    fn extract_fragment(&self, document_html: &str, id: &str) -> Option<String> {
        let parser = web_sys::DomParser::new().ok()?;
        let parsed = parser
            .parse_from_string(document_html, web_sys::SupportedType::TextHtml)
            .ok()?;
        parsed.get_element_by_id(id).map(|e| e.inner_html())
    }

    fn push_history(&self, path: &str) {
        let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else { return };
        if let Err(e) = history.push_state_with_url(&JsValue::NULL, "", Some(path)) {
            warn!("[page] pushState failed: {}", js_error(&e));
        }
    }

    fn assign_location(&self, url: &str) {
        if let Some(location) = self.location() {
            let _ = location.set_href(url);
        }
    }

    fn hidden_input(&self, field: &str) -> Option<String> {
        let selector = format!("input[name=\"{field}\"]");
        let input = self.document.query_selector(&selector).ok()??;
        input.dyn_into::<web_sys::HtmlInputElement>().ok().map(|i| i.value())
    }

    fn disable_control(&self, control_id: &str) {
        let Some(control) = self.document.get_element_by_id(control_id) else { return };
        match control.dyn_ref::<web_sys::HtmlButtonElement>() {
            Some(button) => button.set_disabled(true),
            None => {
                let _ = control.set_attribute("disabled", "");
                let _ = control.class_list().add_1("disabled");
            }
        }
    }

    fn render_sidebar(&self, sidebar: &Sidebar) {
        if let Some(dom) = &self.sidebar {
            dom.render(sidebar);
        }
    }

    async fn sleep(&self, ms: u32) {
        TimeoutFuture::new(ms).await;
    }
}
