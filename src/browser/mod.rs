//! Browser wiring
//!
//! Builds the controller over the live document and binds DOM events to its
//! operations. Everything page-specific is rebound by `enhance` after each
//! content swap.

mod forms;
mod http;
mod page;
mod sidebar_dom;
mod storage;
mod swal;
mod widgets;

use std::cell::Cell;
use std::rc::Rc;

use console_logger::ConsoleLogger;
use leptos::task::spawn_local;
use log::{debug, info, warn, LevelFilter};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::config::{ConsoleConfig, CONFIG_ELEMENT_ID};
use crate::controller::{ActionKind, ActionRequest, Controller, HistoryMode, LinkClick, NavOutcome, GENERIC_ACTION_ERROR};
use crate::dialog::AlertConfig;
use crate::error::Result;
use crate::platform::{Dialogs, PageHost};
use crate::sidebar::Sidebar;

pub use http::FetchClient;
pub use page::DomPage;
pub use sidebar_dom::SidebarDom;
pub use storage::LocalStore;
pub use swal::SwalDialogs;

pub type BrowserController = Controller<LocalStore, FetchClient, SwalDialogs, DomPage>;

thread_local! {
    static LOGGER: Cell<Option<&'static ConsoleLogger>> = const { Cell::new(None) };
}

/// Recent log lines, callable from the devtools console
#[wasm_bindgen(js_name = consoleLogTail)]
pub fn console_log_tail() -> Vec<String> {
    LOGGER.with(|logger| logger.get().map(ConsoleLogger::recent).unwrap_or_default())
}

/// JSON override embedded by the server, if any
fn read_config(document: &web_sys::Document) -> Result<ConsoleConfig> {
    match document.get_element_by_id(CONFIG_ELEMENT_ID).and_then(|e| e.text_content()) {
        Some(raw) if !raw.trim().is_empty() => ConsoleConfig::from_json(&raw),
        _ => Ok(ConsoleConfig::default()),
    }
}

pub fn boot() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else { return };
    let (config, config_error) = match read_config(&document) {
        Ok(config) => (config, None),
        Err(e) => (ConsoleConfig::default(), Some(e)),
    };
    match console_logger::init(config.level_filter().unwrap_or(LevelFilter::Info)) {
        Ok(logger) => LOGGER.with(|slot| slot.set(Some(logger))),
        Err(_) => warn!("[boot] a logger was already installed"),
    }
    if let Some(e) = config_error {
        warn!("[boot] ignoring #{}: {}", CONFIG_ELEMENT_ID, e);
    }

    let sidebar_root = document.query_selector(&config.sidebar_selector).ok().flatten();
    let (sidebar, sidebar_dom) = match &sidebar_root {
        Some(root) => {
            let (sidebar, dom) = SidebarDom::scan(root);
            (sidebar, Some(dom))
        }
        None => {
            debug!("[boot] no sidebar matching {}", config.sidebar_selector);
            (Sidebar::new(), None)
        }
    };
    let store = LocalStore::new();
    let page = DomPage::new(document.clone(), config.content_region_id.clone(), sidebar_dom);
    let ctrl = Rc::new(Controller::new(config, sidebar, store, FetchClient, SwalDialogs, page));
    ctrl.initialize();

    if let Some(root) = &sidebar_root {
        bind_sidebar(&ctrl, root);
    }
    bind_navigation(&ctrl, sidebar_root.as_ref());
    forms::bind_minimize(&document);
    if let Some(root) = document.document_element() {
        enhance(&ctrl, &root);
    }
    info!("[boot] console ready at {}", ctrl.page().current_path());
}

/// Bind everything that lives inside `root`
fn enhance(ctrl: &Rc<BrowserController>, root: &web_sys::Element) {
    for kind in ActionKind::ALL {
        bind_action(ctrl, root, kind);
    }
    widgets::draw_calendar(ctrl, root);
    widgets::draw_table(root);
    let _ = widgets::draw_date_picker(root, true);
    forms::bind_validation(root);
    forms::bind_availability(ctrl, root);
}

fn bind_sidebar(ctrl: &Rc<BrowserController>, root: &web_sys::Element) {
    for (event, expanded) in [("show.bs.collapse", true), ("hide.bs.collapse", false)] {
        let ctrl = ctrl.clone();
        dom_events::delegate(root, event, ".collapse", move |_, section| {
            let Some(dom) = ctrl.page().sidebar_dom() else { return };
            if dom.is_rendering() {
                return;
            }
            let id = section.id();
            if expanded {
                dom.while_opening(&id, || ctrl.section_toggled(&id, true));
            } else {
                ctrl.section_toggled(&id, false);
            }
        });
    }
}

fn link_click(ev: &web_sys::Event, anchor: &web_sys::Element) -> LinkClick {
    let click = ev
        .dyn_ref::<web_sys::MouseEvent>()
        .map(dom_events::ClickInfo::from_event)
        .unwrap_or_default();
    LinkClick {
        href: anchor.get_attribute("href"),
        click,
        has_target: anchor
            .get_attribute("target")
            .is_some_and(|t| !t.is_empty() && t != "_self"),
        has_download: anchor.has_attribute("download"),
        already_handled: ev.default_prevented(),
    }
}

/// Sidebar MenuLinks load in place; every other anchor stays native
fn bind_navigation(ctrl: &Rc<BrowserController>, sidebar_root: Option<&web_sys::Element>) {
    if let Some(root) = sidebar_root {
        let click_ctrl = ctrl.clone();
        dom_events::delegate(root, "click", "a[href]", move |ev, anchor| {
            let Some(path) = click_ctrl.intercept(&link_click(&ev, &anchor)) else { return };
            ev.prevent_default();
            let ctrl = click_ctrl.clone();
            spawn_local(async move {
                let outcome = ctrl.navigate(&path, HistoryMode::Push).await;
                after_navigation(&ctrl, outcome);
            });
        });
    }

    let Some(window) = web_sys::window() else { return };
    let pop_ctrl = ctrl.clone();
    dom_events::listen::<web_sys::Event, _>(&window, "popstate", move |_| {
        if !pop_ctrl.page().has_content_region() {
            return;
        }
        let ctrl = pop_ctrl.clone();
        spawn_local(async move {
            let outcome = ctrl.history_popped().await;
            after_navigation(&ctrl, outcome);
        });
    });
}

fn after_navigation(ctrl: &Rc<BrowserController>, outcome: NavOutcome) {
    match outcome {
        NavOutcome::Swapped => {
            if let Some(region) = ctrl.page().region() {
                enhance(ctrl, &region);
            }
        }
        NavOutcome::Failed(e) => debug!("[nav] failed: {}", e),
        NavOutcome::Superseded => {}
    }
}

fn bind_action(ctrl: &Rc<BrowserController>, root: &web_sys::Element, kind: ActionKind) {
    let selector = format!("#{}", kind.control_id());
    let Ok(Some(control)) = root.query_selector(&selector) else { return };
    let ctrl = ctrl.clone();
    let source = control.clone();
    dom_events::listen::<web_sys::Event, _>(&control, "click", move |ev| {
        ev.prevent_default();
        let request = ActionRequest::new(
            kind,
            source.get_attribute("data-id").as_deref(),
            source.get_attribute("data-source").as_deref(),
        );
        let mut request = match request {
            Ok(request) => request,
            Err(e) => {
                warn!("[action] {} not started: {}", kind.control_id(), e);
                ctrl.dialogs().alert(&AlertConfig::error(GENERIC_ACTION_ERROR));
                return;
            }
        };
        let ctrl = ctrl.clone();
        spawn_local(async move {
            let outcome = ctrl.run_action(&mut request).await;
            debug!("[action] {} -> {:?}", kind.control_id(), outcome);
        });
    });
}
