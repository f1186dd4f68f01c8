//! Form and chrome bindings
//!
//! Bootstrap client-side validation, the sidebar minimize toggle and the
//! public availability dialog.

use std::rc::Rc;

use leptos::task::spawn_local;
use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use super::sidebar_dom::elements;
use super::swal::{fire, set_option, swal_popup, to_options};
use super::widgets::{draw_date_picker, enable_form_controls};
use super::BrowserController;
use crate::models::FormFields;

/// Block submission of `.needs-validation` forms until the browser accepts them
pub fn bind_validation(root: &web_sys::Element) {
    for element in elements(root, ".needs-validation") {
        let Ok(form) = element.dyn_into::<web_sys::HtmlFormElement>() else { continue };
        let target = form.clone();
        dom_events::listen::<web_sys::Event, _>(&form, "submit", move |ev| {
            if !target.check_validity() {
                ev.prevent_default();
                ev.stop_propagation();
            }
            let _ = target.class_list().add_1("was-validated");
        });
    }
}

/// `[data-bs-toggle="minimize"]` collapses the sidebar to icons
pub fn bind_minimize(document: &web_sys::Document) {
    let Some(root) = document.document_element() else { return };
    let body = document.body();
    dom_events::delegate(&root, "click", "[data-bs-toggle=\"minimize\"]", move |_, _| {
        if let Some(body) = &body {
            let _ = body.class_list().toggle("sidebar-icon-only");
        }
    });
}

/// Name/value pairs of a form, file inputs skipped
pub fn form_fields(form: &web_sys::HtmlFormElement) -> FormFields {
    let Ok(data) = web_sys::FormData::new_with_form(form) else { return Vec::new() };
    let Ok(Some(entries)) = js_sys::try_iter(&data) else { return Vec::new() };
    entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let pair: js_sys::Array = entry.dyn_into().ok()?;
            Some((pair.get(0).as_string()?, pair.get(1).as_string()?))
        })
        .collect()
}

/// `#search-availability` opens the availability form in a dialog
pub fn bind_availability(ctrl: &Rc<BrowserController>, root: &web_sys::Element) {
    let Ok(Some(button)) = root.query_selector("#search-availability") else { return };
    let ctrl = ctrl.clone();
    dom_events::listen::<web_sys::Event, _>(&button, "click", move |ev| {
        ev.prevent_default();
        open_availability(&ctrl);
    });
}

fn open_availability(ctrl: &Rc<BrowserController>) {
    let Some(container) = ctrl.page().document().get_element_by_id("availability-form-container") else {
        warn!("[availability] form template missing");
        return;
    };
    let options = match ctrl.availability_dialog(&container.inner_html()).and_then(|c| to_options(&c)) {
        Ok(options) => options,
        Err(e) => {
            warn!("[availability] {}", e);
            return;
        }
    };

    let will_open = Closure::once_into_js(move || {
        if let Some(popup) = swal_popup() {
            let _ = draw_date_picker(&popup, false);
        }
    });
    set_option(&options, "willOpen", &will_open);

    let submit_ctrl = ctrl.clone();
    let did_open = Closure::once_into_js(move || {
        let Some(popup) = swal_popup() else { return };
        enable_form_controls(&popup);
        let form = popup
            .query_selector("#availability-form")
            .ok()
            .flatten()
            .and_then(|f| f.dyn_into::<web_sys::HtmlFormElement>().ok());
        let Some(form) = form else {
            warn!("[availability] dialog has no #availability-form");
            return;
        };
        let target = form.clone();
        dom_events::listen::<web_sys::Event, _>(&form, "submit", move |ev| {
            ev.prevent_default();
            let fields = form_fields(&target);
            let ctrl = submit_ctrl.clone();
            spawn_local(async move {
                let outcome = ctrl.search_availability(fields).await;
                debug!("[availability] {:?}", outcome);
            });
        });
    });
    set_option(&options, "didOpen", &did_open);

    let _ = fire(&options);
}
