//! SweetAlert2 bindings

use log::warn;
use serde::Serialize;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use super::http::js_error;
use crate::dialog::{AlertConfig, DialogConfig, ToastConfig};
use crate::error::{ConsoleError, Result};
use crate::platform::Dialogs;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = Swal, js_name = fire)]
    fn swal_fire(options: &JsValue) -> std::result::Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(js_namespace = Swal, js_name = getPopup)]
    pub(crate) fn swal_popup() -> Option<web_sys::HtmlElement>;

    #[wasm_bindgen(js_namespace = Swal, js_name = stopTimer)]
    fn swal_stop_timer();

    #[wasm_bindgen(js_namespace = Swal, js_name = resumeTimer)]
    fn swal_resume_timer();
}

pub(crate) fn to_options<T: Serialize>(config: &T) -> Result<JsValue> {
    serde_wasm_bindgen::to_value(config).map_err(|e| ConsoleError::Malformed(e.to_string()))
}

pub(crate) fn set_option(options: &JsValue, key: &str, value: &JsValue) {
    let _ = js_sys::Reflect::set(options, &JsValue::from_str(key), value);
}

/// Open a dialog and return its settle promise
pub(crate) fn fire(options: &JsValue) -> Option<js_sys::Promise> {
    match swal_fire(options) {
        Ok(promise) => Some(promise),
        Err(e) => {
            warn!("[dialog] Swal.fire failed: {}", js_error(&e));
            None
        }
    }
}

fn fire_config<T: Serialize>(config: &T) {
    match to_options(config) {
        Ok(options) => {
            let _ = fire(&options);
        }
        Err(e) => warn!("[dialog] bad options: {}", e),
    }
}

fn is_confirmed(result: &JsValue) -> bool {
    js_sys::Reflect::get(result, &JsValue::from_str("isConfirmed"))
        .ok()
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}

pub struct SwalDialogs;

impl Dialogs for SwalDialogs {
    async fn confirm(&self, config: &DialogConfig) -> bool {
        let options = match to_options(config) {
            Ok(options) => options,
            Err(e) => {
                warn!("[dialog] bad options: {}", e);
                return false;
            }
        };
        let Some(promise) = fire(&options) else { return false };
        match JsFuture::from(promise).await {
            Ok(result) => is_confirmed(&result),
            Err(_) => false,
        }
    }

    fn alert(&self, config: &AlertConfig) {
        fire_config(config);
    }

    fn toast(&self, config: &ToastConfig) {
        let options = match to_options(config) {
            Ok(options) => options,
            Err(e) => {
                warn!("[dialog] bad options: {}", e);
                return;
            }
        };
        // Hovering the toast pauses its countdown
        let did_open = Closure::once_into_js(move |toast: web_sys::HtmlElement| {
            dom_events::listen::<web_sys::Event, _>(&toast, "mouseenter", |_| swal_stop_timer());
            dom_events::listen::<web_sys::Event, _>(&toast, "mouseleave", |_| swal_resume_timer());
        });
        set_option(&options, "didOpen", &did_open);
        let _ = fire(&options);
    }
}
