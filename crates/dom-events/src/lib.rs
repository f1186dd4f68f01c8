//! DOM Event Utilities
//!
//! Small helpers for binding long-lived listeners on server-rendered markup.
//! Listeners live for the whole page, so their closures are leaked on purpose.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Modifier and button state of a click, detached from the JS event
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ClickInfo {
    pub button: i16,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl ClickInfo {
    pub fn from_event(ev: &web_sys::MouseEvent) -> Self {
        Self {
            button: ev.button(),
            ctrl: ev.ctrl_key(),
            meta: ev.meta_key(),
            shift: ev.shift_key(),
            alt: ev.alt_key(),
        }
    }

    /// Plain primary-button click, i.e. one the browser would follow in the same tab
    pub fn is_plain_primary(&self) -> bool {
        self.button == 0 && !(self.ctrl || self.meta || self.shift || self.alt)
    }
}

/// Bind a listener for `event` on `target`, casting the event to `E`
///
/// Events that fail the cast are ignored.
pub fn listen<E, F>(target: &web_sys::EventTarget, event: &str, mut handler: F)
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let cb = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
        if let Ok(ev) = ev.dyn_into::<E>() {
            handler(ev);
        }
    });
    let _ = target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref());
    cb.forget();
}

/// Bind a delegated listener on `root`
///
/// The handler runs with the closest ancestor of the event target that matches
/// `selector` and is still inside `root`.
pub fn delegate<F>(root: &web_sys::Element, event: &str, selector: &'static str, mut handler: F)
where
    F: FnMut(web_sys::Event, web_sys::Element) + 'static,
{
    let scope = root.clone();
    listen::<web_sys::Event, _>(root.unchecked_ref(), event, move |ev| {
        let Some(matched) = matching_ancestor(&ev, selector) else { return };
        if scope.contains(Some(matched.unchecked_ref())) {
            handler(ev, matched);
        }
    });
}

/// Closest element to the event target matching `selector`
pub fn matching_ancestor(ev: &web_sys::Event, selector: &str) -> Option<web_sys::Element> {
    let target = ev.target()?;
    let element = target.dyn_into::<web_sys::Element>().ok()?;
    element.closest(selector).ok().flatten()
}

/// `document.readyState` is past `"loading"`
fn is_parsed(ready_state: &str) -> bool {
    ready_state != "loading"
}

/// Run `f` when the document has been parsed
pub fn on_document_ready<F>(f: F)
where
    F: FnOnce() + 'static,
{
    let Some(doc) = web_sys::window().and_then(|w| w.document()) else { return };
    if is_parsed(&doc.ready_state()) {
        f();
        return;
    }
    let cb = Closure::once(f);
    let _ = doc.add_event_listener_with_callback("DOMContentLoaded", cb.as_ref().unchecked_ref());
    cb.forget();
}
