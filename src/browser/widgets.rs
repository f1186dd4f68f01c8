//! Third-party widget bindings
//!
//! FullCalendar, simple-datatables and vanillajs-datepicker are loaded by the
//! page as globals. Constructors are imported with `catch` so a missing
//! library only costs that widget.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::task::spawn_local;
use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::http::js_error;
use super::sidebar_dom::elements;
use super::swal::{set_option, to_options};
use super::BrowserController;
use crate::models::CalendarEvent;
use crate::widgets::{CalendarOptions, DatePickerOptions, TableOptions};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = FullCalendar)]
    type Calendar;

    #[wasm_bindgen(catch, constructor, js_namespace = FullCalendar)]
    fn new(element: &web_sys::Element, options: &JsValue) -> Result<Calendar, JsValue>;

    #[wasm_bindgen(method)]
    fn render(this: &Calendar);

    #[wasm_bindgen(method)]
    fn destroy(this: &Calendar);

    #[wasm_bindgen(js_namespace = simpleDatatables)]
    type DataTable;

    #[wasm_bindgen(catch, constructor, js_namespace = simpleDatatables)]
    fn new(element: &web_sys::Element, options: &JsValue) -> Result<DataTable, JsValue>;

    pub(crate) type DateRangePicker;

    #[wasm_bindgen(catch, constructor)]
    fn new(element: &web_sys::Element, options: &JsValue) -> Result<DateRangePicker, JsValue>;
}

/// The drawn calendar and the callbacks it holds
struct CalendarHandle {
    calendar: Calendar,
    _events: Closure<dyn FnMut(JsValue, js_sys::Function, js_sys::Function)>,
    _event_click: Closure<dyn FnMut(JsValue)>,
}

thread_local! {
    static CALENDAR: RefCell<Option<CalendarHandle>> = const { RefCell::new(None) };
}

/// Swap in a new calendar, releasing the previous one and its callbacks
fn replace_calendar(next: Option<CalendarHandle>) {
    let previous = CALENDAR.with(|slot| slot.replace(next));
    if let Some(previous) = previous {
        previous.calendar.destroy();
    }
}

fn find(root: &web_sys::Element, selector: &str) -> Option<web_sys::Element> {
    root.query_selector(selector).ok().flatten()
}

fn read_str(target: &JsValue, key: &str) -> String {
    js_sys::Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_default()
}

/// Reservation calendar in `#calendar`, fed by the controller
pub fn draw_calendar(ctrl: &Rc<BrowserController>, root: &web_sys::Element) {
    let Some(element) = find(root, "#calendar") else { return };
    // the old calendar's element is gone once the region was swapped
    replace_calendar(None);
    let options = CalendarOptions::reservations();
    if let Err(e) = options.validate() {
        warn!("[calendar] {}", e);
        return;
    }
    let Ok(js_options) = to_options(&options) else { return };

    let feed_ctrl = ctrl.clone();
    let events = Closure::<dyn FnMut(JsValue, js_sys::Function, js_sys::Function)>::new(
        move |info: JsValue, success: js_sys::Function, failure: js_sys::Function| {
            let ctrl = feed_ctrl.clone();
            let start = read_str(&info, "startStr");
            let end = read_str(&info, "endStr");
            spawn_local(async move {
                let outcome = match ctrl.calendar_events(&start, &end).await {
                    Ok(events) => serde_wasm_bindgen::to_value(&events)
                        .map_err(|e| e.to_string())
                        .map(|value| success.call1(&JsValue::NULL, &value)),
                    Err(e) => Err(e.to_string()),
                };
                if let Err(message) = outcome {
                    warn!("[calendar] event feed failed: {}", message);
                    let _ = failure.call1(&JsValue::NULL, &JsValue::from_str(&message));
                }
            });
        },
    );
    set_option(&js_options, "events", events.as_ref());

    let click_ctrl = ctrl.clone();
    let event_click = Closure::<dyn FnMut(JsValue)>::new(move |info: JsValue| {
        if let Ok(js_event) = js_sys::Reflect::get(&info, &JsValue::from_str("jsEvent")) {
            if let Some(ev) = js_event.dyn_ref::<web_sys::Event>() {
                ev.prevent_default();
            }
        }
        let Some(event) = plain_event(&info) else { return };
        let ctrl = click_ctrl.clone();
        spawn_local(async move {
            if let Err(e) = ctrl.open_reservation(&event).await {
                warn!("[calendar] details dialog: {}", e);
            }
        });
    });
    set_option(&js_options, "eventClick", event_click.as_ref());

    match Calendar::new(&element, &js_options) {
        Ok(calendar) => {
            calendar.render();
            replace_calendar(Some(CalendarHandle {
                calendar,
                _events: events,
                _event_click: event_click,
            }));
        }
        Err(e) => warn!("[calendar] FullCalendar unavailable: {}", js_error(&e)),
    }
}

/// `info.event.toPlainObject()` as a typed event
fn plain_event(info: &JsValue) -> Option<CalendarEvent> {
    let event = js_sys::Reflect::get(info, &JsValue::from_str("event")).ok()?;
    let to_plain: js_sys::Function = js_sys::Reflect::get(&event, &JsValue::from_str("toPlainObject"))
        .ok()?
        .dyn_into()
        .ok()?;
    let plain = to_plain.call0(&event).ok()?;
    match serde_wasm_bindgen::from_value(plain) {
        Ok(event) => Some(event),
        Err(e) => {
            warn!("[calendar] unreadable event: {}", e);
            None
        }
    }
}

/// Sortable, searchable reservations table in `#tableadmin`
pub fn draw_table(root: &web_sys::Element) {
    let Some(element) = find(root, "#tableadmin") else { return };
    let options = match TableOptions::reservations().and_then(|o| to_options(&o)) {
        Ok(options) => options,
        Err(e) => {
            warn!("[table] {}", e);
            return;
        }
    };
    match DataTable::new(&element, &options) {
        Ok(_) => debug!("[table] reservations table ready"),
        Err(e) => warn!("[table] simple-datatables unavailable: {}", js_error(&e)),
    }
}

/// Booking date-range picker in `#reservation-dates`
///
/// Skipped on pages that host the availability dialog template; that copy is
/// drawn inside the dialog instead.
pub fn draw_date_picker(root: &web_sys::Element, enable_inputs: bool) -> Option<DateRangePicker> {
    if find(root, "#availability-form-container").is_some() {
        return None;
    }
    let form = find(root, "#reservation-dates")?;
    let options = match DatePickerOptions::booking().and_then(|o| to_options(&o)) {
        Ok(options) => options,
        Err(e) => {
            warn!("[datepicker] {}", e);
            return None;
        }
    };
    set_option(&options, "container", &form);

    let picker = match DateRangePicker::new(&form, &options) {
        Ok(picker) => picker,
        Err(e) => {
            warn!("[datepicker] DateRangePicker unavailable: {}", js_error(&e));
            return None;
        }
    };
    if enable_inputs {
        enable_form_controls(root);
    }
    Some(picker)
}

/// Inputs ship disabled so they stay inert until the picker is attached
pub fn enable_form_controls(root: &web_sys::Element) {
    for control in elements(root, ".form-control") {
        let _ = control.remove_attribute("disabled");
    }
}
