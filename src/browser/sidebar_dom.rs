//! Sidebar DOM
//!
//! Reads the server-rendered sidebar into a `Sidebar` model and writes the
//! model's flags back as bootstrap classes.

use std::cell::{Cell, RefCell};

use log::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::sidebar::{Arrow, Sidebar};

#[wasm_bindgen]
extern "C" {
    type BsCollapse;

    #[wasm_bindgen(catch, js_namespace = ["bootstrap", "Collapse"], js_name = getInstance)]
    fn get_instance(element: &web_sys::Element) -> Result<Option<BsCollapse>, JsValue>;

    #[wasm_bindgen(method)]
    fn hide(this: &BsCollapse);
}

pub(crate) fn elements(root: &web_sys::Element, selector: &str) -> Vec<web_sys::Element> {
    let Ok(list) = root.query_selector_all(selector) else { return Vec::new() };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
        .collect()
}

fn section_id(element: &web_sys::Element) -> Option<String> {
    Some(element.id()).filter(|id| !id.is_empty())
}

/// Element handles aligned with the model's section and link indices
pub struct SidebarDom {
    sections: Vec<web_sys::Element>,
    toggles: Vec<Vec<web_sys::Element>>,
    links: Vec<web_sys::Element>,
    /// Section bootstrap is animating open right now
    transitioning: RefCell<Option<String>>,
    /// Set while `render` drives bootstrap, whose hide events fire synchronously
    rendering: Cell<bool>,
}

impl SidebarDom {
    pub fn scan(root: &web_sys::Element) -> (Sidebar, Self) {
        let mut sidebar = Sidebar::new();
        let mut sections = Vec::new();

        for element in elements(root, ".collapse") {
            let Some(id) = section_id(&element) else {
                warn!("[sidebar] collapse without id ignored");
                continue;
            };
            let parent = element
                .parent_element()
                .and_then(|p| p.closest(".collapse").ok().flatten())
                .and_then(|p| section_id(&p))
                .and_then(|pid| sidebar.section_index(&pid));
            sidebar.add_section(id, parent);
            sections.push(element);
        }

        let mut toggles = vec![Vec::new(); sections.len()];
        for toggle in elements(root, "[data-bs-toggle=\"collapse\"]") {
            let target = toggle
                .get_attribute("data-bs-target")
                .or_else(|| toggle.get_attribute("href"))
                .unwrap_or_default();
            if let Some(idx) = target.strip_prefix('#').and_then(|id| sidebar.section_index(id)) {
                toggles[idx].push(toggle);
            }
        }

        let mut links = Vec::new();
        for link in elements(root, ".nav li a") {
            if link.has_attribute("data-bs-toggle") {
                continue;
            }
            let Some(href) = link.get_attribute("href").filter(|h| !h.starts_with('#')) else { continue };
            let section = link
                .closest(".collapse")
                .ok()
                .flatten()
                .and_then(|c| section_id(&c))
                .and_then(|id| sidebar.section_index(&id));
            sidebar.add_link(href, section);
            links.push(link);
        }

        let dom = Self {
            sections,
            toggles,
            links,
            transitioning: RefCell::new(None),
            rendering: Cell::new(false),
        };
        (sidebar, dom)
    }

    /// Run `f` while bootstrap owns the opening animation of `id`
    pub fn while_opening<R>(&self, id: &str, f: impl FnOnce() -> R) -> R {
        *self.transitioning.borrow_mut() = Some(id.to_string());
        let result = f();
        *self.transitioning.borrow_mut() = None;
        result
    }

    /// Collapse events raised by our own `render` carry no user intent
    pub fn is_rendering(&self) -> bool {
        self.rendering.get()
    }

    pub fn render(&self, sidebar: &Sidebar) {
        self.rendering.set(true);
        for (link, element) in sidebar.links().iter().zip(&self.links) {
            let _ = element.class_list().toggle_with_force("active", link.active);
            if link.section.is_none() {
                if let Ok(Some(item)) = element.closest(".nav-item") {
                    let _ = item.class_list().toggle_with_force("active", link.active);
                }
            }
        }

        let transitioning = self.transitioning.borrow().clone();
        for (idx, (section, element)) in sidebar.sections().iter().zip(&self.sections).enumerate() {
            if let Ok(Some(item)) = element.closest(".nav-item") {
                let _ = item.class_list().toggle_with_force("active", section.highlighted);
            }
            for toggle in &self.toggles[idx] {
                render_arrow(toggle, section.arrow());
            }

            let classes = element.class_list();
            if transitioning.as_deref() == Some(section.id.as_str()) || classes.contains("collapsing") {
                continue;
            }
            let shown = classes.contains("show");
            if section.expanded && !shown {
                let _ = classes.add_1("show");
            } else if !section.expanded && shown {
                match get_instance(element) {
                    Ok(Some(collapse)) => collapse.hide(),
                    _ => {
                        let _ = classes.remove_1("show");
                    }
                }
            }
        }
        self.rendering.set(false);
    }
}

fn render_arrow(toggle: &web_sys::Element, arrow: Arrow) {
    let expanded = arrow == Arrow::Up;
    let _ = toggle.set_attribute("aria-expanded", if expanded { "true" } else { "false" });
    if let Ok(Some(icon)) = toggle.query_selector(".menu-arrow") {
        let classes = icon.class_list();
        let _ = classes.toggle_with_force("arrow-up", expanded);
        let _ = classes.toggle_with_force("arrow-down", !expanded);
    }
}
