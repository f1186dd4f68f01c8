//! Navigation & Action Controller
//!
//! One value per page. It owns the sidebar model, the persisted dropdown
//! state and the platform adapters; browser glue only forwards events to it.

mod actions;
mod availability;
mod calendar;
mod navigation;

use std::cell::{Cell, Ref, RefCell};

use log::debug;

use crate::config::ConsoleConfig;
use crate::dialog::{AlertConfig, Icon, ToastConfig};
use crate::dropdown_state::DropdownState;
use crate::platform::{Dialogs, HttpClient, KeyValueStore, PageHost};
use crate::sidebar::Sidebar;

pub use actions::{ActionKind, ActionOutcome, ActionRequest, ActionState, GENERIC_ACTION_ERROR};
pub use availability::{AvailabilityOutcome, AVAILABILITY_ERROR};
pub use calendar::{details_html, display_time, events_url};
pub use navigation::{HistoryMode, LinkClick, NavOutcome, NavState, NAVIGATION_ERROR};

pub struct Controller<S, H, D, P> {
    config: ConsoleConfig,
    sidebar: RefCell<Sidebar>,
    dropdowns: DropdownState<S>,
    http: H,
    dialogs: D,
    page: P,
    /// Ticket of the most recent navigation
    nav_seq: Cell<u64>,
    in_flight: Cell<u32>,
    /// Content to put back when the latest navigation fails
    settled_html: RefCell<Option<String>>,
}

impl<S, H, D, P> Controller<S, H, D, P>
where
    S: KeyValueStore,
    H: HttpClient,
    D: Dialogs,
    P: PageHost,
{
    pub fn new(config: ConsoleConfig, sidebar: Sidebar, store: S, http: H, dialogs: D, page: P) -> Self {
        let dropdowns = DropdownState::new(store, config.storage_key.clone());
        Self {
            config,
            sidebar: RefCell::new(sidebar),
            dropdowns,
            http,
            dialogs,
            page,
            nav_seq: Cell::new(0),
            in_flight: Cell::new(0),
            settled_html: RefCell::new(None),
        }
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn dialogs(&self) -> &D {
        &self.dialogs
    }

    pub fn http(&self) -> &H {
        &self.http
    }

    pub fn store(&self) -> &S {
        self.dropdowns.store()
    }

    pub fn sidebar(&self) -> Ref<'_, Sidebar> {
        self.sidebar.borrow()
    }

    /// Page-load setup: restore persisted flags, then resolve the current route
    pub fn initialize(&self) {
        let path = self.page.current_path();
        let origin = self.page.origin();
        let mut sidebar = self.sidebar.borrow_mut();
        self.dropdowns.restore(&mut sidebar);
        let active = sidebar.resolve_active(&path, &origin);
        debug!("[controller] initialized at {} (active link {:?})", path, active);
        self.page.render_sidebar(&sidebar);
    }

    /// A section was opened or closed by the user
    ///
    /// Mutual exclusion is applied before the single save, so the snapshot
    /// never holds two open top-level sections.
    pub fn section_toggled(&self, id: &str, expanded: bool) {
        let mut sidebar = self.sidebar.borrow_mut();
        let changed = if expanded { sidebar.expand(id) } else { sidebar.collapse(id) };
        if !changed {
            return;
        }
        debug!("[controller] section {} -> {}", id, if expanded { "open" } else { "closed" });
        self.page.render_sidebar(&sidebar);
        self.dropdowns.save(&sidebar);
    }

    fn toast_error(&self, message: &str) {
        self.dialogs
            .toast(&ToastConfig::new(Icon::Error, message, self.config.toast_duration_ms));
    }

    fn alert_success(&self, message: &str) {
        self.dialogs.alert(&AlertConfig::success(message));
    }

    fn alert_error(&self, message: &str) {
        self.dialogs.alert(&AlertConfig::error(message));
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::testing::{FakePage, MemoryStore, RecordingDialogs, ScriptedHttp};

    pub type TestController = Controller<MemoryStore, ScriptedHttp, RecordingDialogs, FakePage>;

    pub fn admin_sidebar() -> Sidebar {
        let mut sidebar = Sidebar::new();
        sidebar.add_link("/admin/dashboard", None);
        let reservations = sidebar.add_section("reservations", None);
        sidebar.add_link("/admin/reservations/new", Some(reservations));
        sidebar.add_link("/admin/reservations/all", Some(reservations));
        let users = sidebar.add_section("users", None);
        sidebar.add_link("/admin/users", Some(users));
        sidebar
    }

    pub fn controller_at(path: &str, content: &str, store: MemoryStore, confirm: bool) -> TestController {
        Controller::new(
            ConsoleConfig::default(),
            admin_sidebar(),
            store,
            ScriptedHttp::default(),
            RecordingDialogs::answering(confirm),
            FakePage::at(path, content),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use crate::testing::MemoryStore;

    #[test]
    fn initialize_restores_then_resolves_route() {
        let store = MemoryStore::with("dropdownState", r#"{"users":true,"reservations":false}"#);
        let controller = controller_at("/admin/reservations/new", "<p>new</p>", store, true);

        controller.initialize();

        let sidebar = controller.sidebar();
        assert!(sidebar.section("reservations").unwrap().expanded);
        assert!(!sidebar.section("users").unwrap().expanded);
        assert_eq!(sidebar.active_link(), Some(1));
        assert!(controller.page().rendered.borrow().is_some());
        // resolution alone does not write storage
        assert_eq!(controller.store().writes(), 0);
    }

    #[test]
    fn section_toggle_saves_once_with_exclusive_state() {
        let controller = controller_at("/admin/dashboard", "", MemoryStore::default(), true);
        controller.initialize();

        controller.section_toggled("reservations", true);
        controller.section_toggled("users", true);

        assert_eq!(controller.store().writes(), 2);
        let saved = controller.store().value("dropdownState").unwrap();
        assert_eq!(saved, r#"{"reservations":false,"users":true}"#);
    }

    #[test]
    fn redundant_toggle_does_not_write() {
        let controller = controller_at("/admin/dashboard", "", MemoryStore::default(), true);
        controller.section_toggled("users", false);
        controller.section_toggled("nope", true);
        assert_eq!(controller.store().writes(), 0);
    }
}
