//! Single-Page Navigation
//!
//! In-app sidebar links swap the main-content region instead of reloading.
//! Every navigation takes a ticket; only the newest ticket may touch the page.

use dom_events::ClickInfo;
use log::{debug, warn};

use super::Controller;
use crate::error::{ConsoleError, Result};
use crate::paths;
use crate::platform::{Dialogs, HttpClient, KeyValueStore, PageHost};

pub const NAVIGATION_ERROR: &str = "Could not load the requested page";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    Idle,
    Loading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    /// Link click: add a history entry
    Push,
    /// History pop: the browser already moved
    Keep,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NavOutcome {
    Swapped,
    Failed(ConsoleError),
    /// A newer navigation started before this one finished
    Superseded,
}

/// What the browser glue knows about a clicked anchor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkClick {
    pub href: Option<String>,
    pub click: ClickInfo,
    pub has_target: bool,
    pub has_download: bool,
    pub already_handled: bool,
}

impl LinkClick {
    /// Path to load in place, or `None` to let the browser follow the link
    pub fn in_app_path(&self) -> Option<&str> {
        if self.already_handled || self.has_target || self.has_download || !self.click.is_plain_primary() {
            return None;
        }
        self.href.as_deref().filter(|href| paths::is_in_app(href))
    }
}

impl<S, H, D, P> Controller<S, H, D, P>
where
    S: KeyValueStore,
    H: HttpClient,
    D: Dialogs,
    P: PageHost,
{
    pub fn nav_state(&self) -> NavState {
        if self.in_flight.get() > 0 {
            NavState::Loading
        } else {
            NavState::Idle
        }
    }

    /// Path to load in place for a click, `None` to leave it to the browser
    ///
    /// Only sidebar MenuLinks are taken over, and only on pages that have a
    /// content region to swap.
    pub fn intercept(&self, click: &LinkClick) -> Option<String> {
        let path = click.in_app_path()?;
        if !self.page.has_content_region() {
            return None;
        }
        let sidebar = self.sidebar.borrow();
        sidebar
            .links()
            .iter()
            .any(|link| link.href == path)
            .then(|| path.to_string())
    }

    /// Load `path` into the content region
    pub async fn navigate(&self, path: &str, mode: HistoryMode) -> NavOutcome {
        let ticket = self.nav_seq.get() + 1;
        self.nav_seq.set(ticket);
        // While another load is pending the region shows the placeholder,
        // so the last swapped-in content stays the restore point
        if self.in_flight.get() == 0 {
            *self.settled_html.borrow_mut() = Some(self.page.content_html());
        }
        self.in_flight.set(self.in_flight.get() + 1);
        debug!("[nav] #{} loading {}", ticket, path);
        self.page.show_placeholder();

        let result = self.fetch_fragment(path).await;
        self.in_flight.set(self.in_flight.get() - 1);

        if ticket != self.nav_seq.get() {
            debug!("[nav] #{} for {} superseded", ticket, path);
            return NavOutcome::Superseded;
        }

        match result {
            Ok(fragment) => {
                self.page.set_content_html(&fragment);
                *self.settled_html.borrow_mut() = Some(fragment);
                if mode == HistoryMode::Push {
                    self.page.push_history(path);
                }
                let origin = self.page.origin();
                let mut sidebar = self.sidebar.borrow_mut();
                sidebar.resolve_active(path, &origin);
                self.page.render_sidebar(&sidebar);
                self.dropdowns.save(&sidebar);
                NavOutcome::Swapped
            }
            Err(e) => {
                warn!("[nav] #{} {} failed: {}", ticket, path, e);
                let previous = self.settled_html.borrow().clone();
                if let Some(previous) = previous {
                    self.page.set_content_html(&previous);
                }
                self.toast_error(NAVIGATION_ERROR);
                NavOutcome::Failed(e)
            }
        }
    }

    /// Back/forward: reload whatever the address bar now shows
    pub async fn history_popped(&self) -> NavOutcome {
        let path = self.page.current_path();
        self.navigate(&path, HistoryMode::Keep).await
    }

    async fn fetch_fragment(&self, path: &str) -> Result<String> {
        let response = self.http.get(path).await?;
        if !response.is_success() {
            return Err(ConsoleError::http_status(response.status));
        }
        let region = &self.config.content_region_id;
        self.page
            .extract_fragment(&response.body, region)
            .ok_or_else(|| ConsoleError::Malformed(format!("response has no #{region}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::test_support::*;
    use crate::testing::{page_html, MemoryStore};
    use futures::executor::block_on;

    const BEFORE: &str = "<h1>Dashboard</h1><p>3 new reservations</p>";

    #[test]
    fn success_swaps_content_and_updates_state() {
        let controller = controller_at("/admin/dashboard", BEFORE, MemoryStore::default(), true);
        controller.initialize();
        controller
            .http()
            .reply("/admin/reservations/new", 200, &page_html("<table id=\"tableadmin\"></table>"));

        let outcome = block_on(controller.navigate("/admin/reservations/new", HistoryMode::Push));

        assert_eq!(outcome, NavOutcome::Swapped);
        let page = controller.page();
        assert_eq!(*page.content.borrow(), "<table id=\"tableadmin\"></table>");
        assert_eq!(*page.history.borrow(), vec!["/admin/reservations/new".to_string()]);
        assert_eq!(controller.sidebar().active_link(), Some(1));
        assert!(controller.sidebar().section("reservations").unwrap().expanded);
        assert_eq!(
            controller.store().value("dropdownState").as_deref(),
            Some(r#"{"reservations":true,"users":false}"#)
        );
        assert_eq!(controller.nav_state(), NavState::Idle);
    }

    #[test]
    fn server_error_keeps_content_byte_identical() {
        let controller = controller_at("/admin/dashboard", BEFORE, MemoryStore::default(), true);
        controller.http().reply("/admin/users", 500, "<h1>Internal Server Error</h1>");

        let outcome = block_on(controller.navigate("/admin/users", HistoryMode::Push));

        assert_eq!(outcome, NavOutcome::Failed(ConsoleError::http_status(500)));
        assert_eq!(*controller.page().content.borrow(), BEFORE);
        assert!(controller.page().history.borrow().is_empty());
        let toasts = controller.dialogs().toasts.borrow();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].title, NAVIGATION_ERROR);
    }

    #[test]
    fn missing_fragment_is_malformed() {
        let controller = controller_at("/admin/dashboard", BEFORE, MemoryStore::default(), true);
        controller.http().reply("/admin/users", 200, "<html><body>login required</body></html>");

        let outcome = block_on(controller.navigate("/admin/users", HistoryMode::Push));

        assert!(matches!(outcome, NavOutcome::Failed(ConsoleError::Malformed(_))));
        assert_eq!(*controller.page().content.borrow(), BEFORE);
    }

    #[test]
    fn network_failure_toasts() {
        let controller = controller_at("/admin/dashboard", BEFORE, MemoryStore::default(), true);
        controller.http().fail("/admin/users");

        let outcome = block_on(controller.navigate("/admin/users", HistoryMode::Push));

        assert!(matches!(outcome, NavOutcome::Failed(ConsoleError::Network(_))));
        assert_eq!(controller.dialogs().toasts.borrow().len(), 1);
    }

    #[test]
    fn history_pop_reloads_without_pushing() {
        let controller = controller_at("/admin/users", BEFORE, MemoryStore::default(), true);
        controller.http().reply("/admin/users", 200, &page_html("<p>users</p>"));

        let outcome = block_on(controller.history_popped());

        assert_eq!(outcome, NavOutcome::Swapped);
        assert!(controller.page().history.borrow().is_empty());
        assert_eq!(*controller.page().content.borrow(), "<p>users</p>");
        assert_eq!(controller.sidebar().active_link(), Some(3));
    }

    #[test]
    fn history_pop_keeps_the_query_string() {
        let controller = controller_at("/admin/reservations/all?page=2", BEFORE, MemoryStore::default(), true);
        controller
            .http()
            .reply("/admin/reservations/all?page=2", 200, &page_html("<p>page 2</p>"));

        let outcome = block_on(controller.history_popped());

        assert_eq!(outcome, NavOutcome::Swapped);
        assert_eq!(*controller.http().gets.borrow(), vec!["/admin/reservations/all?page=2".to_string()]);
        assert_eq!(controller.sidebar().active_link(), Some(2));
    }

    #[test]
    fn stale_response_is_discarded() {
        let controller = controller_at("/admin/dashboard", BEFORE, MemoryStore::default(), true);
        let http = controller.http();
        http.reply("/admin/reservations/all", 200, &page_html("<p>all</p>"));
        http.reply("/admin/users", 200, &page_html("<p>users</p>"));
        http.hold("/admin/reservations/all");
        http.hold("/admin/users");

        let (older, newest, ()) = block_on(async {
            futures::join!(
                controller.navigate("/admin/reservations/all", HistoryMode::Push),
                controller.navigate("/admin/users", HistoryMode::Push),
                async {
                    // newest answers first, the older reply arrives afterwards
                    http.release("/admin/users");
                    http.release("/admin/reservations/all");
                },
            )
        });

        assert_eq!(older, NavOutcome::Superseded);
        assert_eq!(newest, NavOutcome::Swapped);
        assert_eq!(*controller.page().content.borrow(), "<p>users</p>");
        assert_eq!(*controller.page().history.borrow(), vec!["/admin/users".to_string()]);
        assert_eq!(controller.nav_state(), NavState::Idle);
    }

    #[test]
    fn failed_latest_navigation_restores_pre_click_content() {
        let controller = controller_at("/admin/dashboard", BEFORE, MemoryStore::default(), true);
        let http = controller.http();
        http.reply("/admin/reservations/all", 200, &page_html("<p>all</p>"));
        http.reply("/admin/users", 500, "");
        http.hold("/admin/reservations/all");
        http.hold("/admin/users");

        let (older, newest, ()) = block_on(async {
            futures::join!(
                controller.navigate("/admin/reservations/all", HistoryMode::Push),
                controller.navigate("/admin/users", HistoryMode::Push),
                async {
                    http.release("/admin/reservations/all");
                    http.release("/admin/users");
                },
            )
        });

        assert_eq!(older, NavOutcome::Superseded);
        assert!(matches!(newest, NavOutcome::Failed(_)));
        assert_eq!(*controller.page().content.borrow(), BEFORE);
        assert_eq!(controller.dialogs().toasts.borrow().len(), 1);
    }

    #[test]
    fn failure_after_an_overlapping_swap_restores_the_swapped_content() {
        let controller = controller_at("/admin/dashboard", BEFORE, MemoryStore::default(), true);
        let http = controller.http();
        http.reply("/admin/reservations/all", 200, &page_html("<p>all</p>"));
        http.reply("/admin/reservations/new", 200, &page_html("<p>new</p>"));
        http.reply("/admin/users", 500, "");
        http.hold("/admin/reservations/all");
        http.hold("/admin/reservations/new");

        let (first, second, (third, before_third)) = block_on(async {
            futures::join!(
                controller.navigate("/admin/reservations/all", HistoryMode::Push),
                controller.navigate("/admin/reservations/new", HistoryMode::Push),
                async {
                    http.release("/admin/reservations/new");
                    // let the second load swap in before clicking again
                    futures::pending!();
                    let before_third = controller.page().content.borrow().clone();
                    let third = controller.navigate("/admin/users", HistoryMode::Push).await;
                    http.release("/admin/reservations/all");
                    (third, before_third)
                },
            )
        });

        assert_eq!(second, NavOutcome::Swapped);
        assert_eq!(before_third, "<p>new</p>");
        assert_eq!(third, NavOutcome::Failed(ConsoleError::http_status(500)));
        assert_eq!(first, NavOutcome::Superseded);
        assert_eq!(*controller.page().content.borrow(), "<p>new</p>");
        assert_eq!(controller.nav_state(), NavState::Idle);
    }

    #[test]
    fn only_menu_links_are_taken_over() {
        let controller = controller_at("/admin/dashboard", BEFORE, MemoryStore::default(), true);
        let link = |href: &str| LinkClick { href: Some(href.to_string()), ..Default::default() };

        assert_eq!(controller.intercept(&link("/admin/users")).as_deref(), Some("/admin/users"));
        assert_eq!(controller.intercept(&link("/user/logout")), None);
        assert_eq!(controller.intercept(&link("/admin/reservations/show/7/new")), None);
        assert_eq!(controller.intercept(&link("#users")), None);
    }

    #[test]
    fn pages_without_a_content_region_keep_native_links() {
        let controller = controller_at("/", "", MemoryStore::default(), true);
        controller.page().region.set(false);
        let click = LinkClick { href: Some("/admin/users".to_string()), ..Default::default() };

        assert_eq!(controller.intercept(&click), None);
    }

    #[test]
    fn only_plain_in_app_clicks_are_intercepted() {
        let link = |href: &str| LinkClick { href: Some(href.to_string()), ..Default::default() };

        assert_eq!(link("/admin/users").in_app_path(), Some("/admin/users"));
        assert_eq!(link("#reservations").in_app_path(), None);
        assert_eq!(link("https://elsewhere.example/").in_app_path(), None);
        assert_eq!(link("//cdn.example/x").in_app_path(), None);

        let mut new_tab = link("/admin/users");
        new_tab.click.ctrl = true;
        assert_eq!(new_tab.in_app_path(), None);

        let targeted = LinkClick { has_target: true, ..link("/admin/users") };
        assert_eq!(targeted.in_app_path(), None);
    }
}
