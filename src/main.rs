#![allow(warnings)]
//! Reservation Console Frontend Entry Point

mod browser;
mod components;
mod config;
mod controller;
mod dialog;
mod dropdown_state;
mod error;
mod models;
mod paths;
mod platform;
mod sidebar;
mod widgets;

#[cfg(test)]
mod testing;

fn main() {
    console_error_panic_hook::set_once();
    dom_events::on_document_ready(browser::boot);
}
