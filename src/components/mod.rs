//! UI Components
//!
//! Leptos views mounted into server-rendered markup.

mod loading_spinner;

pub use loading_spinner::LoadingSpinner;
