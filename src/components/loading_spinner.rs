//! Loading Spinner Component
//!
//! Placeholder shown in the content region while a page loads.

use leptos::prelude::*;

/// Centered bootstrap spinner with a screen-reader label
#[component]
pub fn LoadingSpinner(
    #[prop(into, optional)] label: Option<String>,
) -> impl IntoView {
    let label = label.unwrap_or_else(|| "Loading...".to_string());

    view! {
        <div class="page-loading d-flex justify-content-center align-items-center py-5">
            <div class="spinner-border text-primary" role="status">
                <span class="visually-hidden">{label}</span>
            </div>
        </div>
    }
}
