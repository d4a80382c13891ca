//! Search Panel Component
//!
//! Query and paging form. Submitting asks the server to search and download
//! articles; the button stays disabled until the request settles.

use leptos::ev;
use leptos::prelude::*;

use super::{use_library_actions, use_library_state};
use crate::components::design_system::{Button, TextField};
use crate::config::ClientConfig;
use crate::services::library_controller::SearchForm;

#[component]
pub fn SearchPanel() -> impl IntoView {
    let state = use_library_state();
    let actions = use_library_actions();
    let config = expect_context::<ClientConfig>();

    let query = RwSignal::new(String::new());
    let start_from = RwSignal::new(config.default_start_from.to_string());
    let items_per_page = RwSignal::new(config.default_items_per_page.to_string());

    let submit = move || {
        if state.search_busy.get_untracked() {
            return;
        }
        actions.search(SearchForm {
            query: query.get_untracked(),
            start_from: start_from.get_untracked(),
            items_per_page: items_per_page.get_untracked(),
        });
    };

    let on_enter = Callback::new(move |_: ()| submit());

    view! {
        <div class="search-panel">
            <h2>"Find articles"</h2>

            <TextField
                label="Query"
                id="searchInput"
                value=query
                placeholder="e.g. machine learning"
                on_submit=on_enter
            />

            <div class="search-paging">
                <TextField label="Start from" id="startFrom" numeric=true value=start_from on_submit=on_enter />
                <TextField label="Per page" id="itemsPerPage" numeric=true value=items_per_page on_submit=on_enter />
            </div>

            <Button
                id="searchBtn"
                class="btn-search"
                busy=state.search_busy
                on_click=move |_: ev::MouseEvent| submit()
            >
                <span class="btn-text">
                    {move || if state.search_busy.get() { "Loading..." } else { "Search & download" }}
                </span>
            </Button>
        </div>
    }
}
