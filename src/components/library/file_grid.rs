//! File Grid Component
//!
//! Renders the current listing: a loading placeholder, an inline error, the
//! empty-library placeholder, or one card per document. Item text is always
//! inserted as text nodes.

use leptos::ev;
use leptos::prelude::*;

use super::{use_library_actions, use_library_state, CardAction, FileCard, GridContent};
use crate::components::design_system::{Button, LoadingPlaceholder};

#[component]
pub fn FileGrid() -> impl IntoView {
    let state = use_library_state();

    view! {
        <div id="filesList" class="files-grid">
            {move || match state.listing.with(|listing| GridContent::from(listing)) {
                GridContent::Loading => view! {
                    <LoadingPlaceholder message="Loading..." />
                }.into_any(),
                GridContent::Empty => view! {
                    <EmptyLibraryState />
                }.into_any(),
                GridContent::Error(reason) => view! {
                    <p class="load-error">{format!("Error: {}", reason)}</p>
                }.into_any(),
                GridContent::Cards(cards) => cards
                    .into_iter()
                    .map(|card| view! { <FileCardView card=card /> })
                    .collect_view()
                    .into_any(),
            }}
        </div>
    }
}

#[component]
fn EmptyLibraryState() -> impl IntoView {
    view! {
        <div class="empty-placeholder">
            <div class="placeholder-img">"📂"</div>
            <p>"The library is empty"</p>
            <span>"Use the search panel to download articles"</span>
        </div>
    }
}

#[component]
fn FileCardView(card: FileCard) -> impl IntoView {
    let state = use_library_state();
    let actions = use_library_actions();

    let FileCard { item, folder_label, meta, action } = card;
    let name = item.name.clone();

    let working = {
        let folder_id = item.folder_id.clone();
        move || state.is_parsing(&folder_id)
    };

    let on_action = move |_: ev::MouseEvent| match action {
        CardAction::Read => actions.open_modal(&item),
        CardAction::Extract => actions.parse(item.folder_id.clone()),
    };

    let label = {
        let working = working.clone();
        move || format!("{} {}", action.icon(), action.label(working()))
    };

    view! {
        <article class="card file-card">
            <div class="card-top">
                <div class="card-icon">"📄"</div>
                <div class="card-info">
                    <div class="card-folder">{folder_label}</div>
                    <div class="card-name" title=name.clone()>{name.clone()}</div>
                    {meta.map(|m| view! { <div class="card-meta">{m}</div> })}
                </div>
            </div>
            <div class="card-actions">
                <Button
                    variant=action.variant()
                    class="btn-card"
                    busy=Signal::derive(working)
                    on_click=on_action
                >
                    {label}
                </Button>
            </div>
        </article>
    }
}
