use leptos::ev;
use leptos::prelude::*;

use super::{use_library_actions, use_library_state};
use crate::components::design_system::{Button, ButtonVariant};

/// Reload the listing from the server
#[component]
pub fn RefreshButton() -> impl IntoView {
    let actions = use_library_actions();

    view! {
        <Button
            variant=ButtonVariant::Secondary
            title="Reload the library"
            on_click=move |_: ev::MouseEvent| actions.load_files()
        >
            "Refresh"
        </Button>
    }
}

/// Clear button with an inline confirmation step.
/// Nothing is deleted until "Delete" is pressed.
#[component]
pub fn ClearControl() -> impl IntoView {
    let state = use_library_state();
    let actions = use_library_actions();

    view! {
        <div class="clear-control">
            {move || {
                if state.clear_prompt.get() {
                    view! {
                        <div class="clear-confirm" role="alertdialog">
                            <span>"Delete all files?"</span>
                            <Button
                                variant=ButtonVariant::Danger
                                on_click=move |_: ev::MouseEvent| actions.confirm_clear()
                            >
                                "Delete"
                            </Button>
                            <Button
                                variant=ButtonVariant::Ghost
                                on_click=move |_: ev::MouseEvent| actions.cancel_clear()
                            >
                                "Cancel"
                            </Button>
                        </div>
                    }.into_any()
                } else {
                    view! {
                        <Button
                            variant=ButtonVariant::Danger
                            busy=state.clearing
                            on_click=move |_: ev::MouseEvent| actions.request_clear()
                        >
                            "Clear library"
                        </Button>
                    }.into_any()
                }
            }}
        </div>
    }
}
