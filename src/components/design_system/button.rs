use leptos::ev;
use leptos::prelude::*;

use super::loading::LoadingSpinner;

/// Visual weight of a button
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Success,
    Danger,
    Ghost,
}

impl ButtonVariant {
    /// Modifier class applied next to `btn`
    pub(crate) fn modifier(self) -> &'static str {
        match self {
            ButtonVariant::Primary => "primary",
            ButtonVariant::Secondary => "secondary",
            ButtonVariant::Success => "success",
            ButtonVariant::Danger => "danger",
            ButtonVariant::Ghost => "ghost",
        }
    }
}

/// Button that goes inert while its action is in flight.
///
/// `busy` disables the button and shows a spinner before the label; clicks
/// arriving while busy are dropped.
#[component]
pub fn Button<F>(
    #[prop(optional)]
    variant: ButtonVariant,
    on_click: F,
    #[prop(into, default = false.into())]
    busy: Signal<bool>,
    #[prop(optional)]
    id: Option<&'static str>,
    #[prop(into, optional)]
    class: String,
    #[prop(into, optional)]
    title: Option<String>,
    children: Children,
) -> impl IntoView
where
    F: Fn(ev::MouseEvent) + 'static,
{
    let class = format!("btn {} {class}", variant.modifier());

    view! {
        <button
            id=id
            class=class
            class:is-busy=move || busy.get()
            title=title
            disabled=move || busy.get()
            on:click=move |evt: ev::MouseEvent| {
                if !busy.get_untracked() {
                    on_click(evt);
                }
            }
        >
            <Show when=move || busy.get()>
                <span class="btn-loader"><LoadingSpinner size="sm" /></span>
            </Show>
            {children()}
        </button>
    }
}
