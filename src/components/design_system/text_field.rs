use leptos::ev;
use leptos::prelude::*;

/// Labelled input bound to a string signal; Enter fires `on_submit`
#[component]
pub fn TextField(
    label: &'static str,
    /// Element id, also the label's target
    id: &'static str,
    value: RwSignal<String>,
    /// Render as `type="number"`
    #[prop(optional)]
    numeric: bool,
    #[prop(into, optional)]
    placeholder: Option<String>,
    #[prop(into, optional)]
    on_submit: Option<Callback<()>>,
) -> impl IntoView {
    let on_keydown = move |evt: ev::KeyboardEvent| {
        if evt.key() == "Enter" {
            if let Some(submit) = on_submit {
                submit.run(());
            }
        }
    };

    view! {
        <div class="field">
            <label for=id>{label}</label>
            <input
                id=id
                class="input"
                type=if numeric { "number" } else { "text" }
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |evt: ev::Event| value.set(event_target_value(&evt))
                on:keydown=on_keydown
            />
        </div>
    }
}
