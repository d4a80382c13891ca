use leptos::ev;
use leptos::prelude::*;

/// Overlay dialog.
///
/// Closes through the close button or a click on the backdrop; clicks inside
/// the content area never reach the backdrop.
#[component]
pub fn Modal(
    /// Whether the dialog is shown
    #[prop(into)]
    is_open: Signal<bool>,
    /// Called when the user dismisses the dialog
    on_close: Callback<()>,
    /// Header text
    #[prop(into)]
    title: Signal<String>,
    /// Additional CSS classes for the content box
    #[prop(into, optional)]
    class: String,
    /// Dialog body
    children: ChildrenFn,
) -> impl IntoView {
    view! {
        <Show when=move || is_open.get()>
            <div class="modal" on:click=move |_| on_close.run(())>
                <div
                    class=format!("modal-content {class}")
                    role="dialog"
                    aria-modal="true"
                    on:click=|evt: ev::MouseEvent| evt.stop_propagation()
                >
                    <div class="modal-header">
                        <h2 class="modal-title">{move || title.get()}</h2>
                        <button
                            class="modal-close"
                            aria-label="Close"
                            on:click=move |_| on_close.run(())
                        >
                            "×"
                        </button>
                    </div>
                    <div class="modal-body">
                        {children()}
                    </div>
                </div>
            </div>
        </Show>
    }
}
