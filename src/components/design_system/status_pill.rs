use leptos::prelude::*;

use crate::services::status_service::use_status_state;

/// The single transient notification slot
#[component]
pub fn StatusPill() -> impl IntoView {
    let status = use_status_state();

    view! {
        {move || status.current().map(|message| {
            let class = message.class();
            view! {
                <div
                    id="statusMessage"
                    class=class
                    role="status"
                    on:click=move |_| status.dismiss()
                >
                    {message.text}
                </div>
            }
        })}
    }
}
