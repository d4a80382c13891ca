use leptos::prelude::*;

/// A loading spinner component
#[component]
pub fn LoadingSpinner(
    /// Size: "sm", "md", or "lg"
    #[prop(default = "md")]
    size: &'static str,
) -> impl IntoView {
    view! {
        <div class=format!("spinner spinner-{}", spinner_size(size))></div>
    }
}

fn spinner_size(size: &str) -> &'static str {
    match size {
        "sm" => "sm",
        "lg" => "lg",
        _ => "md",
    }
}

/// Centered placeholder shown while a list is loading
#[component]
pub fn LoadingPlaceholder(
    #[prop(into)]
    message: String,
) -> impl IntoView {
    view! {
        <div class="empty-placeholder">
            <LoadingSpinner size="lg" />
            <p>{message}</p>
        </div>
    }
}
