use leptos::prelude::*;

use super::{use_library_actions, use_library_state};
use crate::components::design_system::Modal;
use crate::services::library_controller::PreviewDoc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pane {
    Article,
    Annotation,
    Summary,
}

impl Pane {
    fn text(self, doc: &PreviewDoc) -> &str {
        match self {
            Pane::Article => &doc.previews.article,
            Pane::Annotation => &doc.previews.annotation,
            Pane::Summary => &doc.previews.summary,
        }
    }
}

/// Reading dialog for a parsed document
#[component]
pub fn PreviewModal() -> impl IntoView {
    let state = use_library_state();
    let actions = use_library_actions();

    let is_open = Signal::derive(move || state.preview.with(Option::is_some));
    let title = Signal::derive(move || {
        state
            .preview
            .with(|doc| doc.as_ref().map(|d| d.title.clone()).unwrap_or_default())
    });
    let text = move |pane: Pane| {
        state
            .preview
            .with(|doc| doc.as_ref().map(|d| pane.text(d).to_string()).unwrap_or_default())
    };

    view! {
        <Modal
            is_open=is_open
            title=title
            class="analysis-modal"
            on_close=Callback::new(move |_| actions.close_modal())
        >
            <section class="modal-pane">
                <h3>"Article"</h3>
                <div id="textArticle" class="pane-text">{move || text(Pane::Article)}</div>
            </section>
            <section class="modal-pane">
                <h3>"Annotation"</h3>
                <div id="textAnnotation" class="pane-text">{move || text(Pane::Annotation)}</div>
            </section>
            <section class="modal-pane">
                <h3>"Summary"</h3>
                <div id="textSummary" class="pane-text">{move || text(Pane::Summary)}</div>
            </section>
        </Modal>
    }
}
