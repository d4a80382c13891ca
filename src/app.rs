use std::rc::Rc;

use leptos::prelude::*;

use crate::bindings::{HttpLibraryApi, LibraryApi};
use crate::components::library::LibraryView;
use crate::config::ClientConfig;

#[component]
pub fn App(config: ClientConfig) -> impl IntoView {
    let api: Rc<dyn LibraryApi> = Rc::new(HttpLibraryApi::new(config.clone()));

    view! {
        <LibraryView config=config api=api />
    }
}
