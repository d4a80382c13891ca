//! Library Module
//!
//! Browser view over the document library: search and download articles,
//! extract text from downloaded files, read the results.
//!
//! # Components
//! - `LibraryView` - Root view; owns state and wires the actions
//! - `SearchPanel` - Query and paging form that triggers a server download
//! - `FileGrid` - One card per downloaded document
//! - `PreviewModal` - Article, annotation and summary of a parsed document
//! - `RefreshButton` / `ClearControl` - Toolbar actions

mod file_grid;
mod preview_modal;
mod search_panel;
mod toolbar;

pub use file_grid::FileGrid;
pub use preview_modal::PreviewModal;
pub use search_panel::SearchPanel;
pub use toolbar::{ClearControl, RefreshButton};

use std::collections::HashSet;
use std::rc::Rc;

use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::bindings::{FolderId, LibraryApi, LibraryItem};
use crate::components::design_system::{ButtonVariant, StatusPill};
use crate::config::ClientConfig;
use crate::services::library_controller::{
    LibraryController, LibraryPresenter, Listing, PreviewDoc, SearchForm,
};
use crate::services::status_service::{provide_status_state, StatusMessage, StatusPolicy, StatusState};
use crate::utils::formatting::format_card_meta;

// ============================================================================
// Types
// ============================================================================

/// What a card's button does, decided by `has_txt` alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    /// Open the already-fetched previews
    Read,
    /// Ask the server to extract text for the folder
    Extract,
}

impl CardAction {
    pub fn for_item(item: &LibraryItem) -> Self {
        if item.has_txt {
            CardAction::Read
        } else {
            CardAction::Extract
        }
    }

    pub fn label(&self, working: bool) -> &'static str {
        match (self, working) {
            (CardAction::Read, _) => "Read",
            (CardAction::Extract, false) => "Extract text",
            (CardAction::Extract, true) => "Working...",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            CardAction::Read => "📖",
            CardAction::Extract => "⚙️",
        }
    }

    pub fn variant(&self) -> ButtonVariant {
        match self {
            CardAction::Read => ButtonVariant::Primary,
            CardAction::Extract => ButtonVariant::Success,
        }
    }
}

/// Display model of one library item
#[derive(Debug, Clone, PartialEq)]
pub struct FileCard {
    pub item: LibraryItem,
    pub folder_label: String,
    pub meta: Option<String>,
    pub action: CardAction,
}

impl From<LibraryItem> for FileCard {
    fn from(item: LibraryItem) -> Self {
        Self {
            folder_label: format!("FOLDER #{}", item.folder_id),
            meta: format_card_meta(item.size_mb, item.path.as_deref()),
            action: CardAction::for_item(&item),
            item,
        }
    }
}

/// What the file grid renders for a given listing
#[derive(Debug, Clone, PartialEq)]
pub enum GridContent {
    Loading,
    Empty,
    Error(String),
    Cards(Vec<FileCard>),
}

impl From<&Listing> for GridContent {
    fn from(listing: &Listing) -> Self {
        match listing {
            Listing::Loading => GridContent::Loading,
            Listing::Failed(reason) => GridContent::Error(reason.clone()),
            Listing::Ready(items) if items.is_empty() => GridContent::Empty,
            Listing::Ready(items) => {
                GridContent::Cards(items.iter().cloned().map(FileCard::from).collect())
            }
        }
    }
}

// ============================================================================
// Library State Context
// ============================================================================

/// Shared library state that can be provided to child components
#[derive(Clone, Copy)]
pub struct LibraryState {
    pub listing: RwSignal<Listing>,
    pub search_busy: RwSignal<bool>,
    pub parsing: RwSignal<HashSet<FolderId>>,
    pub clearing: RwSignal<bool>,
    pub clear_prompt: RwSignal<bool>,
    pub preview: RwSignal<Option<PreviewDoc>>,
    pub status: StatusState,
}

impl LibraryState {
    pub fn new(status: StatusState) -> Self {
        Self {
            listing: RwSignal::new(Listing::Loading),
            search_busy: RwSignal::new(false),
            parsing: RwSignal::new(HashSet::new()),
            clearing: RwSignal::new(false),
            clear_prompt: RwSignal::new(false),
            preview: RwSignal::new(None),
            status,
        }
    }

    pub fn is_parsing(&self, folder_id: &FolderId) -> bool {
        self.parsing.with(|p| p.contains(folder_id))
    }
}

impl LibraryPresenter for LibraryState {
    fn listing(&self, listing: Listing) {
        self.listing.set(listing);
    }

    fn status(&self, message: StatusMessage) {
        self.status.show(message);
    }

    fn search_busy(&self, busy: bool) {
        self.search_busy.set(busy);
    }

    fn parse_busy(&self, folder_id: &FolderId, busy: bool) {
        self.parsing.update(|p| {
            if busy {
                p.insert(folder_id.clone());
            } else {
                p.remove(folder_id);
            }
        });
    }

    fn clear_busy(&self, busy: bool) {
        self.clearing.set(busy);
    }

    fn clear_prompt(&self, open: bool) {
        self.clear_prompt.set(open);
    }

    fn preview(&self, doc: Option<PreviewDoc>) {
        self.preview.set(doc);
    }
}

pub fn use_library_state() -> LibraryState {
    expect_context::<LibraryState>()
}

// ============================================================================
// Actions
// ============================================================================

pub type Controller = LibraryController<LibraryState>;

/// Copyable handle to the controller for event handlers.
/// Async actions run on `spawn_local`.
#[derive(Clone, Copy)]
pub struct LibraryActions(StoredValue<Rc<Controller>, LocalStorage>);

impl LibraryActions {
    pub fn new(controller: Controller) -> Self {
        Self(StoredValue::new_local(Rc::new(controller)))
    }

    fn controller(&self) -> Rc<Controller> {
        self.0.get_value()
    }

    pub fn load_files(&self) {
        let controller = self.controller();
        spawn_local(async move { controller.load_files().await });
    }

    pub fn search(&self, form: SearchForm) {
        let controller = self.controller();
        spawn_local(async move {
            controller.search(&form).await;
        });
    }

    pub fn parse(&self, folder_id: FolderId) {
        let controller = self.controller();
        spawn_local(async move {
            controller.parse(&folder_id).await;
        });
    }

    pub fn request_clear(&self) {
        self.controller().request_clear();
    }

    pub fn cancel_clear(&self) {
        self.controller().cancel_clear();
    }

    pub fn confirm_clear(&self) {
        let controller = self.controller();
        spawn_local(async move {
            controller.confirm_clear().await;
        });
    }

    pub fn open_modal(&self, item: &LibraryItem) {
        self.controller().open_modal(item);
    }

    pub fn close_modal(&self) {
        self.controller().close_modal();
    }
}

pub fn use_library_actions() -> LibraryActions {
    expect_context::<LibraryActions>()
}

/// Run `close` on Escape while `is_open` holds. The window listener is
/// removed when the current owner is cleaned up.
pub fn close_on_escape(is_open: impl Fn() -> bool + 'static, close: impl Fn() + 'static) {
    let handle = window_event_listener(ev::keydown, move |evt| {
        if evt.key() == "Escape" && is_open() {
            close();
        }
    });
    on_cleanup(move || handle.remove());
}

// ============================================================================
// Main Library Component
// ============================================================================

/// Library page: search sidebar, file grid, status pill and reading modal
#[component]
pub fn LibraryView(config: ClientConfig, api: Rc<dyn LibraryApi>) -> impl IntoView {
    let status = provide_status_state(StatusPolicy::from_config(&config));
    let state = LibraryState::new(status);
    provide_context(state);

    let actions = LibraryActions::new(LibraryController::new(api, config.clone(), state));
    provide_context(actions);
    provide_context(config);

    // Initial load on mount
    Effect::new(move |_| {
        tracing::info!("Loading library");
        actions.load_files();
    });

    close_on_escape(
        move || state.preview.with_untracked(Option::is_some),
        move || actions.close_modal(),
    );

    view! {
        <div class="library-app">
            <aside class="library-sidebar">
                <SearchPanel />
            </aside>

            <main class="library-main">
                <header class="library-toolbar">
                    <h1>"Library"</h1>
                    <div class="toolbar-actions">
                        <RefreshButton />
                        <ClearControl />
                    </div>
                </header>
                <FileGrid />
            </main>

            <StatusPill />
            <PreviewModal />
        </div>
    }
}
