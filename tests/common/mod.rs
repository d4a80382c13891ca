//! Test doubles for the library flows
//!
//! A scripted `LibraryApi` (also standing in as the `Timer`) that records
//! every call and wait in order, and a presenter that records every visible
//! state change.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use futures::channel::oneshot;

use doc_library_client::bindings::{
    ClearResponse, FolderId, LibraryApi, LibraryItem, Previews, SearchRequest, SearchResponse,
};
use doc_library_client::error::{ClientError, Result};
use doc_library_client::services::library_controller::{LibraryPresenter, Listing, PreviewDoc};
use doc_library_client::services::status_service::{Severity, StatusMessage};
use doc_library_client::services::timer::Timer;

// ============================================================================
// Fake API
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    List,
    Search(SearchRequest),
    Parse(FolderId),
    Clear,
    /// A timer wait before a follow-up
    Slept(Duration),
}

/// Listing reply: immediate, or held until the test releases it
pub enum ListReply {
    Ready(Result<Vec<LibraryItem>>),
    Gated(oneshot::Receiver<Result<Vec<LibraryItem>>>),
}

pub struct FakeLibraryApi {
    calls: RefCell<Vec<ApiCall>>,
    listings: RefCell<VecDeque<ListReply>>,
    search: RefCell<Result<SearchResponse>>,
    parse: RefCell<Result<()>>,
    clear: RefCell<Result<ClearResponse>>,
}

impl Default for FakeLibraryApi {
    fn default() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            listings: RefCell::new(VecDeque::new()),
            search: RefCell::new(Ok(SearchResponse::default())),
            parse: RefCell::new(Ok(())),
            clear: RefCell::new(Ok(ClearResponse::default())),
        }
    }
}

impl FakeLibraryApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listing(self, items: Vec<LibraryItem>) -> Self {
        self.listings.borrow_mut().push_back(ListReply::Ready(Ok(items)));
        self
    }

    pub fn with_listing_error(self, error: ClientError) -> Self {
        self.listings.borrow_mut().push_back(ListReply::Ready(Err(error)));
        self
    }

    /// Queue a listing reply that resolves when the returned sender fires
    pub fn gate_listing(&self) -> oneshot::Sender<Result<Vec<LibraryItem>>> {
        let (tx, rx) = oneshot::channel();
        self.listings.borrow_mut().push_back(ListReply::Gated(rx));
        tx
    }

    pub fn with_search(self, result: Result<SearchResponse>) -> Self {
        *self.search.borrow_mut() = result;
        self
    }

    pub fn with_parse(self, result: Result<()>) -> Self {
        *self.parse.borrow_mut() = result;
        self
    }

    pub fn with_clear(self, result: Result<ClearResponse>) -> Self {
        *self.clear.borrow_mut() = result;
        self
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.borrow().clone()
    }
}

#[async_trait(?Send)]
impl LibraryApi for FakeLibraryApi {
    async fn list_items(&self) -> Result<Vec<LibraryItem>> {
        self.calls.borrow_mut().push(ApiCall::List);
        let reply = self.listings.borrow_mut().pop_front();
        match reply {
            None => Ok(Vec::new()),
            Some(ListReply::Ready(result)) => result,
            Some(ListReply::Gated(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(ClientError::Transport("gate dropped".to_string()))),
        }
    }

    async fn search_articles(&self, request: &SearchRequest) -> Result<SearchResponse> {
        self.calls.borrow_mut().push(ApiCall::Search(request.clone()));
        self.search.borrow().clone()
    }

    async fn parse_local(&self, folder_id: &FolderId) -> Result<()> {
        self.calls.borrow_mut().push(ApiCall::Parse(folder_id.clone()));
        self.parse.borrow().clone()
    }

    async fn clear_files(&self) -> Result<ClearResponse> {
        self.calls.borrow_mut().push(ApiCall::Clear);
        self.clear.borrow().clone()
    }
}

/// Waits resolve immediately; the requested delay is logged with the calls.
#[async_trait(?Send)]
impl Timer for FakeLibraryApi {
    async fn sleep(&self, after: Duration) {
        self.calls.borrow_mut().push(ApiCall::Slept(after));
    }
}

// ============================================================================
// Recording Presenter
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Listing(Listing),
    Status(StatusMessage),
    SearchBusy(bool),
    ParseBusy(FolderId, bool),
    ClearBusy(bool),
    ClearPrompt(bool),
    Preview(Option<PreviewDoc>),
}

#[derive(Default)]
pub struct RecordingPresenter {
    events: RefCell<Vec<ViewEvent>>,
}

impl RecordingPresenter {
    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.borrow().clone()
    }

    pub fn statuses(&self) -> Vec<StatusMessage> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                ViewEvent::Status(m) => Some(m.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn last_status(&self) -> Option<StatusMessage> {
        self.statuses().pop()
    }

    pub fn last_listing(&self) -> Option<Listing> {
        self.events.borrow().iter().rev().find_map(|e| match e {
            ViewEvent::Listing(l) => Some(l.clone()),
            _ => None,
        })
    }

    pub fn listings(&self) -> Vec<Listing> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                ViewEvent::Listing(l) => Some(l.clone()),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: ViewEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl LibraryPresenter for RecordingPresenter {
    fn listing(&self, listing: Listing) {
        self.push(ViewEvent::Listing(listing));
    }

    fn status(&self, message: StatusMessage) {
        self.push(ViewEvent::Status(message));
    }

    fn search_busy(&self, busy: bool) {
        self.push(ViewEvent::SearchBusy(busy));
    }

    fn parse_busy(&self, folder_id: &FolderId, busy: bool) {
        self.push(ViewEvent::ParseBusy(folder_id.clone(), busy));
    }

    fn clear_busy(&self, busy: bool) {
        self.push(ViewEvent::ClearBusy(busy));
    }

    fn clear_prompt(&self, open: bool) {
        self.push(ViewEvent::ClearPrompt(open));
    }

    fn preview(&self, doc: Option<PreviewDoc>) {
        self.push(ViewEvent::Preview(doc));
    }
}

// ============================================================================
// Fixtures
// ============================================================================

pub fn item(folder: &str, name: &str, has_txt: bool) -> LibraryItem {
    LibraryItem {
        folder_id: FolderId::from(folder),
        name: name.to_string(),
        has_txt,
        previews: if has_txt {
            Previews {
                article: format!("{name} article"),
                annotation: format!("{name} annotation"),
                summary: format!("{name} summary"),
            }
        } else {
            Previews::default()
        },
        size_mb: None,
        path: None,
    }
}

pub fn is_error(message: &StatusMessage) -> bool {
    message.severity == Severity::Error
}
