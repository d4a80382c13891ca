//! Library actions
//!
//! The four user actions (search, parse one folder, clear, refresh) and the
//! listing reload they all end with. Reloads wait on an injectable [`Timer`]. Rendering is delegated to a
//! [`LibraryPresenter`], so the flows run the same against reactive signals in
//! the browser and against a recorder in tests.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use crate::bindings::{FolderId, LibraryApi, LibraryItem, Previews, SearchRequest};
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::services::status_service::StatusMessage;
use crate::services::timer::{BrowserTimer, Timer};

// ============================================================================
// View Model
// ============================================================================

/// What the item list currently shows
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Listing {
    #[default]
    Loading,
    Ready(Vec<LibraryItem>),
    Failed(String),
}

/// Content of the reading modal
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewDoc {
    pub title: String,
    pub previews: Previews,
}

impl From<&LibraryItem> for PreviewDoc {
    fn from(item: &LibraryItem) -> Self {
        Self {
            title: item.name.clone(),
            previews: item.previews.clone(),
        }
    }
}

/// Raw values of the search form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchForm {
    pub query: String,
    pub start_from: String,
    pub items_per_page: String,
}

impl SearchForm {
    /// Validate and normalize the form. Unparsable or zero numbers fall back
    /// to the configured defaults.
    pub fn to_request(&self, config: &ClientConfig) -> Result<SearchRequest> {
        let query = self.query.trim();
        if query.is_empty() {
            return Err(ClientError::EmptyQuery);
        }
        Ok(SearchRequest {
            search_query: query.to_string(),
            start_from: leading_int(&self.start_from)
                .filter(|n| *n != 0)
                .unwrap_or(config.default_start_from),
            items_per_page: leading_int(&self.items_per_page)
                .filter(|n| *n != 0)
                .unwrap_or(config.default_items_per_page),
        })
    }
}

/// Integer prefix of `s` ("12abc" -> 12, "3.7" -> 3, "abc" -> None).
fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// A listing reload requested by a finished action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Refresh {
    pub after: Duration,
}

impl Refresh {
    pub fn after(after: Duration) -> Self {
        Self { after }
    }

    pub fn now() -> Self {
        Self::after(Duration::ZERO)
    }
}

// ============================================================================
// Presenter
// ============================================================================

/// Receives every visible state change the actions make.
pub trait LibraryPresenter {
    fn listing(&self, listing: Listing);
    fn status(&self, message: StatusMessage);
    fn search_busy(&self, busy: bool);
    fn parse_busy(&self, folder_id: &FolderId, busy: bool);
    fn clear_busy(&self, busy: bool);
    fn clear_prompt(&self, open: bool);
    fn preview(&self, doc: Option<PreviewDoc>);
}

/// Marks a control busy for as long as it is alive.
struct InFlight<F: Fn(bool)> {
    set: F,
}

impl<F: Fn(bool)> InFlight<F> {
    fn begin(set: F) -> Self {
        set(true);
        Self { set }
    }
}

impl<F: Fn(bool)> Drop for InFlight<F> {
    fn drop(&mut self) {
        (self.set)(false);
    }
}

/// Monotonic token for listing requests; only the latest may render.
#[derive(Debug, Default)]
pub struct LoadSequencer {
    latest: Cell<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

impl LoadSequencer {
    pub fn begin(&self) -> LoadTicket {
        let next = self.latest.get() + 1;
        self.latest.set(next);
        LoadTicket(next)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.latest.get() == ticket.0
    }
}

// ============================================================================
// Controller
// ============================================================================

pub struct LibraryController<P> {
    api: Rc<dyn LibraryApi>,
    timer: Rc<dyn Timer>,
    config: ClientConfig,
    presenter: P,
    loads: LoadSequencer,
    clear_armed: Cell<bool>,
}

impl<P: LibraryPresenter> LibraryController<P> {
    pub fn new(api: Rc<dyn LibraryApi>, config: ClientConfig, presenter: P) -> Self {
        Self {
            api,
            timer: Rc::new(BrowserTimer),
            config,
            presenter,
            loads: LoadSequencer::default(),
            clear_armed: Cell::new(false),
        }
    }

    /// Replace the timer used before follow-up reloads.
    pub fn with_timer(mut self, timer: Rc<dyn Timer>) -> Self {
        self.timer = timer;
        self
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Fetch the listing and render it. Responses overtaken by a newer call are dropped.
    pub async fn load_files(&self) {
        let ticket = self.loads.begin();
        self.presenter.listing(Listing::Loading);

        let result = self.api.list_items().await;
        if !self.loads.is_current(ticket) {
            tracing::debug!(?ticket, "Dropping superseded listing response");
            return;
        }

        match result {
            Ok(items) => {
                tracing::debug!(count = items.len(), "Library loaded");
                self.presenter.listing(Listing::Ready(items));
            }
            Err(e) => {
                tracing::warn!("Failed to load library: {}", e);
                self.presenter.listing(Listing::Failed(e.to_string()));
            }
        }
    }

    /// Post the search form, then reload the listing on success.
    /// Returns the reload that ran.
    pub async fn search(&self, form: &SearchForm) -> Option<Refresh> {
        let refresh = self.post_search(form).await;
        self.follow_up(refresh).await
    }

    async fn post_search(&self, form: &SearchForm) -> Option<Refresh> {
        let request = match form.to_request(&self.config) {
            Ok(request) => request,
            Err(e) => {
                self.presenter.status(StatusMessage::error(e.to_string()));
                return None;
            }
        };

        let _busy = InFlight::begin(|busy| self.presenter.search_busy(busy));
        tracing::info!(query = %request.search_query, "Searching articles");

        match self.api.search_articles(&request).await {
            Ok(response) => {
                let text = response
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| "Articles downloaded".to_string());
                self.presenter.status(StatusMessage::success(text));
                Some(Refresh::after(self.config.search_refresh_delay()))
            }
            Err(e) => {
                tracing::error!("Search failed: {}", e);
                self.presenter
                    .status(StatusMessage::error(format!("Search failed: {}", e)));
                None
            }
        }
    }

    /// Extract text for one folder, then reload the listing on success.
    /// The card's button is restored on failure.
    pub async fn parse(&self, folder_id: &FolderId) -> Option<Refresh> {
        let refresh = self.post_parse(folder_id).await;
        self.follow_up(refresh).await
    }

    async fn post_parse(&self, folder_id: &FolderId) -> Option<Refresh> {
        let _busy = InFlight::begin(|busy| self.presenter.parse_busy(folder_id, busy));
        tracing::info!(%folder_id, "Parsing folder");

        match self.api.parse_local(folder_id).await {
            Ok(()) => {
                self.presenter
                    .status(StatusMessage::success(format!("Folder {} processed", folder_id)));
                Some(Refresh::now())
            }
            Err(e) => {
                tracing::error!(%folder_id, "Parsing failed: {}", e);
                self.presenter
                    .status(StatusMessage::error(format!("Parsing failed: {}", e)));
                None
            }
        }
    }

    /// First step of clearing: ask for confirmation.
    pub fn request_clear(&self) {
        self.clear_armed.set(true);
        self.presenter.clear_prompt(true);
    }

    pub fn cancel_clear(&self) {
        self.clear_armed.set(false);
        self.presenter.clear_prompt(false);
    }

    /// Delete everything on the server. Does nothing unless [`request_clear`]
    /// was called and not cancelled.
    ///
    /// [`request_clear`]: Self::request_clear
    pub async fn confirm_clear(&self) -> Option<Refresh> {
        let refresh = self.delete_all().await;
        self.follow_up(refresh).await
    }

    async fn delete_all(&self) -> Option<Refresh> {
        if !self.clear_armed.replace(false) {
            tracing::debug!("Clear confirmed without a pending prompt, ignoring");
            return None;
        }
        self.presenter.clear_prompt(false);

        let _busy = InFlight::begin(|busy| self.presenter.clear_busy(busy));
        tracing::info!("Clearing library");

        match self.api.clear_files().await {
            Ok(response) => {
                let text = match response.cleared {
                    Some(count) => format!("Cleared {} files", count),
                    None => "Library cleared".to_string(),
                };
                self.presenter.status(StatusMessage::success(text));
                Some(Refresh::after(self.config.clear_refresh_delay()))
            }
            Err(e) => {
                tracing::error!("Clear failed: {}", e);
                self.presenter
                    .status(StatusMessage::error(format!("Clear failed: {}", e)));
                None
            }
        }
    }

    /// Wait out the action's delay, then reload. Busy flags are already
    /// cleared by the time this runs.
    async fn follow_up(&self, refresh: Option<Refresh>) -> Option<Refresh> {
        let refresh = refresh?;
        if !refresh.after.is_zero() {
            self.timer.sleep(refresh.after).await;
        }
        self.load_files().await;
        Some(refresh)
    }

    /// Show an already-parsed item. No request is made.
    pub fn open_modal(&self, item: &LibraryItem) {
        self.presenter.preview(Some(PreviewDoc::from(item)));
    }

    pub fn close_modal(&self) {
        self.presenter.preview(None);
    }
}
