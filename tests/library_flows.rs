//! End-to-end flows of the library actions against a scripted server.

mod common;

use std::rc::Rc;
use std::task::Poll;
use std::time::Duration;

use futures::executor::block_on;
use rstest::{fixture, rstest};

use common::{item, is_error, ApiCall, FakeLibraryApi, RecordingPresenter, ViewEvent};
use doc_library_client::bindings::{ClearResponse, FolderId, SearchRequest, SearchResponse};
use doc_library_client::components::library::GridContent;
use doc_library_client::config::{ClientConfig, Preset};
use doc_library_client::error::ClientError;
use doc_library_client::services::library_controller::{
    LibraryController, Listing, PreviewDoc, Refresh, SearchForm,
};
use doc_library_client::services::status_service::Severity;

type Controller = LibraryController<RecordingPresenter>;

fn controller_for(api: &Rc<FakeLibraryApi>, config: ClientConfig) -> Controller {
    LibraryController::new(api.clone(), config, RecordingPresenter::default())
        .with_timer(api.clone())
}

fn form(query: &str, start: &str, per_page: &str) -> SearchForm {
    SearchForm {
        query: query.to_string(),
        start_from: start.to_string(),
        items_per_page: per_page.to_string(),
    }
}

async fn yield_now() {
    let mut yielded = false;
    futures::future::poll_fn(|cx| {
        if yielded {
            Poll::Ready(())
        } else {
            yielded = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    })
    .await
}

#[fixture]
fn library_config() -> ClientConfig {
    ClientConfig::preset(Preset::Library)
}

// ============================================================================
// Listing
// ============================================================================

#[rstest]
fn test_load_renders_items(library_config: ClientConfig) {
    let api = Rc::new(FakeLibraryApi::new().with_listing(vec![item("7", "a.pdf", false)]));
    let controller = controller_for(&api, library_config);

    block_on(controller.load_files());

    assert_eq!(api.calls(), vec![ApiCall::List]);
    let listings = controller.presenter().listings();
    assert_eq!(listings.first(), Some(&Listing::Loading));

    let listing = controller.presenter().last_listing().unwrap();
    match GridContent::from(&listing) {
        GridContent::Cards(cards) => {
            assert_eq!(cards.len(), 1);
            assert_eq!(cards[0].folder_label, "FOLDER #7");
            assert_eq!(cards[0].item.name, "a.pdf");
        }
        other => panic!("expected one card, got {:?}", other),
    }
}

#[rstest]
fn test_empty_library_shows_placeholder(library_config: ClientConfig) {
    let api = Rc::new(FakeLibraryApi::new().with_listing(vec![]));
    let controller = controller_for(&api, library_config);

    block_on(controller.load_files());

    let listing = controller.presenter().last_listing().unwrap();
    assert_eq!(GridContent::from(&listing), GridContent::Empty);
}

#[rstest]
fn test_load_failure_is_shown_inline(library_config: ClientConfig) {
    let api = Rc::new(FakeLibraryApi::new().with_listing_error(ClientError::Status {
        status: 500,
        detail: "database locked".to_string(),
    }));
    let controller = controller_for(&api, library_config);

    block_on(controller.load_files());

    match controller.presenter().last_listing() {
        Some(Listing::Failed(reason)) => assert!(reason.contains("database locked")),
        other => panic!("expected failure, got {:?}", other),
    }
    assert!(controller.presenter().statuses().is_empty());
}

#[rstest]
fn test_superseded_listing_is_dropped(library_config: ClientConfig) {
    let api = Rc::new(FakeLibraryApi::new());
    let first = api.gate_listing();
    let second = api.gate_listing();
    let controller = controller_for(&api, library_config);

    block_on(async {
        futures::join!(controller.load_files(), controller.load_files(), async {
            // Newer response arrives first, the older one after it
            let _ = second.send(Ok(vec![item("2", "new.pdf", true)]));
            yield_now().await;
            let _ = first.send(Ok(vec![item("1", "old.pdf", true)]));
        });
    });

    assert_eq!(
        controller.presenter().listings(),
        vec![
            Listing::Loading,
            Listing::Loading,
            Listing::Ready(vec![item("2", "new.pdf", true)]),
        ]
    );
}

// ============================================================================
// Search
// ============================================================================

#[rstest]
#[case::defaults("", "", 0, 5)]
#[case::explicit("10", "20", 10, 20)]
#[case::zero_per_page("3", "0", 3, 5)]
#[case::trailing_garbage("4abc", "7.5", 4, 7)]
fn test_search_request_numbers(
    library_config: ClientConfig,
    #[case] start: &str,
    #[case] per_page: &str,
    #[case] expected_start: i64,
    #[case] expected_per_page: i64,
) {
    let api = Rc::new(FakeLibraryApi::new());
    let controller = controller_for(&api, library_config);

    block_on(controller.search(&form("rust", start, per_page)));

    assert_eq!(
        api.calls().first(),
        Some(&ApiCall::Search(SearchRequest {
            search_query: "rust".to_string(),
            start_from: expected_start,
            items_per_page: expected_per_page,
        }))
    );
}

#[rstest]
#[case("")]
#[case("   ")]
fn test_blank_query_makes_no_request(library_config: ClientConfig, #[case] query: &str) {
    let api = Rc::new(FakeLibraryApi::new());
    let controller = controller_for(&api, library_config);

    let refresh = block_on(controller.search(&form(query, "", "")));

    assert_eq!(refresh, None);
    assert!(api.calls().is_empty());
    let events = controller.presenter().events();
    assert!(!events.iter().any(|e| matches!(e, ViewEvent::SearchBusy(_))));
    assert!(is_error(&controller.presenter().last_status().unwrap()));
}

#[rstest]
fn test_search_success_reports_and_refreshes(library_config: ClientConfig) {
    let api = Rc::new(FakeLibraryApi::new().with_search(Ok(SearchResponse {
        message: Some("Downloaded 5 articles".to_string()),
        results: vec![],
    })));
    let controller = controller_for(&api, library_config);

    let refresh = block_on(controller.search(&form("rust", "", "")));

    assert_eq!(refresh, Some(Refresh::now()));
    // Immediate reload, no wait
    assert!(matches!(&api.calls()[..], [ApiCall::Search(_), ApiCall::List]));
    let status = controller.presenter().last_status().unwrap();
    assert_eq!(status.severity, Severity::Success);
    assert_eq!(status.text, "Downloaded 5 articles");

    let busy: Vec<_> = controller
        .presenter()
        .events()
        .into_iter()
        .filter(|e| matches!(e, ViewEvent::SearchBusy(_)))
        .collect();
    assert_eq!(busy, vec![ViewEvent::SearchBusy(true), ViewEvent::SearchBusy(false)]);
}

#[test]
fn test_search_refresh_delay_follows_preset() {
    let api = Rc::new(FakeLibraryApi::new());
    let controller = controller_for(&api, ClientConfig::preset(Preset::Files));

    let refresh = block_on(controller.search(&form("rust", "", "")));

    assert_eq!(refresh, Some(Refresh::after(Duration::from_millis(500))));
    match &api.calls()[..] {
        [ApiCall::Search(request), ApiCall::Slept(wait), ApiCall::List] => {
            assert_eq!(request.items_per_page, 12);
            assert_eq!(*wait, Duration::from_millis(500));
        }
        other => panic!("unexpected calls {:?}", other),
    }
}

#[rstest]
fn test_search_failure_restores_button(library_config: ClientConfig) {
    let api = Rc::new(
        FakeLibraryApi::new().with_search(Err(ClientError::Transport("offline".to_string()))),
    );
    let controller = controller_for(&api, library_config);

    let refresh = block_on(controller.search(&form("rust", "", "")));

    assert_eq!(refresh, None);
    assert_eq!(api.calls().len(), 1, "failed search must not reload");
    let status = controller.presenter().last_status().unwrap();
    assert!(is_error(&status));
    assert!(status.text.starts_with("Search failed"));
    assert_eq!(
        controller.presenter().events().last(),
        Some(&ViewEvent::SearchBusy(false))
    );
}

// ============================================================================
// Cards
// ============================================================================

#[rstest]
fn test_read_opens_modal_without_request(library_config: ClientConfig) {
    let api = Rc::new(FakeLibraryApi::new());
    let controller = controller_for(&api, library_config);
    let parsed = item("3", "paper.pdf", true);

    controller.open_modal(&parsed);

    assert!(api.calls().is_empty());
    assert_eq!(
        controller.presenter().events(),
        vec![ViewEvent::Preview(Some(PreviewDoc {
            title: "paper.pdf".to_string(),
            previews: parsed.previews.clone(),
        }))]
    );

    controller.close_modal();
    assert_eq!(controller.presenter().events().last(), Some(&ViewEvent::Preview(None)));
}

#[rstest]
fn test_extract_posts_once_and_reloads(library_config: ClientConfig) {
    let api = Rc::new(FakeLibraryApi::new().with_listing(vec![item("7", "a.pdf", true)]));
    let controller = controller_for(&api, library_config);
    let folder = FolderId::from("7");

    let refresh = block_on(controller.parse(&folder));
    assert_eq!(refresh, Some(Refresh::now()));
    assert_eq!(api.calls(), vec![ApiCall::Parse(folder.clone()), ApiCall::List]);

    let status = controller.presenter().last_status().unwrap();
    assert_eq!(status.severity, Severity::Success);
    assert!(status.text.contains('7'));

    // The button is released before the reload, and the card now offers Read
    let events = controller.presenter().events();
    let released = events
        .iter()
        .position(|e| *e == ViewEvent::ParseBusy(folder.clone(), false))
        .unwrap();
    let reloaded = events
        .iter()
        .rposition(|e| *e == ViewEvent::Listing(Listing::Loading))
        .unwrap();
    assert!(released < reloaded);
    assert_eq!(
        controller.presenter().last_listing(),
        Some(Listing::Ready(vec![item("7", "a.pdf", true)]))
    );
}

#[rstest]
fn test_extract_failure_restores_button(library_config: ClientConfig) {
    let api = Rc::new(FakeLibraryApi::new().with_parse(Err(ClientError::Status {
        status: 404,
        detail: "Folder not found".to_string(),
    })));
    let controller = controller_for(&api, library_config);
    let folder = FolderId::from("9");

    let refresh = block_on(controller.parse(&folder));

    assert_eq!(refresh, None);
    assert_eq!(api.calls(), vec![ApiCall::Parse(folder.clone())]);
    let events = controller.presenter().events();
    assert_eq!(events.first(), Some(&ViewEvent::ParseBusy(folder.clone(), true)));
    assert_eq!(events.last(), Some(&ViewEvent::ParseBusy(folder, false)));

    let status = controller.presenter().last_status().unwrap();
    assert!(is_error(&status));
    assert!(status.text.contains("Folder not found"));
}

// ============================================================================
// Clear
// ============================================================================

#[rstest]
fn test_cancelled_clear_sends_nothing(library_config: ClientConfig) {
    let api = Rc::new(FakeLibraryApi::new());
    let controller = controller_for(&api, library_config);

    controller.request_clear();
    controller.cancel_clear();
    let refresh = block_on(controller.confirm_clear());

    assert_eq!(refresh, None);
    assert!(api.calls().is_empty());
    assert_eq!(
        controller.presenter().events(),
        vec![ViewEvent::ClearPrompt(true), ViewEvent::ClearPrompt(false)]
    );
}

#[rstest]
fn test_confirm_without_prompt_is_ignored(library_config: ClientConfig) {
    let api = Rc::new(FakeLibraryApi::new());
    let controller = controller_for(&api, library_config);

    assert_eq!(block_on(controller.confirm_clear()), None);
    assert!(api.calls().is_empty());
}

#[rstest]
fn test_confirmed_clear_reports_count(library_config: ClientConfig) {
    let api = Rc::new(FakeLibraryApi::new().with_clear(Ok(ClearResponse { cleared: Some(3) })));
    let controller = controller_for(&api, library_config);

    controller.request_clear();
    let refresh = block_on(controller.confirm_clear());

    assert_eq!(
        api.calls(),
        vec![
            ApiCall::Clear,
            ApiCall::Slept(Duration::from_millis(1000)),
            ApiCall::List,
        ]
    );
    assert_eq!(refresh, Some(Refresh::after(Duration::from_millis(1000))));
    let status = controller.presenter().last_status().unwrap();
    assert_eq!(status.severity, Severity::Success);
    assert!(status.text.contains('3'));

    // A second confirm needs a new prompt
    assert_eq!(block_on(controller.confirm_clear()), None);
    assert_eq!(api.calls().len(), 3);
}

#[rstest]
fn test_clear_failure_is_reported(library_config: ClientConfig) {
    let api = Rc::new(
        FakeLibraryApi::new().with_clear(Err(ClientError::Transport("offline".to_string()))),
    );
    let controller = controller_for(&api, library_config);

    controller.request_clear();
    let refresh = block_on(controller.confirm_clear());

    assert_eq!(refresh, None);
    assert_eq!(api.calls(), vec![ApiCall::Clear]);
    assert!(is_error(&controller.presenter().last_status().unwrap()));
    assert_eq!(
        controller.presenter().events().last(),
        Some(&ViewEvent::ClearBusy(false))
    );
}
