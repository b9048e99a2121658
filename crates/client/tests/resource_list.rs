mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{MockBackend, MockResponse};
use serde_json::{json, Value};
use sheconnects_client::{FormController, RemoteCollection, ResourceList, SyncError};
use sheconnects_core::filter::CategoryFilter;
use sheconnects_core::lifecycle::{OperationKey, RequestState};
use sheconnects_core::media::MAX_IMAGE_BYTES;
use sheconnects_core::resource::{Draft, Events, PostDraft, Posts, ResourceItem};
use sheconnects_core::session::Session;
use sheconnects_core::{ItemId, ValidationError};

fn events_json(first_seats: u32) -> Value {
    json!([
        { "_id": "1", "title": "Yoga", "description": "Morning flow", "category": "workshop", "availableSeats": first_seats },
        { "_id": "2", "title": "Finance", "description": "Budgeting", "category": "seminar", "availableSeats": 0 }
    ])
}

fn posts_json() -> Value {
    json!([
        { "_id": "1", "title": "One", "content": "first" },
        { "_id": "2", "title": "Two", "content": "second" },
        { "_id": "3", "title": "Three", "content": "third" }
    ])
}

fn ids<T: ResourceItem>(items: &[T]) -> Vec<String> {
    items.iter().map(|item| item.id().to_string()).collect()
}

fn post_draft(title: &str) -> PostDraft {
    let mut draft = PostDraft::default();
    draft.set_field("title", title.to_string()).unwrap();
    draft.set_field("content", "Body".to_string()).unwrap();
    draft
}

async fn loaded_posts(backend: &MockBackend, session: Session) -> ResourceList<Posts> {
    backend.enqueue(MockResponse::value(posts_json())).await;
    let list = ResourceList::new(RemoteCollection::<Posts>::new(backend.client()), session);
    list.load().await.unwrap();
    list
}

async fn loaded_events(backend: &MockBackend) -> ResourceList<Events> {
    backend.enqueue(MockResponse::value(events_json(5))).await;
    let list = ResourceList::new(
        RemoteCollection::<Events>::new(backend.client()),
        Session::anonymous(),
    );
    list.load().await.unwrap();
    list
}

#[tokio::test]
async fn test_load_then_search() {
    let backend = MockBackend::start().await;
    let list = loaded_events(&backend).await;

    assert_eq!(list.items().len(), 2);
    assert_eq!(list.request_state(&OperationKey::List), RequestState::Success);

    list.set_search_term("fin");
    assert_eq!(ids(&list.visible()), vec!["2"]);
    assert_eq!(list.items().len(), 2);

    list.set_search_term("");
    list.set_category(CategoryFilter::only("workshop")).unwrap();
    assert_eq!(ids(&list.visible()), vec!["1"]);
}

#[tokio::test]
async fn test_set_category_rejects_unknown_value() {
    let backend = MockBackend::start().await;
    let list = loaded_events(&backend).await;

    let result = list.set_category(CategoryFilter::only("full-time"));

    assert!(matches!(
        result,
        Err(SyncError::Validation(ValidationError::UnsupportedCategory { .. }))
    ));
    assert_eq!(list.predicate().category, CategoryFilter::All);
}

#[tokio::test]
async fn test_failed_reload_keeps_cache() {
    let backend = MockBackend::start().await;
    let list = loaded_events(&backend).await;
    backend
        .enqueue(MockResponse::status(500, r#"{"message":"database down"}"#))
        .await;

    let result = list.load().await;

    assert!(matches!(result, Err(SyncError::ServerError { status: 500, .. })));
    assert_eq!(list.items().len(), 2);
    assert_eq!(
        list.request_state(&OperationKey::List),
        RequestState::Error("Server returned 500: database down".to_string())
    );
    assert!(list.dismiss(&OperationKey::List));
    assert_eq!(list.request_state(&OperationKey::List), RequestState::Idle);
}

#[tokio::test]
async fn test_create_shows_placeholder_then_commits() {
    let backend = MockBackend::start().await;
    let list = loaded_posts(&backend, Session::with_token("abc")).await;
    backend
        .enqueue(
            MockResponse::value(json!({ "_id": "p9", "title": "Fresh", "content": "Body" }))
                .with_delay(150),
        )
        .await;

    let draft = post_draft("Fresh");
    let (created, during) = tokio::join!(list.create(&draft), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        (list.items(), list.request_state(&OperationKey::Create))
    });

    let (snapshot, state) = during;
    assert_eq!(state, RequestState::Loading);
    assert_eq!(snapshot.len(), 4);
    assert!(snapshot[0].id.is_provisional());
    assert_eq!(snapshot[0].title, "Fresh");

    let created = created.unwrap();
    assert_eq!(created.id, ItemId::new("p9"));
    assert_eq!(ids(&list.items()), vec!["p9", "1", "2", "3"]);
    assert_eq!(list.request_state(&OperationKey::Create), RequestState::Success);
}

#[tokio::test]
async fn test_create_failure_rolls_back() {
    let backend = MockBackend::start().await;
    let list = loaded_posts(&backend, Session::with_token("abc")).await;
    let before = list.items();
    backend
        .enqueue(MockResponse::status(400, r#"{"message":"Title taken"}"#))
        .await;

    let result = list.create(&post_draft("Dup")).await;

    assert!(matches!(result, Err(SyncError::ServerError { status: 400, .. })));
    assert_eq!(list.items(), before);
    assert_eq!(
        list.request_state(&OperationKey::Create).error_message(),
        Some("Server returned 400: Title taken")
    );
}

#[tokio::test]
async fn test_create_without_token_never_calls_backend() {
    let backend = MockBackend::start().await;
    let list = loaded_posts(&backend, Session::anonymous()).await;

    let result = list.create(&post_draft("Nope")).await;

    assert!(matches!(result, Err(SyncError::Unauthenticated)));
    assert_eq!(backend.requests().await.len(), 1);
    assert_eq!(list.items().len(), 3);
    assert_eq!(list.request_state(&OperationKey::Create), RequestState::Idle);
}

#[tokio::test]
async fn test_invalid_draft_never_calls_backend() {
    let backend = MockBackend::start().await;
    let list = loaded_posts(&backend, Session::with_token("abc")).await;

    let result = list.create(&post_draft("   ")).await;

    assert!(matches!(
        result,
        Err(SyncError::Validation(ValidationError::MissingField { field: "title" }))
    ));
    assert_eq!(backend.requests().await.len(), 1);
}

#[tokio::test]
async fn test_second_create_while_loading_is_busy() {
    let backend = MockBackend::start().await;
    let list = loaded_posts(&backend, Session::with_token("abc")).await;
    backend
        .enqueue(
            MockResponse::value(json!({ "_id": "p9", "title": "First", "content": "Body" }))
                .with_delay(150),
        )
        .await;

    let first = post_draft("First");
    let second = post_draft("Second");
    let (first, second) = tokio::join!(list.create(&first), async {
        tokio::time::sleep(Duration::from_millis(30)).await;
        list.create(&second).await
    });

    assert!(first.is_ok());
    assert!(matches!(
        second,
        Err(SyncError::Busy { operation: OperationKey::Create })
    ));
    assert_eq!(list.items().len(), 4);
    assert_eq!(backend.requests().await.len(), 2);
}

#[tokio::test]
async fn test_delete_success() {
    let backend = MockBackend::start().await;
    let list = loaded_posts(&backend, Session::with_token("abc")).await;
    backend.enqueue(MockResponse::json(r#"{"message":"ok"}"#)).await;

    list.remove(&ItemId::new("2")).await.unwrap();

    assert_eq!(ids(&list.items()), vec!["1", "3"]);
    assert_eq!(
        list.request_state(&OperationKey::Delete(ItemId::new("2"))),
        RequestState::Success
    );
}

#[tokio::test]
async fn test_delete_hides_item_while_in_flight() {
    let backend = MockBackend::start().await;
    let list = loaded_posts(&backend, Session::with_token("abc")).await;
    backend
        .enqueue(MockResponse::json(r#"{"message":"ok"}"#).with_delay(150))
        .await;

    let id = ItemId::new("2");
    let (result, during) = tokio::join!(list.remove(&id), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        list.visible()
    });

    result.unwrap();
    assert_eq!(ids(&during), vec!["1", "3"]);
}

#[tokio::test]
async fn test_delete_failure_restores_position() {
    let backend = MockBackend::start().await;
    let list = loaded_posts(&backend, Session::with_token("abc")).await;
    backend
        .enqueue(MockResponse::status(403, r#"{"message":"Not your post"}"#))
        .await;

    let result = list.remove(&ItemId::new("2")).await;

    assert!(matches!(result, Err(SyncError::ServerError { status: 403, .. })));
    assert_eq!(ids(&list.items()), vec!["1", "2", "3"]);
    assert_eq!(list.errors().len(), 1);
}

#[tokio::test]
async fn test_overlapping_failed_deletes_restore_order() {
    let backend = MockBackend::start().await;
    let list = loaded_posts(&backend, Session::with_token("abc")).await;
    backend
        .enqueue(MockResponse::status(500, r#"{"message":"first"}"#).with_delay(100))
        .await;
    backend
        .enqueue(MockResponse::status(500, r#"{"message":"second"}"#).with_delay(150))
        .await;

    let first_id = ItemId::new("1");
    let (first, second, during) = tokio::join!(
        list.remove(&first_id),
        async {
            tokio::time::sleep(Duration::from_millis(30)).await;
            list.remove(&ItemId::new("2")).await
        },
        async {
            tokio::time::sleep(Duration::from_millis(60)).await;
            list.items()
        }
    );

    assert_eq!(ids(&during), vec!["3"]);
    assert!(matches!(first, Err(SyncError::ServerError { status: 500, .. })));
    assert!(matches!(second, Err(SyncError::ServerError { status: 500, .. })));
    assert_eq!(ids(&list.items()), vec!["1", "2", "3"]);
    assert_eq!(list.errors().len(), 2);
}

#[tokio::test]
async fn test_failed_create_alongside_failed_delete_restores_order() {
    let backend = MockBackend::start().await;
    let list = loaded_posts(&backend, Session::with_token("abc")).await;
    backend
        .enqueue(MockResponse::status(403, r#"{"message":"Not your post"}"#).with_delay(100))
        .await;
    backend
        .enqueue(MockResponse::status(500, r#"{"message":"disk full"}"#).with_delay(150))
        .await;

    let draft = post_draft("Fresh");
    let removed_id = ItemId::new("3");
    let (removed, created, during) = tokio::join!(
        list.remove(&removed_id),
        async {
            tokio::time::sleep(Duration::from_millis(30)).await;
            list.create(&draft).await
        },
        async {
            tokio::time::sleep(Duration::from_millis(60)).await;
            list.items()
        }
    );

    assert_eq!(during.len(), 3);
    assert!(during[0].id.is_provisional());
    assert_eq!(ids(&during[1..]), vec!["1", "2"]);
    assert!(removed.is_err());
    assert!(created.is_err());
    assert_eq!(ids(&list.items()), vec!["1", "2", "3"]);
}

#[tokio::test]
async fn test_create_commits_while_delete_fails() {
    let backend = MockBackend::start().await;
    let list = loaded_posts(&backend, Session::with_token("abc")).await;
    backend
        .enqueue(MockResponse::status(403, r#"{"message":"Not your post"}"#).with_delay(150))
        .await;
    backend
        .enqueue(
            MockResponse::value(json!({ "_id": "p9", "title": "Fresh", "content": "Body" }))
                .with_delay(20),
        )
        .await;

    let draft = post_draft("Fresh");
    let removed_id = ItemId::new("2");
    let (removed, created) = tokio::join!(list.remove(&removed_id), async {
        tokio::time::sleep(Duration::from_millis(30)).await;
        list.create(&draft).await
    });

    assert!(removed.is_err());
    assert_eq!(created.unwrap().id, ItemId::new("p9"));
    assert_eq!(ids(&list.items()), vec!["p9", "1", "2", "3"]);
}

#[tokio::test]
async fn test_delete_of_unsaved_item_is_rejected_locally() {
    let backend = MockBackend::start().await;
    let list = loaded_posts(&backend, Session::with_token("abc")).await;

    let result = list.remove(&ItemId::new("pending-1234")).await;

    assert!(matches!(
        result,
        Err(SyncError::Validation(ValidationError::NotSaved(_)))
    ));
    assert_eq!(
        list.request_state(&OperationKey::Delete(ItemId::new("pending-1234"))),
        RequestState::Idle
    );
    assert_eq!(backend.requests().await.len(), 1);
    assert_eq!(ids(&list.items()), vec!["1", "2", "3"]);
}

#[tokio::test]
async fn test_cancelled_load_leaves_cache_untouched() {
    let backend = MockBackend::start().await;
    backend
        .enqueue(MockResponse::value(posts_json()).with_delay(200))
        .await;
    let list = Arc::new(ResourceList::<Posts>::new(
        RemoteCollection::new(backend.client()),
        Session::anonymous(),
    ));

    let mut handle = ResourceList::spawn_load(&list);
    tokio::time::sleep(Duration::from_millis(30)).await;
    handle.cancel();

    assert!(matches!(handle.join().await, Err(SyncError::Cancelled)));
    assert!(list.items().is_empty());
    assert_eq!(list.request_state(&OperationKey::List), RequestState::Idle);
}

#[tokio::test]
async fn test_dropping_handle_cancels_load() {
    let backend = MockBackend::start().await;
    backend
        .enqueue(MockResponse::value(posts_json()).with_delay(100))
        .await;
    let list = Arc::new(ResourceList::<Posts>::new(
        RemoteCollection::new(backend.client()),
        Session::anonymous(),
    ));

    drop(ResourceList::spawn_load(&list));
    tokio::time::sleep(Duration::from_millis(250)).await;

    assert!(list.items().is_empty());
    assert!(!list.is_loading(&OperationKey::List));
}

#[tokio::test]
async fn test_spawned_load_completes() {
    let backend = MockBackend::start().await;
    backend.enqueue(MockResponse::value(posts_json())).await;
    let list = Arc::new(ResourceList::<Posts>::new(
        RemoteCollection::new(backend.client()),
        Session::anonymous(),
    ));

    let count = ResourceList::spawn_load(&list).join().await.unwrap();

    assert_eq!(count, 3);
    assert_eq!(ids(&list.visible()), vec!["1", "2", "3"]);
}

#[tokio::test]
async fn test_teardown_discards_pending_load() {
    let backend = MockBackend::start().await;
    backend
        .enqueue(MockResponse::value(posts_json()).with_delay(100))
        .await;
    let list = ResourceList::<Posts>::new(
        RemoteCollection::new(backend.client()),
        Session::anonymous(),
    );

    let (result, ()) = tokio::join!(list.load(), async {
        tokio::time::sleep(Duration::from_millis(30)).await;
        list.teardown();
    });

    assert!(matches!(result, Err(SyncError::Cancelled)));
    assert!(list.items().is_empty());
}

#[tokio::test]
async fn test_teardown_rolls_back_pending_create() {
    let backend = MockBackend::start().await;
    let list = loaded_posts(&backend, Session::with_token("abc")).await;
    backend
        .enqueue(
            MockResponse::value(json!({ "_id": "p9", "title": "Late", "content": "Body" }))
                .with_delay(100),
        )
        .await;

    let draft = post_draft("Late");
    let (result, ()) = tokio::join!(list.create(&draft), async {
        tokio::time::sleep(Duration::from_millis(30)).await;
        list.teardown();
    });

    assert!(matches!(result, Err(SyncError::Cancelled)));
    assert_eq!(ids(&list.items()), vec!["1", "2", "3"]);
}

#[tokio::test]
async fn test_register_reloads_and_blocks_repeat() {
    let backend = MockBackend::start().await;
    let list = loaded_events(&backend).await;
    let id = ItemId::new("1");
    assert!(list.can_register(&id));
    assert!(!list.can_register(&ItemId::new("2")));

    backend
        .enqueue(MockResponse::json(r#"{"message":"Registered"}"#))
        .await;
    backend.enqueue(MockResponse::value(events_json(4))).await;

    list.register(&id, "current-user-id").await.unwrap();

    assert!(list.is_registered(&id));
    assert!(!list.can_register(&id));
    assert_eq!(list.get(&id).unwrap().available_seats, 4);
    assert_eq!(
        list.request_state(&OperationKey::Register(id.clone())),
        RequestState::Success
    );

    let again = list.register(&id, "current-user-id").await;
    assert!(matches!(
        again,
        Err(SyncError::Validation(ValidationError::AlreadyRegistered(_)))
    ));

    let paths: Vec<String> = backend
        .requests()
        .await
        .into_iter()
        .map(|r| format!("{} {}", r.method, r.path))
        .collect();
    assert_eq!(
        paths,
        vec![
            "GET /api/events",
            "POST /api/events/1/register",
            "GET /api/events"
        ]
    );
}

#[tokio::test]
async fn test_register_failure_is_reported() {
    let backend = MockBackend::start().await;
    let list = loaded_events(&backend).await;
    backend
        .enqueue(MockResponse::status(400, r#"{"message":"Event is full"}"#))
        .await;

    let id = ItemId::new("1");
    let result = list.register(&id, "current-user-id").await;

    assert!(matches!(result, Err(SyncError::ServerError { status: 400, .. })));
    assert!(!list.is_registered(&id));
    assert_eq!(
        list.request_state(&OperationKey::Register(id)).error_message(),
        Some("Server returned 400: Event is full")
    );
}

#[tokio::test]
async fn test_form_submit_resets_draft() {
    let backend = MockBackend::start().await;
    let list = loaded_posts(&backend, Session::with_token("abc")).await;
    backend
        .enqueue(MockResponse::value(json!({ "_id": "p9", "title": "Fresh", "content": "Body" })))
        .await;

    let mut form = FormController::<Posts>::new();
    form.update_field("title", "Fresh").unwrap();
    form.update_field("content", "Body").unwrap();
    let post = form.submit(&list).await.unwrap();

    assert_eq!(post.title, "Fresh");
    assert_eq!(form.draft(), &PostDraft::default());
}

#[tokio::test]
async fn test_form_keeps_draft_on_failure() {
    let backend = MockBackend::start().await;
    let list = loaded_posts(&backend, Session::with_token("abc")).await;
    backend.enqueue(MockResponse::status(500, "")).await;

    let mut form = FormController::<Posts>::new();
    form.update_field("title", "Keep me").unwrap();
    form.update_field("content", "Body").unwrap();
    let result = form.submit(&list).await;

    match result {
        Err(SyncError::ServerError { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "Internal Server Error");
        }
        other => panic!("expected server error, got {:?}", other),
    }
    assert_eq!(form.draft().field("title"), Some("Keep me"));
}

#[tokio::test]
async fn test_form_rejects_invalid_input_locally() {
    let backend = MockBackend::start().await;
    let list = loaded_posts(&backend, Session::with_token("abc")).await;

    let mut form = FormController::<Posts>::new();
    form.update_field("content", "Body only").unwrap();

    assert!(form.validate().is_err());
    assert!(matches!(
        form.submit(&list).await,
        Err(SyncError::Validation(_))
    ));
    assert!(matches!(
        form.update_field("colour", "red"),
        Err(SyncError::Validation(ValidationError::UnknownField(_)))
    ));
    assert_eq!(backend.requests().await.len(), 1);
}

#[tokio::test]
async fn test_form_rejects_oversized_image() {
    let mut form = FormController::<Posts>::new();
    let bytes = vec![0u8; MAX_IMAGE_BYTES + 1];

    let result = form.attach_image(&bytes, "image/png");

    assert!(matches!(
        result,
        Err(SyncError::Validation(ValidationError::ImageTooLarge { .. }))
    ));
    assert_eq!(form.draft().field("image"), Some(""));
}

#[tokio::test]
async fn test_form_attaches_small_image() {
    let mut form = FormController::<Posts>::new();
    form.attach_image(&[1, 2, 3], "image/png").unwrap();
    assert_eq!(form.draft().field("image"), Some("data:image/png;base64,AQID"));
}
