//! End-to-end scenarios against the simulated TodoMVC application.
//!
//! Each scenario drives the page exclusively through the facade and checks
//! observable state through the page and the persisted-state verifier.

use std::sync::Arc;

use tarea::{
    Driver, Filter, SimulatedTodoApp, StorageVerifier, TodoGenerator, TodoPage, WaitOptions,
    DEFAULT_TODOS,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn fixture() -> (Arc<SimulatedTodoApp>, TodoPage, StorageVerifier) {
    init_tracing();
    let app = Arc::new(SimulatedTodoApp::new());
    let driver = Arc::clone(&app) as Arc<dyn Driver>;
    let page = TodoPage::with_url(Arc::clone(&driver), "http://localhost/todomvc");
    let verifier = StorageVerifier::new(driver);
    (app, page, verifier)
}

fn wait() -> WaitOptions {
    WaitOptions::new().with_timeout(500).with_poll_interval(10)
}

#[tokio::test]
async fn test_added_todos_persist_and_survive_reload() {
    let (_app, page, verifier) = fixture();
    page.open().await.unwrap();
    page.add_todos(&DEFAULT_TODOS).await.unwrap();

    verifier.wait_for_count(3, &wait()).await.unwrap();
    let records = verifier.snapshot().await.unwrap();
    let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, DEFAULT_TODOS);
    assert!(records.iter().all(|r| !r.completed));

    page.reload().await.unwrap();
    assert!(page.todo_list().has_titles(&DEFAULT_TODOS).await.unwrap());
}

#[tokio::test]
async fn test_mark_one_completed_survives_reload() {
    let (_app, page, verifier) = fixture();
    page.open().await.unwrap();
    page.add_todos(&DEFAULT_TODOS).await.unwrap();

    page.todo_list().item(1).complete().await.unwrap();
    verifier.wait_for_completed_count(1, &wait()).await.unwrap();

    page.reload().await.unwrap();
    let list = page.todo_list();
    assert!(!list.item(0).is_completed().await.unwrap());
    assert!(list.item(0).checkbox().is_unchecked().await.unwrap());
    assert_eq!(list.item(1).title().await.unwrap(), "feed the cat");
    assert!(list.item(1).is_completed().await.unwrap());
    assert!(list.item(1).checkbox().is_checked().await.unwrap());
    assert!(!list.item(2).is_completed().await.unwrap());
}

#[tokio::test]
async fn test_mark_all_then_uncheck_one_clears_toggle_all() {
    let (_app, page, verifier) = fixture();
    page.open().await.unwrap();
    page.add_todos(&["buy some cheese", "feed the cat"]).await.unwrap();

    page.mark_all_as_completed().await.unwrap();
    assert!(page.is_toggle_all_checked().await.unwrap());
    verifier.wait_for_completed_count(2, &wait()).await.unwrap();

    page.todo_list()
        .item_by_title("feed the cat")
        .await
        .unwrap()
        .uncomplete()
        .await
        .unwrap();
    assert!(!page.is_toggle_all_checked().await.unwrap());
    verifier.wait_for_completed_count(1, &wait()).await.unwrap();
}

#[tokio::test]
async fn test_edit_round_trip_trims_and_survives_reload() {
    let (_app, page, verifier) = fixture();
    page.open().await.unwrap();
    page.add_todo("feed the cat").await.unwrap();

    let padded = TodoGenerator::with_surrounding_spaces("feed the dog");
    page.todo_list().item(0).rename(&padded).await.unwrap();
    assert_eq!(page.todo_list().item(0).title().await.unwrap(), "feed the dog");

    verifier.wait_for_title("feed the dog", &wait()).await.unwrap();
    page.reload().await.unwrap();
    assert!(page.todo_list().has_titles(&["feed the dog"]).await.unwrap());
}

#[tokio::test]
async fn test_empty_edit_deletes_row_and_preserves_order() {
    let (_app, page, verifier) = fixture();
    page.open().await.unwrap();
    page.add_todos(&["a", "b", "c"]).await.unwrap();

    page.todo_list()
        .item_by_title("b")
        .await
        .unwrap()
        .rename("   ")
        .await
        .unwrap();

    assert!(page.todo_list().has_titles(&["a", "c"]).await.unwrap());
    verifier.wait_for_count(2, &wait()).await.unwrap();
}

#[tokio::test]
async fn test_filters_partition_the_list() {
    let (_app, page, _verifier) = fixture();
    page.open().await.unwrap();
    page.add_todos(&["a", "b", "c"]).await.unwrap();
    page.todo_list()
        .item_by_title("b")
        .await
        .unwrap()
        .complete()
        .await
        .unwrap();

    page.set_filter(Filter::Active).await.unwrap();
    assert!(page.todo_list().has_titles(&["a", "c"]).await.unwrap());

    page.set_filter(Filter::Completed).await.unwrap();
    assert!(page.todo_list().has_titles(&["b"]).await.unwrap());

    page.set_filter(Filter::All).await.unwrap();
    assert!(page.todo_list().has_titles(&["a", "b", "c"]).await.unwrap());
}

#[tokio::test]
async fn test_completion_marking_is_idempotent() {
    let (_app, page, verifier) = fixture();
    page.open().await.unwrap();
    page.add_todo("feed the cat").await.unwrap();

    let row = page.todo_list().item(0);
    row.complete().await.unwrap();
    row.complete().await.unwrap();
    assert!(row.is_completed().await.unwrap());
    verifier.wait_for_completed_count(1, &wait()).await.unwrap();

    row.uncomplete().await.unwrap();
    verifier.wait_for_completed_count(0, &wait()).await.unwrap();
}

#[tokio::test]
async fn test_clear_completed_removes_only_completed() {
    let (_app, page, verifier) = fixture();
    page.open().await.unwrap();
    page.add_todos(&["a", "b", "c"]).await.unwrap();
    page.todo_list()
        .item_by_title("b")
        .await
        .unwrap()
        .complete()
        .await
        .unwrap();

    assert!(page.is_clear_completed_visible().await.unwrap());
    page.clear_completed().await.unwrap();
    assert!(page.todo_list().has_titles(&["a", "c"]).await.unwrap());
    assert!(!page.is_clear_completed_visible().await.unwrap());
    verifier.wait_for_count(2, &wait()).await.unwrap();
}

#[tokio::test]
async fn test_seeded_generator_drives_reproducible_runs() {
    let (_app, page, verifier) = fixture();
    page.open().await.unwrap();

    let mut gen = TodoGenerator::new(42);
    let count = gen.random_count();
    let titles = gen.titles(count);
    let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
    page.add_todos(&refs).await.unwrap();

    assert!(page.todo_list().has_titles(&refs).await.unwrap());
    verifier.wait_for_count(titles.len(), &wait()).await.unwrap();

    // a second generator with the same seed replays the same fixture
    let mut replay = TodoGenerator::new(42);
    let replay_count = replay.random_count();
    assert_eq!(replay.titles(replay_count), titles);
}

#[tokio::test]
async fn test_verifier_seeding_round_trip() {
    let (_app, page, verifier) = fixture();
    let mut gen = TodoGenerator::new(7);
    let seeded = gen.todos_with_completed(4, 0.5);

    verifier.set_todos(&seeded).await.unwrap();
    page.open().await.unwrap();

    assert_eq!(page.todo_count().await.unwrap(), 4);
    let titles: Vec<String> = seeded.iter().map(|t| t.title.clone()).collect();
    let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
    assert!(page.todo_list().has_titles(&refs).await.unwrap());

    verifier.clear().await.unwrap();
    verifier.wait_until_empty(&wait()).await.unwrap();
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn title_strategy() -> impl Strategy<Value = Vec<String>> {
        proptest::collection::vec("[a-z]{1,8}( [a-z]{1,8}){0,2}", 1..6)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// Adding todos in sequence renders and persists them in the same
        /// order, whatever the titles.
        #[test]
        fn prop_add_order_is_preserved(titles in title_strategy()) {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()
                .expect("runtime");
            rt.block_on(async {
                let (_app, page, verifier) = fixture();
                page.open().await.unwrap();
                let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
                page.add_todos(&refs).await.unwrap();

                prop_assert!(page.todo_list().has_titles(&refs).await.unwrap());
                let persisted = verifier.snapshot().await.unwrap();
                let stored: Vec<&str> =
                    persisted.iter().map(|r| r.title.as_str()).collect();
                prop_assert_eq!(stored, refs);
                Ok(())
            })?;
        }
    }
}
