//! Watch pipeline E2E tests
//!
//! Uses real HTTP fetcher, webhook notifier and JSON state file against
//! mockito servers.

mod helper;

use helper::{TestEnv, announcement_page};
use patch_notifier::state::{JsonStateStore, SeenState, StateStore};
use patch_notifier::watcher::{RunOutcome, WatchError};

fn load_state(env: &TestEnv) -> Option<SeenState> {
    JsonStateStore::new(env.state_file()).load()
}

#[tokio::test]
async fn notifies_once_per_new_announcement_across_runs() {
    let mut env = TestEnv::new().await;
    let first_page = announcement_page(&[
        ("/board/news/301", "Ver.1.021.01.00 업데이트 안내"),
        ("/board/news/300", "Ver.1.021.00.00 업데이트 안내"),
        ("/board/news/299", "이벤트 안내"),
    ]);
    let first_url = format!("{}/board/news/301", env.server.url());

    // 1. First run: no state file, one notification, state created
    env.serve_page(&first_page).await;
    let hook = env
        .expect_webhook(1, &["새 업데이트", "버전: 1.021.01.00", &first_url])
        .await;

    let outcome = env.watcher().run_once().await.unwrap();

    hook.assert_async().await;
    assert!(matches!(outcome, RunOutcome::Notified(_)));
    let state = load_state(&env).unwrap();
    assert_eq!(state.last_url, first_url);
    assert_eq!(state.last_version.as_deref(), Some("1.021.01.00"));

    // 2. Same page: no notification, state untouched
    let outcome = env.watcher().run_once().await.unwrap();

    hook.assert_async().await;
    assert!(matches!(outcome, RunOutcome::Unchanged(c) if c.url == first_url));
    assert_eq!(load_state(&env), Some(state));
    hook.remove_async().await;

    // 3. New top announcement: notify again and overwrite state
    let second_page = announcement_page(&[
        ("/board/news/302", "Ver.1.022.00.00 업데이트 안내"),
        ("/board/news/301", "Ver.1.021.01.00 업데이트 안내"),
    ]);
    let second_url = format!("{}/board/news/302", env.server.url());
    env.serve_page(&second_page).await;
    let hook = env
        .expect_webhook(1, &["버전: 1.022.00.00", &second_url])
        .await;

    let outcome = env.watcher().run_once().await.unwrap();

    hook.assert_async().await;
    assert!(matches!(outcome, RunOutcome::Notified(ref s) if s.last_url == second_url));
    let state = load_state(&env).unwrap();
    assert_eq!(state.last_url, second_url);
    assert_eq!(state.last_version.as_deref(), Some("1.022.00.00"));
}

#[tokio::test]
async fn notifies_when_top_url_changes_even_if_version_regresses() {
    let mut env = TestEnv::new().await;
    env.serve_page(&announcement_page(&[(
        "/board/news/500",
        "Ver.2.0.0 업데이트 안내",
    )]))
    .await;
    let hook = env.expect_webhook(1, &["버전: 2.0.0"]).await;
    env.watcher().run_once().await.unwrap();
    hook.assert_async().await;
    hook.remove_async().await;

    // The 2.0.0 post was pulled and replaced by a rollback notice
    env.serve_page(&announcement_page(&[(
        "/board/news/501",
        "Ver.1.9.9 롤백 안내",
    )]))
    .await;
    let hook = env.expect_webhook(1, &["버전: 1.9.9"]).await;

    let outcome = env.watcher().run_once().await.unwrap();

    hook.assert_async().await;
    assert!(matches!(outcome, RunOutcome::Notified(_)));
    assert_eq!(
        load_state(&env).unwrap().last_version.as_deref(),
        Some("1.9.9")
    );
}

#[tokio::test]
async fn page_without_candidates_is_a_clean_no_op() {
    let mut env = TestEnv::new().await;
    env.serve_page(&announcement_page(&[("/board/news/1", "점검 안내")]))
        .await;
    let hook = env.expect_webhook(0, &[]).await;

    let outcome = env.watcher().run_once().await.unwrap();

    hook.assert_async().await;
    assert_eq!(outcome, RunOutcome::NoCandidate);
    assert_eq!(load_state(&env), None);
}

#[tokio::test]
async fn corrupt_state_file_is_treated_as_first_run() {
    let mut env = TestEnv::new().await;
    std::fs::write(env.state_file(), "lastUrl = ???").unwrap();
    env.serve_page(&announcement_page(&[("/board/news/7", "Ver.3.1 패치")]))
        .await;
    let hook = env.expect_webhook(1, &["버전: 3.1"]).await;

    let outcome = env.watcher().run_once().await.unwrap();

    hook.assert_async().await;
    assert!(matches!(outcome, RunOutcome::Notified(_)));
    assert!(load_state(&env).is_some());
}

#[tokio::test]
async fn webhook_failure_leaves_state_unsaved() {
    let mut env = TestEnv::new().await;
    env.serve_page(&announcement_page(&[("/board/news/8", "Ver.4.0.1 패치")]))
        .await;
    let hook = env
        .server
        .mock("POST", helper::server::HOOK_PATH)
        .with_status(500)
        .expect(1)
        .create_async()
        .await;

    let result = env.watcher().run_once().await;

    hook.assert_async().await;
    assert!(matches!(result, Err(WatchError::Notify(_))));
    assert_eq!(load_state(&env), None);
}

#[tokio::test]
async fn page_error_aborts_before_notifying() {
    let mut env = TestEnv::new().await;
    let page = env
        .server
        .mock("GET", helper::server::PAGE_PATH)
        .with_status(404)
        .create_async()
        .await;
    let hook = env.expect_webhook(0, &[]).await;

    let result = env.watcher().run_once().await;

    page.assert_async().await;
    hook.assert_async().await;
    assert!(matches!(result, Err(WatchError::Fetch(_))));
    assert_eq!(load_state(&env), None);
}
