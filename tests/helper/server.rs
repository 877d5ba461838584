//! Mock page and webhook servers with a temporary state file

use std::path::PathBuf;

use mockito::{Matcher, Mock, ServerGuard};
use tempfile::TempDir;

use patch_notifier::config::Settings;
use patch_notifier::watcher::Watcher;

/// Path of the announcement board on the mock server
pub const PAGE_PATH: &str = "/board/news";
/// Path of the webhook on the mock server
pub const HOOK_PATH: &str = "/hooks/T000/B000";

/// Render an announcement board with one row per `(href, title)`
pub fn announcement_page(rows: &[(&str, &str)]) -> String {
    let items: String = rows
        .iter()
        .map(|(href, title)| format!(r#"<li class="row"><a href="{href}"> {title} </a></li>"#))
        .collect();
    format!(
        r#"<html><body><nav><a href="/">Home</a></nav><ul class="board">{items}</ul></body></html>"#
    )
}

/// A mock server hosting both the page and the webhook, plus a state directory
pub struct TestEnv {
    pub server: ServerGuard,
    state_dir: TempDir,
    page: Option<Mock>,
}

impl TestEnv {
    pub async fn new() -> Self {
        Self {
            server: mockito::Server::new_async().await,
            state_dir: TempDir::new().unwrap(),
            page: None,
        }
    }

    pub fn state_file(&self) -> PathBuf {
        self.state_dir.path().join("state.json")
    }

    pub fn page_url(&self) -> String {
        format!("{}{}", self.server.url(), PAGE_PATH)
    }

    /// Serve `body` as the page, replacing whatever was served before
    pub async fn serve_page(&mut self, body: &str) {
        if let Some(old) = self.page.take() {
            old.remove_async().await;
        }
        let mock = self
            .server
            .mock("GET", PAGE_PATH)
            .with_status(200)
            .with_header("content-type", "text/html; charset=utf-8")
            .with_body(body)
            .create_async()
            .await;
        self.page = Some(mock);
    }

    /// Expect exactly `times` webhook posts whose body contains every fragment
    pub async fn expect_webhook(&mut self, times: usize, fragments: &[&str]) -> Mock {
        let matchers = fragments
            .iter()
            .map(|f| Matcher::Regex(regex::escape(f)))
            .collect();
        self.server
            .mock("POST", HOOK_PATH)
            .match_body(Matcher::AllOf(matchers))
            .with_status(200)
            .expect(times)
            .create_async()
            .await
    }

    pub fn settings(&self) -> Settings {
        Settings {
            page_url: self.page_url(),
            webhook_url: Some(format!("{}{}", self.server.url(), HOOK_PATH)),
            state_file: Some(self.state_file()),
            version_pattern: None,
            header: Some("새 업데이트".to_string()),
            timeout_ms: Some(5_000),
            user_agent: None,
        }
    }

    pub fn watcher(&self) -> Watcher {
        Watcher::from_config(self.settings().resolve().unwrap()).unwrap()
    }
}
