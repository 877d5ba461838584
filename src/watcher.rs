//! One pass of the watch pipeline: fetch, extract, detect, notify, persist
//!
//! Each step's failure aborts the rest of the pass. The notification is sent
//! before the state is saved, so a failed save means the next run notifies
//! again rather than never.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use crate::config::WatchConfig;
use crate::detect::detector::detect;
use crate::detect::extractor::CandidateExtractor;
use crate::detect::types::{Candidate, Detection};
use crate::notify::error::NotifyError;
use crate::notify::message::{DEFAULT_HEADER, compose_message};
use crate::notify::webhook::{Notifier, WebhookNotifier};
use crate::page::error::FetchError;
use crate::page::fetcher::{HttpPageFetcher, PageFetcher};
use crate::page::html::HtmlLinkSource;
use crate::page::traits::LinkSource;
use crate::state::{JsonStateStore, SeenState, StateError, StateStore};

/// How a pass ended when nothing went wrong
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The page had no version-tagged links
    NoCandidate,
    /// The best candidate is the one already notified
    Unchanged(Candidate),
    /// A notification was sent and the new state saved
    Notified(SeenState),
    /// Dry run: a notification would have been sent
    WouldNotify(SeenState),
}

#[derive(Debug, Error)]
pub enum WatchError {
    #[error("Failed to fetch page: {0}")]
    Fetch(#[from] FetchError),

    #[error("Failed to send notification: {0}")]
    Notify(#[from] NotifyError),

    #[error("Notification sent but state was not saved: {0}")]
    StateWrite(#[from] StateError),
}

/// Fetch `page_url` and return every candidate on it, highest version first
pub async fn fetch_candidates(
    fetcher: &dyn PageFetcher,
    link_source: &dyn LinkSource,
    extractor: &CandidateExtractor,
    page_url: &Url,
) -> Result<Vec<Candidate>, FetchError> {
    let page = fetcher.fetch(page_url).await?;
    let links = link_source.links(&page.body);
    debug!("Page {} has {} links", page.base_url, links.len());
    Ok(extractor.ranked(&page.base_url, &links))
}

/// Runs the watch pipeline against one page
pub struct Watcher {
    page_url: Url,
    header: String,
    extractor: CandidateExtractor,
    fetcher: Arc<dyn PageFetcher>,
    link_source: Arc<dyn LinkSource>,
    notifier: Arc<dyn Notifier>,
    store: Arc<dyn StateStore>,
    dry_run: bool,
}

impl Watcher {
    /// Create a new Watcher with the given components
    pub fn new(
        page_url: Url,
        extractor: CandidateExtractor,
        fetcher: Arc<dyn PageFetcher>,
        link_source: Arc<dyn LinkSource>,
        notifier: Arc<dyn Notifier>,
        store: Arc<dyn StateStore>,
    ) -> Self {
        Self {
            page_url,
            header: DEFAULT_HEADER.to_string(),
            extractor,
            fetcher,
            link_source,
            notifier,
            store,
            dry_run: false,
        }
    }

    /// Build a Watcher with the HTTP fetcher, HTML link source, webhook
    /// notifier and JSON state store described by `config`
    pub fn from_config(config: WatchConfig) -> Result<Self, WatchError> {
        let page = config.page;
        let fetcher = HttpPageFetcher::new(&page.user_agent, page.timeout)?;
        let notifier = WebhookNotifier::new(config.webhook_url, &page.user_agent, page.timeout)?;

        Ok(Self::new(
            page.url,
            page.extractor,
            Arc::new(fetcher),
            Arc::new(HtmlLinkSource),
            Arc::new(notifier),
            Arc::new(JsonStateStore::new(config.state_file)),
        )
        .with_header(config.header))
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Detect but neither notify nor save
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Run one pass of the pipeline
    pub async fn run_once(&self) -> Result<RunOutcome, WatchError> {
        let page = self.fetcher.fetch(&self.page_url).await?;
        let links = self.link_source.links(&page.body);

        let Some(candidate) = self.extractor.best(&page.base_url, &links) else {
            info!(
                "No version-tagged links among {} links on {}",
                links.len(),
                page.base_url
            );
            return Ok(RunOutcome::NoCandidate);
        };
        info!(
            "Latest candidate: {} (version {})",
            candidate.url,
            candidate.version.as_deref().unwrap_or("unknown")
        );

        let stored = self.store.load();
        let state = match detect(&candidate, stored.as_ref()) {
            Detection::Unchanged => {
                info!("Already notified about {}", candidate.url);
                return Ok(RunOutcome::Unchanged(candidate));
            }
            Detection::New(state) => state,
        };

        if self.dry_run {
            info!("Dry run: would notify about {}", candidate.url);
            return Ok(RunOutcome::WouldNotify(state));
        }

        self.notifier
            .notify(&compose_message(&self.header, &candidate))
            .await?;
        self.store.save(&state)?;
        info!("Notified about {}", state.last_url);

        Ok(RunOutcome::Notified(state))
    }
}
