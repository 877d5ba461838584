//! Candidate extraction from page links

use regex::Regex;
use tracing::debug;
use url::Url;

use crate::detect::types::Candidate;
use crate::page::types::Link;
use crate::version::compare_versions;

/// Default pattern for version tags such as `Ver.1.021.01.00`.
///
/// The first capture group is taken as the version.
pub const DEFAULT_VERSION_PATTERN: &str = r"(?i)Ver\.(\d+(?:\.\d+)+)";

#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("Invalid version pattern: {0}")]
    Invalid(#[from] regex::Error),

    #[error("Version pattern has no capture group: {0}")]
    MissingCaptureGroup(String),
}

/// Finds version-tagged announcement links and picks the newest one
#[derive(Debug, Clone)]
pub struct CandidateExtractor {
    pattern: Regex,
}

impl CandidateExtractor {
    /// Creates an extractor for a custom pattern whose first capture group is the version
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        let pattern = Regex::new(pattern)?;
        if pattern.captures_len() < 2 {
            return Err(PatternError::MissingCaptureGroup(pattern.as_str().to_string()));
        }
        Ok(Self { pattern })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Builds a candidate for every version-tagged link, in document order.
    ///
    /// The href is searched before the text: a version in the URL slug is a
    /// more stable signal than display text. Links with a blank or
    /// unresolvable href are skipped.
    pub fn candidates(&self, base_url: &Url, links: &[Link]) -> Vec<Candidate> {
        links
            .iter()
            .filter_map(|link| self.candidate(base_url, link))
            .collect()
    }

    /// Returns the candidate with the highest version, or `None` when the page
    /// has no version-tagged links. Ties go to the link that appears first.
    pub fn best(&self, base_url: &Url, links: &[Link]) -> Option<Candidate> {
        self.ranked(base_url, links).into_iter().next()
    }

    /// All candidates ordered from highest to lowest version
    pub fn ranked(&self, base_url: &Url, links: &[Link]) -> Vec<Candidate> {
        let mut candidates = self.candidates(base_url, links);
        // sort_by is stable, which keeps encounter order among equal versions
        candidates.sort_by(|a, b| compare_versions(b.version.as_deref(), a.version.as_deref()));
        candidates
    }

    fn candidate(&self, base_url: &Url, link: &Link) -> Option<Candidate> {
        let href = link.href.as_deref().map(str::trim).filter(|h| !h.is_empty())?;

        let url = base_url
            .join(href)
            .inspect_err(|e| debug!("Skipping unresolvable href '{}': {}", href, e))
            .ok()?;
        let text = link.text.trim();

        let version = self
            .capture_version(href)
            .or_else(|| self.capture_version(text))?;

        let url = url.to_string();
        let label = if text.is_empty() {
            url.clone()
        } else {
            text.to_string()
        };
        debug!("Found candidate {} (version {})", url, version);

        Some(Candidate {
            url,
            version: Some(version),
            label,
        })
    }

    fn capture_version(&self, haystack: &str) -> Option<String> {
        self.pattern
            .captures(haystack)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

impl Default for CandidateExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_VERSION_PATTERN).expect("default version pattern is valid")
    }
}
