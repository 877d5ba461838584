//! Novelty decision between the page's best candidate and the stored state

use chrono::{DateTime, Utc};

use crate::detect::types::{Candidate, Detection};
use crate::state::SeenState;

/// Decide whether `candidate` is a new announcement, stamping it with the current time
pub fn detect(candidate: &Candidate, stored: Option<&SeenState>) -> Detection {
    detect_at(candidate, stored, Utc::now())
}

/// Decide whether `candidate` is a new announcement.
///
/// A changed URL is the only novelty trigger. Versions are not compared:
/// extraction is best-effort, while the announcement URL changes with every
/// release. A missing state always yields [`Detection::New`].
pub fn detect_at(
    candidate: &Candidate,
    stored: Option<&SeenState>,
    now: DateTime<Utc>,
) -> Detection {
    match stored {
        Some(state) if state.last_url == candidate.url => Detection::Unchanged,
        _ => Detection::New(SeenState {
            last_url: candidate.url.clone(),
            last_version: candidate.version.clone(),
            last_seen_at_utc: now,
        }),
    }
}
