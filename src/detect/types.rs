use crate::state::SeenState;

/// A link that looks like a version-tagged update announcement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Absolute URL of the announcement
    pub url: String,
    /// Dotted-numeric version captured from the href or text
    pub version: Option<String>,
    /// Trimmed link text, or the URL when the text is empty
    pub label: String,
}

/// Outcome of comparing the best candidate with the stored state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// The candidate has not been notified yet; carries the state to persist
    New(SeenState),
    /// The candidate is the one already notified
    Unchanged,
}
