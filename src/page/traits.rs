//! Link extraction capability

use crate::page::types::Link;

/// Produces the hyperlinks of a document, in document order.
///
/// This is the only view of the markup the detection core needs; resolving
/// `href` values against the page URL happens later, in the extractor.
pub trait LinkSource: Send + Sync {
    fn links(&self, markup: &str) -> Vec<Link>;
}
