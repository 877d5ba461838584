use url::Url;

/// A hyperlink as it appears in the page, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Raw `href` attribute; `None` when the anchor has none
    pub href: Option<String>,
    /// Visible text content, untrimmed
    pub text: String,
}

impl Link {
    pub fn new(href: Option<&str>, text: &str) -> Self {
        Self {
            href: href.map(str::to_string),
            text: text.to_string(),
        }
    }
}

/// Body of a fetched page together with the URL relative links resolve against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub base_url: Url,
    pub body: String,
}
