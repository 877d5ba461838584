//! HTML link source built on `scraper`

use scraper::{Html, Selector};

use crate::page::traits::LinkSource;
use crate::page::types::Link;

/// Collects every `<a>` element of an HTML document.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlLinkSource;

impl LinkSource for HtmlLinkSource {
    fn links(&self, markup: &str) -> Vec<Link> {
        let document = Html::parse_document(markup);
        let selector = Selector::parse("a").expect("anchor selector is valid");

        document
            .select(&selector)
            .map(|anchor| Link {
                href: anchor.value().attr("href").map(str::to_string),
                text: anchor.text().collect::<String>(),
            })
            .collect()
    }
}
