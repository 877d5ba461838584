//! Page access layer: fetching the announcement page and turning its markup
//! into a flat list of links.
//!
//! # Modules
//!
//! - [`fetcher`]: `PageFetcher` trait and its reqwest implementation
//! - [`html`]: `HtmlLinkSource`, a `LinkSource` backed by `scraper`
//! - [`traits`]: the `LinkSource` capability the detection core depends on
//! - [`types`]: `Link` and `FetchedPage`
//! - [`error`]: `FetchError`

pub mod error;
pub mod fetcher;
pub mod html;
pub mod traits;
pub mod types;
