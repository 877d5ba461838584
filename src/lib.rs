//! Watches a product-update page and posts new version-tagged announcements
//! to a messaging webhook.
//!
//! # Modules
//!
//! - [`config`]: settings resolution, defaults and data directory
//! - [`detect`]: candidate extraction and novelty detection
//! - [`logging`]: `tracing` subscriber setup
//! - [`notify`]: notification message and webhook delivery
//! - [`page`]: page fetching and link extraction
//! - [`state`]: the persisted last-seen record
//! - [`version`]: dotted-numeric version ordering
//! - [`watcher`]: one pass of the whole pipeline

pub mod config;
pub mod detect;
pub mod logging;
pub mod notify;
pub mod page;
pub mod state;
pub mod version;
pub mod watcher;
