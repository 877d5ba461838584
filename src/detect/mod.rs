//! Change detection core
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │    Links    │────▶│  Extractor  │────▶│  Detector   │◀──── SeenState
//! │ (href,text) │     │ (best cand.)│     │ (new/same)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │
//!                            ▼
//!                     ┌─────────────┐
//!                     │   version   │
//!                     │  (ordering) │
//!                     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`extractor`]: finds version-tagged links and ranks them
//! - [`detector`]: decides whether the best candidate is a new announcement
//! - [`types`]: `Candidate` and `Detection`

pub mod detector;
pub mod extractor;
pub mod types;
