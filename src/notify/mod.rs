//! Webhook notification for new announcements
//!
//! - [`message`]: builds the plain-text message body
//! - [`webhook`]: `Notifier` trait and the HTTP webhook implementation
//! - [`error`]: `NotifyError`

pub mod error;
pub mod message;
pub mod webhook;
