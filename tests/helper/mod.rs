//! Test utilities shared by the end-to-end tests

pub mod server;

pub use server::{TestEnv, announcement_page};
