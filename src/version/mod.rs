//! Dotted-numeric version ordering
//!
//! Announcement pages tag releases with versions like `Ver.1.021.01.00`, which
//! are not semver: they have an arbitrary number of segments and leading zeros.
//! [`compare::compare_versions`] orders them numerically, segment by segment.

pub mod compare;

pub use compare::{VersionKey, compare_versions};
