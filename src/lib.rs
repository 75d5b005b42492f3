//! cheatsheet library
//!
//! Categories of reusable shell commands with contiguous ordering, pinning,
//! favorites, clipboard copy, and JSON bulk import/export over a pluggable
//! storage backend.

pub mod config;
pub mod logging;
pub mod sheet;
