//! Core building blocks for workspace-drift
//!
//! - **config**: resolved check configuration (root, scope, exclusions)
//! - **error**: categorized error types with contextual help messages

pub mod config;
pub mod error;
