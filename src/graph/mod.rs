//! Actual dependency graph derived from workspace manifests
//!
//! Owns the domain types; no external graph library — the checker only
//! needs a map-of-sets, never traversals.

pub mod actual;

pub use actual::ActualGraph;
