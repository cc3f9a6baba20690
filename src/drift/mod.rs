//! Drift detection between the actual graph and the declared cascade map

pub mod cascade;
pub mod compare;

pub use cascade::CascadeMap;
pub use compare::{DriftReport, compare};
