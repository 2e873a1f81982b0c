//! Core types shared across apidrift facilities
//!
//! This crate provides foundational types used by both error handling
//! and logging facilities:
//!
//! - **Correlation types**: RunId, ComparisonId

pub mod correlation;

pub use correlation::{ComparisonId, RunId};
