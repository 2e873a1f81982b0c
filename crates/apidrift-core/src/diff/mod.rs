//! Structural diff engine.
//!
//! Compares two response documents and produces an ordered list of typed
//! difference records suitable for regression classification and review.
//!
//! ## Entry point
//!
//! ```ignore
//! use apidrift_core::diff::engine::compute_diff;
//!
//! let records = compute_diff(&baseline, &candidate);
//! let verdict = apidrift_core::classify::classify(&records);
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: identical inputs produce byte-identical output; object
//!   keys are visited in sorted order, never insertion order.
//! - **Type-mismatch short-circuit**: a type mismatch at a node subsumes all
//!   nested differences; recursion stops there.
//! - **Generated-field noise suppression**: every record is run through the
//!   expected-difference heuristics before its severity is finalized.

pub mod engine;
pub mod model;

pub use engine::compute_diff;
pub use model::{DifferenceKind, DifferenceRecord, Severity};
