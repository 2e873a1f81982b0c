//! apidrift client - comparison orchestration
//!
//! Drives paired requests against the baseline and candidate targets and
//! feeds the responses through the `apidrift-core` kernel:
//! - [`Comparator::compare`] runs one endpoint comparison with concurrent
//!   paired requests, per-call timeouts, and wall-clock latency measurement
//! - [`Comparator::compare_suite`] runs a set of endpoint specs with bounded
//!   parallelism and folds the results into a [`RegressionSummary`]
//! - [`ResultSink`] is the optional history-persistence seam; comparisons
//!   never depend on it
//!
//! Partial failure on one side never aborts a comparison: transport, status,
//! and parse failures degrade into `response_error` difference records.
//!
//! [`RegressionSummary`]: apidrift_core::RegressionSummary

pub mod config;
pub mod method;
pub mod orchestrator;
pub mod sink;
pub mod suite;

pub use config::CompareConfig;
pub use method::Method;
pub use orchestrator::{Comparator, EndpointSpec};
pub use sink::{MemorySink, NoopSink, ResultSink};
