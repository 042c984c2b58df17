//! Streaming comparison of two spell-checking engines.
//!
//! One [`Session`](session::Session) owns every accumulator for a run and
//! feeds each input word through the [`DualInvoker`](invoker::DualInvoker).
//! At end of stream the accumulated [`RunTotals`](session::RunTotals) are
//! turned into a [`Report`](report::Report).
//!
//! - [`timing`] -- scoped stopwatch used to bracket engine calls
//! - [`invoker`] -- A-then-B invocation protocol
//! - [`stats`] -- confusion matrix and duration accumulators
//! - [`comparator`] -- suggestion-list comparison against an expected word
//! - [`session`] -- the sequential processing loop
//! - [`report`] -- rate derivation and fixed-layout rendering

pub mod comparator;
pub mod error;
pub mod invoker;
pub mod report;
pub mod session;
pub mod stats;
pub mod timing;

pub use error::HarnessError;
pub use report::{Report, ReportError};
pub use session::{HarnessConfig, RunTotals, Session};
