//! Canonical applicant context and risk scoring engine for VisaBuddy.
//!
//! The crate normalizes heterogeneous questionnaire payloads into one
//! canonical summary, derives expert fields through explicit formulas, and
//! produces a deterministic, explainable approval-risk assessment. Everything
//! in the scoring pipeline is a pure function over immutable inputs; the only
//! I/O lives at the edges (catalog loading, the HTTP router glue).

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
