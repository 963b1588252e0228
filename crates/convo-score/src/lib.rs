//! Deterministic quality scoring for AI-assisted support conversations.
//!
//! The [`scoring`] module holds the engine: a rule-based pipeline turning an ordered
//! [`scoring::Transcript`] into an [`scoring::AnalysisResult`]. The [`conversations`]
//! module wraps it with the storage, service and batch seams a deployment plugs into.

pub mod config;
pub mod conversations;
pub mod error;
pub mod import;
pub mod scoring;
pub mod telemetry;
