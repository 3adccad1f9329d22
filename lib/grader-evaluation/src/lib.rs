//! Grading of a completed match: player contexts, causal timeline counters, team
//! composition profiles and the multi-pillar scoring engine.

pub use analyzer::{MatchAnalyzer, MatchReport, PlayerReport};
pub use error::Anomaly;

pub mod analyzer;
pub mod archetype;
pub mod benchmark;
pub mod composition;
pub mod context;
pub mod error;
pub mod role;
pub mod scoring;
pub mod timeline;

#[cfg(test)]
mod test_support;
