use crate::role::Role;
use serde::Serialize;
use thiserror::Error;

/// Non-fatal problems noticed while analysing a match. The pipeline keeps going
/// with a degraded result and reports these alongside it.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Anomaly {
    #[error("malformed input: participant #{index} skipped ({reason})")]
    MalformedInput { index: usize, reason: String },
    #[error("team {team_id} has {size} players")]
    UnevenTeams { team_id: u16, size: usize },
    #[error("timeline missing, causal counters left at zero")]
    MissingTimeline,
    #[error("no benchmark for {tier}/{role}, default row used")]
    MissingBenchmark { tier: String, role: Role },
    #[error("{champion} ({role}) has no archetype, generic weights used")]
    ArchetypeUnknown { champion: String, role: Role },
}

impl Anomaly {
    pub(crate) fn malformed(index: usize, reason: impl Into<String>) -> Self {
        Anomaly::MalformedInput {
            index,
            reason: reason.into(),
        }
    }
}
