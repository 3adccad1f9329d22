use crate::benchmark::BenchmarkRow;
use crate::context::PlayerContext;
use serde::{Deserialize, Serialize};

/// Points a sub-score moves per sensitivity unit of deviation from the benchmark
pub const CURVE_SCALE: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    CsPerMin,
    GoldPerMin,
    VisionPerMin,
    KillParticipation,
    DamageShare,
    Kda,
    DeathsPerMin,
    DamageTakenShare,
    ObjectiveDamagePerMin,
    HealShieldPerMin,
    CcPerMin,
    SoloKills,
    LaneCsAt10,
    ControlWards,
    RoamTakedowns,
    /// CS/min minus the lane opponent's
    CsDiffPerMin,
    /// Gold/min minus the lane opponent's
    GoldDiffPerMin,
    /// Vision/min minus the lane opponent's
    VisionDiffPerMin,
}

impl Metric {
    pub fn label(self) -> &'static str {
        match self {
            Metric::CsPerMin => "CS/min",
            Metric::GoldPerMin => "Gold/min",
            Metric::VisionPerMin => "Vision/min",
            Metric::KillParticipation => "Kill participation",
            Metric::DamageShare => "Damage share",
            Metric::Kda => "KDA",
            Metric::DeathsPerMin => "Deaths/min",
            Metric::DamageTakenShare => "Damage taken share",
            Metric::ObjectiveDamagePerMin => "Objective damage/min",
            Metric::HealShieldPerMin => "Heal+shield/min",
            Metric::CcPerMin => "CC s/min",
            Metric::SoloKills => "Solo kills",
            Metric::LaneCsAt10 => "Lane CS@10",
            Metric::ControlWards => "Control wards",
            Metric::RoamTakedowns => "Roam takedowns",
            Metric::CsDiffPerMin => "CS/min vs opponent",
            Metric::GoldDiffPerMin => "Gold/min vs opponent",
            Metric::VisionDiffPerMin => "Vision/min vs opponent",
        }
    }

    pub fn lower_is_better(self) -> bool {
        matches!(self, Metric::DeathsPerMin)
    }

    pub fn is_opponent_relative(self) -> bool {
        matches!(
            self,
            Metric::CsDiffPerMin | Metric::GoldDiffPerMin | Metric::VisionDiffPerMin
        )
    }

    /// Deviation from the expected value that is worth [`CURVE_SCALE`] points.
    pub fn default_sensitivity(self) -> f64 {
        match self {
            Metric::CsPerMin => 0.8,
            Metric::GoldPerMin => 45.0,
            Metric::VisionPerMin => 0.25,
            Metric::KillParticipation => 0.08,
            Metric::DamageShare => 0.04,
            Metric::Kda => 1.0,
            Metric::DeathsPerMin => 0.06,
            Metric::DamageTakenShare => 0.04,
            Metric::ObjectiveDamagePerMin => 120.0,
            Metric::HealShieldPerMin => 80.0,
            Metric::CcPerMin => 0.4,
            Metric::SoloKills => 1.0,
            Metric::LaneCsAt10 => 10.0,
            Metric::ControlWards => 2.0,
            Metric::RoamTakedowns => 1.5,
            Metric::CsDiffPerMin => 0.8,
            Metric::GoldDiffPerMin => 40.0,
            Metric::VisionDiffPerMin => 0.3,
        }
    }

    /// Opponent-relative metrics expect parity.
    pub fn expected(self, row: &BenchmarkRow) -> f64 {
        match self {
            Metric::CsPerMin => row.cs_per_min,
            Metric::GoldPerMin => row.gold_per_min,
            Metric::VisionPerMin => row.vision_per_min,
            Metric::KillParticipation => row.kill_participation,
            Metric::DamageShare => row.damage_share,
            Metric::Kda => row.kda,
            Metric::DeathsPerMin => row.deaths_per_min,
            Metric::DamageTakenShare => row.damage_taken_share,
            Metric::ObjectiveDamagePerMin => row.objective_damage_per_min,
            Metric::HealShieldPerMin => row.heal_shield_per_min,
            Metric::CcPerMin => row.cc_per_min,
            Metric::SoloKills => row.solo_kills,
            Metric::LaneCsAt10 => row.lane_cs_at_10,
            Metric::ControlWards => row.control_wards,
            Metric::RoamTakedowns => row.roam_takedowns,
            Metric::CsDiffPerMin | Metric::GoldDiffPerMin | Metric::VisionDiffPerMin => 0.0,
        }
    }

    /// The player's value for this metric. `None` disables the metric: no lane
    /// opponent for opponent-relative metrics, or no advanced bag for metrics only
    /// found there.
    pub fn actual(self, player: &PlayerContext, opponent: Option<&PlayerContext>) -> Option<f64> {
        let stats = &player.stats;
        let value = match self {
            Metric::CsPerMin => stats.cs_per_min,
            Metric::GoldPerMin => stats.gold_per_min,
            Metric::VisionPerMin => stats.vision_per_min,
            Metric::KillParticipation => stats.kill_participation,
            Metric::DamageShare => stats.damage_share,
            Metric::Kda => stats.kda(),
            Metric::DeathsPerMin => stats.deaths_per_min(),
            Metric::DamageTakenShare => stats.damage_taken_share,
            Metric::ObjectiveDamagePerMin => stats.per_minute(stats.damage_to_objectives as f64),
            Metric::HealShieldPerMin => stats.per_minute(stats.heal_and_shield as f64),
            Metric::CcPerMin => stats.per_minute(stats.cc_seconds as f64),
            Metric::SoloKills if stats.has_advanced => stats.advanced.solo_kills as f64,
            Metric::LaneCsAt10 if stats.has_advanced => {
                stats.advanced.lane_minions_first_10_minutes as f64
            }
            Metric::SoloKills | Metric::LaneCsAt10 => return None,
            Metric::ControlWards => stats.control_wards as f64,
            Metric::RoamTakedowns => player.causal.early_roam_takedowns as f64,
            Metric::CsDiffPerMin => stats.cs_per_min - opponent?.stats.cs_per_min,
            Metric::GoldDiffPerMin => stats.gold_per_min - opponent?.stats.gold_per_min,
            Metric::VisionDiffPerMin => stats.vision_per_min - opponent?.stats.vision_per_min,
        };
        value.is_finite().then_some(value)
    }
}

/// Grade a value relative to its benchmark:
/// `clamp(50 + (actual - expected) / sensitivity * CURVE_SCALE, 0, 100)`.
pub fn sub_score(actual: f64, expected: f64, sensitivity: f64, lower_is_better: bool) -> f64 {
    let deviation = if lower_is_better {
        expected - actual
    } else {
        actual - expected
    };
    (50.0 + deviation / sensitivity * CURVE_SCALE).clamp(0.0, 100.0)
}
