use serde::{Deserialize, Serialize};

/// Constants of the post-processing applied after pillar aggregation. Every field
/// can be overridden from the `[rules]` table of the configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRules {
    pub min_score: f64,
    /// May exceed 100 to signal games that beat expectations
    pub max_score: f64,

    pub victory_bonus: f64,
    pub clutch_kill_bonus: f64,
    pub pick_off_bonus: f64,
    pub unforced_error_penalty: f64,
    pub early_solo_death_penalty: f64,
    /// Per late-game death, only applied to losses
    pub late_throw_penalty: f64,
    pub comeback_bonus: f64,

    pub terminator_net_kills: i64,
    pub terminator_base: f64,
    pub terminator_per_kill: f64,
    pub terminator_cap: f64,

    pub tyrant_bonus: f64,
    pub tyrant_cs_lead_per_min: f64,
    pub tyrant_max_cs_advantage: f64,
    pub tyrant_solo_kills: u32,
    pub tyrant_objective_damage_per_min: f64,

    pub smother_bonus: f64,
    /// Opponent gold/min at or below this fraction of the benchmark counts as smothered
    pub smother_gold_ratio: f64,

    pub blind_penalty: f64,
    pub blind_min_minutes: f64,
    pub blind_vision_per_min: f64,

    pub hypercarry_bonus: f64,
    pub hypercarry_damage_share: f64,
    pub hypercarry_max_deaths: u32,

    pub frontline_bonus: f64,
    pub frontline_damage_taken_share: f64,
    pub frontline_kill_participation: f64,

    pub dive_survivor_bonus: f64,
    pub dive_survivor_enemy_burst: f64,

    pub enchanter_cap: f64,

    pub exceptional_kda: f64,
    pub exceptional_kill_participation: f64,
    pub exceptional_floor: f64,
    pub solid_kda: f64,
    pub solid_kill_participation: f64,
    pub solid_floor: f64,

    pub soft_cap_threshold: f64,
    pub soft_cap_scale: f64,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            min_score: 0.0,
            max_score: 110.0,

            victory_bonus: 3.0,
            clutch_kill_bonus: 2.0,
            pick_off_bonus: 1.0,
            unforced_error_penalty: 3.0,
            early_solo_death_penalty: 1.0,
            late_throw_penalty: 1.5,
            comeback_bonus: 3.0,

            terminator_net_kills: 6,
            terminator_base: 3.0,
            terminator_per_kill: 0.5,
            terminator_cap: 8.0,

            tyrant_bonus: 4.0,
            tyrant_cs_lead_per_min: 1.0,
            tyrant_max_cs_advantage: 20.0,
            tyrant_solo_kills: 2,
            tyrant_objective_damage_per_min: 400.0,

            smother_bonus: 3.0,
            smother_gold_ratio: 0.85,

            blind_penalty: 6.0,
            blind_min_minutes: 30.0,
            blind_vision_per_min: 1.0,

            hypercarry_bonus: 3.0,
            hypercarry_damage_share: 0.30,
            hypercarry_max_deaths: 3,

            frontline_bonus: 2.0,
            frontline_damage_taken_share: 0.28,
            frontline_kill_participation: 0.5,

            dive_survivor_bonus: 2.0,
            dive_survivor_enemy_burst: 0.6,

            enchanter_cap: 88.0,

            exceptional_kda: 4.0,
            exceptional_kill_participation: 0.5,
            exceptional_floor: 55.0,
            solid_kda: 2.5,
            solid_kill_participation: 0.4,
            solid_floor: 40.0,

            soft_cap_threshold: 95.0,
            soft_cap_scale: 5.0,
        }
    }
}

impl ScoringRules {
    /// Logarithmic compression above the threshold, so scores do not pile up at
    /// the ceiling.
    pub fn soft_cap(&self, score: f64) -> f64 {
        if score <= self.soft_cap_threshold || self.soft_cap_scale <= 0.0 {
            return score;
        }
        let excess = score - self.soft_cap_threshold;
        self.soft_cap_threshold + self.soft_cap_scale * (excess / self.soft_cap_scale).ln_1p()
    }

    /// Terminator bonus for a net kill count, zero at or below the threshold.
    pub fn terminator(&self, net_kills: i64) -> f64 {
        let excess = net_kills - self.terminator_net_kills;
        if excess <= 0 {
            return 0.0;
        }
        (self.terminator_base + self.terminator_per_kill * excess as f64).min(self.terminator_cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn soft_cap_only_compresses_above_threshold() {
        let rules = ScoringRules::default();
        assert_eq!(rules.soft_cap(80.0), 80.0);
        assert_eq!(rules.soft_cap(95.0), 95.0);
        let capped = rules.soft_cap(110.0);
        assert!(capped > 95.0 && capped < 110.0);
        assert!(rules.soft_cap(120.0) > capped);
    }

    #[test]
    fn terminator_scales_with_excess() {
        let rules = ScoringRules::default();
        assert_eq!(rules.terminator(6), 0.0);
        assert_eq!(rules.terminator(7), 3.5);
        assert_eq!(rules.terminator(8), 4.0);
        assert_eq!(rules.terminator(40), rules.terminator_cap);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let rules: ScoringRules = toml::from_str("exceptional_floor = 60.0").unwrap();
        assert_eq!(rules.exceptional_floor, 60.0);
        assert_eq!(rules.solid_floor, 40.0);
    }
}
