//! Role- and archetype-aware grading of a single player.
//!
//! A score starts as the weighted mean of the role's pillars, each the weighted mean
//! of its sub-metric scores. Outcome, causal, archetype, floor, soft-cap and clamp
//! rules then adjust it in that order, each leaving exactly one breakdown line.

use crate::archetype::Archetype;
use crate::benchmark::{BenchmarkRow, BenchmarkTable};
use crate::composition::TeamCompositionProfile;
use crate::context::PlayerContext;
use crate::role::Role;
use breakdown::{BreakdownLine, ARCHETYPE_GENERIC, BENCHMARK_DEFAULT, OPPONENT_NONE};
use metric::sub_score;
use profile::ScoringTable;
use rules::ScoringRules;
use serde::Serialize;

pub mod breakdown;
pub mod metric;
pub mod profile;
pub mod rules;

/// Score of a pillar with no enabled metric, and of a profile with no pillar
const NEUTRAL_SCORE: f64 = 50.0;

#[derive(Debug, Clone, Copy)]
pub struct ScoringInput<'a> {
    pub player: &'a PlayerContext,
    /// Lane opponent. Without one, only the opponent-relative metrics are disabled.
    pub opponent: Option<&'a PlayerContext>,
    /// `None` when the champion could not be classified
    pub archetype: Option<Archetype>,
    pub enemy_composition: Option<&'a TeamCompositionProfile>,
    pub tier: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    pub base_score: f64,
    /// Score after every adjustment and the final clamp, before rounding
    pub raw_score: f64,
    pub final_score: u32,
    pub breakdown: Vec<BreakdownLine>,
    /// Degraded parts of the computation, also present as breakdown lines
    pub markers: Vec<&'static str>,
}

impl ScoreReport {
    pub fn has_marker(&self, marker: &str) -> bool {
        self.markers.iter().any(|m| *m == marker)
    }
}

/// Running score plus the lines explaining it.
struct Tally {
    score: f64,
    lines: Vec<BreakdownLine>,
}

impl Tally {
    fn adjust(&mut self, rule: &'static str, raw: f64, delta: f64) {
        if delta == 0.0 || !delta.is_finite() {
            return;
        }
        self.score += delta;
        self.lines.push(BreakdownLine::Adjustment {
            rule,
            raw,
            delta,
            score: self.score,
        });
    }

    fn set(&mut self, rule: &'static str, raw: f64, target: f64) {
        let delta = target - self.score;
        if delta == 0.0 || !target.is_finite() {
            return;
        }
        self.score = target;
        self.lines.push(BreakdownLine::Adjustment {
            rule,
            raw,
            delta,
            score: target,
        });
    }

    fn raise_to(&mut self, rule: &'static str, raw: f64, floor: f64) {
        if self.score < floor {
            self.set(rule, raw, floor);
        }
    }

    fn lower_to(&mut self, rule: &'static str, raw: f64, cap: f64) {
        if self.score > cap {
            self.set(rule, raw, cap);
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScoringEngine {
    table: ScoringTable,
    benchmarks: BenchmarkTable,
    rules: ScoringRules,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new(BenchmarkTable::builtin(), ScoringRules::default())
    }
}

impl ScoringEngine {
    pub fn new(benchmarks: BenchmarkTable, rules: ScoringRules) -> Self {
        Self {
            table: ScoringTable::builtin(),
            benchmarks,
            rules,
        }
    }

    pub fn with_table(mut self, table: ScoringTable) -> Self {
        self.table = table;
        self
    }

    pub fn score(&self, input: &ScoringInput) -> ScoreReport {
        let archetype = input.archetype.unwrap_or_default();
        let benchmark = self.benchmarks.lookup(input.tier, input.player.role);

        let mut markers = Vec::new();
        if benchmark.fallback {
            markers.push(BENCHMARK_DEFAULT);
        }
        if input.archetype.is_none() {
            markers.push(ARCHETYPE_GENERIC);
        }
        if input.opponent.is_none() {
            markers.push(OPPONENT_NONE);
        }

        let mut lines: Vec<BreakdownLine> = markers.iter().copied().map(BreakdownLine::Marker).collect();
        let base_score = self.aggregate_pillars(input, archetype, benchmark.row, &mut lines);
        lines.push(BreakdownLine::Base { score: base_score });

        let mut tally = Tally {
            score: base_score,
            lines,
        };
        self.apply_causal(input.player, &mut tally);
        self.apply_archetype_rules(input, archetype, benchmark.row, &mut tally);
        self.apply_floors(input.player, &mut tally);

        let rules = &self.rules;
        let soft_capped = rules.soft_cap(tally.score);
        tally.set("Soft cap", tally.score, soft_capped);
        let min = rules.min_score.max(0.0);
        let max = rules.max_score.max(min);
        tally.set("Clamp", tally.score, tally.score.clamp(min, max));

        ScoreReport {
            base_score,
            raw_score: tally.score,
            final_score: tally.score.round() as u32,
            breakdown: tally.lines,
            markers,
        }
    }

    fn aggregate_pillars(
        &self,
        input: &ScoringInput,
        archetype: Archetype,
        row: &BenchmarkRow,
        lines: &mut Vec<BreakdownLine>,
    ) -> f64 {
        let profile = self.table.profile(input.player.role, archetype);
        let (mut total, mut total_weight) = (0.0, 0.0);

        for pillar in &profile.pillars {
            let mut metric_lines = Vec::with_capacity(pillar.metrics.len());
            let (mut sum, mut weight_sum) = (0.0, 0.0);
            for spec in &pillar.metrics {
                let Some(actual) = spec.metric.actual(input.player, input.opponent) else {
                    continue;
                };
                let expected = spec.metric.expected(row) * spec.expected_scale;
                let score = sub_score(
                    actual,
                    expected,
                    spec.sensitivity(),
                    spec.metric.lower_is_better(),
                );
                sum += score * spec.weight;
                weight_sum += spec.weight;
                metric_lines.push(BreakdownLine::SubMetric {
                    metric: spec.metric,
                    actual,
                    expected,
                    score,
                });
            }
            if weight_sum <= 0.0 {
                continue;
            }

            let score = sum / weight_sum;
            lines.push(BreakdownLine::Pillar {
                pillar: pillar.pillar,
                weight: pillar.weight,
                score,
            });
            lines.append(&mut metric_lines);
            total += score * pillar.weight;
            total_weight += pillar.weight;
        }

        if total_weight > 0.0 {
            total / total_weight
        } else {
            NEUTRAL_SCORE
        }
    }

    fn apply_causal(&self, player: &PlayerContext, tally: &mut Tally) {
        let rules = &self.rules;
        let causal = &player.causal;
        let stats = &player.stats;

        if player.win {
            tally.adjust("Victory", 1.0, rules.victory_bonus);
        }

        let clutch = causal.clutch_kills as f64;
        tally.adjust("Clutch kills", clutch, clutch * rules.clutch_kill_bonus);
        let pick_offs = causal.pick_offs as f64;
        tally.adjust("Pick-offs", pick_offs, pick_offs * rules.pick_off_bonus);
        let unforced = causal.unforced_error_deaths as f64;
        tally.adjust(
            "Unforced-error deaths",
            unforced,
            -unforced * rules.unforced_error_penalty,
        );
        let early_solo = causal.early_solo_deaths as f64;
        tally.adjust(
            "Early solo deaths",
            early_solo,
            -early_solo * rules.early_solo_death_penalty,
        );
        if !player.win {
            let late = causal.late_game_deaths as f64;
            tally.adjust("Late-game throws", late, -late * rules.late_throw_penalty);
        }
        if player.win && causal.is_heavy_losing_early {
            tally.adjust("Comeback", 1.0, rules.comeback_bonus);
        }

        let net_kills = i64::from(stats.kills) - i64::from(stats.deaths);
        tally.adjust("Terminator", net_kills as f64, rules.terminator(net_kills));
    }

    fn apply_archetype_rules(
        &self,
        input: &ScoringInput,
        archetype: Archetype,
        row: &BenchmarkRow,
        tally: &mut Tally,
    ) {
        let rules = &self.rules;
        let stats = &input.player.stats;

        match input.player.role {
            Role::Top => {
                let cs_lead = input
                    .opponent
                    .map(|opponent| stats.cs_per_min - opponent.stats.cs_per_min);
                let dominating = stats.advanced.solo_kills >= rules.tyrant_solo_kills
                    || cs_lead.is_some_and(|lead| lead >= rules.tyrant_cs_lead_per_min)
                    || stats.advanced.max_cs_advantage_on_lane_opponent >= rules.tyrant_max_cs_advantage;
                let objective_damage = stats.per_minute(stats.damage_to_objectives as f64);
                if dominating && objective_damage >= rules.tyrant_objective_damage_per_min {
                    tally.adjust("Tyrant", objective_damage, rules.tyrant_bonus);
                }
            }
            Role::Jungle => {
                if let Some(opponent) = input.opponent {
                    let opponent_gold = opponent.stats.gold_per_min;
                    if opponent_gold <= rules.smother_gold_ratio * row.gold_per_min
                        && stats.gold_per_min > opponent_gold
                    {
                        tally.adjust("Smother", opponent_gold, rules.smother_bonus);
                    }
                }
            }
            Role::Support => {
                if stats.minutes >= rules.blind_min_minutes
                    && stats.vision_per_min < rules.blind_vision_per_min
                {
                    tally.adjust("Blind", stats.vision_per_min, -rules.blind_penalty);
                }
            }
            Role::Mid | Role::Bot | Role::Other => {}
        }

        match archetype {
            Archetype::Marksman
                if stats.damage_share >= rules.hypercarry_damage_share
                    && stats.deaths <= rules.hypercarry_max_deaths =>
            {
                tally.adjust("Hypercarry", stats.damage_share, rules.hypercarry_bonus);
            }
            Archetype::Tank
                if stats.damage_taken_share >= rules.frontline_damage_taken_share
                    && stats.kill_participation >= rules.frontline_kill_participation =>
            {
                tally.adjust("Frontline", stats.damage_taken_share, rules.frontline_bonus);
            }
            _ => {}
        }

        if let Some(enemy) = input.enemy_composition {
            let squishy = matches!(
                archetype,
                Archetype::Marksman | Archetype::Mage | Archetype::Enchanter
            );
            if squishy
                && enemy.burst >= rules.dive_survivor_enemy_burst
                && stats.deaths_per_min() <= row.deaths_per_min
            {
                tally.adjust("Dive survivor", enemy.burst, rules.dive_survivor_bonus);
            }
        }

        if archetype == Archetype::Enchanter {
            tally.lower_to("Enchanter glass ceiling", tally.score, rules.enchanter_cap);
        }
    }

    fn apply_floors(&self, player: &PlayerContext, tally: &mut Tally) {
        let rules = &self.rules;
        let kda = player.stats.kda();
        let kill_participation = player.stats.kill_participation;

        if kda >= rules.exceptional_kda && kill_participation >= rules.exceptional_kill_participation {
            tally.raise_to("Exceptional floor", kda, rules.exceptional_floor);
        } else if kda >= rules.solid_kda && kill_participation >= rules.solid_kill_participation {
            tally.raise_to("Solid floor", kda, rules.solid_floor);
        }
    }
}
