use crate::role::Role;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Expected values of every benchmarked sub-metric for one tier and role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkRow {
    pub cs_per_min: f64,
    pub gold_per_min: f64,
    pub vision_per_min: f64,
    pub kill_participation: f64,
    pub damage_share: f64,
    pub kda: f64,
    pub deaths_per_min: f64,
    pub damage_taken_share: f64,
    pub objective_damage_per_min: f64,
    pub heal_shield_per_min: f64,
    pub cc_per_min: f64,
    pub solo_kills: f64,
    pub lane_cs_at_10: f64,
    pub control_wards: f64,
    pub roam_takedowns: f64,
}

impl Default for BenchmarkRow {
    fn default() -> Self {
        Self {
            cs_per_min: 5.5,
            gold_per_min: 370.0,
            vision_per_min: 0.9,
            kill_participation: 0.5,
            damage_share: 0.2,
            kda: 2.8,
            deaths_per_min: 0.18,
            damage_taken_share: 0.2,
            objective_damage_per_min: 200.0,
            heal_shield_per_min: 60.0,
            cc_per_min: 0.7,
            solo_kills: 0.7,
            lane_cs_at_10: 45.0,
            control_wards: 3.0,
            roam_takedowns: 1.0,
        }
    }
}

impl BenchmarkRow {
    /// Scale the row to a stronger (`skill > 1`) or weaker tier. Death rate moves
    /// against skill, shares do not move at all.
    pub fn scaled(&self, skill: f64) -> Self {
        Self {
            cs_per_min: self.cs_per_min * skill,
            gold_per_min: self.gold_per_min * skill,
            vision_per_min: self.vision_per_min * skill,
            kda: self.kda * skill,
            deaths_per_min: self.deaths_per_min / skill,
            objective_damage_per_min: self.objective_damage_per_min * skill,
            heal_shield_per_min: self.heal_shield_per_min * skill,
            cc_per_min: self.cc_per_min * skill,
            lane_cs_at_10: self.lane_cs_at_10 * skill,
            control_wards: self.control_wards * skill,
            ..self.clone()
        }
    }
}

/// A benchmark row resolved for a tier and role.
#[derive(Debug, Clone, Copy)]
pub struct Benchmark<'a> {
    pub row: &'a BenchmarkRow,
    /// The tier/role pair had no row and the default was used
    pub fallback: bool,
}

/// (tier, role) → expected values. Loaded once, shared read-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkTable {
    #[serde(default)]
    tiers: HashMap<String, HashMap<Role, BenchmarkRow>>,
    /// Rows used when a tier is missing, keyed by role
    #[serde(default)]
    defaults: HashMap<Role, BenchmarkRow>,
    #[serde(skip)]
    generic: BenchmarkRow,
}

/// Tiers of the built-in table and their skill factor relative to the defaults
const TIERS: [(&str, f64); 10] = [
    ("IRON", 0.80),
    ("BRONZE", 0.86),
    ("SILVER", 0.93),
    ("GOLD", 1.0),
    ("PLATINUM", 1.04),
    ("EMERALD", 1.07),
    ("DIAMOND", 1.10),
    ("MASTER", 1.14),
    ("GRANDMASTER", 1.16),
    ("CHALLENGER", 1.18),
];

impl BenchmarkTable {
    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        let raw: BenchmarkTable = toml::from_str(contents)?;
        Ok(Self {
            tiers: raw
                .tiers
                .into_iter()
                .map(|(tier, rows)| (tier.to_uppercase(), rows))
                .collect(),
            ..raw
        })
    }

    pub fn builtin() -> Self {
        let defaults = HashMap::from([
            (
                Role::Top,
                BenchmarkRow {
                    cs_per_min: 6.5,
                    gold_per_min: 390.0,
                    vision_per_min: 0.6,
                    kill_participation: 0.45,
                    damage_share: 0.22,
                    kda: 2.5,
                    deaths_per_min: 0.2,
                    damage_taken_share: 0.24,
                    objective_damage_per_min: 260.0,
                    heal_shield_per_min: 20.0,
                    cc_per_min: 0.6,
                    solo_kills: 1.0,
                    lane_cs_at_10: 60.0,
                    control_wards: 2.0,
                    roam_takedowns: 0.5,
                },
            ),
            (
                Role::Jungle,
                BenchmarkRow {
                    cs_per_min: 5.5,
                    gold_per_min: 380.0,
                    vision_per_min: 0.9,
                    kill_participation: 0.6,
                    damage_share: 0.17,
                    kda: 3.0,
                    deaths_per_min: 0.18,
                    damage_taken_share: 0.25,
                    objective_damage_per_min: 420.0,
                    heal_shield_per_min: 30.0,
                    cc_per_min: 0.8,
                    solo_kills: 0.5,
                    lane_cs_at_10: 5.0,
                    control_wards: 4.0,
                    roam_takedowns: 1.0,
                },
            ),
            (
                Role::Mid,
                BenchmarkRow {
                    cs_per_min: 7.0,
                    gold_per_min: 400.0,
                    vision_per_min: 0.6,
                    kill_participation: 0.55,
                    damage_share: 0.25,
                    kda: 2.8,
                    deaths_per_min: 0.18,
                    damage_taken_share: 0.18,
                    objective_damage_per_min: 180.0,
                    heal_shield_per_min: 20.0,
                    cc_per_min: 0.8,
                    solo_kills: 1.0,
                    lane_cs_at_10: 65.0,
                    control_wards: 2.0,
                    roam_takedowns: 2.0,
                },
            ),
            (
                Role::Bot,
                BenchmarkRow {
                    cs_per_min: 7.2,
                    gold_per_min: 410.0,
                    vision_per_min: 0.5,
                    kill_participation: 0.55,
                    damage_share: 0.26,
                    kda: 3.0,
                    deaths_per_min: 0.17,
                    damage_taken_share: 0.15,
                    objective_damage_per_min: 200.0,
                    heal_shield_per_min: 10.0,
                    cc_per_min: 0.3,
                    solo_kills: 0.5,
                    lane_cs_at_10: 62.0,
                    control_wards: 2.0,
                    roam_takedowns: 0.5,
                },
            ),
            (
                Role::Support,
                BenchmarkRow {
                    cs_per_min: 1.2,
                    gold_per_min: 260.0,
                    vision_per_min: 2.0,
                    kill_participation: 0.6,
                    damage_share: 0.1,
                    kda: 3.0,
                    deaths_per_min: 0.18,
                    damage_taken_share: 0.16,
                    objective_damage_per_min: 40.0,
                    heal_shield_per_min: 250.0,
                    cc_per_min: 1.2,
                    solo_kills: 0.2,
                    lane_cs_at_10: 5.0,
                    control_wards: 6.0,
                    roam_takedowns: 3.0,
                },
            ),
        ]);

        let tiers = TIERS
            .iter()
            .map(|(tier, skill)| {
                let rows = defaults
                    .iter()
                    .map(|(role, row)| (*role, row.scaled(*skill)))
                    .collect();
                (tier.to_string(), rows)
            })
            .collect();

        Self {
            tiers,
            defaults,
            generic: BenchmarkRow::default(),
        }
    }

    /// Resolve the row for a tier and role, falling back to the role's default row
    /// and then to the generic row.
    pub fn lookup(&self, tier: &str, role: Role) -> Benchmark<'_> {
        if let Some(row) = self
            .tiers
            .get(&tier.to_uppercase())
            .and_then(|rows| rows.get(&role))
        {
            return Benchmark {
                row,
                fallback: false,
            };
        }
        Benchmark {
            row: self.defaults.get(&role).unwrap_or(&self.generic),
            fallback: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_resolves_known_tiers() {
        let table = BenchmarkTable::builtin();
        let gold = table.lookup("gold", Role::Bot);
        assert!(!gold.fallback);
        assert_eq!(gold.row.cs_per_min, 7.2);

        let diamond = table.lookup("DIAMOND", Role::Bot);
        assert!(diamond.row.cs_per_min > gold.row.cs_per_min);
        assert!(diamond.row.deaths_per_min < gold.row.deaths_per_min);
        assert_eq!(diamond.row.damage_share, gold.row.damage_share);
    }

    #[test]
    fn unknown_tier_falls_back_to_role_default() {
        let table = BenchmarkTable::builtin();
        let benchmark = table.lookup("UNRANKED", Role::Support);
        assert!(benchmark.fallback);
        assert_eq!(benchmark.row.vision_per_min, 2.0);
    }

    #[test]
    fn unknown_role_falls_back_to_generic_row() {
        let table = BenchmarkTable::builtin();
        let benchmark = table.lookup("GOLD", Role::Other);
        assert!(benchmark.fallback);
        assert_eq!(benchmark.row, &BenchmarkRow::default());
    }

    #[test]
    fn loads_partial_rows_from_toml() {
        let table = BenchmarkTable::from_toml(
            r#"
            [tiers.platinum.mid]
            cs_per_min = 8.0

            [defaults.mid]
            cs_per_min = 6.0
            "#,
        )
        .unwrap();
        let platinum = table.lookup("PLATINUM", Role::Mid);
        assert!(!platinum.fallback);
        assert_eq!(platinum.row.cs_per_min, 8.0);
        assert_eq!(platinum.row.kda, BenchmarkRow::default().kda);
        assert_eq!(table.lookup("GOLD", Role::Mid).row.cs_per_min, 6.0);
        assert!(table.lookup("GOLD", Role::Top).fallback);
    }
}
