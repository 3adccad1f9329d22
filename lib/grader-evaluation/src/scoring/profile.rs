//! Pillar layouts per role, reweighted per archetype.
//!
//! Every weight, sensitivity and expected-value scale lives here as data. The
//! engine only walks the resolved [`RoleProfile`].

use super::metric::Metric;
use crate::archetype::Archetype;
use crate::role::Role;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pillar {
    LaneEconomy,
    Combat,
    Macro,
    Vision,
}

impl Display for Pillar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Pillar::LaneEconomy => "Lane-Economy",
            Pillar::Combat => "Combat",
            Pillar::Macro => "Macro",
            Pillar::Vision => "Vision",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSpec {
    pub metric: Metric,
    pub weight: f64,
    /// Overrides [`Metric::default_sensitivity`]
    #[serde(default)]
    pub sensitivity: Option<f64>,
    /// Multiplier on the benchmark's expected value
    #[serde(default = "one")]
    pub expected_scale: f64,
}

fn one() -> f64 {
    1.0
}

impl MetricSpec {
    pub fn new(metric: Metric, weight: f64) -> Self {
        Self {
            metric,
            weight,
            sensitivity: None,
            expected_scale: 1.0,
        }
    }

    pub fn sensitivity(&self) -> f64 {
        self.sensitivity
            .filter(|sensitivity| *sensitivity > 0.0)
            .unwrap_or_else(|| self.metric.default_sensitivity())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PillarSpec {
    pub pillar: Pillar,
    pub weight: f64,
    pub metrics: Vec<MetricSpec>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RoleProfile {
    pub pillars: Vec<PillarSpec>,
}

impl RoleProfile {
    fn contains(&self, metric: Metric) -> bool {
        self.pillars
            .iter()
            .any(|pillar| pillar.metrics.iter().any(|spec| spec.metric == metric))
    }

    fn apply(&self, overlay: &ArchetypeOverlay) -> Self {
        let mut profile = self.clone();
        for pillar in &mut profile.pillars {
            if let Some((_, scale)) = overlay.pillars.iter().find(|(p, _)| *p == pillar.pillar) {
                pillar.weight *= scale;
            }
            for spec in &mut pillar.metrics {
                if let Some(adjustment) = overlay.adjustments.iter().find(|a| a.metric == spec.metric) {
                    spec.weight *= adjustment.weight_scale;
                    spec.expected_scale *= adjustment.expected_scale;
                }
            }
        }
        for (target, extra) in &overlay.extras {
            if profile.contains(extra.metric) {
                continue;
            }
            if let Some(pillar) = profile.pillars.iter_mut().find(|p| p.pillar == *target) {
                pillar.metrics.push(extra.clone());
            }
        }
        profile
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricAdjustment {
    pub metric: Metric,
    #[serde(default = "one")]
    pub weight_scale: f64,
    #[serde(default = "one")]
    pub expected_scale: f64,
}

/// How an archetype bends a role's profile: scaled metrics, metrics the role would
/// not otherwise grade, and scaled pillars.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArchetypeOverlay {
    #[serde(default)]
    pub adjustments: Vec<MetricAdjustment>,
    #[serde(default)]
    pub extras: Vec<(Pillar, MetricSpec)>,
    #[serde(default)]
    pub pillars: Vec<(Pillar, f64)>,
}

/// Resolved profiles for every role × archetype pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringTable {
    profiles: HashMap<(Role, Archetype), RoleProfile>,
    fallback: RoleProfile,
}

impl Default for ScoringTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ScoringTable {
    /// Combine every role layout with every archetype overlay. Archetypes without an
    /// overlay, including [`Archetype::Generic`], use the role layout as is.
    pub fn new(roles: HashMap<Role, RoleProfile>, overlays: HashMap<Archetype, ArchetypeOverlay>) -> Self {
        const ARCHETYPES: [Archetype; 7] = [
            Archetype::Tank,
            Archetype::Assassin,
            Archetype::Enchanter,
            Archetype::Mage,
            Archetype::Fighter,
            Archetype::Marksman,
            Archetype::Generic,
        ];
        let mut profiles = HashMap::with_capacity(roles.len() * ARCHETYPES.len());
        for (role, base) in &roles {
            for archetype in ARCHETYPES {
                let profile = match overlays.get(&archetype) {
                    Some(overlay) => base.apply(overlay),
                    None => base.clone(),
                };
                profiles.insert((*role, archetype), profile);
            }
        }
        let fallback = roles.get(&Role::Other).cloned().unwrap_or_default();
        Self { profiles, fallback }
    }

    pub fn profile(&self, role: Role, archetype: Archetype) -> &RoleProfile {
        self.profiles
            .get(&(role, archetype))
            .or_else(|| self.profiles.get(&(Role::Other, archetype)))
            .unwrap_or(&self.fallback)
    }

    pub fn builtin() -> Self {
        Self::new(builtin_roles(), builtin_overlays())
    }

    /// Parse a TOML profile file of the form
    ///
    /// ```toml
    /// [[roles.support.pillars]]
    /// pillar = "vision"
    /// weight = 0.5
    /// metrics = [{ metric = "vision_per_min", weight = 1.0, sensitivity = 0.3 }]
    ///
    /// [overlays.enchanter]
    /// adjustments = [{ metric = "heal_shield_per_min", weight_scale = 2.5 }]
    /// ```
    ///
    /// Roles and archetypes named in the file replace the built-in entries.
    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        let file: ProfileFile = toml::from_str(contents)?;
        let mut roles = builtin_roles();
        roles.extend(file.roles);
        let mut overlays = builtin_overlays();
        overlays.extend(file.overlays);
        Ok(Self::new(roles, overlays))
    }
}

#[derive(Debug, Deserialize)]
struct ProfileFile {
    #[serde(default)]
    roles: HashMap<Role, RoleProfile>,
    #[serde(default)]
    overlays: HashMap<Archetype, ArchetypeOverlay>,
}

fn builtin_roles() -> HashMap<Role, RoleProfile> {
    use Metric::*;
    use Pillar::*;

    HashMap::from([
        (
            Role::Top,
            layout(&[
                (LaneEconomy, 0.35, &[(CsPerMin, 1.0), (GoldPerMin, 1.0), (CsDiffPerMin, 1.0), (LaneCsAt10, 0.5)]),
                (Combat, 0.35, &[(Kda, 1.0), (KillParticipation, 0.8), (DamageShare, 1.0), (DeathsPerMin, 1.0), (SoloKills, 0.8)]),
                (Macro, 0.30, &[(ObjectiveDamagePerMin, 1.2), (DamageTakenShare, 0.8), (VisionPerMin, 0.6)]),
            ]),
        ),
        (
            Role::Jungle,
            layout(&[
                (LaneEconomy, 0.25, &[(GoldPerMin, 1.0), (CsPerMin, 0.8), (GoldDiffPerMin, 1.0)]),
                (Combat, 0.35, &[(Kda, 1.0), (KillParticipation, 1.2), (DeathsPerMin, 0.8), (DamageShare, 0.6)]),
                (Macro, 0.40, &[(ObjectiveDamagePerMin, 1.2), (VisionPerMin, 1.0), (ControlWards, 0.5), (RoamTakedowns, 0.3)]),
            ]),
        ),
        (
            Role::Mid,
            layout(&[
                (LaneEconomy, 0.35, &[(CsPerMin, 1.0), (GoldPerMin, 1.0), (CsDiffPerMin, 1.0), (LaneCsAt10, 0.5)]),
                (Combat, 0.40, &[(Kda, 1.0), (KillParticipation, 1.0), (DamageShare, 1.2), (DeathsPerMin, 1.0), (SoloKills, 0.6)]),
                (Macro, 0.25, &[(RoamTakedowns, 1.0), (VisionPerMin, 0.8), (ObjectiveDamagePerMin, 0.6)]),
            ]),
        ),
        (
            Role::Bot,
            layout(&[
                (LaneEconomy, 0.40, &[(CsPerMin, 1.0), (GoldPerMin, 1.0), (CsDiffPerMin, 1.0), (LaneCsAt10, 0.5)]),
                (Combat, 0.45, &[(Kda, 1.0), (KillParticipation, 1.0), (DamageShare, 1.0), (DeathsPerMin, 1.0)]),
                (Macro, 0.15, &[(ObjectiveDamagePerMin, 1.0), (VisionPerMin, 1.0)]),
            ]),
        ),
        (
            Role::Support,
            layout(&[
                (Vision, 0.35, &[(VisionPerMin, 1.5), (ControlWards, 0.7), (VisionDiffPerMin, 0.8)]),
                (Combat, 0.40, &[(KillParticipation, 1.0), (Kda, 0.8), (DeathsPerMin, 0.8), (HealShieldPerMin, 0.6), (CcPerMin, 0.6)]),
                (Macro, 0.25, &[(RoamTakedowns, 0.8), (GoldPerMin, 0.4)]),
            ]),
        ),
        (
            Role::Other,
            layout(&[
                (LaneEconomy, 1.0, &[(GoldPerMin, 1.0), (CsPerMin, 1.0)]),
                (Combat, 1.0, &[(Kda, 1.0), (KillParticipation, 1.0), (DamageShare, 1.0), (DeathsPerMin, 1.0)]),
                (Macro, 1.0, &[(VisionPerMin, 1.0), (ObjectiveDamagePerMin, 1.0)]),
            ]),
        ),
    ])
}

fn builtin_overlays() -> HashMap<Archetype, ArchetypeOverlay> {
    use Metric::*;
    use Pillar::*;

    HashMap::from([
        (
            Archetype::Tank,
            overlay(
                &[(DamageShare, 0.5, 0.7), (Kda, 1.0, 0.85), (DeathsPerMin, 0.8, 1.0)],
                &[(Combat, DamageTakenShare, 1.5), (Combat, CcPerMin, 1.0)],
            ),
        ),
        (
            Archetype::Enchanter,
            overlay(
                &[(DamageShare, 0.3, 0.6), (Kda, 0.8, 1.0), (HealShieldPerMin, 2.0, 1.0)],
                &[(Combat, HealShieldPerMin, 1.5)],
            ),
        ),
        (
            Archetype::Mage,
            overlay(
                &[(DamageShare, 1.3, 1.05), (HealShieldPerMin, 0.3, 1.0)],
                &[(Combat, CcPerMin, 0.5)],
            ),
        ),
        (
            Archetype::Assassin,
            overlay(
                &[(SoloKills, 1.5, 1.0), (Kda, 1.2, 1.0), (DeathsPerMin, 1.2, 1.0), (RoamTakedowns, 1.3, 1.0)],
                &[(Combat, SoloKills, 1.0)],
            ),
        ),
        (
            Archetype::Fighter,
            overlay(
                &[(DamageTakenShare, 1.2, 1.0), (SoloKills, 1.2, 1.0), (ObjectiveDamagePerMin, 1.2, 1.0)],
                &[(Combat, DamageTakenShare, 0.8)],
            ),
        ),
        (
            Archetype::Marksman,
            overlay(
                &[(DamageShare, 1.3, 1.1), (CsPerMin, 1.2, 1.0), (DeathsPerMin, 1.2, 1.0)],
                &[],
            ),
        ),
    ])
}

type PillarLayout<'a> = (Pillar, f64, &'a [(Metric, f64)]);

fn layout(pillars: &[PillarLayout]) -> RoleProfile {
    RoleProfile {
        pillars: pillars
            .iter()
            .map(|(pillar, weight, metrics)| PillarSpec {
                pillar: *pillar,
                weight: *weight,
                metrics: metrics
                    .iter()
                    .map(|(metric, weight)| MetricSpec::new(*metric, *weight))
                    .collect(),
            })
            .collect(),
    }
}

fn overlay(adjustments: &[(Metric, f64, f64)], extras: &[(Pillar, Metric, f64)]) -> ArchetypeOverlay {
    ArchetypeOverlay {
        adjustments: adjustments
            .iter()
            .map(|(metric, weight_scale, expected_scale)| MetricAdjustment {
                metric: *metric,
                weight_scale: *weight_scale,
                expected_scale: *expected_scale,
            })
            .collect(),
        extras: extras
            .iter()
            .map(|(pillar, metric, weight)| (*pillar, MetricSpec::new(*metric, *weight)))
            .collect(),
        pillars: Vec::new(),
    }
}
