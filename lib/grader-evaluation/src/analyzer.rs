use crate::archetype::{Archetype, ArchetypeTable};
use crate::composition::TeamCompositionProfile;
use crate::context::{CausalCounters, MatchContext, PlayerContext};
use crate::error::Anomaly;
use crate::role::Role;
use crate::scoring::breakdown::BENCHMARK_DEFAULT;
use crate::scoring::{ScoringEngine, ScoringInput};
use crate::timeline::analyze_timeline;
use grader_model::model::MatchRecord;
use grader_model::timeline::TimelineRecord;
use grader_model::{BLUE_TEAM, RED_TEAM};
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerReport {
    pub participant_id: u32,
    pub champion: String,
    pub role: Role,
    #[serde(rename = "team")]
    pub team_id: u16,
    pub win: bool,
    pub archetype: Archetype,
    pub base_score: f64,
    pub raw_math_score: f64,
    pub final_score: u32,
    pub breakdown: Vec<String>,
    pub markers: Vec<&'static str>,
    pub causal_summary: CausalCounters,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReport {
    pub match_id: Option<String>,
    pub tier: String,
    /// Ordered by participant ID
    pub players: Vec<PlayerReport>,
    pub blue_composition: TeamCompositionProfile,
    pub red_composition: TeamCompositionProfile,
    pub anomalies: Vec<Anomaly>,
}

impl MatchReport {
    pub fn player(&self, participant_id: u32) -> Option<&PlayerReport> {
        self.players
            .iter()
            .find(|player| player.participant_id == participant_id)
    }

    pub fn champion(&self, champion: &str) -> Option<&PlayerReport> {
        let key = champion.to_uppercase();
        self.players.iter().find(|player| player.champion == key)
    }
}

/// Grades every player of a match. Holds only read-only tables, so one instance can
/// be shared across worker threads.
#[derive(Debug, Clone)]
pub struct MatchAnalyzer {
    archetypes: ArchetypeTable,
    engine: ScoringEngine,
}

impl Default for MatchAnalyzer {
    fn default() -> Self {
        Self::new(ArchetypeTable::builtin(), ScoringEngine::default())
    }
}

impl MatchAnalyzer {
    pub fn new(archetypes: ArchetypeTable, engine: ScoringEngine) -> Self {
        Self { archetypes, engine }
    }

    pub fn analyze(&self, record: &MatchRecord, timeline: Option<&TimelineRecord>, tier: &str) -> MatchReport {
        let (mut context, mut anomalies) = MatchContext::build(record);
        debug!(
            match_id = record.match_id.as_deref().unwrap_or("-"),
            players = context.len(),
            "Analyzing match"
        );
        anomalies.extend(analyze_timeline(&mut context, timeline));

        let archetypes: Vec<Option<Archetype>> = context
            .players()
            .iter()
            .map(|player| self.archetypes.classify(&player.champion, player.role))
            .collect();
        for (player, archetype) in context.players().iter().zip(&archetypes) {
            if archetype.is_none() {
                let anomaly = Anomaly::ArchetypeUnknown {
                    champion: player.champion.clone(),
                    role: player.role,
                };
                warn!("{anomaly}");
                anomalies.push(anomaly);
            }
        }

        let composition = |team_id: u16| {
            TeamCompositionProfile::from_archetypes(
                context
                    .players()
                    .iter()
                    .zip(&archetypes)
                    .filter(|(player, _)| player.team_id == team_id)
                    .filter_map(|(_, archetype)| *archetype),
            )
        };
        let blue_composition = composition(BLUE_TEAM);
        let red_composition = composition(RED_TEAM);

        let mut players = Vec::with_capacity(context.len());
        for (player, archetype) in context.players().iter().zip(&archetypes) {
            let enemy_composition = match player.team_id {
                BLUE_TEAM => Some(&red_composition),
                RED_TEAM => Some(&blue_composition),
                _ => None,
            };
            let report = self.score_player(&context, player, *archetype, enemy_composition, tier);

            if report.markers.contains(&BENCHMARK_DEFAULT) {
                let anomaly = Anomaly::MissingBenchmark {
                    tier: tier.to_string(),
                    role: player.role,
                };
                if !anomalies.contains(&anomaly) {
                    warn!("{anomaly}");
                    anomalies.push(anomaly);
                }
            }
            players.push(report);
        }

        MatchReport {
            match_id: record.match_id.clone(),
            tier: tier.to_string(),
            players,
            blue_composition,
            red_composition,
            anomalies,
        }
    }

    fn score_player(
        &self,
        context: &MatchContext,
        player: &PlayerContext,
        archetype: Option<Archetype>,
        enemy_composition: Option<&TeamCompositionProfile>,
        tier: &str,
    ) -> PlayerReport {
        let report = self.engine.score(&ScoringInput {
            player,
            opponent: context.opponent_of(player),
            archetype,
            enemy_composition,
            tier,
        });
        debug!(
            champion = %player.champion,
            role = %player.role,
            base = report.base_score,
            score = report.final_score,
            "Scored player"
        );

        PlayerReport {
            participant_id: player.participant_id,
            champion: player.champion.clone(),
            role: player.role,
            team_id: player.team_id,
            win: player.win,
            archetype: archetype.unwrap_or_default(),
            base_score: report.base_score,
            raw_math_score: report.raw_score,
            final_score: report.final_score,
            breakdown: report.breakdown.iter().map(ToString::to_string).collect(),
            markers: report.markers,
            causal_summary: player.causal.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{kill, ten_player_match, timeline, MINUTE};

    #[test]
    fn reports_every_player_in_order() {
        let record = ten_player_match(1800);
        let report = MatchAnalyzer::default().analyze(&record, None, "GOLD");

        let ids: Vec<u32> = report.players.iter().map(|p| p.participant_id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
        assert_eq!(report.anomalies, vec![Anomaly::MissingTimeline]);
        assert_eq!(report.blue_composition.marksmen, 1);
        assert_eq!(report.red_composition.tanks, 2);
    }

    #[test]
    fn causal_summary_is_carried() {
        let record = ten_player_match(1800);
        let events = timeline(vec![kill(5 * MINUTE, 1, 6, &[])]);
        let report = MatchAnalyzer::default().analyze(&record, Some(&events), "GOLD");

        let ornn = report.champion("ornn").unwrap();
        assert_eq!(ornn.causal_summary.early_solo_deaths, 1);
        assert!(report.anomalies.is_empty());
    }

    #[test]
    fn player_report_serializes_team() {
        let record = ten_player_match(1800);
        let report = MatchAnalyzer::default().analyze(&record, None, "GOLD");
        let json = serde_json::to_value(report.player(7).unwrap()).unwrap();
        assert_eq!(json["team"], 200);
        assert!(json.get("teamId").is_none());
        assert_eq!(json["causalSummary"]["clutchKills"], 0);
    }

    #[test]
    fn unknown_champion_and_tier_are_reported_once() {
        let mut record = ten_player_match(1800);
        record.participants[0].champion = Some("NotAChampion".into());
        let report = MatchAnalyzer::default().analyze(&record, None, "WOOD");

        let unknown = report.player(1).unwrap();
        assert_eq!(unknown.archetype, Archetype::Generic);
        assert!(unknown.markers.contains(&"archetype:generic"));
        assert!(report.anomalies.contains(&Anomaly::ArchetypeUnknown {
            champion: "NOTACHAMPION".into(),
            role: Role::Top,
        }));

        let missing = report
            .anomalies
            .iter()
            .filter(|a| matches!(a, Anomaly::MissingBenchmark { role: Role::Bot, .. }))
            .count();
        assert_eq!(missing, 1);
    }
}
