use riven::consts::Champion;
use serde::{Deserialize, Serialize};

/// One completed game.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchRecord {
    pub match_id: Option<String>,
    /// Game length in seconds
    pub duration: i64,
    pub game_mode: String,
    pub game_version: String,
    pub participants: Vec<ParticipantStats>,
}

impl MatchRecord {
    pub fn duration_minutes(&self) -> f64 {
        self.duration.max(0) as f64 / 60.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParticipantStats {
    pub id: Option<u32>,
    pub champion: Option<String>,
    pub champion_id: Option<i16>,
    /// Position as reported by the API (`TOP`, `JUNGLE`, `MIDDLE`, `BOTTOM`, `UTILITY`)
    #[serde(alias = "teamPosition")]
    pub role: Option<String>,
    pub team_id: Option<u16>,
    pub win: bool,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    #[serde(alias = "goldEarned")]
    pub gold: u32,
    /// Lane minions killed
    #[serde(alias = "totalMinionsKilled")]
    pub cs: u32,
    #[serde(alias = "neutralMinionsKilled")]
    pub neutral_cs: u32,
    pub vision_score: f64,
    pub items: Vec<u32>,
    #[serde(alias = "totalDamageDealtToChampions")]
    pub damage_to_champions: u64,
    #[serde(alias = "totalDamageTaken")]
    pub damage_taken: u64,
    pub damage_to_objectives: u64,
    pub damage_to_buildings: u64,
    #[serde(alias = "totalHealsOnTeammates")]
    pub heal_on_teammates: u64,
    #[serde(alias = "totalDamageShieldedOnTeammates")]
    pub shield_on_teammates: u64,
    pub time_ccing_others: u64,
    pub wards_placed: u32,
    pub wards_killed: u32,
    #[serde(alias = "detectorWardsPlaced")]
    pub control_wards_placed: u32,
    #[serde(alias = "challenges")]
    pub advanced: Option<AdvancedStats>,
}

impl ParticipantStats {
    /// Upper-cased champion identifier used to key players within a match. Falls back
    /// to resolving [`Self::champion_id`] when no name was provided.
    pub fn champion_key(&self) -> Option<String> {
        if let Some(name) = self.champion.as_deref().filter(|name| !name.trim().is_empty()) {
            return Some(name.trim().to_uppercase());
        }
        let champion = Champion::from(i32::from(self.champion_id?));
        champion.identifier().map(str::to_uppercase)
    }

    /// Total creep score, lane minions plus jungle camps
    pub fn total_cs(&self) -> u32 {
        self.cs + self.neutral_cs
    }
}

/// The nested per-challenge metrics. Every field defaults to zero when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdvancedStats {
    pub kill_participation: f64,
    pub team_damage_percentage: f64,
    pub damage_taken_on_team_percentage: f64,
    pub gold_per_minute: f64,
    pub damage_per_minute: f64,
    pub vision_score_per_minute: f64,
    pub solo_kills: u32,
    pub lane_minions_first_10_minutes: u32,
    pub max_cs_advantage_on_lane_opponent: f64,
    pub max_level_lead_lane_opponent: u32,
    pub turret_plates_taken: u32,
    pub effective_heal_and_shielding: f64,
    pub control_wards_placed: u32,
    pub epic_monster_steals: u32,
    pub save_ally_from_death: u32,
    pub outnumbered_kills: u32,
    pub kills_near_enemy_turret: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_advanced_bag_decodes() {
        let record = MatchRecord::from_json(
            r#"{"duration": 1800, "participants": [{"id": 1, "champion": "Jinx", "teamId": 100}]}"#,
        )
        .unwrap();
        let participant = &record.participants[0];
        assert_eq!(participant.advanced, None);
        assert_eq!(participant.kills, 0);
        assert_eq!(participant.champion_key().as_deref(), Some("JINX"));
    }

    #[test]
    fn riot_field_names_are_accepted() {
        let record = MatchRecord::from_json(
            r#"{"duration": 1200, "participants": [{
                "id": 3, "championId": 222, "teamPosition": "BOTTOM", "teamId": 200,
                "goldEarned": 9000, "totalMinionsKilled": 150, "neutralMinionsKilled": 10,
                "challenges": {"killParticipation": 0.5, "soloKills": 2}
            }]}"#,
        )
        .unwrap();
        let participant = &record.participants[0];
        assert_eq!(participant.role.as_deref(), Some("BOTTOM"));
        assert_eq!(participant.gold, 9000);
        assert_eq!(participant.total_cs(), 160);
        let advanced = participant.advanced.as_ref().unwrap();
        assert_eq!(advanced.solo_kills, 2);
        assert_eq!(advanced.team_damage_percentage, 0.0);
        // Champion 222 is Jinx
        assert_eq!(participant.champion_key().as_deref(), Some("JINX"));
    }

    #[test]
    fn blank_champion_name_without_id_has_no_key() {
        let participant = ParticipantStats {
            champion: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(participant.champion_key(), None);
    }

    #[test]
    fn duration_minutes_handles_negative() {
        let record = MatchRecord {
            duration: -5,
            ..Default::default()
        };
        assert_eq!(record.duration_minutes(), 0.0);
    }
}
