use serde::{Deserialize, Serialize};

/// Event type of a champion takedown
pub const CHAMPION_KILL: &str = "CHAMPION_KILL";
/// Event type of a dragon, herald, baron, grub or atakhan kill
pub const ELITE_MONSTER_KILL: &str = "ELITE_MONSTER_KILL";
/// Event type of a turret or inhibitor kill
pub const BUILDING_KILL: &str = "BUILDING_KILL";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimelineRecord {
    /// Frames in chronological order, usually one per minute
    pub frames: Vec<Frame>,
}

impl TimelineRecord {
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Frame {
    /// Milliseconds since game start
    pub timestamp: i64,
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: String,
    /// Milliseconds since game start. Falls back to the frame's timestamp when absent.
    pub timestamp: Option<i64>,
    pub killer_id: Option<u32>,
    pub victim_id: Option<u32>,
    #[serde(alias = "assistingIds")]
    pub assisting_participant_ids: Vec<u32>,
    pub killer_team_id: Option<u16>,
    /// For buildings, the team that owned the destroyed structure
    pub team_id: Option<u16>,
    pub building_type: Option<String>,
    pub monster_type: Option<String>,
    pub monster_sub_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_both_assist_spellings() {
        let timeline = TimelineRecord::from_json(
            r#"{"frames": [{"timestamp": 60000, "events": [
                {"type": "CHAMPION_KILL", "timestamp": 61000, "killerId": 1, "victimId": 6, "assistingIds": [2]},
                {"type": "CHAMPION_KILL", "killerId": 7, "victimId": 2, "assistingParticipantIds": [8, 9]},
                {"type": "ELITE_MONSTER_KILL", "timestamp": 62000, "killerTeamId": 100, "monsterType": "DRAGON"}
            ]}]}"#,
        )
        .unwrap();
        let events = &timeline.frames[0].events;
        assert_eq!(events[0].assisting_participant_ids, vec![2]);
        assert_eq!(events[1].assisting_participant_ids, vec![8, 9]);
        assert_eq!(events[1].timestamp, None);
        assert_eq!(events[2].kind, ELITE_MONSTER_KILL);
        assert_eq!(events[2].monster_type.as_deref(), Some("DRAGON"));
    }

    #[test]
    fn empty_object_is_empty_timeline() {
        let timeline = TimelineRecord::from_json("{}").unwrap();
        assert!(timeline.is_empty());
    }
}
