#![allow(dead_code)]

use grader_model::model::MatchRecord;
use grader_model::timeline::TimelineRecord;
use serde_json::{json, Value};

pub const SECOND: i64 = 1_000;
pub const MINUTE: i64 = 60 * SECOND;

const ROLES: [&str; 5] = ["TOP", "JUNGLE", "MIDDLE", "BOTTOM", "UTILITY"];
const CHAMPIONS: [&str; 10] = [
    "Darius", "LeeSin", "Ahri", "Jinx", "Lulu", "Ornn", "Vi", "Syndra", "Caitlyn", "Leona",
];

/// Unremarkable stat line for a 30 minute game. IDs 1-5 are blue (winning), 6-10 red.
pub fn participant(id: u32) -> Value {
    let index = (id - 1) as usize;
    let support = index % 5 == 4;
    json!({
        "id": id,
        "champion": CHAMPIONS[index],
        "role": ROLES[index % 5],
        "teamId": if id <= 5 { 100 } else { 200 },
        "win": id <= 5,
        "kills": 3,
        "deaths": 3,
        "assists": 5,
        "gold": if support { 8000 } else { 11500 },
        "cs": if support { 30 } else { 190 },
        "visionScore": if support { 55.0 } else { 18.0 },
        "damageToChampions": if support { 6000 } else { 16000 },
        "damageTaken": 18000,
        "damageToObjectives": 4000,
        "healOnTeammates": if support { 4000 } else { 0 },
        "timeCcingOthers": 15,
    })
}

/// Merge `overrides` into a participant object
pub fn with(mut base: Value, overrides: Value) -> Value {
    if let (Some(base), Value::Object(overrides)) = (base.as_object_mut(), overrides) {
        base.extend(overrides);
    }
    base
}

pub fn participants() -> Vec<Value> {
    (1..=10).map(participant).collect()
}

pub fn match_record(participants: Vec<Value>, duration_secs: i64) -> MatchRecord {
    serde_json::from_value(json!({
        "matchId": "EUW1_7000000001",
        "duration": duration_secs,
        "gameMode": "CLASSIC",
        "gameVersion": "14.20.1",
        "participants": participants,
    }))
    .unwrap()
}

pub fn kill(timestamp: i64, killer: u32, victim: u32, assists: &[u32]) -> Value {
    json!({
        "type": "CHAMPION_KILL",
        "timestamp": timestamp,
        "killerId": killer,
        "victimId": victim,
        "assistingParticipantIds": assists,
    })
}

pub fn dragon(timestamp: i64, team_id: u16) -> Value {
    json!({
        "type": "ELITE_MONSTER_KILL",
        "timestamp": timestamp,
        "killerTeamId": team_id,
        "monsterType": "DRAGON",
        "monsterSubType": "FIRE_DRAGON",
    })
}

pub fn timeline(events: Vec<Value>) -> TimelineRecord {
    serde_json::from_value(json!({
        "frames": [
            { "timestamp": 0, "events": [] },
            { "timestamp": 60_000, "events": events },
        ]
    }))
    .unwrap()
}
