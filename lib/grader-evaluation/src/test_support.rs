use grader_model::model::{MatchRecord, ParticipantStats};
use grader_model::timeline::{Event, Frame, TimelineRecord, BUILDING_KILL, CHAMPION_KILL, ELITE_MONSTER_KILL};

pub const MINUTE: i64 = 60_000;

/// Ten players, ids 1-5 blue and 6-10 red, in TOP/JUNGLE/MIDDLE/BOTTOM/UTILITY order.
pub fn ten_player_match(duration_secs: i64) -> MatchRecord {
    let roles = ["TOP", "JUNGLE", "MIDDLE", "BOTTOM", "UTILITY"];
    let champions = [
        "Darius", "LeeSin", "Ahri", "Jinx", "Lulu", "Ornn", "Vi", "Syndra", "Caitlyn", "Leona",
    ];
    let participants = (0..10)
        .map(|i| ParticipantStats {
            id: Some(i as u32 + 1),
            champion: Some(champions[i].into()),
            role: Some(roles[i % 5].into()),
            team_id: Some(if i < 5 { 100 } else { 200 }),
            win: i < 5,
            ..Default::default()
        })
        .collect();
    MatchRecord {
        duration: duration_secs,
        participants,
        ..Default::default()
    }
}

pub fn kill(timestamp: i64, killer: u32, victim: u32, assists: &[u32]) -> Event {
    Event {
        kind: CHAMPION_KILL.into(),
        timestamp: Some(timestamp),
        killer_id: Some(killer),
        victim_id: Some(victim),
        assisting_participant_ids: assists.to_vec(),
        ..Default::default()
    }
}

pub fn dragon(timestamp: i64, team_id: u16) -> Event {
    Event {
        kind: ELITE_MONSTER_KILL.into(),
        timestamp: Some(timestamp),
        killer_team_id: Some(team_id),
        monster_type: Some("DRAGON".into()),
        ..Default::default()
    }
}

/// A turret owned by `owner_team` going down
pub fn turret(timestamp: i64, owner_team: u16) -> Event {
    Event {
        kind: BUILDING_KILL.into(),
        timestamp: Some(timestamp),
        team_id: Some(owner_team),
        building_type: Some("TOWER_BUILDING".into()),
        ..Default::default()
    }
}

/// Put every event in one frame per minute, keeping their order.
pub fn timeline(events: Vec<Event>) -> TimelineRecord {
    let mut frames: Vec<Frame> = Vec::new();
    for event in events {
        let minute = event.timestamp.unwrap_or_default() / MINUTE * MINUTE;
        match frames.last_mut() {
            Some(frame) if frame.timestamp == minute => frame.events.push(event),
            _ => frames.push(Frame {
                timestamp: minute,
                events: vec![event],
            }),
        }
    }
    TimelineRecord { frames }
}
