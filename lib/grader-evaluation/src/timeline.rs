//! Causal attribution of kills to the objectives that follow them.
//!
//! The analysis flattens the timeline into a time-ordered list of typed events
//! (stage A), classifying deaths and roams on the way, then sweeps every kill's
//! causality window for objective swings (stage B).

use crate::context::MatchContext;
use crate::error::Anomaly;
use grader_model::opposing_team;
use grader_model::timeline::{TimelineRecord, BUILDING_KILL, CHAMPION_KILL, ELITE_MONSTER_KILL};
use tracing::{debug, warn};

const SECOND_MS: i64 = 1_000;
const MINUTE_MS: i64 = 60 * SECOND_MS;

/// Deaths up to this point count as early solo or gank deaths
pub const EARLY_DEATH_MS: i64 = 14 * MINUTE_MS;
/// Deaths from this point on count as late-game deaths
pub const LATE_DEATH_MS: i64 = 25 * MINUTE_MS;
/// Kills up to this point decide whether a team is heavily losing early
pub const EARLY_KILLS_MS: i64 = 15 * MINUTE_MS;
/// Kills from this point on weigh double
pub const LATE_GAME_PRESSURE_MS: i64 = 30 * MINUTE_MS;
/// A kill with no other kill this close on either side is a pick-off
pub const PICK_OFF_RADIUS_MS: i64 = 10 * SECOND_MS;
/// Early kill lead that marks the trailing team as heavily losing
pub const HEAVY_LOSING_KILL_GAP: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EventKind {
    ChampionKill,
    EliteMonsterKill,
    BuildingKill,
    Other,
}

impl From<&str> for EventKind {
    fn from(value: &str) -> Self {
        match value {
            CHAMPION_KILL => EventKind::ChampionKill,
            ELITE_MONSTER_KILL => EventKind::EliteMonsterKill,
            BUILDING_KILL => EventKind::BuildingKill,
            _ => EventKind::Other,
        }
    }
}

/// Participants are referenced by their index into the [`MatchContext`].
#[derive(Debug, Clone, PartialEq)]
enum Timed {
    Kill {
        /// `None` for executions by turrets or minions
        killer: Option<usize>,
        killer_team: u16,
        victim: usize,
        victim_team: u16,
        assists: Vec<usize>,
    },
    Objective {
        team: u16,
    },
}

#[derive(Debug, Clone, PartialEq)]
struct TimedEvent {
    timestamp: i64,
    event: Timed,
}

/// Lookahead after a kill within which objectives are attributed to it. Grows with
/// respawn timers: 15s at the start, 30s from 15 minutes and 60s from 30 minutes.
pub fn causality_window_ms(timestamp_ms: i64) -> i64 {
    let minute = timestamp_ms.max(0) / MINUTE_MS;
    let seconds = if minute < 15 {
        15 + minute
    } else if minute < 30 {
        30 + 2 * (minute - 15)
    } else {
        60 + (minute - 30)
    };
    seconds * SECOND_MS
}

fn pressure_weight(timestamp_ms: i64) -> u32 {
    if timestamp_ms >= LATE_GAME_PRESSURE_MS {
        2
    } else {
        1
    }
}

/// Enrich every context with causal counters. A missing or empty timeline leaves
/// the counters untouched and is reported as [`Anomaly::MissingTimeline`].
pub fn analyze_timeline(context: &mut MatchContext, timeline: Option<&TimelineRecord>) -> Vec<Anomaly> {
    let Some(timeline) = timeline.filter(|timeline| !timeline.is_empty()) else {
        warn!("{}", Anomaly::MissingTimeline);
        return vec![Anomaly::MissingTimeline];
    };

    let events = extract(context, timeline);
    link(context, &events);
    mark_heavy_losing_early(context, &events);

    Vec::new()
}

/// Stage A: resolve, order and classify.
fn extract(context: &mut MatchContext, timeline: &TimelineRecord) -> Vec<TimedEvent> {
    let mut events = Vec::new();
    let mut dropped = 0;

    for frame in &timeline.frames {
        for raw in &frame.events {
            let timestamp = raw.timestamp.unwrap_or(frame.timestamp);
            let event = match EventKind::from(raw.kind.as_str()) {
                EventKind::ChampionKill => {
                    let Some(victim) = raw.victim_id.and_then(|id| context.index_of(id)) else {
                        dropped += 1;
                        continue;
                    };
                    let killer = match raw.killer_id {
                        None | Some(0) => None,
                        Some(id) => match context.index_of(id) {
                            Some(killer) if killer != victim => Some(killer),
                            _ => {
                                dropped += 1;
                                continue;
                            }
                        },
                    };
                    let victim_team = context.get(victim).team_id;
                    let killer_team = match killer {
                        Some(killer) => context.get(killer).team_id,
                        None => opposing_team(victim_team).unwrap_or_default(),
                    };
                    let mut assists: Vec<usize> = Vec::with_capacity(raw.assisting_participant_ids.len());
                    for index in raw
                        .assisting_participant_ids
                        .iter()
                        .filter_map(|&id| context.index_of(id))
                    {
                        if index != victim && Some(index) != killer && !assists.contains(&index) {
                            assists.push(index);
                        }
                    }
                    Timed::Kill {
                        killer,
                        killer_team,
                        victim,
                        victim_team,
                        assists,
                    }
                }
                EventKind::EliteMonsterKill => {
                    let team = raw.killer_team_id.or_else(|| {
                        raw.killer_id
                            .and_then(|id| context.participant(id))
                            .map(|killer| killer.team_id)
                    });
                    match team.filter(|&team| opposing_team(team).is_some()) {
                        Some(team) => Timed::Objective { team },
                        None => {
                            dropped += 1;
                            continue;
                        }
                    }
                }
                EventKind::BuildingKill => {
                    // `teamId` on a building is the team that lost it
                    let team = raw
                        .killer_team_id
                        .or_else(|| raw.team_id.and_then(opposing_team))
                        .or_else(|| {
                            raw.killer_id
                                .and_then(|id| context.participant(id))
                                .map(|killer| killer.team_id)
                        });
                    match team.filter(|&team| opposing_team(team).is_some()) {
                        Some(team) => Timed::Objective { team },
                        None => {
                            dropped += 1;
                            continue;
                        }
                    }
                }
                EventKind::Other => continue,
            };
            events.push(TimedEvent { timestamp, event });
        }
    }

    // Stable, so ties keep frame order and then event order
    events.sort_by_key(|event| event.timestamp);

    for event in &events {
        if let Timed::Kill { victim, assists, .. } = &event.event {
            classify_death(context, event.timestamp, *victim, assists);
        }
    }

    debug!("Extracted {} timeline events ({dropped} dropped)", events.len());
    events
}

fn classify_death(context: &mut MatchContext, timestamp: i64, victim: usize, assists: &[usize]) {
    let victim_role = context.get(victim).role;
    let counters = &mut context.get_mut(victim).causal;
    if timestamp <= EARLY_DEATH_MS {
        if assists.is_empty() {
            counters.early_solo_deaths += 1;
        } else {
            counters.early_gank_deaths += 1;
        }
    } else if timestamp >= LATE_DEATH_MS {
        counters.late_game_deaths += 1;
    }

    if timestamp <= EARLY_DEATH_MS {
        for &assistant in assists {
            let player = context.get_mut(assistant);
            if player.role != victim_role && player.role.is_roamer() {
                player.causal.early_roam_takedowns += 1;
            }
        }
    }
}

/// Number of objectives taken by each team in `events[..i]`, for every `i`.
struct ObjectivePrefix {
    teams: [(u16, Vec<u32>); 2],
}

impl ObjectivePrefix {
    fn new(events: &[TimedEvent]) -> Self {
        let mut teams = [
            (grader_model::BLUE_TEAM, vec![0; events.len() + 1]),
            (grader_model::RED_TEAM, vec![0; events.len() + 1]),
        ];
        for (team_id, prefix) in &mut teams {
            for (i, event) in events.iter().enumerate() {
                let taken = matches!(event.event, Timed::Objective { team } if team == *team_id);
                prefix[i + 1] = prefix[i] + u32::from(taken);
            }
        }
        Self { teams }
    }

    /// Objectives taken by `team_id` in `events[start..end]`
    fn count(&self, team_id: u16, start: usize, end: usize) -> u32 {
        self.teams
            .iter()
            .find(|(team, _)| *team == team_id)
            .map_or(0, |(_, prefix)| prefix[end] - prefix[start])
    }
}

/// Stage B: windowed linking of kills to objectives, and pick-off detection.
fn link(context: &mut MatchContext, events: &[TimedEvent]) {
    let timestamps: Vec<i64> = events.iter().map(|event| event.timestamp).collect();
    let kill_timestamps: Vec<i64> = events
        .iter()
        .filter(|event| matches!(event.event, Timed::Kill { .. }))
        .map(|event| event.timestamp)
        .collect();
    let objectives = ObjectivePrefix::new(events);

    for (i, event) in events.iter().enumerate() {
        let Timed::Kill {
            killer,
            killer_team,
            victim,
            victim_team,
            ..
        } = &event.event
        else {
            continue;
        };
        let timestamp = event.timestamp;
        let weight = pressure_weight(timestamp);

        let window_end = timestamp.saturating_add(causality_window_ms(timestamp));
        let end = timestamps.partition_point(|&t| t <= window_end);
        let start = (i + 1).min(end);
        let killer_gained = objectives.count(*killer_team, start, end) > 0;
        let victim_gained = objectives.count(*victim_team, start, end) > 0;

        if killer_gained {
            if let Some(killer) = killer {
                context.get_mut(*killer).causal.clutch_kills += weight;
            }
            let victim = &mut context.get_mut(*victim).causal;
            if victim_gained {
                victim.sacrificial_deaths += weight;
            } else {
                victim.unforced_error_deaths += weight;
            }
        }

        if let Some(killer) = killer {
            let low = kill_timestamps.partition_point(|&t| t < timestamp.saturating_sub(PICK_OFF_RADIUS_MS));
            let high = kill_timestamps.partition_point(|&t| t <= timestamp.saturating_add(PICK_OFF_RADIUS_MS));
            // The range always holds this kill itself
            if high - low == 1 {
                context.get_mut(*killer).causal.pick_offs += weight;
            }
        }
    }
}

fn mark_heavy_losing_early(context: &mut MatchContext, events: &[TimedEvent]) {
    let (mut blue, mut red) = (0u32, 0u32);
    for event in events.iter().take_while(|event| event.timestamp <= EARLY_KILLS_MS) {
        if let Timed::Kill {
            killer: Some(_),
            killer_team,
            ..
        } = event.event
        {
            match killer_team {
                grader_model::BLUE_TEAM => blue += 1,
                grader_model::RED_TEAM => red += 1,
                _ => {}
            }
        }
    }

    let losing_team = if blue >= red + HEAVY_LOSING_KILL_GAP {
        grader_model::RED_TEAM
    } else if red >= blue + HEAVY_LOSING_KILL_GAP {
        grader_model::BLUE_TEAM
    } else {
        return;
    };
    debug!("Team {losing_team} is heavily losing early ({blue} - {red})");
    for index in context.team_indices(losing_team).to_vec() {
        context.get_mut(index).causal.is_heavy_losing_early = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::CausalCounters;
    use crate::test_support::*;
    use grader_model::timeline::Event;

    fn analyzed(events: Vec<Event>) -> MatchContext {
        let (mut context, _) = MatchContext::build(&ten_player_match(2400));
        let anomalies = analyze_timeline(&mut context, Some(&timeline(events)));
        assert!(anomalies.is_empty());
        context
    }

    #[test]
    fn window_grows_with_game_time() {
        assert_eq!(causality_window_ms(0), 15_000);
        assert_eq!(causality_window_ms(10 * MINUTE), 25_000);
        assert_eq!(causality_window_ms(14 * MINUTE + 59_999), 29_000);
        assert_eq!(causality_window_ms(15 * MINUTE), 30_000);
        assert_eq!(causality_window_ms(20 * MINUTE), 40_000);
        assert_eq!(causality_window_ms(30 * MINUTE), 60_000);
        assert_eq!(causality_window_ms(42 * MINUTE), 72_000);
    }

    #[test]
    fn dragon_after_kill_is_clutch() {
        let context = analyzed(vec![kill(10 * MINUTE, 2, 7, &[]), dragon(10 * MINUTE + 20_000, 100)]);
        assert_eq!(context.participant(2).unwrap().causal.clutch_kills, 1);
        assert_eq!(context.participant(7).unwrap().causal.unforced_error_deaths, 1);
        assert_eq!(context.participant(7).unwrap().causal.sacrificial_deaths, 0);
    }

    #[test]
    fn late_game_kill_weighs_double() {
        let context = analyzed(vec![kill(32 * MINUTE, 2, 7, &[]), dragon(32 * MINUTE + 20_000, 100)]);
        assert_eq!(context.participant(2).unwrap().causal.clutch_kills, 2);
        assert_eq!(context.participant(7).unwrap().causal.unforced_error_deaths, 2);
        assert_eq!(context.participant(2).unwrap().causal.pick_offs, 2);
    }

    #[test]
    fn objective_outside_window_is_ignored() {
        let context = analyzed(vec![kill(10 * MINUTE, 2, 7, &[]), dragon(10 * MINUTE + 26_000, 100)]);
        assert_eq!(context.participant(2).unwrap().causal.clutch_kills, 0);
        assert_eq!(context.participant(7).unwrap().causal.unforced_error_deaths, 0);
    }

    #[test]
    fn enemy_objective_does_not_credit_killer() {
        let context = analyzed(vec![kill(10 * MINUTE, 2, 7, &[]), dragon(10 * MINUTE + 10_000, 200)]);
        assert_eq!(context.participant(2).unwrap().causal.clutch_kills, 0);
        assert_eq!(context.participant(7).unwrap().causal.unforced_error_deaths, 0);
        assert_eq!(context.participant(7).unwrap().causal.sacrificial_deaths, 0);
    }

    #[test]
    fn both_teams_scoring_is_a_trade() {
        let context = analyzed(vec![
            kill(20 * MINUTE, 3, 8, &[]),
            turret(20 * MINUTE + 5_000, 200),
            dragon(20 * MINUTE + 15_000, 200),
        ]);
        let victim = &context.participant(8).unwrap().causal;
        assert_eq!(context.participant(3).unwrap().causal.clutch_kills, 1);
        assert_eq!(victim.sacrificial_deaths, 1);
        assert_eq!(victim.unforced_error_deaths, 0);
    }

    #[test]
    fn building_credits_team_opposite_owner() {
        let context = analyzed(vec![kill(5 * MINUTE, 9, 4, &[]), turret(5 * MINUTE + 3_000, 100)]);
        assert_eq!(context.participant(9).unwrap().causal.clutch_kills, 1);
        assert_eq!(context.participant(4).unwrap().causal.unforced_error_deaths, 1);
    }

    #[test]
    fn extreme_timestamps_saturate() {
        let context = analyzed(vec![
            kill(i64::MIN + 1_000, 1, 6, &[]),
            kill(i64::MAX - 1_000, 7, 2, &[]),
            dragon(i64::MAX, 200),
        ]);
        assert_eq!(context.participant(1).unwrap().causal.pick_offs, 1);
        assert_eq!(context.participant(7).unwrap().causal.clutch_kills, 2);
        assert_eq!(context.participant(7).unwrap().causal.pick_offs, 2);
        assert_eq!(context.participant(2).unwrap().causal.unforced_error_deaths, 2);
    }

    #[test]
    fn close_kills_are_not_pick_offs() {
        let context = analyzed(vec![
            kill(12 * MINUTE, 1, 6, &[]),
            kill(12 * MINUTE + 5_000, 7, 2, &[]),
            kill(20 * MINUTE, 3, 8, &[]),
        ]);
        assert_eq!(context.participant(1).unwrap().causal.pick_offs, 0);
        assert_eq!(context.participant(7).unwrap().causal.pick_offs, 0);
        assert_eq!(context.participant(3).unwrap().causal.pick_offs, 1);
    }

    #[test]
    fn pick_off_radius_is_inclusive() {
        let context = analyzed(vec![kill(12 * MINUTE, 1, 6, &[]), kill(12 * MINUTE + 10_000, 7, 2, &[])]);
        assert_eq!(context.participant(1).unwrap().causal.pick_offs, 0);
        assert_eq!(context.participant(7).unwrap().causal.pick_offs, 0);
    }

    #[test]
    fn deaths_are_bucketed_by_time_and_help() {
        let context = analyzed(vec![
            kill(3 * MINUTE, 6, 1, &[]),
            kill(8 * MINUTE, 7, 1, &[6]),
            kill(14 * MINUTE, 6, 1, &[7]),
            kill(20 * MINUTE, 6, 1, &[]),
            kill(26 * MINUTE, 6, 1, &[]),
        ]);
        let counters = &context.participant(1).unwrap().causal;
        assert_eq!(counters.early_solo_deaths, 1);
        assert_eq!(counters.early_gank_deaths, 2);
        assert_eq!(counters.late_game_deaths, 1);
    }

    #[test]
    fn mid_and_support_assists_off_role_are_roams() {
        let context = analyzed(vec![
            // Ahri (mid) and Lulu (support) help Darius kill Ornn top
            kill(6 * MINUTE, 1, 6, &[3, 5, 2]),
            // Ahri helping against the enemy mid is not a roam
            kill(7 * MINUTE, 2, 8, &[3]),
            // Too late to be an early roam
            kill(20 * MINUTE, 1, 6, &[3]),
        ]);
        assert_eq!(context.participant(3).unwrap().causal.early_roam_takedowns, 1);
        assert_eq!(context.participant(5).unwrap().causal.early_roam_takedowns, 1);
        assert_eq!(context.participant(2).unwrap().causal.early_roam_takedowns, 0);
    }

    #[test]
    fn early_kill_gap_marks_losing_team() {
        let events = (0..5)
            .map(|i| kill((2 + i) * MINUTE, 1 + i as u32, 6 + i as u32, &[]))
            .collect();
        let context = analyzed(events);
        assert!(context.red_team().all(|p| p.causal.is_heavy_losing_early));
        assert!(context.blue_team().all(|p| !p.causal.is_heavy_losing_early));
    }

    #[test]
    fn four_kill_gap_is_not_heavy() {
        let events = (0..4)
            .map(|i| kill((2 + i) * MINUTE, 1 + i as u32, 6 + i as u32, &[]))
            .collect();
        let context = analyzed(events);
        assert!(context.players().iter().all(|p| !p.causal.is_heavy_losing_early));
    }

    #[test]
    fn unknown_participants_are_dropped() {
        let context = analyzed(vec![
            kill(10 * MINUTE, 42, 7, &[]),
            kill(11 * MINUTE, 2, 43, &[]),
            kill(12 * MINUTE, 2, 7, &[44]),
            dragon(12 * MINUTE + 5_000, 100),
        ]);
        let victim = &context.participant(7).unwrap().causal;
        assert_eq!(victim.early_solo_deaths, 1);
        assert_eq!(context.participant(2).unwrap().causal.clutch_kills, 1);
    }

    #[test]
    fn execution_counts_death_without_killer() {
        let context = analyzed(vec![kill(4 * MINUTE, 0, 4, &[]), dragon(4 * MINUTE + 5_000, 200)]);
        let victim = &context.participant(4).unwrap().causal;
        assert_eq!(victim.early_solo_deaths, 1);
        assert_eq!(victim.unforced_error_deaths, 1);
        assert!(context.players().iter().all(|p| p.causal.clutch_kills == 0));
    }

    #[test]
    fn events_are_ordered_by_timestamp_within_frames() {
        // Dragon listed first but taken after the kill
        let record = TimelineRecord {
            frames: vec![grader_model::timeline::Frame {
                timestamp: 10 * MINUTE,
                events: vec![dragon(10 * MINUTE + 15_000, 100), kill(10 * MINUTE + 1_000, 2, 7, &[])],
            }],
        };
        let (mut context, _) = MatchContext::build(&ten_player_match(2400));
        analyze_timeline(&mut context, Some(&record));
        assert_eq!(context.participant(2).unwrap().causal.clutch_kills, 1);
    }

    #[test]
    fn missing_or_empty_timeline_leaves_counters_at_zero() {
        for record in [None, Some(TimelineRecord::default())] {
            let (mut context, _) = MatchContext::build(&ten_player_match(2400));
            let anomalies = analyze_timeline(&mut context, record.as_ref());
            assert_eq!(anomalies, vec![Anomaly::MissingTimeline]);
            assert!(context.players().iter().all(|p| p.causal == CausalCounters::default()));
        }
    }

    #[test]
    fn analysis_is_deterministic() {
        let events = vec![
            kill(9 * MINUTE, 2, 7, &[3]),
            dragon(9 * MINUTE + 10_000, 100),
            kill(31 * MINUTE, 8, 3, &[9, 10]),
            turret(31 * MINUTE + 30_000, 100),
        ];
        let first = analyzed(events.clone());
        let second = analyzed(events);
        assert_eq!(first.players(), second.players());
    }
}
