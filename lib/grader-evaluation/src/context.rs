use crate::error::Anomaly;
use crate::role::Role;
use grader_model::model::{AdvancedStats, MatchRecord, ParticipantStats};
use grader_model::{opposing_team, BLUE_TEAM, RED_TEAM};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, warn};

pub const TEAM_SIZE: usize = 5;

/// Counters filled in by the timeline analysis. They only ever grow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CausalCounters {
    pub early_solo_deaths: u32,
    pub early_gank_deaths: u32,
    pub late_game_deaths: u32,
    pub clutch_kills: u32,
    pub unforced_error_deaths: u32,
    pub sacrificial_deaths: u32,
    pub pick_offs: u32,
    pub early_roam_takedowns: u32,
    pub is_heavy_losing_early: bool,
}

/// Raw stats normalized by game length and team totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub gold: u32,
    pub cs: u32,
    pub vision_score: f64,
    /// Game length used for every rate below, never less than one minute
    pub minutes: f64,
    pub gold_per_min: f64,
    pub cs_per_min: f64,
    pub vision_per_min: f64,
    pub damage_to_champions: u64,
    pub damage_taken: u64,
    pub damage_to_objectives: u64,
    pub damage_to_buildings: u64,
    pub heal_and_shield: u64,
    pub cc_seconds: u64,
    pub wards_placed: u32,
    pub wards_killed: u32,
    pub control_wards: u32,
    pub kill_participation: f64,
    pub damage_share: f64,
    pub damage_taken_share: f64,
    /// Whether the advanced metrics bag was present at all
    pub has_advanced: bool,
    pub advanced: AdvancedStats,
}

impl PlayerStats {
    fn from_participant(raw: &ParticipantStats, minutes: f64) -> Self {
        let advanced = raw.advanced.clone().unwrap_or_default();
        let minutes = minutes.max(1.0);
        let cs = raw.total_cs();
        Self {
            kills: raw.kills,
            deaths: raw.deaths,
            assists: raw.assists,
            gold: raw.gold,
            cs,
            vision_score: raw.vision_score,
            minutes,
            gold_per_min: raw.gold as f64 / minutes,
            cs_per_min: cs as f64 / minutes,
            vision_per_min: raw.vision_score / minutes,
            damage_to_champions: raw.damage_to_champions,
            damage_taken: raw.damage_taken,
            damage_to_objectives: raw.damage_to_objectives,
            damage_to_buildings: raw.damage_to_buildings,
            heal_and_shield: raw.heal_on_teammates + raw.shield_on_teammates,
            cc_seconds: raw.time_ccing_others,
            wards_placed: raw.wards_placed,
            wards_killed: raw.wards_killed,
            control_wards: raw.control_wards_placed.max(advanced.control_wards_placed),
            kill_participation: advanced.kill_participation,
            damage_share: advanced.team_damage_percentage,
            damage_taken_share: advanced.damage_taken_on_team_percentage,
            has_advanced: raw.advanced.is_some(),
            advanced,
        }
    }

    /// (kills + assists) / deaths, with deathless games divided by one
    pub fn kda(&self) -> f64 {
        (self.kills + self.assists) as f64 / self.deaths.max(1) as f64
    }

    pub fn per_minute(&self, value: f64) -> f64 {
        value / self.minutes
    }

    pub fn deaths_per_min(&self) -> f64 {
        self.per_minute(self.deaths as f64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerContext {
    pub participant_id: u32,
    /// Upper-cased champion identifier
    pub champion: String,
    pub role: Role,
    pub team_id: u16,
    pub win: bool,
    pub stats: PlayerStats,
    pub causal: CausalCounters,
}

/// Every resolvable player of one match, indexed by champion and participant ID.
#[derive(Debug, Clone, Default)]
pub struct MatchContext {
    players: Vec<PlayerContext>,
    by_champion: HashMap<String, usize>,
    by_participant: HashMap<u32, usize>,
    blue: Vec<usize>,
    red: Vec<usize>,
}

impl MatchContext {
    /// Build contexts for every well-formed participant. Malformed entries are skipped
    /// and reported as anomalies.
    pub fn build(record: &MatchRecord) -> (Self, Vec<Anomaly>) {
        let minutes = record.duration_minutes();
        let mut anomalies = Vec::new();
        let mut players: Vec<PlayerContext> = Vec::with_capacity(record.participants.len());

        for (index, raw) in record.participants.iter().enumerate() {
            let Some(participant_id) = raw.id else {
                anomalies.push(Anomaly::malformed(index, "missing participant id"));
                continue;
            };
            let Some(champion) = raw.champion_key() else {
                anomalies.push(Anomaly::malformed(index, "missing champion"));
                continue;
            };
            let team_id = match raw.team_id {
                Some(team_id) if opposing_team(team_id).is_some() => team_id,
                Some(team_id) => {
                    anomalies.push(Anomaly::malformed(index, format!("unknown team {team_id}")));
                    continue;
                }
                None => {
                    anomalies.push(Anomaly::malformed(index, "missing team id"));
                    continue;
                }
            };
            if players.iter().any(|p| p.participant_id == participant_id) {
                anomalies.push(Anomaly::malformed(
                    index,
                    format!("duplicate participant id {participant_id}"),
                ));
                continue;
            }
            if players.iter().any(|p| p.champion == champion) {
                anomalies.push(Anomaly::malformed(index, format!("duplicate champion {champion}")));
                continue;
            }

            players.push(PlayerContext {
                participant_id,
                champion,
                role: raw.role.as_deref().unwrap_or_default().into(),
                team_id,
                win: raw.win,
                stats: PlayerStats::from_participant(raw, minutes),
                causal: CausalCounters::default(),
            });
        }

        players.sort_by_key(|p| p.participant_id);
        fill_team_shares(&mut players);

        let mut context = Self {
            by_champion: HashMap::with_capacity(players.len()),
            by_participant: HashMap::with_capacity(players.len()),
            players,
            ..Default::default()
        };
        for (index, player) in context.players.iter().enumerate() {
            context.by_champion.insert(player.champion.clone(), index);
            context.by_participant.insert(player.participant_id, index);
            match player.team_id {
                BLUE_TEAM => context.blue.push(index),
                _ => context.red.push(index),
            }
        }

        for (team_id, size) in [(BLUE_TEAM, context.blue.len()), (RED_TEAM, context.red.len())] {
            if size != TEAM_SIZE {
                anomalies.push(Anomaly::UnevenTeams { team_id, size });
            }
        }
        for anomaly in &anomalies {
            warn!("{anomaly}");
        }
        debug!(
            "Built {} player contexts ({} blue, {} red)",
            context.players.len(),
            context.blue.len(),
            context.red.len()
        );

        (context, anomalies)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Players ordered by participant ID
    pub fn players(&self) -> &[PlayerContext] {
        &self.players
    }

    /// Look a player up by champion, case-insensitively.
    pub fn champion(&self, champion: &str) -> Option<&PlayerContext> {
        self.by_champion
            .get(&champion.to_uppercase())
            .map(|&index| &self.players[index])
    }

    pub fn participant(&self, participant_id: u32) -> Option<&PlayerContext> {
        self.index_of(participant_id).map(|index| &self.players[index])
    }

    pub(crate) fn index_of(&self, participant_id: u32) -> Option<usize> {
        self.by_participant.get(&participant_id).copied()
    }

    pub(crate) fn get(&self, index: usize) -> &PlayerContext {
        &self.players[index]
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> &mut PlayerContext {
        &mut self.players[index]
    }

    pub fn blue_team(&self) -> impl Iterator<Item = &PlayerContext> {
        self.blue.iter().map(|&index| &self.players[index])
    }

    pub fn red_team(&self) -> impl Iterator<Item = &PlayerContext> {
        self.red.iter().map(|&index| &self.players[index])
    }

    pub fn team(&self, team_id: u16) -> Box<dyn Iterator<Item = &PlayerContext> + '_> {
        match team_id {
            BLUE_TEAM => Box::new(self.blue_team()),
            RED_TEAM => Box::new(self.red_team()),
            _ => Box::new(std::iter::empty()),
        }
    }

    pub(crate) fn team_indices(&self, team_id: u16) -> &[usize] {
        match team_id {
            BLUE_TEAM => &self.blue,
            _ => &self.red,
        }
    }

    /// The player in the same role on the other team, if there is exactly one.
    pub fn opponent_of(&self, player: &PlayerContext) -> Option<&PlayerContext> {
        if player.role == Role::Other {
            return None;
        }
        let opposing = opposing_team(player.team_id)?;
        let mut candidates = self.team(opposing).filter(|p| p.role == player.role);
        let opponent = candidates.next()?;
        candidates.next().is_none().then_some(opponent)
    }
}

/// Derive kill participation and damage shares from team totals where the advanced
/// metrics did not provide them.
fn fill_team_shares(players: &mut [PlayerContext]) {
    let mut totals: HashMap<u16, (u32, u64, u64)> = HashMap::new();
    for player in players.iter() {
        let entry = totals.entry(player.team_id).or_default();
        entry.0 += player.stats.kills;
        entry.1 += player.stats.damage_to_champions;
        entry.2 += player.stats.damage_taken;
    }

    for player in players.iter_mut() {
        let (kills, damage, taken) = totals[&player.team_id];
        let stats = &mut player.stats;
        if stats.kill_participation <= 0.0 && kills > 0 {
            stats.kill_participation = ((stats.kills + stats.assists) as f64 / kills as f64).min(1.0);
        }
        if stats.damage_share <= 0.0 && damage > 0 {
            stats.damage_share = stats.damage_to_champions as f64 / damage as f64;
        }
        if stats.damage_taken_share <= 0.0 && taken > 0 {
            stats.damage_taken_share = stats.damage_taken as f64 / taken as f64;
        }
    }
}
