//! Statistics aggregator: leaderboards derived from the full match log.
//!
//! The leaderboard functions are pure reads; only `recompute_team_stats`
//! writes the cached `TeamStats` rows.

use crate::models::{TeamId, TeamStats, TeamWithCountry, TournamentError};
use crate::store::Store;
use chrono::Utc;
use std::collections::HashMap;
use uuid::Uuid;

/// Default leaderboard length.
pub const DEFAULT_LEADERBOARD_SIZE: usize = 8;

/// One leaderboard entry: a team and its all-time goal total.
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize)]
pub struct ScorerEntry {
    pub team: TeamWithCountry,
    pub all_time_goals: u32,
}

/// One leaderboard entry: a team and its all-time clean-sheet count.
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize)]
pub struct DefenderEntry {
    pub team: TeamWithCountry,
    pub all_time_clean_sheets: u32,
}

fn goals_by_team(store: &Store) -> HashMap<TeamId, u32> {
    let mut totals: HashMap<TeamId, u32> = store.team_ids().into_iter().map(|id| (id, 0)).collect();
    for m in store.played_matches() {
        let (Some(home), Some(away)) = (m.home_score, m.away_score) else {
            continue;
        };
        if let Some(t) = totals.get_mut(&m.home_team_id) {
            *t += home;
        }
        if let Some(t) = totals.get_mut(&m.away_team_id) {
            *t += away;
        }
    }
    totals
}

fn clean_sheets_by_team(store: &Store) -> HashMap<TeamId, u32> {
    let mut totals: HashMap<TeamId, u32> = store.team_ids().into_iter().map(|id| (id, 0)).collect();
    for m in store.played_matches() {
        let (Some(home), Some(away)) = (m.home_score, m.away_score) else {
            continue;
        };
        if away == 0 {
            if let Some(t) = totals.get_mut(&m.home_team_id) {
                *t += 1;
            }
        }
        if home == 0 {
            if let Some(t) = totals.get_mut(&m.away_team_id) {
                *t += 1;
            }
        }
    }
    totals
}

fn ranked<T>(
    store: &Store,
    totals: HashMap<TeamId, u32>,
    limit: usize,
    make: impl Fn(TeamWithCountry, u32) -> T,
) -> Result<Vec<T>, TournamentError> {
    let mut entries = Vec::with_capacity(totals.len());
    for (team_id, total) in totals {
        entries.push((store.team_with_country(team_id)?, total));
    }
    entries.sort_by(|(a, a_total), (b, b_total)| {
        b_total.cmp(a_total).then(a.team.name.cmp(&b.team.name))
    });
    entries.truncate(limit);
    Ok(entries.into_iter().map(|(team, total)| make(team, total)).collect())
}

/// Goal totals across all played matches, highest first (ties by name).
pub fn top_goal_scorers(store: &Store, limit: usize) -> Result<Vec<ScorerEntry>, TournamentError> {
    ranked(store, goals_by_team(store), limit, |team, all_time_goals| {
        ScorerEntry {
            team,
            all_time_goals,
        }
    })
}

/// Clean-sheet counts across all played matches, highest first (ties by name).
pub fn top_defenders(store: &Store, limit: usize) -> Result<Vec<DefenderEntry>, TournamentError> {
    ranked(
        store,
        clean_sheets_by_team(store),
        limit,
        |team, all_time_clean_sheets| DefenderEntry {
            team,
            all_time_clean_sheets,
        },
    )
}

/// Rebuild every team's cached stats row from match and champion history.
///
/// The cache is never authoritative: whatever was in the rows before is
/// overwritten with the recomputed totals.
pub fn recompute_team_stats(store: &mut Store) -> Result<Vec<TeamStats>, TournamentError> {
    let goals = goals_by_team(store);
    let clean_sheets = clean_sheets_by_team(store);
    let champions = store.champions_raw();

    let mut out = Vec::new();
    for team_id in store.team_ids() {
        let titles = champions.iter().filter(|c| c.champion_id == team_id).count() as u32;
        let row = TeamStats {
            id: store.team_stats(team_id).map(|s| s.id).unwrap_or_else(Uuid::new_v4),
            team_id,
            all_time_goals: goals.get(&team_id).copied().unwrap_or(0),
            all_time_clean_sheets: clean_sheets.get(&team_id).copied().unwrap_or(0),
            total_titles: titles,
            updated_at: Utc::now(),
        };
        store.put_team_stats(row.clone());
        out.push(row);
    }
    Ok(out)
}
