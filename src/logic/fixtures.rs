//! Match CRUD with validation and standings triggers.
//!
//! All match writes go through here: payloads are validated before
//! persistence, and any write touching a played group match recomputes the
//! owning group's table.

use crate::logic::standings::recompute_group;
use crate::models::{GroupId, Match, MatchId, MatchUpdate, NewMatch, TeamId, TournamentError};
use crate::store::Store;
use chrono::Utc;
use uuid::Uuid;

/// Referential and state checks shared by create and update.
fn validate_match(store: &Store, m: &Match) -> Result<(), TournamentError> {
    if m.home_team_id == m.away_team_id {
        return Err(TournamentError::SameTeam);
    }
    store.team(m.home_team_id)?;
    store.team(m.away_team_id)?;
    store.phase(m.phase_id)?;
    if let Some(group_id) = m.group_id {
        let group = store.group(group_id)?;
        if group.phase_id != m.phase_id {
            return Err(TournamentError::GroupPhaseMismatch);
        }
    }
    match (m.is_played, m.home_score, m.away_score) {
        (true, Some(_), Some(_)) => Ok(()),
        (false, None, None) => Ok(()),
        _ => Err(TournamentError::ScoresMismatch),
    }
}

/// Create a match. If it arrives already played and belongs to a group, the
/// group's table is recomputed.
pub fn create_match(store: &mut Store, data: NewMatch) -> Result<Match, TournamentError> {
    let m = Match {
        id: Uuid::new_v4(),
        home_team_id: data.home_team_id,
        away_team_id: data.away_team_id,
        phase_id: data.phase_id,
        group_id: data.group_id,
        home_score: data.home_score,
        away_score: data.away_score,
        is_played: data.is_played,
        match_date: data.match_date,
        round: data.round,
        gameweek: data.gameweek,
        created_at: Utc::now(),
    };
    validate_match(store, &m)?;
    let m = store.insert_match(m);
    if m.is_played {
        if let Some(group_id) = m.group_id {
            recompute_group(store, group_id)?;
        }
    }
    Ok(m)
}

/// Apply a partial update to a match.
///
/// Setting `is_played: false` clears both scores. The owning group (if any)
/// is recomputed whenever the match is played before or after the update,
/// which covers entering a result, editing it, and reverting it.
pub fn update_match(
    store: &mut Store,
    id: MatchId,
    data: MatchUpdate,
) -> Result<Match, TournamentError> {
    let before = store.match_by_id(id)?.clone();
    let mut m = before.clone();

    if let Some(home_team_id) = data.home_team_id {
        m.home_team_id = home_team_id;
    }
    if let Some(away_team_id) = data.away_team_id {
        m.away_team_id = away_team_id;
    }
    if let Some(is_played) = data.is_played {
        m.is_played = is_played;
        if !is_played {
            m.home_score = None;
            m.away_score = None;
        }
    }
    if let Some(home_score) = data.home_score {
        m.home_score = Some(home_score);
    }
    if let Some(away_score) = data.away_score {
        m.away_score = Some(away_score);
    }
    if let Some(match_date) = data.match_date {
        m.match_date = Some(match_date);
    }
    if let Some(round) = data.round {
        m.round = Some(round);
    }
    if let Some(gameweek) = data.gameweek {
        m.gameweek = Some(gameweek);
    }

    validate_match(store, &m)?;
    store.replace_match(m.clone());

    if before.is_played || m.is_played {
        if let Some(group_id) = m.group_id {
            recompute_group(store, group_id)?;
        }
    }
    Ok(m)
}

/// Delete a match; a played group match rolls its group's table back.
pub fn delete_match(store: &mut Store, id: MatchId) -> Result<(), TournamentError> {
    let removed = store.remove_match(id)?;
    if removed.is_played {
        if let Some(group_id) = removed.group_id {
            recompute_group(store, group_id)?;
        }
    }
    Ok(())
}

/// Remove a team from a group and rebuild the table without it.
pub fn remove_team_from_group(
    store: &mut Store,
    group_id: GroupId,
    team_id: TeamId,
) -> Result<(), TournamentError> {
    store.remove_team_from_group(group_id, team_id)?;
    recompute_group(store, group_id)?;
    Ok(())
}
