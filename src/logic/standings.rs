//! Standings calculator: derives one consistent ranking table per group
//! from that group's played matches.

use crate::models::{GroupId, GroupStanding, TournamentError};
use crate::store::Store;

/// Recompute a group's table from scratch.
///
/// 1. Load the group's standing rows and reset every aggregate to zero.
/// 2. Fold every played match of the group into both teams' aggregates.
/// 3. Derive `goal_difference` and `points` (3 per win, 1 per draw).
/// 4. Rank by points desc, goal difference desc, goals for desc, then team
///    name asc, and assign positions 1..N.
/// 5. Write all rows back.
///
/// Idempotent: the result depends only on the group's match history. A
/// played match referencing a team with no standing row in the group is
/// skipped with a warning (CRUD validation should prevent that state).
pub fn recompute_group(
    store: &mut Store,
    group_id: GroupId,
) -> Result<Vec<GroupStanding>, TournamentError> {
    store.group(group_id)?;

    let mut rows = store.standings_for_group(group_id);
    for row in &mut rows {
        row.played = 0;
        row.won = 0;
        row.drawn = 0;
        row.lost = 0;
        row.goals_for = 0;
        row.goals_against = 0;
        row.goal_difference = 0;
        row.points = 0;
    }

    for m in store.group_matches(group_id) {
        if !m.is_played {
            continue;
        }
        let (home_score, away_score) = match (m.home_score, m.away_score) {
            (Some(h), Some(a)) => (h, a),
            _ => {
                log::warn!("played match {} has missing scores; skipped", m.id);
                continue;
            }
        };
        let home_idx = rows.iter().position(|r| r.team_id == m.home_team_id);
        let away_idx = rows.iter().position(|r| r.team_id == m.away_team_id);
        let (home_idx, away_idx) = match (home_idx, away_idx) {
            (Some(h), Some(a)) => (h, a),
            _ => {
                log::warn!(
                    "match {} references a team without a standing in its group; skipped",
                    m.id
                );
                continue;
            }
        };

        rows[home_idx].played += 1;
        rows[home_idx].goals_for += home_score;
        rows[home_idx].goals_against += away_score;
        rows[away_idx].played += 1;
        rows[away_idx].goals_for += away_score;
        rows[away_idx].goals_against += home_score;

        if home_score > away_score {
            rows[home_idx].won += 1;
            rows[away_idx].lost += 1;
        } else if home_score < away_score {
            rows[away_idx].won += 1;
            rows[home_idx].lost += 1;
        } else {
            rows[home_idx].drawn += 1;
            rows[away_idx].drawn += 1;
        }
    }

    for row in &mut rows {
        row.goal_difference = row.goals_for as i32 - row.goals_against as i32;
        row.points = 3 * row.won + row.drawn;
    }

    // Deterministic final tie-break on team name.
    let mut keyed: Vec<(GroupStanding, String)> = rows
        .into_iter()
        .map(|row| {
            let name = store
                .team(row.team_id)
                .map(|t| t.name.clone())
                .unwrap_or_default();
            (row, name)
        })
        .collect();
    keyed.sort_by(|(a, a_name), (b, b_name)| {
        b.points
            .cmp(&a.points)
            .then(b.goal_difference.cmp(&a.goal_difference))
            .then(b.goals_for.cmp(&a.goals_for))
            .then(a_name.cmp(b_name))
    });

    let mut rows: Vec<GroupStanding> = keyed.into_iter().map(|(row, _)| row).collect();
    for (i, row) in rows.iter_mut().enumerate() {
        row.position = i as u32 + 1;
    }

    for row in &rows {
        store.replace_standing(row.clone());
    }
    Ok(rows)
}
