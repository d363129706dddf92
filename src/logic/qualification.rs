//! Qualification resolver: turns completed group tables into quarterfinal
//! entrants via the fixed cross-pairing table.

use crate::models::{Group, Match, TeamId, TournamentError};
use crate::store::Store;

/// Labels of the four quarterfinal slots, in bracket order.
pub const QUARTERFINAL_ROUNDS: [&str; 4] = ["Quarter 1", "Quarter 2", "Quarter 3", "Quarter 4"];

fn rank_of(store: &Store, group: &Group, rank: u32) -> Result<TeamId, TournamentError> {
    store
        .standings_for_group(group.id)
        .iter()
        .find(|s| s.position == rank)
        .map(|s| s.team_id)
        .ok_or_else(|| TournamentError::QualificationSlotUnfilled {
            group: group.name.clone(),
            rank,
        })
}

/// Create the four quarterfinal matches from the final group tables.
///
/// Preconditions: the group-stage phase (the earliest phase that owns
/// groups) has exactly four groups, and every team in every group has played
/// its full single round robin (`played == n - 1`). On any failure nothing
/// is changed.
///
/// Cross-pairing, top two per group, groups A-D in name order:
/// A1-D2, B1-C2, A2-C1, B2-D1. First-ranked teams are at home. The pairing
/// keeps same-group rematches out of the first knockout round and is a
/// fixed table, not a general algorithm.
///
/// On success the group-stage phase is deactivated and the quarterfinal
/// phase (next by order) becomes active and unlocked.
pub fn resolve_quarterfinals(store: &mut Store) -> Result<Vec<Match>, TournamentError> {
    let group_phase = store
        .list_phases()
        .into_iter()
        .find(|p| !store.groups_by_phase(p.id).is_empty())
        .ok_or(TournamentError::WrongGroupCount {
            expected: 4,
            found: 0,
        })?;

    let groups = store.groups_by_phase(group_phase.id);
    if groups.len() != 4 {
        return Err(TournamentError::WrongGroupCount {
            expected: 4,
            found: groups.len(),
        });
    }

    let mut incomplete = Vec::new();
    for group in &groups {
        let rows = store.standings_for_group(group.id);
        let expected = rows.len().saturating_sub(1) as u32;
        if rows.len() < 2 || rows.iter().any(|r| r.played != expected) {
            incomplete.push(group.name.clone());
        }
    }
    if !incomplete.is_empty() {
        return Err(TournamentError::IncompleteGroups(incomplete));
    }

    let quarter_phase = store
        .phase_by_order(group_phase.order + 1)
        .ok_or(TournamentError::NextPhaseMissing(group_phase.order + 1))?;
    if !store.phase_matches(quarter_phase.id).is_empty() {
        return Err(TournamentError::BracketAlreadySeeded);
    }

    let (a, b, c, d) = (&groups[0], &groups[1], &groups[2], &groups[3]);
    let pairs = [
        (rank_of(store, a, 1)?, rank_of(store, d, 2)?),
        (rank_of(store, b, 1)?, rank_of(store, c, 2)?),
        (rank_of(store, a, 2)?, rank_of(store, c, 1)?),
        (rank_of(store, b, 2)?, rank_of(store, d, 1)?),
    ];

    let mut created = Vec::with_capacity(4);
    for ((home, away), round) in pairs.into_iter().zip(QUARTERFINAL_ROUNDS) {
        let mut m = Match::new(home, away, quarter_phase.id);
        m.round = Some(round.to_string());
        created.push(store.insert_match(m));
    }

    store.set_phase_active(group_phase.id, false);
    store.set_phase_active(quarter_phase.id, true);
    log::info!(
        "group stage complete: seeded {} quarterfinals",
        created.len()
    );
    Ok(created)
}
