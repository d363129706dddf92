//! Bracket progression engine: advances knockout winners round over round
//! and records the champion once the Final is played.

use crate::models::{Champion, Match, NewChampion, PhaseId, TeamId, TournamentError};
use crate::store::Store;
use chrono::{Datelike, Utc};

/// Which pairs of source slots feed which next-round slot.
const QUARTER_FEEDS: [(&str, &str, &str); 2] = [
    ("Quarter 1", "Quarter 2", "Semi 1"),
    ("Quarter 3", "Quarter 4", "Semi 2"),
];
const SEMI_FEEDS: [(&str, &str, &str); 1] = [("Semi 1", "Semi 2", "Final")];

/// Winner and loser of a played knockout match. A level score has no defined
/// winner (extra time and penalties are not modeled) and is rejected.
fn winner_loser(m: &Match) -> Result<(TeamId, TeamId), TournamentError> {
    let (home, away) = match (m.home_score, m.away_score) {
        (Some(h), Some(a)) => (h, a),
        _ => return Err(TournamentError::FinalNotPlayed),
    };
    if home == away {
        return Err(TournamentError::UnresolvedTie(m.id));
    }
    if home > away {
        Ok((m.home_team_id, m.away_team_id))
    } else {
        Ok((m.away_team_id, m.home_team_id))
    }
}

fn by_round<'a>(matches: &'a [Match], round: &str) -> Option<&'a Match> {
    matches.iter().find(|m| m.round.as_deref() == Some(round))
}

/// Advance every completed pair of `phase_id` into the next round.
///
/// A pair advances only once both its source matches are played; pairs with
/// a pending source are left alone. A drawn source match aborts the whole
/// call with an unresolvable-tie error before anything is written. Winners
/// fill the fixed next-round slots (Quarter 1/2 -> Semi 1, Quarter 3/4 ->
/// Semi 2, Semi 1/2 -> Final) in the phase with the next order; an existing
/// unplayed slot match is updated in place. Once every slot of the next
/// round is filled, phase activation moves forward.
pub fn advance_round(store: &mut Store, phase_id: PhaseId) -> Result<Vec<Match>, TournamentError> {
    let phase = store.phase(phase_id)?.clone();
    let matches = store.phase_matches(phase_id);

    let feeds: &[(&str, &str, &str)] = if by_round(&matches, "Quarter 1").is_some() {
        &QUARTER_FEEDS
    } else if by_round(&matches, "Semi 1").is_some() {
        &SEMI_FEEDS
    } else {
        return Err(TournamentError::NoNextRound);
    };

    let next_phase = store
        .phase_by_order(phase.order + 1)
        .ok_or(TournamentError::NextPhaseMissing(phase.order + 1))?;

    // Resolve all winners first so a tie anywhere aborts before any write.
    let mut advancing: Vec<(&str, TeamId, TeamId)> = Vec::new();
    for &(first, second, target) in feeds {
        let (Some(m1), Some(m2)) = (by_round(&matches, first), by_round(&matches, second)) else {
            continue;
        };
        if !m1.is_played || !m2.is_played {
            continue;
        }
        let (w1, _) = winner_loser(m1)?;
        let (w2, _) = winner_loser(m2)?;
        advancing.push((target, w1, w2));
    }

    let next_matches = store.phase_matches(next_phase.id);
    let mut touched = Vec::new();
    for (target, home, away) in advancing {
        match by_round(&next_matches, target) {
            Some(existing) if existing.is_played => continue,
            Some(existing) => {
                let mut m = existing.clone();
                m.home_team_id = home;
                m.away_team_id = away;
                store.replace_match(m.clone());
                touched.push(m);
            }
            None => {
                let mut m = Match::new(home, away, next_phase.id);
                m.round = Some(target.to_string());
                touched.push(store.insert_match(m));
            }
        }
    }

    let filled = store
        .phase_matches(next_phase.id)
        .iter()
        .filter(|m| feeds.iter().any(|&(_, _, t)| m.round.as_deref() == Some(t)))
        .count();
    if filled == feeds.len() && !touched.is_empty() {
        store.set_phase_active(phase.id, false);
        store.set_phase_active(next_phase.id, true);
        log::info!("{} complete: {} now active", phase.name, next_phase.name);
    }
    Ok(touched)
}

/// Record the champion of the current edition once the Final is played.
///
/// The Final's winner becomes the champion, its loser the runner-up, for
/// `Utc::now().year()`. Calling this again for the same year returns the
/// existing record instead of creating a second one.
pub fn record_champion(store: &mut Store) -> Result<Champion, TournamentError> {
    let final_match = store
        .played_matches()
        .into_iter()
        .find(|m| m.round.as_deref() == Some("Final"))
        .ok_or(TournamentError::FinalNotPlayed)?;
    let (winner, loser) = winner_loser(&final_match)?;

    let year = Utc::now().year();
    if let Some(existing) = store.champion_for_year(year) {
        return Ok(existing);
    }
    store.create_champion(NewChampion {
        year,
        champion_id: winner,
        runner_up_id: Some(loser),
    })
}
