//! Errors that can occur during tournament operations.

use crate::models::game::MatchId;
use crate::models::phase::{GroupId, PhaseId};
use crate::models::team::{CountryId, TeamId};

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Country not found.
    CountryNotFound(CountryId),
    /// Team not found.
    TeamNotFound(TeamId),
    /// Phase not found.
    PhaseNotFound(PhaseId),
    /// Group not found.
    GroupNotFound(GroupId),
    /// Match not found.
    MatchNotFound(MatchId),
    /// A required field is empty or missing.
    EmptyField(&'static str),
    /// Home and away team of a match must differ.
    SameTeam,
    /// `is_played` and the score fields disagree (played needs both scores,
    /// not played must have none).
    ScoresMismatch,
    /// A match's group does not belong to the match's phase.
    GroupPhaseMismatch,
    /// Team is already assigned to the group.
    TeamAlreadyInGroup(TeamId),
    /// Team is still referenced by matches, standings or champions.
    TeamReferenced(TeamId),
    /// The group-stage phase does not have the expected number of groups.
    WrongGroupCount { expected: usize, found: usize },
    /// One or more groups have not finished their round robin (group names).
    IncompleteGroups(Vec<String>),
    /// A qualifying rank is unfilled in a group.
    QualificationSlotUnfilled { group: String, rank: u32 },
    /// Quarterfinal matches already exist; the bracket was seeded before.
    BracketAlreadySeeded,
    /// A knockout match ended level; no winner can be determined.
    UnresolvedTie(MatchId),
    /// The phase has no round feeding a next one (or no knockout matches).
    NoNextRound,
    /// No phase exists with the given order to hold the next round.
    NextPhaseMissing(u32),
    /// The Final has not been played yet.
    FinalNotPlayed,
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::CountryNotFound(_) => write!(f, "Country not found"),
            TournamentError::TeamNotFound(_) => write!(f, "Team not found"),
            TournamentError::PhaseNotFound(_) => write!(f, "Phase not found"),
            TournamentError::GroupNotFound(_) => write!(f, "Group not found"),
            TournamentError::MatchNotFound(_) => write!(f, "Match not found"),
            TournamentError::EmptyField(field) => write!(f, "Field '{}' must not be empty", field),
            TournamentError::SameTeam => write!(f, "Home and away team must differ"),
            TournamentError::ScoresMismatch => {
                write!(f, "A played match needs both scores; an unplayed match must have none")
            }
            TournamentError::GroupPhaseMismatch => {
                write!(f, "Group does not belong to the match's phase")
            }
            TournamentError::TeamAlreadyInGroup(_) => {
                write!(f, "Team is already assigned to this group")
            }
            TournamentError::TeamReferenced(_) => {
                write!(f, "Team is still referenced by matches, standings or champions")
            }
            TournamentError::WrongGroupCount { expected, found } => {
                write!(f, "Expected {} groups in the group stage, found {}", expected, found)
            }
            TournamentError::IncompleteGroups(names) => {
                write!(f, "Group stage is not complete: {}", names.join(", "))
            }
            TournamentError::QualificationSlotUnfilled { group, rank } => {
                write!(f, "No team at rank {} of group {}", rank, group)
            }
            TournamentError::BracketAlreadySeeded => {
                write!(f, "Quarterfinal matches already exist")
            }
            TournamentError::UnresolvedTie(_) => {
                write!(f, "Knockout match ended level; no winner can be determined")
            }
            TournamentError::NoNextRound => {
                write!(f, "Phase has no round feeding a next one")
            }
            TournamentError::NextPhaseMissing(order) => {
                write!(f, "No phase with order {} to hold the next round", order)
            }
            TournamentError::FinalNotPlayed => write!(f, "The Final has not been played"),
        }
    }
}
