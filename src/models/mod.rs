//! Data structures for the tournament: countries, teams, phases, groups, matches, champions.

mod champion;
mod error;
mod game;
mod phase;
mod team;
mod views;

pub use champion::{Champion, ChampionId, NewChampion};
pub use error::TournamentError;
pub use game::{Match, MatchId, MatchUpdate, NewMatch};
pub use phase::{
    Group, GroupId, GroupStanding, NewGroup, NewPhase, Phase, PhaseId, PhaseUpdate, StandingId,
};
pub use team::{Country, CountryId, NewCountry, NewTeam, Team, TeamId, TeamStats, TeamUpdate};
pub use views::{ChampionWithTeams, MatchWithTeams, StandingWithTeam, TeamWithCountry};
