//! Composed read views assembled by the store's query layer.
//!
//! Extended/joined records (team-with-country, match-with-teams) are explicit
//! value types rather than loosely-typed maps.

use crate::models::champion::Champion;
use crate::models::game::Match;
use crate::models::phase::{Group, GroupStanding, Phase};
use crate::models::team::{Country, Team};
use serde::Serialize;

/// A team together with its country.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TeamWithCountry {
    #[serde(flatten)]
    pub team: Team,
    pub country: Country,
}

/// A match together with both teams, its phase and (for group stage) its group.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MatchWithTeams {
    #[serde(flatten)]
    pub fixture: Match,
    pub home_team: TeamWithCountry,
    pub away_team: TeamWithCountry,
    pub phase: Phase,
    pub group: Option<Group>,
}

/// A standing row together with its team.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct StandingWithTeam {
    #[serde(flatten)]
    pub standing: GroupStanding,
    pub team: TeamWithCountry,
}

/// A champion record together with the winning team and the runner-up.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ChampionWithTeams {
    #[serde(flatten)]
    pub record: Champion,
    pub champion: TeamWithCountry,
    pub runner_up: Option<TeamWithCountry>,
}
