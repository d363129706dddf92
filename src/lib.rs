//! Football tournament web app: library with models, store and business logic.

pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    advance_round, create_match, delete_match, record_champion, recompute_group,
    recompute_team_stats, remove_team_from_group, resolve_quarterfinals, top_defenders,
    top_goal_scorers, update_match, DefenderEntry, ScorerEntry, DEFAULT_LEADERBOARD_SIZE,
};
pub use models::{
    Champion, ChampionId, ChampionWithTeams, Country, CountryId, Group, GroupId, GroupStanding,
    Match, MatchId, MatchUpdate, MatchWithTeams, NewChampion, NewCountry, NewGroup, NewMatch,
    NewPhase, NewTeam, Phase, PhaseId, PhaseUpdate, StandingId, StandingWithTeam, Team, TeamId,
    TeamStats, TeamUpdate, TeamWithCountry, TournamentError,
};
pub use store::Store;
