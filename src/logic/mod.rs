//! Tournament business logic: standings, qualification, bracket, stats.

mod bracket;
mod fixtures;
mod qualification;
mod standings;
mod stats;

pub use bracket::{advance_round, record_champion};
pub use fixtures::{create_match, delete_match, remove_team_from_group, update_match};
pub use qualification::{resolve_quarterfinals, QUARTERFINAL_ROUNDS};
pub use standings::recompute_group;
pub use stats::{
    recompute_team_stats, top_defenders, top_goal_scorers, DefenderEntry, ScorerEntry,
    DEFAULT_LEADERBOARD_SIZE,
};
