//! Match entity and its CRUD payloads.

use crate::models::phase::{GroupId, PhaseId};
use crate::models::team::TeamId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// A single match between two teams.
///
/// Group-stage matches carry a `group_id` and optionally a `gameweek`;
/// knockout matches carry no group and a `round` label ("Quarter 1",
/// "Semi 2", "Final"). A match that is not played has no scores; a
/// played match has both.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub phase_id: PhaseId,
    pub group_id: Option<GroupId>,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub is_played: bool,
    pub match_date: Option<DateTime<Utc>>,
    /// Knockout slot label, e.g. "Quarter 1", "Semi 1", "Final".
    pub round: Option<String>,
    /// Group-stage matchday: 1..N.
    pub gameweek: Option<u32>,
    pub created_at: DateTime<Utc>,
}

impl Match {
    /// Create an unplayed match.
    pub fn new(home_team_id: TeamId, away_team_id: TeamId, phase_id: PhaseId) -> Self {
        Self {
            id: Uuid::new_v4(),
            home_team_id,
            away_team_id,
            phase_id,
            group_id: None,
            home_score: None,
            away_score: None,
            is_played: false,
            match_date: None,
            round: None,
            gameweek: None,
            created_at: Utc::now(),
        }
    }
}

/// Payload for creating a match.
#[derive(Clone, Debug, Deserialize)]
pub struct NewMatch {
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub phase_id: PhaseId,
    #[serde(default)]
    pub group_id: Option<GroupId>,
    #[serde(default)]
    pub home_score: Option<u32>,
    #[serde(default)]
    pub away_score: Option<u32>,
    #[serde(default)]
    pub is_played: bool,
    #[serde(default)]
    pub match_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub round: Option<String>,
    #[serde(default)]
    pub gameweek: Option<u32>,
}

/// Partial update for a match: only fields present in the payload change.
///
/// Setting `is_played: false` clears both scores; entering or editing a
/// result means sending `home_score`, `away_score` and `is_played: true`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MatchUpdate {
    pub home_team_id: Option<TeamId>,
    pub away_team_id: Option<TeamId>,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub is_played: Option<bool>,
    pub match_date: Option<DateTime<Utc>>,
    pub round: Option<String>,
    pub gameweek: Option<u32>,
}
