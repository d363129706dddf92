//! Champion records: one per tournament edition.

use crate::models::team::TeamId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a champion record.
pub type ChampionId = Uuid;

/// The winner (and optional runner-up) of one tournament edition.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Champion {
    pub id: ChampionId,
    pub year: i32,
    pub champion_id: TeamId,
    pub runner_up_id: Option<TeamId>,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a champion record (historical entries).
#[derive(Clone, Debug, Deserialize)]
pub struct NewChampion {
    pub year: i32,
    pub champion_id: TeamId,
    #[serde(default)]
    pub runner_up_id: Option<TeamId>,
}
