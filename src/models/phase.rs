//! Phase, Group and GroupStanding.

use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a phase.
pub type PhaseId = Uuid;

/// Unique identifier for a group.
pub type GroupId = Uuid;

/// Unique identifier for a group standing row.
pub type StandingId = Uuid;

/// A tournament phase (e.g. "Group Stage", "Quarterfinals", "Semifinals", "Final").
///
/// Progression is explicit stored state: `is_active` is flipped only by the
/// qualification resolver and the bracket engine, never inferred by readers.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    pub id: PhaseId,
    pub name: String,
    pub order: u32,
    pub is_active: bool,
    pub is_unlocked: bool,
}

/// Payload for creating a phase.
#[derive(Clone, Debug, Deserialize)]
pub struct NewPhase {
    pub name: String,
    pub order: u32,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_unlocked: bool,
}

/// Partial update for a phase.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PhaseUpdate {
    pub name: Option<String>,
    pub order: Option<u32>,
    pub is_active: Option<bool>,
    pub is_unlocked: Option<bool>,
}

/// A group within the group-stage phase (Group A, B, C, ...).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub phase_id: PhaseId,
}

/// Payload for creating a group.
#[derive(Clone, Debug, Deserialize)]
pub struct NewGroup {
    pub name: String,
    pub phase_id: PhaseId,
}

/// One row of a group table: one per (group, team) pair.
///
/// Aggregates are derived from played matches by `logic::standings`;
/// after every recompute `goal_difference == goals_for - goals_against`
/// and `points == 3 * won + drawn` hold, and `position` is the 1-based
/// rank within the group.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GroupStanding {
    pub id: StandingId,
    pub group_id: GroupId,
    pub team_id: TeamId,
    pub position: u32,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i32,
    pub points: u32,
}
