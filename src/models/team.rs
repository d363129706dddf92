//! Country, Team and the denormalized per-team stats cache.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a country.
pub type CountryId = Uuid;

/// Unique identifier for a team (used in matches, standings and champions).
pub type TeamId = Uuid;

/// A country, mainly for team flags.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub id: CountryId,
    pub name: String,
    /// ISO country code.
    pub code: String,
    pub flag_url: Option<String>,
}

/// Payload for creating a country.
#[derive(Clone, Debug, Deserialize)]
pub struct NewCountry {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub flag_url: Option<String>,
}

/// A team participating in the tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub short_name: String,
    pub country_id: CountryId,
    pub logo_url: Option<String>,
    pub nickname: Option<String>,
    pub founded: Option<String>,
    pub stadium: Option<String>,
    pub city: Option<String>,
    /// Admin-editable display counter. Leaderboards derive goal totals from
    /// the match log instead (see logic::stats).
    pub lifetime_goals: u32,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a team.
#[derive(Clone, Debug, Deserialize)]
pub struct NewTeam {
    pub name: String,
    pub short_name: String,
    pub country_id: CountryId,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub founded: Option<String>,
    #[serde(default)]
    pub stadium: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub lifetime_goals: u32,
}

/// Partial update for a team: only fields present in the payload change.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TeamUpdate {
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub country_id: Option<CountryId>,
    pub logo_url: Option<String>,
    pub nickname: Option<String>,
    pub founded: Option<String>,
    pub stadium: Option<String>,
    pub city: Option<String>,
    pub lifetime_goals: Option<u32>,
}

/// Per-team lifetime counters (goals, clean sheets, titles).
///
/// This is a cache, not a source of truth: it must always be reproducible
/// from the match and champion history, and `logic::stats::recompute_team_stats`
/// is the only operation that writes it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamStats {
    pub id: Uuid,
    pub team_id: TeamId,
    pub all_time_goals: u32,
    pub all_time_clean_sheets: u32,
    pub total_titles: u32,
    pub updated_at: DateTime<Utc>,
}
