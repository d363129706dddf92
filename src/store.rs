//! In-memory entity store: durable records for countries, teams, phases,
//! groups, standings, matches, champions and team stats.
//!
//! The store is plain data behind typed CRUD and filtered listing; callers
//! wrap it in a lock (the web binary uses `RwLock`) so every mutation,
//! including a full standings recompute, happens under one write guard and
//! readers never observe a half-updated table.

use crate::models::{
    Champion, ChampionId, ChampionWithTeams, Country, CountryId, Group, GroupId, GroupStanding,
    Match, MatchId, MatchWithTeams, NewChampion, NewCountry, NewGroup, NewPhase, NewTeam, Phase,
    PhaseId, PhaseUpdate, StandingId, StandingWithTeam, Team, TeamId, TeamStats, TeamUpdate,
    TeamWithCountry, TournamentError,
};
use chrono::Utc;
use std::collections::HashMap;
use uuid::Uuid;

/// All tournament entities, keyed by id.
#[derive(Clone, Debug, Default)]
pub struct Store {
    countries: HashMap<CountryId, Country>,
    teams: HashMap<TeamId, Team>,
    phases: HashMap<PhaseId, Phase>,
    groups: HashMap<GroupId, Group>,
    standings: HashMap<StandingId, GroupStanding>,
    matches: HashMap<MatchId, Match>,
    champions: HashMap<ChampionId, Champion>,
    stats: HashMap<TeamId, TeamStats>,
}

fn require_filled(field: &'static str, value: &str) -> Result<(), TournamentError> {
    if value.trim().is_empty() {
        return Err(TournamentError::EmptyField(field));
    }
    Ok(())
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    // Countries

    pub fn create_country(&mut self, data: NewCountry) -> Result<Country, TournamentError> {
        require_filled("name", &data.name)?;
        require_filled("code", &data.code)?;
        let country = Country {
            id: Uuid::new_v4(),
            name: data.name,
            code: data.code,
            flag_url: data.flag_url,
        };
        self.countries.insert(country.id, country.clone());
        Ok(country)
    }

    pub fn country(&self, id: CountryId) -> Result<&Country, TournamentError> {
        self.countries
            .get(&id)
            .ok_or(TournamentError::CountryNotFound(id))
    }

    pub fn list_countries(&self) -> Vec<Country> {
        let mut all: Vec<_> = self.countries.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }

    // Teams

    pub fn create_team(&mut self, data: NewTeam) -> Result<Team, TournamentError> {
        require_filled("name", &data.name)?;
        require_filled("short_name", &data.short_name)?;
        self.country(data.country_id)?;
        let team = Team {
            id: Uuid::new_v4(),
            name: data.name,
            short_name: data.short_name,
            country_id: data.country_id,
            logo_url: data.logo_url,
            nickname: data.nickname,
            founded: data.founded,
            stadium: data.stadium,
            city: data.city,
            lifetime_goals: data.lifetime_goals,
            created_at: Utc::now(),
        };
        self.teams.insert(team.id, team.clone());
        Ok(team)
    }

    pub fn team(&self, id: TeamId) -> Result<&Team, TournamentError> {
        self.teams.get(&id).ok_or(TournamentError::TeamNotFound(id))
    }

    pub fn team_with_country(&self, id: TeamId) -> Result<TeamWithCountry, TournamentError> {
        let team = self.team(id)?.clone();
        let country = self.country(team.country_id)?.clone();
        Ok(TeamWithCountry { team, country })
    }

    pub fn list_teams(&self) -> Result<Vec<TeamWithCountry>, TournamentError> {
        let mut all = Vec::with_capacity(self.teams.len());
        for id in self.teams.keys() {
            all.push(self.team_with_country(*id)?);
        }
        all.sort_by(|a, b| a.team.name.cmp(&b.team.name));
        Ok(all)
    }

    pub fn update_team(&mut self, id: TeamId, data: TeamUpdate) -> Result<Team, TournamentError> {
        if let Some(country_id) = data.country_id {
            self.country(country_id)?;
        }
        if let Some(name) = &data.name {
            require_filled("name", name)?;
        }
        if let Some(short_name) = &data.short_name {
            require_filled("short_name", short_name)?;
        }
        let team = self
            .teams
            .get_mut(&id)
            .ok_or(TournamentError::TeamNotFound(id))?;
        if let Some(name) = data.name {
            team.name = name;
        }
        if let Some(short_name) = data.short_name {
            team.short_name = short_name;
        }
        if let Some(country_id) = data.country_id {
            team.country_id = country_id;
        }
        if let Some(logo_url) = data.logo_url {
            team.logo_url = Some(logo_url);
        }
        if let Some(nickname) = data.nickname {
            team.nickname = Some(nickname);
        }
        if let Some(founded) = data.founded {
            team.founded = Some(founded);
        }
        if let Some(stadium) = data.stadium {
            team.stadium = Some(stadium);
        }
        if let Some(city) = data.city {
            team.city = Some(city);
        }
        if let Some(lifetime_goals) = data.lifetime_goals {
            team.lifetime_goals = lifetime_goals;
        }
        Ok(team.clone())
    }

    /// Delete a team. Rejected while any match, standing or champion record
    /// still references it; the derived stats row is removed along with it.
    pub fn delete_team(&mut self, id: TeamId) -> Result<(), TournamentError> {
        self.team(id)?;
        let referenced = self
            .matches
            .values()
            .any(|m| m.home_team_id == id || m.away_team_id == id)
            || self.standings.values().any(|s| s.team_id == id)
            || self
                .champions
                .values()
                .any(|c| c.champion_id == id || c.runner_up_id == Some(id));
        if referenced {
            return Err(TournamentError::TeamReferenced(id));
        }
        self.teams.remove(&id);
        self.stats.remove(&id);
        Ok(())
    }

    // Phases

    pub fn create_phase(&mut self, data: NewPhase) -> Result<Phase, TournamentError> {
        require_filled("name", &data.name)?;
        let phase = Phase {
            id: Uuid::new_v4(),
            name: data.name,
            order: data.order,
            is_active: data.is_active,
            is_unlocked: data.is_unlocked,
        };
        self.phases.insert(phase.id, phase.clone());
        Ok(phase)
    }

    pub fn phase(&self, id: PhaseId) -> Result<&Phase, TournamentError> {
        self.phases
            .get(&id)
            .ok_or(TournamentError::PhaseNotFound(id))
    }

    pub fn list_phases(&self) -> Vec<Phase> {
        let mut all: Vec<_> = self.phases.values().cloned().collect();
        all.sort_by_key(|p| p.order);
        all
    }

    pub fn phase_by_order(&self, order: u32) -> Option<Phase> {
        self.phases.values().find(|p| p.order == order).cloned()
    }

    pub fn update_phase(&mut self, id: PhaseId, data: PhaseUpdate) -> Result<Phase, TournamentError> {
        if let Some(name) = &data.name {
            require_filled("name", name)?;
        }
        let phase = self
            .phases
            .get_mut(&id)
            .ok_or(TournamentError::PhaseNotFound(id))?;
        if let Some(name) = data.name {
            phase.name = name;
        }
        if let Some(order) = data.order {
            phase.order = order;
        }
        if let Some(is_active) = data.is_active {
            phase.is_active = is_active;
        }
        if let Some(is_unlocked) = data.is_unlocked {
            phase.is_unlocked = is_unlocked;
        }
        Ok(phase.clone())
    }

    pub(crate) fn set_phase_active(&mut self, id: PhaseId, active: bool) {
        if let Some(phase) = self.phases.get_mut(&id) {
            phase.is_active = active;
            if active {
                phase.is_unlocked = true;
            }
        }
    }

    // Groups

    pub fn create_group(&mut self, data: NewGroup) -> Result<Group, TournamentError> {
        require_filled("name", &data.name)?;
        self.phase(data.phase_id)?;
        let group = Group {
            id: Uuid::new_v4(),
            name: data.name,
            phase_id: data.phase_id,
        };
        self.groups.insert(group.id, group.clone());
        Ok(group)
    }

    pub fn group(&self, id: GroupId) -> Result<&Group, TournamentError> {
        self.groups
            .get(&id)
            .ok_or(TournamentError::GroupNotFound(id))
    }

    pub fn groups_by_phase(&self, phase_id: PhaseId) -> Vec<Group> {
        let mut all: Vec<_> = self
            .groups
            .values()
            .filter(|g| g.phase_id == phase_id)
            .cloned()
            .collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }

    /// Delete a group along with its standings and matches.
    pub fn delete_group(&mut self, id: GroupId) -> Result<(), TournamentError> {
        self.group(id)?;
        self.groups.remove(&id);
        self.standings.retain(|_, s| s.group_id != id);
        self.matches.retain(|_, m| m.group_id != Some(id));
        Ok(())
    }

    // Group standings

    /// Assign a team to a group: a zeroed standing row at the next free position.
    pub fn add_team_to_group(
        &mut self,
        group_id: GroupId,
        team_id: TeamId,
    ) -> Result<GroupStanding, TournamentError> {
        self.group(group_id)?;
        self.team(team_id)?;
        if self
            .standings
            .values()
            .any(|s| s.group_id == group_id && s.team_id == team_id)
        {
            return Err(TournamentError::TeamAlreadyInGroup(team_id));
        }
        let position = self
            .standings
            .values()
            .filter(|s| s.group_id == group_id)
            .count() as u32
            + 1;
        let standing = GroupStanding {
            id: Uuid::new_v4(),
            group_id,
            team_id,
            position,
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
        };
        self.standings.insert(standing.id, standing.clone());
        Ok(standing)
    }

    /// Remove a team from a group, deleting its standing row. The caller is
    /// expected to recompute the group afterwards.
    pub fn remove_team_from_group(
        &mut self,
        group_id: GroupId,
        team_id: TeamId,
    ) -> Result<(), TournamentError> {
        self.group(group_id)?;
        let id = self
            .standings
            .values()
            .find(|s| s.group_id == group_id && s.team_id == team_id)
            .map(|s| s.id)
            .ok_or(TournamentError::TeamNotFound(team_id))?;
        self.standings.remove(&id);
        Ok(())
    }

    /// Raw standing rows of a group, in position order (for the calculator).
    pub fn standings_for_group(&self, group_id: GroupId) -> Vec<GroupStanding> {
        let mut rows: Vec<_> = self
            .standings
            .values()
            .filter(|s| s.group_id == group_id)
            .cloned()
            .collect();
        rows.sort_by_key(|s| s.position);
        rows
    }

    /// Standing rows of a group with team data, in position order (read API).
    pub fn group_standings(
        &self,
        group_id: GroupId,
    ) -> Result<Vec<StandingWithTeam>, TournamentError> {
        self.group(group_id)?;
        let mut out = Vec::new();
        for standing in self.standings_for_group(group_id) {
            let team = self.team_with_country(standing.team_id)?;
            out.push(StandingWithTeam { standing, team });
        }
        Ok(out)
    }

    /// Write back one recomputed standing row.
    pub fn replace_standing(&mut self, standing: GroupStanding) {
        self.standings.insert(standing.id, standing);
    }

    // Matches

    pub fn insert_match(&mut self, m: Match) -> Match {
        self.matches.insert(m.id, m.clone());
        m
    }

    pub fn match_by_id(&self, id: MatchId) -> Result<&Match, TournamentError> {
        self.matches
            .get(&id)
            .ok_or(TournamentError::MatchNotFound(id))
    }

    pub fn replace_match(&mut self, m: Match) {
        self.matches.insert(m.id, m);
    }

    pub fn remove_match(&mut self, id: MatchId) -> Result<Match, TournamentError> {
        self.matches
            .remove(&id)
            .ok_or(TournamentError::MatchNotFound(id))
    }

    /// Raw matches of a group (for the standings calculator).
    pub fn group_matches(&self, group_id: GroupId) -> Vec<Match> {
        self.matches
            .values()
            .filter(|m| m.group_id == Some(group_id))
            .cloned()
            .collect()
    }

    /// Raw matches of a phase (for the bracket engine).
    pub fn phase_matches(&self, phase_id: PhaseId) -> Vec<Match> {
        self.matches
            .values()
            .filter(|m| m.phase_id == phase_id)
            .cloned()
            .collect()
    }

    /// Raw played matches across the whole tournament (for the aggregator).
    pub fn played_matches(&self) -> Vec<Match> {
        self.matches
            .values()
            .filter(|m| m.is_played)
            .cloned()
            .collect()
    }

    fn match_view(&self, m: &Match) -> Result<MatchWithTeams, TournamentError> {
        let home_team = self.team_with_country(m.home_team_id)?;
        let away_team = self.team_with_country(m.away_team_id)?;
        let phase = self.phase(m.phase_id)?.clone();
        let group = match m.group_id {
            Some(id) => Some(self.group(id)?.clone()),
            None => None,
        };
        Ok(MatchWithTeams {
            fixture: m.clone(),
            home_team,
            away_team,
            phase,
            group,
        })
    }

    fn match_views<'a, I>(&self, matches: I) -> Result<Vec<MatchWithTeams>, TournamentError>
    where
        I: Iterator<Item = &'a Match>,
    {
        let mut out = Vec::new();
        for m in matches {
            out.push(self.match_view(m)?);
        }
        // Newest first; matches without a date at the end.
        out.sort_by(|a, b| b.fixture.match_date.cmp(&a.fixture.match_date));
        Ok(out)
    }

    pub fn list_matches(&self) -> Result<Vec<MatchWithTeams>, TournamentError> {
        self.match_views(self.matches.values())
    }

    pub fn matches_by_phase(
        &self,
        phase_id: PhaseId,
    ) -> Result<Vec<MatchWithTeams>, TournamentError> {
        self.phase(phase_id)?;
        self.match_views(self.matches.values().filter(|m| m.phase_id == phase_id))
    }

    pub fn matches_by_group(
        &self,
        group_id: GroupId,
    ) -> Result<Vec<MatchWithTeams>, TournamentError> {
        self.group(group_id)?;
        self.match_views(self.matches.values().filter(|m| m.group_id == Some(group_id)))
    }

    // Champions

    pub fn create_champion(&mut self, data: NewChampion) -> Result<Champion, TournamentError> {
        self.team(data.champion_id)?;
        if let Some(runner_up) = data.runner_up_id {
            self.team(runner_up)?;
        }
        let champion = Champion {
            id: Uuid::new_v4(),
            year: data.year,
            champion_id: data.champion_id,
            runner_up_id: data.runner_up_id,
            created_at: Utc::now(),
        };
        self.champions.insert(champion.id, champion.clone());
        Ok(champion)
    }

    pub fn champion_for_year(&self, year: i32) -> Option<Champion> {
        self.champions.values().find(|c| c.year == year).cloned()
    }

    pub fn champions_raw(&self) -> Vec<Champion> {
        self.champions.values().cloned().collect()
    }

    pub fn list_champions(&self) -> Result<Vec<ChampionWithTeams>, TournamentError> {
        let mut out = Vec::new();
        for record in self.champions.values() {
            let champion = self.team_with_country(record.champion_id)?;
            let runner_up = match record.runner_up_id {
                Some(id) => Some(self.team_with_country(id)?),
                None => None,
            };
            out.push(ChampionWithTeams {
                record: record.clone(),
                champion,
                runner_up,
            });
        }
        out.sort_by(|a, b| b.record.year.cmp(&a.record.year));
        Ok(out)
    }

    // Team stats (derived cache)

    pub fn team_stats(&self, team_id: TeamId) -> Option<TeamStats> {
        self.stats.get(&team_id).cloned()
    }

    /// Upsert the cached stats row for a team, keeping the row id stable.
    pub fn put_team_stats(&mut self, stats: TeamStats) {
        self.stats.insert(stats.team_id, stats);
    }

    /// Team ids in no particular order (for full-table recomputes).
    pub fn team_ids(&self) -> Vec<TeamId> {
        self.teams.keys().copied().collect()
    }
}
