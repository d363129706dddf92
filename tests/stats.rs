//! Integration tests for the statistics aggregator: leaderboards and the
//! cached team-stats recompute.

use tournament_web::{
    logic, NewChampion, NewCountry, NewMatch, NewPhase, NewTeam, PhaseId, Store, TeamId,
};

fn seed(team_names: &[&str]) -> (Store, PhaseId, Vec<TeamId>) {
    let mut store = Store::new();
    let country = store
        .create_country(NewCountry {
            name: "Testland".into(),
            code: "TL".into(),
            flag_url: None,
        })
        .unwrap();
    let phase = store
        .create_phase(NewPhase {
            name: "Group Stage".into(),
            order: 1,
            is_active: true,
            is_unlocked: true,
        })
        .unwrap();
    let teams = team_names
        .iter()
        .map(|name| {
            store
                .create_team(NewTeam {
                    name: (*name).into(),
                    short_name: name[..3.min(name.len())].to_uppercase(),
                    country_id: country.id,
                    logo_url: None,
                    nickname: None,
                    founded: None,
                    stadium: None,
                    city: None,
                    lifetime_goals: 0,
                })
                .unwrap()
                .id
        })
        .collect();
    (store, phase.id, teams)
}

fn play(store: &mut Store, phase: PhaseId, home: TeamId, away: TeamId, hs: u32, aws: u32) {
    logic::create_match(
        store,
        NewMatch {
            home_team_id: home,
            away_team_id: away,
            phase_id: phase,
            group_id: None,
            home_score: Some(hs),
            away_score: Some(aws),
            is_played: true,
            match_date: None,
            round: None,
            gameweek: None,
        },
    )
    .unwrap();
}

#[test]
fn goals_and_clean_sheets_from_home_and_away_matches() {
    // Team X scores {2, 0, 1} and keeps one clean sheet (the 1-0 away win).
    let (mut store, phase, t) = seed(&["X", "Y", "Z"]);
    let (x, y, z) = (t[0], t[1], t[2]);
    play(&mut store, phase, x, y, 2, 1);
    play(&mut store, phase, y, x, 3, 0);
    play(&mut store, phase, z, x, 0, 1);

    let scorers = logic::top_goal_scorers(&store, 8).unwrap();
    let x_entry = scorers.iter().find(|e| e.team.team.id == x).unwrap();
    assert_eq!(x_entry.all_time_goals, 3);

    let defenders = logic::top_defenders(&store, 8).unwrap();
    let x_entry = defenders.iter().find(|e| e.team.team.id == x).unwrap();
    assert_eq!(x_entry.all_time_clean_sheets, 1);
}

#[test]
fn leaderboards_sort_desc_then_by_name_and_respect_limit() {
    let (mut store, phase, t) = seed(&["Milan", "Ajax", "Porto", "Boca"]);
    let (milan, ajax, porto, boca) = (t[0], t[1], t[2], t[3]);
    play(&mut store, phase, milan, porto, 2, 0);
    play(&mut store, phase, ajax, boca, 2, 1);

    let scorers = logic::top_goal_scorers(&store, 8).unwrap();
    let order: Vec<TeamId> = scorers.iter().map(|e| e.team.team.id).collect();
    // Ajax and Milan tie on 2 goals: name ascending puts Ajax first. Boca's
    // single goal beats Porto's none.
    assert_eq!(order, vec![ajax, milan, boca, porto]);

    let top2 = logic::top_goal_scorers(&store, 2).unwrap();
    assert_eq!(top2.len(), 2);
    assert_eq!(top2[0].team.team.id, ajax);

    let defenders = logic::top_defenders(&store, 8).unwrap();
    // Only Milan kept a clean sheet.
    assert_eq!(defenders[0].team.team.id, milan);
    assert_eq!(defenders[0].all_time_clean_sheets, 1);
    assert_eq!(defenders[1].all_time_clean_sheets, 0);
}

#[test]
fn leaderboards_do_not_touch_the_stats_cache() {
    let (mut store, phase, t) = seed(&["X", "Y"]);
    play(&mut store, phase, t[0], t[1], 4, 0);

    logic::top_goal_scorers(&store, 8).unwrap();
    logic::top_defenders(&store, 8).unwrap();
    assert!(store.team_stats(t[0]).is_none());
}

#[test]
fn recompute_persists_goals_clean_sheets_and_titles() {
    let (mut store, phase, t) = seed(&["X", "Y"]);
    play(&mut store, phase, t[0], t[1], 4, 0);
    store
        .create_champion(NewChampion {
            year: 2024,
            champion_id: t[0],
            runner_up_id: Some(t[1]),
        })
        .unwrap();
    store
        .create_champion(NewChampion {
            year: 2025,
            champion_id: t[0],
            runner_up_id: None,
        })
        .unwrap();

    logic::recompute_team_stats(&mut store).unwrap();

    let x_stats = store.team_stats(t[0]).unwrap();
    assert_eq!(x_stats.all_time_goals, 4);
    assert_eq!(x_stats.all_time_clean_sheets, 1);
    assert_eq!(x_stats.total_titles, 2);

    let y_stats = store.team_stats(t[1]).unwrap();
    assert_eq!(y_stats.all_time_goals, 0);
    assert_eq!(y_stats.total_titles, 0);
}

#[test]
fn recomputation_overwrites_a_stale_cache() {
    let (mut store, phase, t) = seed(&["X", "Y"]);
    play(&mut store, phase, t[0], t[1], 1, 0);

    logic::recompute_team_stats(&mut store).unwrap();
    let before = store.team_stats(t[0]).unwrap();
    assert_eq!(before.all_time_goals, 1);

    // New result lands; the cache is stale until the next recompute, and the
    // recompute always wins over whatever was cached.
    play(&mut store, phase, t[0], t[1], 2, 2);
    logic::recompute_team_stats(&mut store).unwrap();
    let after = store.team_stats(t[0]).unwrap();
    assert_eq!(after.all_time_goals, 3);
    assert_eq!(after.id, before.id); // row id stays stable across recomputes
}
