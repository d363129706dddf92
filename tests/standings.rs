//! Integration tests for the standings calculator: invariants, ranking
//! order, idempotence and recompute triggers.

use tournament_web::{
    logic, GroupId, MatchUpdate, NewCountry, NewGroup, NewMatch, NewPhase, NewTeam, PhaseId, Store,
    TeamId, TournamentError,
};

fn seed_group(team_names: &[&str]) -> (Store, PhaseId, GroupId, Vec<TeamId>) {
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
    let group = store
        .create_group(NewGroup {
            name: "Group A".into(),
            phase_id: phase.id,
        })
        .unwrap();
    let mut team_ids = Vec::new();
    for name in team_names {
        let team = store
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
            .unwrap();
        store.add_team_to_group(group.id, team.id).unwrap();
        team_ids.push(team.id);
    }
    (store, phase.id, group.id, team_ids)
}

fn played(
    phase: PhaseId,
    group: GroupId,
    home: TeamId,
    away: TeamId,
    home_score: u32,
    away_score: u32,
) -> NewMatch {
    NewMatch {
        home_team_id: home,
        away_team_id: away,
        phase_id: phase,
        group_id: Some(group),
        home_score: Some(home_score),
        away_score: Some(away_score),
        is_played: true,
        match_date: None,
        round: None,
        gameweek: Some(1),
    }
}

#[test]
fn aggregates_satisfy_invariants() {
    let (mut store, phase, group, t) = seed_group(&["Alpha", "Beta", "Gamma"]);
    logic::create_match(&mut store, played(phase, group, t[0], t[1], 2, 1)).unwrap();
    logic::create_match(&mut store, played(phase, group, t[1], t[2], 0, 0)).unwrap();
    logic::create_match(&mut store, played(phase, group, t[2], t[0], 1, 3)).unwrap();

    for row in store.standings_for_group(group) {
        assert_eq!(
            row.goal_difference,
            row.goals_for as i32 - row.goals_against as i32
        );
        assert_eq!(row.points, 3 * row.won + row.drawn);
        assert_eq!(row.played, row.won + row.drawn + row.lost);
    }

    // Alpha won both: 6 points, position 1.
    let rows = store.standings_for_group(group);
    let alpha = rows.iter().find(|r| r.team_id == t[0]).unwrap();
    assert_eq!(alpha.points, 6);
    assert_eq!(alpha.position, 1);
    assert_eq!(alpha.goals_for, 5);
    assert_eq!(alpha.goals_against, 2);
}

#[test]
fn recompute_is_idempotent() {
    let (mut store, phase, group, t) = seed_group(&["Alpha", "Beta", "Gamma"]);
    logic::create_match(&mut store, played(phase, group, t[0], t[1], 4, 2)).unwrap();
    logic::create_match(&mut store, played(phase, group, t[1], t[2], 1, 1)).unwrap();

    let first = logic::recompute_group(&mut store, group).unwrap();
    let second = logic::recompute_group(&mut store, group).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, store.standings_for_group(group));
}

#[test]
fn goal_difference_breaks_equal_points() {
    // Alpha and Beta each beat Carl and Dave: both on 6 points, Alpha with
    // the better goal difference. Alpha must rank strictly above Beta no
    // matter in which order the results arrive.
    let fixtures: [(usize, usize, u32, u32); 4] = [
        (1, 2, 2, 0), // Alpha-Carl
        (1, 3, 1, 0), // Alpha-Dave
        (0, 2, 2, 1), // Beta-Carl
        (0, 3, 1, 0), // Beta-Dave
    ];
    for reversed in [false, true] {
        let (mut store, phase, group, t) = seed_group(&["Beta", "Alpha", "Carl", "Dave"]);
        let mut order = fixtures.to_vec();
        if reversed {
            order.reverse();
        }
        for (home, away, home_score, away_score) in order {
            logic::create_match(
                &mut store,
                played(phase, group, t[home], t[away], home_score, away_score),
            )
            .unwrap();
        }

        let rows = store.standings_for_group(group);
        let alpha_row = rows.iter().find(|r| r.team_id == t[1]).unwrap();
        let beta_row = rows.iter().find(|r| r.team_id == t[0]).unwrap();
        assert_eq!(alpha_row.points, 6);
        assert_eq!(beta_row.points, 6);
        assert_eq!(alpha_row.goal_difference, 3);
        assert_eq!(beta_row.goal_difference, 2);
        assert_eq!(alpha_row.position, 1);
        assert_eq!(beta_row.position, 2);
    }
}

#[test]
fn name_breaks_full_ties_deterministically() {
    let (mut store, phase, group, t) = seed_group(&["Zebra", "Apple"]);
    logic::create_match(&mut store, played(phase, group, t[0], t[1], 1, 1)).unwrap();

    let rows = store.standings_for_group(group);
    assert_eq!(rows[0].team_id, t[1]); // Apple before Zebra
    assert_eq!(rows[0].position, 1);
    assert_eq!(rows[1].team_id, t[0]);
}

#[test]
fn editing_a_result_recomputes_the_table() {
    let (mut store, phase, group, t) = seed_group(&["Alpha", "Beta"]);
    let m = logic::create_match(&mut store, played(phase, group, t[0], t[1], 1, 0)).unwrap();
    assert_eq!(store.standings_for_group(group)[0].team_id, t[0]);

    logic::update_match(
        &mut store,
        m.id,
        MatchUpdate {
            home_score: Some(0),
            away_score: Some(2),
            ..Default::default()
        },
    )
    .unwrap();
    let rows = store.standings_for_group(group);
    assert_eq!(rows[0].team_id, t[1]);
    assert_eq!(rows[0].points, 3);
}

#[test]
fn deleting_a_played_match_rolls_the_table_back() {
    let (mut store, phase, group, t) = seed_group(&["Alpha", "Beta"]);
    let m = logic::create_match(&mut store, played(phase, group, t[0], t[1], 3, 0)).unwrap();
    logic::delete_match(&mut store, m.id).unwrap();

    for row in store.standings_for_group(group) {
        assert_eq!(row.played, 0);
        assert_eq!(row.points, 0);
        assert_eq!(row.goals_for, 0);
    }
}

#[test]
fn reverting_to_unplayed_clears_scores_and_table() {
    let (mut store, phase, group, t) = seed_group(&["Alpha", "Beta"]);
    let m = logic::create_match(&mut store, played(phase, group, t[0], t[1], 2, 2)).unwrap();
    let m = logic::update_match(
        &mut store,
        m.id,
        MatchUpdate {
            is_played: Some(false),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(m.home_score, None);
    assert_eq!(m.away_score, None);
    for row in store.standings_for_group(group) {
        assert_eq!(row.played, 0);
    }
}

#[test]
fn unplayed_matches_do_not_count() {
    let (mut store, phase, group, t) = seed_group(&["Alpha", "Beta"]);
    logic::create_match(
        &mut store,
        NewMatch {
            home_team_id: t[0],
            away_team_id: t[1],
            phase_id: phase,
            group_id: Some(group),
            home_score: None,
            away_score: None,
            is_played: false,
            match_date: None,
            round: None,
            gameweek: Some(1),
        },
    )
    .unwrap();
    for row in store.standings_for_group(group) {
        assert_eq!(row.played, 0);
    }
}

#[test]
fn match_with_team_outside_group_is_skipped() {
    let (mut store, phase, group, t) = seed_group(&["Alpha", "Beta"]);
    // Gamma exists but has no standing in the group.
    let country = store.list_countries()[0].clone();
    let gamma = store
        .create_team(NewTeam {
            name: "Gamma".into(),
            short_name: "GAM".into(),
            country_id: country.id,
            logo_url: None,
            nickname: None,
            founded: None,
            stadium: None,
            city: None,
            lifetime_goals: 0,
        })
        .unwrap();
    logic::create_match(&mut store, played(phase, group, t[0], gamma.id, 5, 0)).unwrap();

    // Not fatal, and no aggregates move.
    for row in store.standings_for_group(group) {
        assert_eq!(row.played, 0);
    }
}

#[test]
fn removing_a_team_rebuilds_the_table_without_it() {
    let (mut store, phase, group, t) = seed_group(&["Alpha", "Beta", "Gamma"]);
    logic::create_match(&mut store, played(phase, group, t[0], t[1], 2, 0)).unwrap();
    logic::remove_team_from_group(&mut store, group, t[0]).unwrap();

    let rows = store.standings_for_group(group);
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.team_id != t[0]));
    // Alpha's win over Beta is now a dangling match and is skipped.
    assert!(rows.iter().all(|r| r.played == 0));
}

#[test]
fn create_match_validation() {
    let (mut store, phase, group, t) = seed_group(&["Alpha", "Beta"]);

    let same_team = logic::create_match(&mut store, played(phase, group, t[0], t[0], 1, 0));
    assert_eq!(same_team.unwrap_err(), TournamentError::SameTeam);

    let mut missing_score = played(phase, group, t[0], t[1], 1, 0);
    missing_score.away_score = None;
    assert_eq!(
        logic::create_match(&mut store, missing_score).unwrap_err(),
        TournamentError::ScoresMismatch
    );

    let mut scored_unplayed = played(phase, group, t[0], t[1], 1, 0);
    scored_unplayed.is_played = false;
    assert_eq!(
        logic::create_match(&mut store, scored_unplayed).unwrap_err(),
        TournamentError::ScoresMismatch
    );
}
