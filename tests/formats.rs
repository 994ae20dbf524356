//! Integration tests for the four format strategies.

mod common;

use std::collections::HashSet;
use tournament_scheduler_web::logic::{
    group_playoff_with_rng, group_reclass_with_rng, single_elimination_with_rng,
};
use tournament_scheduler_web::{
    generate_for_format, round_robin, GroupRef, ScheduleBundle, Stage, TournamentError,
    TournamentFormat,
};
use uuid::Uuid;

const FORMATS: [TournamentFormat; 4] = [
    TournamentFormat::GroupPlayoff,
    TournamentFormat::RoundRobin,
    TournamentFormat::SingleElimination,
    TournamentFormat::GroupReclass,
];

fn assert_numbers_increase(bundle: &ScheduleBundle) {
    let numbers: Vec<u32> = bundle.matches.iter().map(|m| m.match_number).collect();
    assert_eq!(numbers, (1..=numbers.len() as u32).collect::<Vec<u32>>());
}

#[test]
fn every_format_rejects_fewer_than_two_teams() {
    for format in FORMATS {
        for n in 0..2 {
            let teams = common::team_ids(n);
            let result = generate_for_format(format, &teams, Uuid::new_v4(), &mut common::rng(1));
            assert_eq!(
                result,
                Err(TournamentError::NotEnoughTeams { required: 2, found: n }),
                "{format:?} with {n} teams"
            );
        }
    }
}

#[test]
fn group_playoff_eight_teams() {
    let teams = common::team_ids(8);
    let tid = Uuid::new_v4();
    let bundle = group_playoff_with_rng(&teams, tid, &mut common::rng(8)).unwrap();
    assert_eq!(bundle.tournament_id, tid);
    assert_eq!(bundle.groups.len(), 2);
    assert!(bundle.groups.iter().all(|g| g.team_ids.len() == 4));

    let group_matches: Vec<_> = bundle.matches.iter().filter(|m| m.stage == Stage::Group).collect();
    let playoff: Vec<_> = bundle.matches.iter().filter(|m| m.stage == Stage::Playoff).collect();
    assert_eq!(group_matches.len(), 12);
    assert_eq!(playoff.len(), 3);
    assert_numbers_increase(&bundle);

    // group matches come first, then the bracket
    let last_group = group_matches.iter().map(|m| m.match_number).max().unwrap();
    let first_playoff = playoff.iter().map(|m| m.match_number).min().unwrap();
    assert!(last_group < first_playoff);

    for m in &group_matches {
        let GroupRef(idx) = m.group_ref.unwrap();
        let members = &bundle.groups[idx].team_ids;
        assert!(members.contains(&m.home_team_id.unwrap()));
        assert!(members.contains(&m.away_team_id.unwrap()));
        assert!((1..=3).contains(&m.round));
    }
    for m in &playoff {
        assert!(m.group_ref.is_none());
        assert!(m.home_team_id.is_none() && m.away_team_id.is_none());
    }
    assert_eq!(playoff.iter().filter(|m| m.round == 1).count(), 2);
    assert_eq!(playoff.iter().filter(|m| m.round == 2).count(), 1);
}

#[test]
fn round_robin_five_teams() {
    let teams = common::team_ids(5);
    let bundle = round_robin(&teams, Uuid::new_v4()).unwrap();
    assert!(bundle.groups.is_empty());
    assert_eq!(bundle.matches.len(), 10);
    assert!(bundle
        .matches
        .iter()
        .all(|m| m.stage == Stage::RoundRobin && m.group_ref.is_none()));
    assert_eq!(bundle.matches.iter().map(|m| m.round).max(), Some(5));
    assert_numbers_increase(&bundle);
}

#[test]
fn single_elimination_six_teams() {
    let teams = common::team_ids(6);
    let bundle = single_elimination_with_rng(&teams, Uuid::new_v4(), &mut common::rng(3)).unwrap();
    assert!(bundle.groups.is_empty());
    assert_eq!(bundle.matches.len(), 7);
    assert!(bundle.matches.iter().all(|m| m.stage == Stage::Elimination));
    assert_numbers_increase(&bundle);
}

#[test]
fn group_reclass_only_generates_group_stage() {
    let teams = common::team_ids(8);
    let bundle = group_reclass_with_rng(&teams, Uuid::new_v4(), &mut common::rng(4)).unwrap();
    assert_eq!(bundle.groups.len(), 2);
    assert_eq!(bundle.matches.len(), 12);
    assert!(bundle.matches.iter().all(|m| m.stage == Stage::Group));
    assert_numbers_increase(&bundle);

    let refs: HashSet<_> = bundle.matches.iter().filter_map(|m| m.group_ref).collect();
    assert_eq!(refs, HashSet::from([GroupRef(0), GroupRef(1)]));
}
