//! Integration tests for round-robin pairing (circle method).

mod common;

use std::collections::HashSet;
use tournament_scheduler_web::logic::round_robin_drafts;
use tournament_scheduler_web::{round_robin_rounds, GroupRef, Stage};

fn unordered(a: usize, b: usize) -> (usize, usize) {
    (a.min(b), a.max(b))
}

#[test]
fn four_teams_three_rounds_of_two() {
    let teams = ['A', 'B', 'C', 'D'];
    let rounds = round_robin_rounds(&teams);
    assert_eq!(rounds.len(), 3);
    assert!(rounds.iter().all(|r| r.len() == 2));
    assert_eq!(rounds.iter().map(Vec::len).sum::<usize>(), 6);
    for t in teams {
        let appearances = rounds
            .iter()
            .flatten()
            .filter(|(h, a)| *h == t || *a == t)
            .count();
        assert_eq!(appearances, 3);
    }
    assert_eq!(rounds[0], vec![('A', 'D'), ('B', 'C')]);
}

#[test]
fn five_teams_each_sits_out_once() {
    let teams = ['A', 'B', 'C', 'D', 'E'];
    let rounds = round_robin_rounds(&teams);
    assert_eq!(rounds.len(), 5);
    assert_eq!(rounds.iter().map(Vec::len).sum::<usize>(), 10);
    assert!(rounds.iter().all(|r| r.len() == 2));
    for t in teams {
        let byes = rounds
            .iter()
            .filter(|r| !r.iter().any(|(h, a)| *h == t || *a == t))
            .count();
        assert_eq!(byes, 1, "team {t} should sit out exactly once");
    }
}

#[test]
fn every_pair_exactly_once_and_no_team_twice_per_round() {
    for n in 2..=13 {
        let teams: Vec<usize> = (0..n).collect();
        let rounds = round_robin_rounds(&teams);

        let mut seen = HashSet::new();
        for round in &rounds {
            let mut in_round = HashSet::new();
            for &(h, a) in round {
                assert_ne!(h, a);
                assert!(in_round.insert(h), "n={n}: team {h} twice in a round");
                assert!(in_round.insert(a), "n={n}: team {a} twice in a round");
                assert!(seen.insert(unordered(h, a)), "n={n}: pair {h}-{a} repeated");
            }
        }
        assert_eq!(seen.len(), n * (n - 1) / 2);
        let expected_rounds = if n % 2 == 0 { n - 1 } else { n };
        assert_eq!(rounds.len(), expected_rounds);
    }
}

#[test]
fn fewer_than_two_teams_gives_no_rounds() {
    assert!(round_robin_rounds::<u8>(&[]).is_empty());
    assert!(round_robin_rounds(&[1u8]).is_empty());
}

#[test]
fn drafts_are_numbered_consecutively_from_given_start() {
    let teams = common::team_ids(4);
    let drafts = round_robin_drafts(&teams, Some(GroupRef(1)), Stage::Group, 7);
    assert_eq!(drafts.len(), 6);
    let numbers: Vec<u32> = drafts.iter().map(|d| d.match_number).collect();
    assert_eq!(numbers, (7..13).collect::<Vec<u32>>());
    let rounds: Vec<u32> = drafts.iter().map(|d| d.round).collect();
    assert_eq!(rounds, vec![1, 1, 2, 2, 3, 3]);
    assert!(drafts.iter().all(|d| d.group_ref == Some(GroupRef(1)) && d.stage == Stage::Group));
    assert!(drafts.iter().all(|d| d.home_team_id.is_some() && d.away_team_id.is_some()));
}
