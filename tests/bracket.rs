//! Integration tests for elimination trees and playoff skeletons.

mod common;

use std::collections::HashSet;
use tournament_scheduler_web::logic::{bracket_rounds, bracket_size, elimination_bracket_with_rng};
use tournament_scheduler_web::{playoff_skeleton, MatchDraft, MatchStatus, Stage};

fn round(drafts: &[MatchDraft], r: u32) -> Vec<&MatchDraft> {
    drafts.iter().filter(|d| d.round == r).collect()
}

#[test]
fn bracket_size_is_next_power_of_two() {
    assert_eq!(bracket_size(1), 2);
    assert_eq!(bracket_size(2), 2);
    assert_eq!(bracket_size(3), 4);
    assert_eq!(bracket_size(6), 8);
    assert_eq!(bracket_size(8), 8);
    assert_eq!(bracket_size(9), 16);
    assert_eq!(bracket_rounds(8), 3);
}

#[test]
fn six_teams_two_byes_then_empty_semis_and_final() {
    let teams = common::team_ids(6);
    let drafts = elimination_bracket_with_rng(&teams, 1, &mut common::rng(6));

    let first = round(&drafts, 1);
    assert_eq!(first.len(), 4);
    let byes = first
        .iter()
        .filter(|d| d.home_team_id.is_some() != d.away_team_id.is_some())
        .count();
    assert_eq!(byes, 2);
    assert!(first.iter().all(|d| d.home_team_id.is_some() || d.away_team_id.is_some()));

    let semis = round(&drafts, 2);
    assert_eq!(semis.len(), 2);
    assert!(semis.iter().all(|d| d.home_team_id.is_none() && d.away_team_id.is_none()));

    let finals = round(&drafts, 3);
    assert_eq!(finals.len(), 1);
    assert!(finals[0].home_team_id.is_none() && finals[0].away_team_id.is_none());

    assert!(drafts
        .iter()
        .all(|d| d.stage == Stage::Elimination && d.status == MatchStatus::Scheduled && d.group_ref.is_none()));
}

#[test]
fn round_count_and_first_round_shape() {
    for n in 2..=33usize {
        let teams = common::team_ids(n);
        let drafts = elimination_bracket_with_rng(&teams, 1, &mut common::rng(n as u64));
        let slots = bracket_size(n);

        let rounds = drafts.iter().map(|d| d.round).max().unwrap();
        assert_eq!(rounds, (n as f64).log2().ceil() as u32, "n={n}");
        assert_eq!(drafts.len(), slots - 1);

        let first = round(&drafts, 1);
        assert_eq!(first.len(), slots / 2);
        let one_sided = first
            .iter()
            .filter(|d| d.home_team_id.is_some() != d.away_team_id.is_some())
            .count();
        assert_eq!(one_sided, slots - n, "n={n}: byes only for slots beyond the team count");

        let seeded: Vec<_> = first
            .iter()
            .flat_map(|d| [d.home_team_id, d.away_team_id])
            .flatten()
            .collect();
        assert_eq!(seeded.len(), n);
        assert_eq!(
            seeded.iter().copied().collect::<HashSet<_>>(),
            teams.iter().copied().collect::<HashSet<_>>()
        );

        let numbers: Vec<u32> = drafts.iter().map(|d| d.match_number).collect();
        assert_eq!(numbers, (1..slots as u32).collect::<Vec<u32>>());
    }
}

#[test]
fn single_team_gets_a_walkover_slot() {
    let teams = common::team_ids(1);
    let drafts = elimination_bracket_with_rng(&teams, 1, &mut common::rng(1));
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].home_team_id, Some(teams[0]));
    assert_eq!(drafts[0].away_team_id, None);
}

#[test]
fn playoff_skeleton_for_two_groups() {
    let drafts = playoff_skeleton(2, 13);
    assert_eq!(drafts.len(), 3);
    assert_eq!(round(&drafts, 1).len(), 2);
    assert_eq!(round(&drafts, 2).len(), 1);
    let numbers: Vec<u32> = drafts.iter().map(|d| d.match_number).collect();
    assert_eq!(numbers, vec![13, 14, 15]);
    assert!(drafts
        .iter()
        .all(|d| d.stage == Stage::Playoff && d.home_team_id.is_none() && d.away_team_id.is_none()));
}

#[test]
fn playoff_skeleton_rounds_up_to_power_of_two() {
    let drafts = playoff_skeleton(3, 1);
    assert_eq!(round(&drafts, 1).len(), 4);
    assert_eq!(round(&drafts, 2).len(), 2);
    assert_eq!(round(&drafts, 3).len(), 1);

    let single = playoff_skeleton(1, 1);
    assert_eq!(single.len(), 1);
    assert_eq!(single[0].round, 1);
}
