//! Integration tests for seeding group qualifiers into the playoff bracket.

mod common;

use common::{complete_group, group, playoff_slot};
use tournament_scheduler_web::playoff_fill_updates;

#[test]
fn two_groups_cross_adjacent_runners_up() {
    let a = group("Group A", common::team_ids(4));
    let b = group("Group B", common::team_ids(4));
    let mut group_matches = complete_group(&a);
    group_matches.extend(complete_group(&b));

    // passed out of order: slots are taken by match number
    let slots = vec![playoff_slot(14), playoff_slot(13)];
    let updates = playoff_fill_updates(&[a.clone(), b.clone()], &group_matches, &slots);

    assert_eq!(updates.len(), 2);
    assert_eq!(updates[0].match_id, slots[1].id);
    assert_eq!(updates[0].home_team_id, a.team_ids[0]);
    assert_eq!(updates[0].away_team_id, b.team_ids[1]);
    assert_eq!(updates[1].match_id, slots[0].id);
    assert_eq!(updates[1].home_team_id, b.team_ids[0]);
    assert_eq!(updates[1].away_team_id, a.team_ids[1]);
}

#[test]
fn single_group_plays_its_own_top_two() {
    let a = group("Group A", common::team_ids(5));
    let group_matches = complete_group(&a);
    let slots = vec![playoff_slot(11)];
    let updates = playoff_fill_updates(&[a.clone()], &group_matches, &slots);
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].home_team_id, a.team_ids[0]);
    assert_eq!(updates[0].away_team_id, a.team_ids[1]);
}

#[test]
fn odd_group_without_partner_uses_own_runner_up() {
    let groups: Vec<_> = ["Group A", "Group B", "Group C"]
        .iter()
        .map(|name| group(name, common::team_ids(3)))
        .collect();
    let group_matches: Vec<_> = groups.iter().flat_map(complete_group).collect();
    let slots: Vec<_> = (1..=4).map(playoff_slot).collect();

    let updates = playoff_fill_updates(&groups, &group_matches, &slots);
    assert_eq!(updates.len(), 3);
    assert_eq!(updates[2].home_team_id, groups[2].team_ids[0]);
    assert_eq!(updates[2].away_team_id, groups[2].team_ids[1]);
}

#[test]
fn falls_back_to_sequential_pairing() {
    // one-team groups have no runner-up, so crossing finds nothing
    let a = group("Group A", common::team_ids(1));
    let b = group("Group B", common::team_ids(1));
    let slots = vec![playoff_slot(1), playoff_slot(2)];
    let updates = playoff_fill_updates(&[a.clone(), b.clone()], &[], &slots);
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].match_id, slots[0].id);
    assert_eq!(updates[0].home_team_id, a.team_ids[0]);
    assert_eq!(updates[0].away_team_id, b.team_ids[0]);
}
