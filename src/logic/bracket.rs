//! Knockout brackets: seeded elimination trees and empty playoff skeletons.

use crate::models::{MatchDraft, Stage, TeamId};
use rand::seq::SliceRandom;
use rand::Rng;

/// Teams each group sends to the playoff.
pub const QUALIFIERS_PER_GROUP: usize = 2;

/// Bracket slots for `team_count` entrants: next power of two, at least 2.
pub fn bracket_size(team_count: usize) -> usize {
    team_count.next_power_of_two().max(2)
}

/// Number of rounds in a bracket of `slots` slots (log2).
pub fn bracket_rounds(slots: usize) -> u32 {
    slots.max(2).trailing_zeros()
}

/// Elimination tree over `team_ids` with a fresh random seeding.
pub fn elimination_bracket(team_ids: &[TeamId], first_match_number: u32) -> Vec<MatchDraft> {
    elimination_bracket_with_rng(team_ids, first_match_number, &mut rand::thread_rng())
}

/// Elimination tree: shuffled teams fill round 1, later rounds are empty until winners advance.
///
/// The `slots - n` empty slots are byes and sit on the away side of the last round-1 pairs, so
/// every round-1 match has at least one team. A bye match is only recorded as scheduled; the
/// lone team is not moved into round 2.
pub fn elimination_bracket_with_rng<R: Rng + ?Sized>(
    team_ids: &[TeamId],
    first_match_number: u32,
    rng: &mut R,
) -> Vec<MatchDraft> {
    let mut teams = team_ids.to_vec();
    teams.shuffle(rng);

    let slots = bracket_size(teams.len());
    let pairs = slots / 2;
    let byes = slots - teams.len();
    let full_pairs = pairs.saturating_sub(byes);

    let mut seeded: Vec<Option<TeamId>> = Vec::with_capacity(slots);
    let mut entrants = teams.into_iter();
    for pair in 0..pairs {
        seeded.push(entrants.next());
        seeded.push(if pair < full_pairs { entrants.next() } else { None });
    }

    let mut match_number = first_match_number;
    let mut drafts = Vec::with_capacity(slots - 1);
    for pair in seeded.chunks(2) {
        drafts.push(MatchDraft::new(None, 1, match_number, pair[0], pair[1], Stage::Elimination));
        match_number += 1;
    }
    drafts.extend(empty_rounds(slots / 4, 2, match_number, Stage::Elimination));

    log::debug!(
        "Elimination bracket: {} teams, {} slots, {} byes",
        team_ids.len(),
        slots,
        byes
    );
    drafts
}

/// Empty playoff bracket for `group_count` groups sending two qualifiers each.
pub fn playoff_skeleton(group_count: usize, first_match_number: u32) -> Vec<MatchDraft> {
    let slots = bracket_size(group_count * QUALIFIERS_PER_GROUP);
    log::debug!("Playoff skeleton: {} groups, {} slots", group_count, slots);
    empty_rounds(slots / 2, 1, first_match_number, Stage::Playoff)
}

/// Halving rounds of empty matches, starting with `first_round_matches` in round `first_round`
/// and ending with the single final.
fn empty_rounds(first_round_matches: usize, first_round: u32, first_match_number: u32, stage: Stage) -> Vec<MatchDraft> {
    let mut drafts = Vec::new();
    let mut match_number = first_match_number;
    let mut round = first_round;
    let mut count = first_round_matches;
    while count >= 1 {
        for _ in 0..count {
            drafts.push(MatchDraft::empty(round, match_number, stage));
            match_number += 1;
        }
        count /= 2;
        round += 1;
    }
    drafts
}
