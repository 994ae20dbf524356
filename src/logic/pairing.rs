//! Round-robin pairings by the circle method.

use crate::models::{GroupRef, MatchDraft, Stage, TeamId};

/// Pair everyone with everyone once, round by round.
///
/// 1. Odd count: add a bye placeholder so the count is even.
/// 2. Each round pairs position `i` with position `n - 1 - i`; pairs with the bye are dropped.
/// 3. Rotate: position 0 stays, the last entry moves to position 1.
///
/// Yields `n - 1` rounds for even `n`, `n` rounds for odd `n` (one team sits out per round).
/// Home/away is simply the side each team lands on; it is not balanced.
pub fn round_robin_rounds<T: Copy>(items: &[T]) -> Vec<Vec<(T, T)>> {
    if items.len() < 2 {
        return Vec::new();
    }
    let mut slots: Vec<Option<T>> = items.iter().copied().map(Some).collect();
    if slots.len() % 2 == 1 {
        slots.push(None);
    }
    let n = slots.len();

    let mut rounds = Vec::with_capacity(n - 1);
    for _ in 0..n - 1 {
        let pairs: Vec<(T, T)> = (0..n / 2)
            .filter_map(|i| match (slots[i], slots[n - 1 - i]) {
                (Some(home), Some(away)) => Some((home, away)),
                _ => None,
            })
            .collect();
        rounds.push(pairs);

        if let Some(last) = slots.pop() {
            slots.insert(1, last);
        }
    }
    rounds
}

/// Round-robin schedule for one group as match drafts, numbered from `first_match_number`.
/// Rounds start at 1.
pub fn round_robin_drafts(
    team_ids: &[TeamId],
    group_ref: Option<GroupRef>,
    stage: Stage,
    first_match_number: u32,
) -> Vec<MatchDraft> {
    let mut match_number = first_match_number;
    let mut drafts = Vec::new();
    for (round_idx, pairs) in round_robin_rounds(team_ids).into_iter().enumerate() {
        let round = round_idx as u32 + 1;
        for (home, away) in pairs {
            drafts.push(MatchDraft::new(
                group_ref,
                round,
                match_number,
                Some(home),
                Some(away),
                stage,
            ));
            match_number += 1;
        }
    }
    drafts
}
