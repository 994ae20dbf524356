//! Group partitioning: shuffle the roster and deal it into groups of about four.

use crate::models::{group_name, GroupDraft, TeamId};
use rand::seq::SliceRandom;
use rand::Rng;

/// Preferred number of teams per group.
pub const TARGET_GROUP_SIZE: usize = 4;

/// Number of groups for `team_count` teams: `round(n / 4)`, at least 1.
pub fn group_count(team_count: usize) -> usize {
    ((team_count + TARGET_GROUP_SIZE / 2) / TARGET_GROUP_SIZE).max(1)
}

/// Split teams into balanced groups (sizes differ by at most one) using a fresh random draw.
pub fn partition_teams(team_ids: &[TeamId]) -> Vec<GroupDraft> {
    partition_teams_with_rng(team_ids, &mut rand::thread_rng())
}

/// Shuffle, then deal: the i-th shuffled team goes to group `i % group_count`.
pub fn partition_teams_with_rng<R: Rng + ?Sized>(team_ids: &[TeamId], rng: &mut R) -> Vec<GroupDraft> {
    let mut shuffled = team_ids.to_vec();
    shuffled.shuffle(rng);

    let count = group_count(shuffled.len());
    let mut groups: Vec<GroupDraft> = (0..count)
        .map(|i| GroupDraft::new(group_name(i), Vec::new()))
        .collect();
    for (i, team_id) in shuffled.into_iter().enumerate() {
        groups[i % count].team_ids.push(team_id);
    }

    log::debug!("Partitioned {} teams into {} groups", team_ids.len(), count);
    groups
}
