//! Reclassification: after the group stage, regroup teams by finishing position.
//!
//! All group winners form the Gold group, all runners-up Silver, then Bronze and Consolation.
//! Each new group plays a fresh round robin. Positions past the fourth, and positions held
//! by fewer than two teams, are not reclassified.

use crate::logic::pairing::round_robin_drafts;
use crate::logic::setup::store_drafts;
use crate::logic::standings::compute_standings;
use crate::models::{
    GameMatch, Group, GroupDraft, GroupRef, MatchDraft, Stage, TeamId, Tournament, TournamentError,
    TournamentPhase,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reclassification group, by the group-stage position its teams finished in.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReclassTier {
    Gold,
    Silver,
    Bronze,
    Consolation,
}

impl ReclassTier {
    pub const ALL: [ReclassTier; 4] = [
        ReclassTier::Gold,
        ReclassTier::Silver,
        ReclassTier::Bronze,
        ReclassTier::Consolation,
    ];

    /// Tier for a 0-based finishing position, if that position is reclassified at all.
    pub fn for_position(position: usize) -> Option<Self> {
        Self::ALL.get(position).copied()
    }
}

impl fmt::Display for ReclassTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReclassTier::Gold => "Gold",
            ReclassTier::Silver => "Silver",
            ReclassTier::Bronze => "Bronze",
            ReclassTier::Consolation => "Consolation",
        };
        f.write_str(name)
    }
}

/// New groups and their matches. `new_matches[..].group_ref` indexes into `new_groups`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ReclassBundle {
    pub new_groups: Vec<GroupDraft>,
    pub new_matches: Vec<MatchDraft>,
}

/// Bucket teams by finishing position across all groups and schedule each bucket.
///
/// Match numbers restart at 1 for this batch; rounds restart at 1 in every new group.
/// Callers must only run this once all group matches are completed and no reclassification
/// exists yet.
pub fn reclassify(groups: &[Group], group_matches: &[GameMatch]) -> ReclassBundle {
    let mut buckets: Vec<Vec<TeamId>> = vec![Vec::new(); ReclassTier::ALL.len()];
    for g in groups {
        let matches = group_matches.iter().filter(|m| m.group_id == Some(g.id));
        for (position, standing) in compute_standings(&g.team_ids, matches).into_iter().enumerate() {
            if let Some(bucket) = buckets.get_mut(position) {
                bucket.push(standing.team_id);
            }
        }
    }

    let mut bundle = ReclassBundle::default();
    let mut next_number = 1;
    for (position, team_ids) in buckets.into_iter().enumerate() {
        let Some(tier) = ReclassTier::for_position(position) else {
            break;
        };
        if team_ids.len() < 2 {
            log::debug!("Skipping {} reclassification: {} team(s)", tier, team_ids.len());
            continue;
        }
        let group_ref = GroupRef(bundle.new_groups.len());
        let drafts = round_robin_drafts(&team_ids, Some(group_ref), Stage::Reclass, next_number);
        next_number += drafts.len() as u32;
        bundle.new_matches.extend(drafts);
        bundle.new_groups.push(GroupDraft::new(tier.to_string(), team_ids));
    }
    bundle
}

/// Create and store the reclassification groups once the group stage is done.
///
/// Stored match numbers continue after the tournament's highest existing number so they stay
/// unique within the tournament.
pub fn create_reclassification(tournament: &mut Tournament) -> Result<ReclassBundle, TournamentError> {
    if tournament.phase() != TournamentPhase::ReclassFillable {
        return Err(TournamentError::PreconditionFailed(
            "group stage must be completed and reclassification not created yet",
        ));
    }

    let groups: Vec<Group> = tournament
        .groups_in_stage(Stage::Group)
        .into_iter()
        .cloned()
        .collect();
    let group_matches: Vec<GameMatch> = tournament
        .matches_in_stage(Stage::Group)
        .into_iter()
        .cloned()
        .collect();

    let bundle = reclassify(&groups, &group_matches);
    let offset = tournament.next_match_number() - 1;
    store_drafts(
        tournament,
        bundle.new_groups.clone(),
        Stage::Reclass,
        bundle.new_matches.clone(),
        offset,
    )?;
    tournament.reclassified_at = Some(Utc::now());

    log::info!(
        "Reclassification for tournament {}: {} groups, {} matches",
        tournament.id,
        bundle.new_groups.len(),
        bundle.new_matches.len()
    );
    Ok(bundle)
}
