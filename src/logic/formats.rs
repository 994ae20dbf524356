//! Format strategies: build the full initial schedule (groups and matches) for each format.
//!
//! Match numbers run as one counter across everything a strategy emits, group matches first,
//! then the playoff bracket. Rounds restart at 1 for each stage.

use crate::logic::bracket::{elimination_bracket_with_rng, playoff_skeleton};
use crate::logic::pairing::round_robin_drafts;
use crate::logic::partition::partition_teams_with_rng;
use crate::models::{
    GroupDraft, GroupRef, MatchDraft, Stage, TeamId, TournamentError, TournamentFormat, TournamentId,
};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Fewest teams any format accepts.
pub const MIN_TEAMS: usize = 2;

/// Everything a strategy generates, to be stored by the caller.
///
/// `matches[..].group_ref` indexes into `groups`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScheduleBundle {
    pub tournament_id: TournamentId,
    pub groups: Vec<GroupDraft>,
    pub matches: Vec<MatchDraft>,
}

fn require_teams(team_ids: &[TeamId]) -> Result<(), TournamentError> {
    if team_ids.len() < MIN_TEAMS {
        return Err(TournamentError::NotEnoughTeams {
            required: MIN_TEAMS,
            found: team_ids.len(),
        });
    }
    Ok(())
}

/// Run the strategy for `format`.
pub fn generate_for_format<R: Rng + ?Sized>(
    format: TournamentFormat,
    team_ids: &[TeamId],
    tournament_id: TournamentId,
    rng: &mut R,
) -> Result<ScheduleBundle, TournamentError> {
    match format {
        TournamentFormat::GroupPlayoff => group_playoff_with_rng(team_ids, tournament_id, rng),
        TournamentFormat::RoundRobin => round_robin(team_ids, tournament_id),
        TournamentFormat::SingleElimination => single_elimination_with_rng(team_ids, tournament_id, rng),
        TournamentFormat::GroupReclass => group_reclass_with_rng(team_ids, tournament_id, rng),
    }
}

/// Round robin inside each group, numbered from 1. Returns the drafts and the next free number.
fn group_stage(groups: &[GroupDraft]) -> (Vec<MatchDraft>, u32) {
    let mut matches = Vec::new();
    let mut next_number = 1;
    for (idx, group) in groups.iter().enumerate() {
        let drafts = round_robin_drafts(&group.team_ids, Some(GroupRef(idx)), Stage::Group, next_number);
        next_number += drafts.len() as u32;
        matches.extend(drafts);
    }
    (matches, next_number)
}

/// Groups of about four, round robin in each, then an empty playoff bracket for the top two.
pub fn group_playoff(team_ids: &[TeamId], tournament_id: TournamentId) -> Result<ScheduleBundle, TournamentError> {
    group_playoff_with_rng(team_ids, tournament_id, &mut rand::thread_rng())
}

pub fn group_playoff_with_rng<R: Rng + ?Sized>(
    team_ids: &[TeamId],
    tournament_id: TournamentId,
    rng: &mut R,
) -> Result<ScheduleBundle, TournamentError> {
    require_teams(team_ids)?;
    let groups = partition_teams_with_rng(team_ids, rng);
    let (mut matches, next_number) = group_stage(&groups);
    matches.extend(playoff_skeleton(groups.len(), next_number));
    Ok(ScheduleBundle {
        tournament_id,
        groups,
        matches,
    })
}

/// One league over the whole roster. No groups, no randomness.
pub fn round_robin(team_ids: &[TeamId], tournament_id: TournamentId) -> Result<ScheduleBundle, TournamentError> {
    require_teams(team_ids)?;
    Ok(ScheduleBundle {
        tournament_id,
        groups: Vec::new(),
        matches: round_robin_drafts(team_ids, None, Stage::RoundRobin, 1),
    })
}

/// Knockout over the whole roster. No groups.
pub fn single_elimination(team_ids: &[TeamId], tournament_id: TournamentId) -> Result<ScheduleBundle, TournamentError> {
    single_elimination_with_rng(team_ids, tournament_id, &mut rand::thread_rng())
}

pub fn single_elimination_with_rng<R: Rng + ?Sized>(
    team_ids: &[TeamId],
    tournament_id: TournamentId,
    rng: &mut R,
) -> Result<ScheduleBundle, TournamentError> {
    require_teams(team_ids)?;
    Ok(ScheduleBundle {
        tournament_id,
        groups: Vec::new(),
        matches: elimination_bracket_with_rng(team_ids, 1, rng),
    })
}

/// Groups of about four with a round robin in each. Reclassification comes after the group
/// stage is complete, so nothing else is generated here.
pub fn group_reclass(team_ids: &[TeamId], tournament_id: TournamentId) -> Result<ScheduleBundle, TournamentError> {
    group_reclass_with_rng(team_ids, tournament_id, &mut rand::thread_rng())
}

pub fn group_reclass_with_rng<R: Rng + ?Sized>(
    team_ids: &[TeamId],
    tournament_id: TournamentId,
    rng: &mut R,
) -> Result<ScheduleBundle, TournamentError> {
    require_teams(team_ids)?;
    let groups = partition_teams_with_rng(team_ids, rng);
    let (matches, _) = group_stage(&groups);
    Ok(ScheduleBundle {
        tournament_id,
        groups,
        matches,
    })
}
