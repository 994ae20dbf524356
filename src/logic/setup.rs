//! Setup phase: run the tournament's format strategy and store the result.

use crate::logic::formats::generate_for_format;
use crate::models::{
    GameMatch, Group, GroupDraft, MatchDraft, Stage, Tournament, TournamentError,
};
use rand::Rng;

/// Generate and store the schedule with a fresh random draw.
pub fn generate_schedule(tournament: &mut Tournament) -> Result<(), TournamentError> {
    generate_schedule_with_rng(tournament, &mut rand::thread_rng())
}

/// Generate the initial schedule for the tournament's format and store groups and matches.
/// Only valid once, while the tournament has no matches.
pub fn generate_schedule_with_rng<R: Rng + ?Sized>(tournament: &mut Tournament, rng: &mut R) -> Result<(), TournamentError> {
    if !tournament.matches.is_empty() {
        return Err(TournamentError::AlreadyGenerated);
    }
    let bundle = generate_for_format(tournament.format, &tournament.team_ids(), tournament.id, rng)?;
    let group_count = bundle.groups.len();
    let match_count = bundle.matches.len();
    store_drafts(tournament, bundle.groups, Stage::Group, bundle.matches, 0)?;
    log::info!(
        "Generated {:?} schedule for tournament {}: {} groups, {} matches",
        tournament.format,
        tournament.id,
        group_count,
        match_count
    );
    Ok(())
}

/// Store generated groups, then store the matches with their group placeholders swapped for
/// the new group ids and their match numbers shifted by `number_offset`.
///
/// All placeholders are checked before anything is written.
pub(crate) fn store_drafts(
    tournament: &mut Tournament,
    groups: Vec<GroupDraft>,
    group_stage: Stage,
    matches: Vec<MatchDraft>,
    number_offset: u32,
) -> Result<(), TournamentError> {
    if let Some(bad) = matches
        .iter()
        .filter_map(|m| m.group_ref)
        .find(|r| r.0 >= groups.len())
    {
        return Err(TournamentError::UnresolvedGroupRef(bad));
    }

    let stored: Vec<Group> = groups
        .into_iter()
        .map(|draft| Group::from_draft(draft, group_stage))
        .collect();
    let group_ids: Vec<_> = stored.iter().map(|g| g.id).collect();
    tournament.groups.extend(stored);

    let tournament_id = tournament.id;
    tournament.matches.extend(matches.iter().map(|draft| {
        let group_id = draft.group_ref.map(|r| group_ids[r.0]);
        let mut m = GameMatch::from_draft(tournament_id, group_id, draft);
        m.match_number += number_offset;
        m
    }));
    Ok(())
}
