//! Playoff fill: seed group-stage qualifiers into the empty first playoff round.

use crate::logic::bracket::QUALIFIERS_PER_GROUP;
use crate::logic::standings::compute_standings;
use crate::models::{
    GameMatch, Group, MatchId, Stage, TeamId, Tournament, TournamentError, TournamentPhase,
};
use serde::{Deserialize, Serialize};

/// Teams to put into one first-round playoff match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayoffSlotUpdate {
    pub match_id: MatchId,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
}

/// Pair the top two of each group into the round-1 playoff matches.
///
/// Slot `i` (by match number) gets the winner of group `i` at home and the runner-up of the
/// adjacent group away (groups 0/1, 2/3, ...). With no adjacent group it takes the runner-up
/// of its own group. If that yields nothing, qualifiers are paired in order: 1st and 2nd of
/// the flat qualifier list, then 3rd and 4th, and so on.
///
/// Callers must only run this once the group stage is complete and the playoff is empty.
pub fn playoff_fill_updates(
    groups: &[Group],
    group_matches: &[GameMatch],
    playoff_round1: &[GameMatch],
) -> Vec<PlayoffSlotUpdate> {
    let qualifiers: Vec<Vec<TeamId>> = groups
        .iter()
        .map(|g| {
            let matches = group_matches.iter().filter(|m| m.group_id == Some(g.id));
            compute_standings(&g.team_ids, matches)
                .into_iter()
                .take(QUALIFIERS_PER_GROUP)
                .map(|s| s.team_id)
                .collect()
        })
        .collect();

    let mut slots: Vec<&GameMatch> = playoff_round1.iter().collect();
    slots.sort_by_key(|m| m.match_number);

    let crossed: Vec<PlayoffSlotUpdate> = slots
        .iter()
        .enumerate()
        .filter_map(|(i, slot)| {
            let home = *qualifiers.get(i)?.first()?;
            let partner = if i % 2 == 0 { i + 1 } else { i - 1 };
            let away = qualifiers
                .get(partner)
                .and_then(|q| q.get(1))
                .or_else(|| qualifiers[i].get(1))
                .copied()?;
            Some(PlayoffSlotUpdate {
                match_id: slot.id,
                home_team_id: home,
                away_team_id: away,
            })
        })
        .collect();
    if !crossed.is_empty() {
        return crossed;
    }

    let flat: Vec<TeamId> = qualifiers.into_iter().flatten().collect();
    slots
        .iter()
        .zip(flat.chunks_exact(2))
        .map(|(slot, pair)| PlayoffSlotUpdate {
            match_id: slot.id,
            home_team_id: pair[0],
            away_team_id: pair[1],
        })
        .collect()
}

/// Fill the stored playoff bracket once the group stage is done and the bracket still empty.
pub fn fill_playoff(tournament: &mut Tournament) -> Result<Vec<PlayoffSlotUpdate>, TournamentError> {
    if tournament.phase() != TournamentPhase::PlayoffFillable {
        return Err(TournamentError::PreconditionFailed(
            "group stage must be completed and the playoff bracket empty",
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
    let round1: Vec<GameMatch> = tournament
        .matches_in_stage(Stage::Playoff)
        .into_iter()
        .filter(|m| m.round == 1)
        .cloned()
        .collect();

    let updates = playoff_fill_updates(&groups, &group_matches, &round1);
    if updates.is_empty() {
        return Err(TournamentError::PreconditionFailed(
            "not enough qualifiers to seed a playoff match",
        ));
    }
    for u in &updates {
        let m = tournament
            .get_match_mut(u.match_id)
            .ok_or(TournamentError::MatchNotFound(u.match_id))?;
        m.home_team_id = Some(u.home_team_id);
        m.away_team_id = Some(u.away_team_id);
    }

    log::info!(
        "Filled {} playoff matches for tournament {}",
        updates.len(),
        tournament.id
    );
    Ok(updates)
}
