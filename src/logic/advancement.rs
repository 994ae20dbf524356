//! Bracket advancement: move winners of completed knockout matches into the next round.

use crate::models::{
    GameMatch, MatchId, Side, Stage, TeamId, Tournament, TournamentError, TournamentFormat,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Put `team_id` on `side` of match `match_id`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AdvancementUpdate {
    pub match_id: MatchId,
    pub side: Side,
    pub team_id: TeamId,
}

/// Winners to move forward within one bracket stage.
///
/// The k-th match of round r (by match number) feeds match k/2 of round r+1: home when k is
/// even, away when odd. Unplayed matches, draws and slots that are already filled are left
/// alone.
pub fn bracket_advancements(matches: &[GameMatch]) -> Vec<AdvancementUpdate> {
    let mut rounds: BTreeMap<u32, Vec<&GameMatch>> = BTreeMap::new();
    for m in matches {
        rounds.entry(m.round).or_default().push(m);
    }
    for round in rounds.values_mut() {
        round.sort_by_key(|m| m.match_number);
    }

    let mut updates = Vec::new();
    for (round, current) in &rounds {
        let Some(next) = rounds.get(&(round + 1)) else {
            continue;
        };
        for (k, m) in current.iter().enumerate() {
            let (Some(winner), Some(target)) = (m.winner(), next.get(k / 2)) else {
                continue;
            };
            let side = if k % 2 == 0 { Side::Home } else { Side::Away };
            if target.team(side).is_none() {
                updates.push(AdvancementUpdate {
                    match_id: target.id,
                    side,
                    team_id: winner,
                });
            }
        }
    }
    updates
}

/// Advance winners in the tournament's knockout stage (elimination or playoff).
pub fn advance_bracket(tournament: &mut Tournament) -> Result<Vec<AdvancementUpdate>, TournamentError> {
    let stage = match tournament.format {
        TournamentFormat::SingleElimination => Stage::Elimination,
        TournamentFormat::GroupPlayoff => Stage::Playoff,
        _ => return Err(TournamentError::InvalidState),
    };
    let bracket: Vec<GameMatch> = tournament
        .matches_in_stage(stage)
        .into_iter()
        .cloned()
        .collect();

    let updates = bracket_advancements(&bracket);
    for u in &updates {
        let m = tournament
            .get_match_mut(u.match_id)
            .ok_or(TournamentError::MatchNotFound(u.match_id))?;
        match u.side {
            Side::Home => m.home_team_id = Some(u.team_id),
            Side::Away => m.away_team_id = Some(u.team_id),
        }
    }

    if !updates.is_empty() {
        log::info!(
            "Advanced {} team(s) in tournament {} bracket",
            updates.len(),
            tournament.id
        );
    }
    Ok(updates)
}
