//! Standings: group and league tables derived from completed matches.

use crate::models::{
    GameMatch, GroupId, Stage, Standing, TeamId, Tournament, TournamentError, TournamentFormat,
    TournamentPhase,
};
use std::collections::HashMap;

/// One row per team in `team_ids`, ranked by points, goal difference, then goals for.
///
/// Only completed matches with both scores count. A side whose team is not in `team_ids` is
/// skipped. Rows still tied after goals for keep the order of `team_ids` (stable sort); there
/// is no head-to-head tiebreak.
pub fn compute_standings<'a, I>(team_ids: &[TeamId], matches: I) -> Vec<Standing>
where
    I: IntoIterator<Item = &'a GameMatch>,
{
    let mut rows: Vec<Standing> = team_ids.iter().copied().map(Standing::new).collect();
    let index: HashMap<TeamId, usize> = team_ids
        .iter()
        .enumerate()
        .map(|(i, &id)| (id, i))
        .collect();

    for m in matches {
        let Some((home_score, away_score)) = m.score() else {
            continue;
        };
        if let Some(&i) = m.home_team_id.and_then(|id| index.get(&id)) {
            rows[i].record(home_score, away_score);
        }
        if let Some(&i) = m.away_team_id.and_then(|id| index.get(&id)) {
            rows[i].record(away_score, home_score);
        }
    }

    rows.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(b.goal_diff.cmp(&a.goal_diff))
            .then(b.goals_for.cmp(&a.goals_for))
    });
    rows
}

/// Table for one stored group, from the matches played inside it.
pub fn group_standings(tournament: &Tournament, group_id: GroupId) -> Result<Vec<Standing>, TournamentError> {
    let group = tournament
        .group(group_id)
        .ok_or(TournamentError::GroupNotFound(group_id))?;
    Ok(compute_standings(&group.team_ids, tournament.group_matches(group_id)))
}

/// League table over every registered team and every round-robin match.
pub fn league_standings(tournament: &Tournament) -> Vec<Standing> {
    compute_standings(
        &tournament.team_ids(),
        tournament.matches.iter().filter(|m| m.stage == Stage::RoundRobin),
    )
}

/// Overall winner once the tournament is decided: the bracket final's winner, the league
/// leader, or the leader of the Gold reclassification group.
pub fn champion(tournament: &Tournament) -> Option<TeamId> {
    if tournament.phase() != TournamentPhase::Completed {
        return None;
    }
    match tournament.format {
        TournamentFormat::SingleElimination => tournament.final_match(Stage::Elimination)?.winner(),
        TournamentFormat::GroupPlayoff => tournament.final_match(Stage::Playoff)?.winner(),
        TournamentFormat::RoundRobin => league_standings(tournament).first().map(|s| s.team_id),
        TournamentFormat::GroupReclass => {
            let gold = tournament.groups_in_stage(Stage::Reclass).into_iter().next()?;
            group_standings(tournament, gold.id).ok()?.first().map(|s| s.team_id)
        }
    }
}
