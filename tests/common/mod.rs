//! Shared helpers for integration tests.
#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::SeedableRng;
use tournament_scheduler_web::{
    GameMatch, Group, GroupDraft, MatchDraft, MatchStatus, Stage, TeamId, Tournament,
};
use uuid::Uuid;

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn team_ids(n: usize) -> Vec<TeamId> {
    (0..n).map(|_| Uuid::new_v4()).collect()
}

pub fn group(name: &str, team_ids: Vec<TeamId>) -> Group {
    Group::from_draft(GroupDraft::new(name, team_ids), Stage::Group)
}

/// A completed match between two teams.
pub fn played(group: Option<&Group>, home: TeamId, away: TeamId, home_score: u32, away_score: u32) -> GameMatch {
    let draft = MatchDraft::new(None, 1, 1, Some(home), Some(away), Stage::Group);
    let mut m = GameMatch::from_draft(Uuid::new_v4(), group.map(|g| g.id), &draft);
    m.home_score = Some(home_score);
    m.away_score = Some(away_score);
    m.status = MatchStatus::Completed;
    m
}

/// Every pair in the group played once; the team listed earlier always wins 2-0,
/// so the final table is the group's insertion order.
pub fn complete_group(group: &Group) -> Vec<GameMatch> {
    let ids = &group.team_ids;
    let mut matches = Vec::new();
    for i in 0..ids.len() {
        for j in i + 1..ids.len() {
            matches.push(played(Some(group), ids[j], ids[i], 0, 2));
        }
    }
    matches
}

/// An empty playoff slot with the given match number.
pub fn playoff_slot(match_number: u32) -> GameMatch {
    let draft = MatchDraft::empty(1, match_number, Stage::Playoff);
    GameMatch::from_draft(Uuid::new_v4(), None, &draft)
}

/// Record a 2-1 home win for every match of the stage that has two teams.
pub fn complete_stage(tournament: &mut Tournament, stage: Stage) {
    let ids: Vec<_> = tournament
        .matches_in_stage(stage)
        .into_iter()
        .filter(|m| m.home_team_id.is_some() && m.away_team_id.is_some())
        .map(|m| m.id)
        .collect();
    for id in ids {
        tournament.record_score(id, 2, 1).unwrap();
    }
}

pub fn tournament_with_teams(n: usize, format: tournament_scheduler_web::TournamentFormat) -> Tournament {
    Tournament::with_teams("Cup", format, (0..n).map(|i| format!("Team {i}"))).unwrap()
}
