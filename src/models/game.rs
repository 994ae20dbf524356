//! Match (game), its stage/status tags, and the draft form produced by the generators.

use crate::models::group::GroupId;
use crate::models::team::TeamId;
use crate::models::tournament::TournamentId;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Which side of a match.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[default]
    Home,
    Away,
}

/// Phase of the tournament format this match belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Group,
    Playoff,
    RoundRobin,
    Elimination,
    Reclass,
}

impl Stage {
    /// Stages whose winners move on through a bracket.
    pub fn is_knockout(self) -> bool {
        matches!(self, Stage::Playoff | Stage::Elimination)
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
}

/// Symbolic reference to a group by its position in the list of groups generated alongside
/// the match. The caller swaps it for a real [`GroupId`] once the groups are stored.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupRef(pub usize);

impl fmt::Display for GroupRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group#{}", self.0)
    }
}

/// A generated match that has not been stored yet.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchDraft {
    /// None for crossover/elimination rounds.
    pub group_ref: Option<GroupRef>,
    /// 1-based, restarts within each stage.
    pub round: u32,
    /// Strictly increasing across one generation batch.
    pub match_number: u32,
    /// None means not yet determined (unfilled slot or bye).
    pub home_team_id: Option<TeamId>,
    pub away_team_id: Option<TeamId>,
    pub status: MatchStatus,
    pub stage: Stage,
}

impl MatchDraft {
    pub fn new(
        group_ref: Option<GroupRef>,
        round: u32,
        match_number: u32,
        home_team_id: Option<TeamId>,
        away_team_id: Option<TeamId>,
        stage: Stage,
    ) -> Self {
        Self {
            group_ref,
            round,
            match_number,
            home_team_id,
            away_team_id,
            status: MatchStatus::Scheduled,
            stage,
        }
    }

    /// An empty bracket slot: both sides still to be decided.
    pub fn empty(round: u32, match_number: u32, stage: Stage) -> Self {
        Self::new(None, round, match_number, None, None, stage)
    }
}

/// A stored match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    pub group_id: Option<GroupId>,
    pub round: u32,
    pub match_number: u32,
    pub home_team_id: Option<TeamId>,
    pub away_team_id: Option<TeamId>,
    /// Both None (not played) or both Some (played).
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub status: MatchStatus,
    pub stage: Stage,
}

impl GameMatch {
    /// Store a draft under a fresh id, with its group placeholder already resolved.
    pub fn from_draft(tournament_id: TournamentId, group_id: Option<GroupId>, draft: &MatchDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            group_id,
            round: draft.round,
            match_number: draft.match_number,
            home_team_id: draft.home_team_id,
            away_team_id: draft.away_team_id,
            home_score: None,
            away_score: None,
            status: draft.status,
            stage: draft.stage,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }

    /// Completed with both scores present; the only matches standings count.
    pub fn score(&self) -> Option<(u32, u32)> {
        if !self.is_completed() {
            return None;
        }
        match (self.home_score, self.away_score) {
            (Some(h), Some(a)) => Some((h, a)),
            _ => None,
        }
    }

    /// Both sides still empty (a bracket slot waiting to be filled).
    pub fn is_empty_slot(&self) -> bool {
        self.home_team_id.is_none() && self.away_team_id.is_none()
    }

    /// Can be started or scored. Empty slots never can. A one-sided match can only be
    /// played as a round-1 bye or a table match whose opponent withdrew; later knockout
    /// rounds wait for both teams.
    pub fn is_playable(&self) -> bool {
        match (self.home_team_id, self.away_team_id) {
            (None, None) => false,
            (Some(_), Some(_)) => true,
            _ => !self.stage.is_knockout() || self.round == 1,
        }
    }

    pub fn involves(&self, team_id: TeamId) -> bool {
        self.home_team_id == Some(team_id) || self.away_team_id == Some(team_id)
    }

    /// Team on the given side.
    pub fn team(&self, side: Side) -> Option<TeamId> {
        match side {
            Side::Home => self.home_team_id,
            Side::Away => self.away_team_id,
        }
    }

    /// Winner of a completed match. A completed match with only one team present (a bye
    /// marked as played) goes to that team; draws have no winner.
    pub fn winner(&self) -> Option<TeamId> {
        if !self.is_completed() {
            return None;
        }
        match (self.home_team_id, self.away_team_id) {
            (Some(home), None) => Some(home),
            (None, Some(away)) => Some(away),
            (Some(_), Some(_)) => {
                let (h, a) = self.score()?;
                match h.cmp(&a) {
                    std::cmp::Ordering::Greater => self.team(Side::Home),
                    std::cmp::Ordering::Less => self.team(Side::Away),
                    std::cmp::Ordering::Equal => None,
                }
            }
            (None, None) => None,
        }
    }
}
