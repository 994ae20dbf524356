//! Tournament, TournamentFormat and TournamentPhase.
//!
//! `Tournament` is the in-memory store the web binary keeps per tournament: teams, groups
//! and matches, plus the derived phase. The scheduling engine in `logic` never needs it;
//! the store-level wrappers there read and write it.

use crate::models::game::{GameMatch, GroupRef, MatchId, MatchStatus, Side, Stage};
use crate::models::group::{Group, GroupId};
use crate::models::team::{Team, TeamId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Not enough teams to generate a schedule (need at least 2).
    NotEnoughTeams { required: usize, found: usize },
    /// Tournament is not in a state that allows this action.
    InvalidState,
    /// The schedule has already been generated.
    AlreadyGenerated,
    /// Team not found in this tournament.
    TeamNotFound(TeamId),
    /// Match not found in this tournament.
    MatchNotFound(MatchId),
    /// Group not found in this tournament.
    GroupNotFound(GroupId),
    /// A team with this name already exists (names are unique, case-insensitive).
    DuplicateTeamName,
    /// Team names cannot be blank.
    EmptyTeamName,
    /// A generated match points at a group placeholder that was never stored.
    UnresolvedGroupRef(GroupRef),
    /// A fill step was requested before its destination was ready.
    PreconditionFailed(&'static str),
    /// Rendering an export (e.g. CSV standings) failed.
    Export(String),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::NotEnoughTeams { required, found } => {
                write!(f, "Need at least {} teams to generate a schedule (have {})", required, found)
            }
            TournamentError::InvalidState => write!(f, "Invalid state for this action"),
            TournamentError::AlreadyGenerated => write!(f, "Schedule has already been generated"),
            TournamentError::TeamNotFound(_) => write!(f, "Team not found"),
            TournamentError::MatchNotFound(_) => write!(f, "Match not found"),
            TournamentError::GroupNotFound(_) => write!(f, "Group not found"),
            TournamentError::DuplicateTeamName => write!(f, "A team with this name already exists"),
            TournamentError::EmptyTeamName => write!(f, "Team name cannot be empty"),
            TournamentError::UnresolvedGroupRef(r) => write!(f, "Unresolved group reference {}", r),
            TournamentError::PreconditionFailed(what) => write!(f, "Not ready: {}", what),
            TournamentError::Export(e) => write!(f, "Export failed: {}", e),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Competition format, fixed at creation. Selects the strategy that builds the schedule.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentFormat {
    /// Groups of about four, then a knockout playoff for the top two of each group.
    #[default]
    GroupPlayoff,
    /// One league, everyone plays everyone.
    RoundRobin,
    /// Knockout from the first round.
    SingleElimination,
    /// Groups, then new groups of teams that finished in the same position.
    GroupReclass,
}

/// Where the tournament stands, derived from its matches.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentPhase {
    /// No schedule yet; teams can still be added.
    NoMatches,
    /// Group, league or elimination matches still being played.
    InProgress,
    /// Group stage done, playoff bracket still empty.
    PlayoffFillable,
    PlayoffInProgress,
    /// Group stage done, reclassification not created yet.
    ReclassFillable,
    ReclassInProgress,
    Completed,
}

/// Full tournament state: teams, groups, matches.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub format: TournamentFormat,
    pub created_at: DateTime<Utc>,
    pub teams: Vec<Team>,
    /// Stage-1 groups first, reclassification groups appended later.
    pub groups: Vec<Group>,
    pub matches: Vec<GameMatch>,
    /// Set once the reclassification step has run (it may legitimately create nothing).
    pub reclassified_at: Option<DateTime<Utc>>,
}

impl Tournament {
    /// Create a new tournament with no teams.
    pub fn new(name: impl Into<String>, format: TournamentFormat) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            format,
            created_at: Utc::now(),
            teams: Vec::new(),
            groups: Vec::new(),
            matches: Vec::new(),
            reclassified_at: None,
        }
    }

    /// Create a tournament and register the given team names in order.
    pub fn with_teams<I, S>(name: impl Into<String>, format: TournamentFormat, team_names: I) -> Result<Self, TournamentError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tournament = Self::new(name, format);
        for team_name in team_names {
            tournament.add_team(team_name)?;
        }
        Ok(tournament)
    }

    /// Team ids in registration order.
    pub fn team_ids(&self) -> Vec<TeamId> {
        self.teams.iter().map(|t| t.id).collect()
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn get_match(&self, id: MatchId) -> Option<&GameMatch> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub fn get_match_mut(&mut self, id: MatchId) -> Option<&mut GameMatch> {
        self.matches.iter_mut().find(|m| m.id == id)
    }

    /// Groups of one stage, in stored order.
    pub fn groups_in_stage(&self, stage: Stage) -> Vec<&Group> {
        self.groups.iter().filter(|g| g.stage == stage).collect()
    }

    /// Matches of one stage, ordered by match number.
    pub fn matches_in_stage(&self, stage: Stage) -> Vec<&GameMatch> {
        let mut matches: Vec<&GameMatch> = self.matches.iter().filter(|m| m.stage == stage).collect();
        matches.sort_by_key(|m| m.match_number);
        matches
    }

    /// Matches played inside one group.
    pub fn group_matches(&self, group_id: GroupId) -> Vec<&GameMatch> {
        self.matches
            .iter()
            .filter(|m| m.group_id == Some(group_id))
            .collect()
    }

    /// Match number following the highest one stored so far.
    pub fn next_match_number(&self) -> u32 {
        self.matches.iter().map(|m| m.match_number).max().unwrap_or(0) + 1
    }

    /// Add a team (only before the schedule exists). Names must be unique (case-insensitive).
    pub fn add_team(&mut self, name: impl Into<String>) -> Result<TeamId, TournamentError> {
        if !self.matches.is_empty() {
            return Err(TournamentError::InvalidState);
        }
        let name = name.into();
        let name_trimmed = name.trim();
        if name_trimmed.is_empty() {
            return Err(TournamentError::EmptyTeamName);
        }
        let is_duplicate = self
            .teams
            .iter()
            .any(|t| t.name.eq_ignore_ascii_case(name_trimmed));
        if is_duplicate {
            return Err(TournamentError::DuplicateTeamName);
        }
        let team = Team::new(name_trimmed);
        let id = team.id;
        self.teams.push(team);
        Ok(id)
    }

    /// Remove a team. Its group memberships go and its match slots are emptied.
    pub fn remove_team(&mut self, team_id: TeamId) -> Result<(), TournamentError> {
        let idx = self
            .teams
            .iter()
            .position(|t| t.id == team_id)
            .ok_or(TournamentError::TeamNotFound(team_id))?;
        self.teams.remove(idx);
        for g in &mut self.groups {
            g.team_ids.retain(|&id| id != team_id);
        }
        for m in &mut self.matches {
            if m.home_team_id == Some(team_id) {
                m.home_team_id = None;
            }
            if m.away_team_id == Some(team_id) {
                m.away_team_id = None;
            }
        }
        Ok(())
    }

    /// Mark a scheduled match as being played.
    pub fn start_match(&mut self, match_id: MatchId) -> Result<(), TournamentError> {
        let m = self
            .get_match(match_id)
            .ok_or(TournamentError::MatchNotFound(match_id))?;
        if m.status != MatchStatus::Scheduled || !m.is_playable() {
            return Err(TournamentError::InvalidState);
        }
        if let Some(m) = self.get_match_mut(match_id) {
            m.status = MatchStatus::InProgress;
        }
        Ok(())
    }

    /// Set both scores and complete the match.
    ///
    /// Scores can be corrected by recording again. If the correction changes the winner of a
    /// knockout match, the old winner is taken back out of the next round, which must not
    /// have been started yet.
    pub fn record_score(&mut self, match_id: MatchId, home_score: u32, away_score: u32) -> Result<(), TournamentError> {
        let m = self
            .get_match(match_id)
            .ok_or(TournamentError::MatchNotFound(match_id))?;
        if !m.is_playable() {
            return Err(TournamentError::InvalidState);
        }
        let mut scored = m.clone();
        scored.home_score = Some(home_score);
        scored.away_score = Some(away_score);
        scored.status = MatchStatus::Completed;
        self.replace_result(scored)
    }

    /// Undo a recorded result: back to scheduled with no scores. A knockout winner already
    /// moved on is taken back out of the next round, which must not have been started yet.
    pub fn clear_score(&mut self, match_id: MatchId) -> Result<(), TournamentError> {
        let m = self
            .get_match(match_id)
            .ok_or(TournamentError::MatchNotFound(match_id))?;
        let mut cleared = m.clone();
        cleared.home_score = None;
        cleared.away_score = None;
        cleared.status = MatchStatus::Scheduled;
        self.replace_result(cleared)
    }

    /// Store a changed result, retracting the previous winner from the next knockout round
    /// when the winner changes.
    fn replace_result(&mut self, updated: GameMatch) -> Result<(), TournamentError> {
        let previous = self
            .get_match(updated.id)
            .ok_or(TournamentError::MatchNotFound(updated.id))?;
        let old_winner = previous.winner();
        let mut retract = None;
        if old_winner.is_some() && old_winner != updated.winner() {
            if let Some((next, side)) = self.next_round_slot(previous) {
                if next.team(side) == old_winner {
                    if next.status != MatchStatus::Scheduled {
                        return Err(TournamentError::InvalidState);
                    }
                    retract = Some((next.id, side));
                }
            }
        }

        if let Some((next_id, side)) = retract {
            if let Some(next) = self.get_match_mut(next_id) {
                match side {
                    Side::Home => next.home_team_id = None,
                    Side::Away => next.away_team_id = None,
                }
            }
            log::info!("Withdrew corrected winner from match {} ({:?} side)", next_id, side);
        }
        let id = updated.id;
        let m = self
            .get_match_mut(id)
            .ok_or(TournamentError::MatchNotFound(id))?;
        *m = updated;
        Ok(())
    }

    /// The next-round match and side a knockout match's winner moves to: the k-th match of
    /// a round (by match number) feeds match k/2 of the next, home when k is even.
    fn next_round_slot(&self, m: &GameMatch) -> Option<(&GameMatch, Side)> {
        if !m.stage.is_knockout() {
            return None;
        }
        let in_round = |round: u32| -> Vec<&GameMatch> {
            let mut matches: Vec<&GameMatch> = self
                .matches
                .iter()
                .filter(|x| x.stage == m.stage && x.round == round)
                .collect();
            matches.sort_by_key(|x| x.match_number);
            matches
        };
        let k = in_round(m.round).iter().position(|x| x.id == m.id)?;
        let next = *in_round(m.round + 1).get(k / 2)?;
        let side = if k % 2 == 0 { Side::Home } else { Side::Away };
        Some((next, side))
    }

    /// Every match of the stage is completed (vacuously true for a stage with no matches).
    pub fn stage_completed(&self, stage: Stage) -> bool {
        self.matches
            .iter()
            .filter(|m| m.stage == stage)
            .all(GameMatch::is_completed)
    }

    /// The last match of a knockout stage (highest round, then highest match number).
    pub fn final_match(&self, stage: Stage) -> Option<&GameMatch> {
        self.matches
            .iter()
            .filter(|m| m.stage == stage)
            .max_by_key(|m| (m.round, m.match_number))
    }

    /// Derive the current phase from the stored matches.
    pub fn phase(&self) -> TournamentPhase {
        if self.matches.is_empty() {
            return TournamentPhase::NoMatches;
        }
        let final_completed = |stage| self.final_match(stage).is_some_and(GameMatch::is_completed);
        match self.format {
            TournamentFormat::RoundRobin => {
                if self.stage_completed(Stage::RoundRobin) {
                    TournamentPhase::Completed
                } else {
                    TournamentPhase::InProgress
                }
            }
            TournamentFormat::SingleElimination => {
                if final_completed(Stage::Elimination) {
                    TournamentPhase::Completed
                } else {
                    TournamentPhase::InProgress
                }
            }
            TournamentFormat::GroupPlayoff => {
                if !self.stage_completed(Stage::Group) {
                    TournamentPhase::InProgress
                } else if self
                    .matches
                    .iter()
                    .filter(|m| m.stage == Stage::Playoff)
                    .all(GameMatch::is_empty_slot)
                {
                    TournamentPhase::PlayoffFillable
                } else if final_completed(Stage::Playoff) {
                    TournamentPhase::Completed
                } else {
                    TournamentPhase::PlayoffInProgress
                }
            }
            TournamentFormat::GroupReclass => {
                if !self.stage_completed(Stage::Group) {
                    TournamentPhase::InProgress
                } else if self.reclassified_at.is_none() {
                    TournamentPhase::ReclassFillable
                } else if self.stage_completed(Stage::Reclass) {
                    TournamentPhase::Completed
                } else {
                    TournamentPhase::ReclassInProgress
                }
            }
        }
    }
}
