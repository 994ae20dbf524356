//! Data structures for the tournament scheduler: teams, groups, matches, standings, tournament state.

mod game;
mod group;
mod standing;
mod team;
mod tournament;

pub use game::{GameMatch, GroupRef, MatchDraft, MatchId, MatchStatus, Side, Stage};
pub use group::{group_name, Group, GroupDraft, GroupId};
pub use standing::{Standing, POINTS_FOR_DRAW, POINTS_FOR_WIN};
pub use team::{Team, TeamId};
pub use tournament::{Tournament, TournamentError, TournamentFormat, TournamentId, TournamentPhase};
