//! Tournament scheduler web app: library with models and the scheduling/standings engine.

pub mod logic;
pub mod models;

pub use logic::{
    advance_bracket, bracket_advancements, champion, compute_standings, create_reclassification,
    elimination_bracket, fill_playoff, generate_for_format, generate_schedule, generate_schedule_with_rng,
    group_playoff, group_reclass, group_standings, league_standings, partition_teams, playoff_fill_updates,
    playoff_skeleton, reclassify, round_robin, round_robin_rounds, single_elimination, standings_to_csv,
    AdvancementUpdate, PlayoffSlotUpdate, ReclassBundle, ReclassTier, ScheduleBundle,
};
pub use models::{
    GameMatch, Group, GroupDraft, GroupId, GroupRef, MatchDraft, MatchId, MatchStatus, Side, Stage,
    Standing, Team, TeamId, Tournament, TournamentError, TournamentFormat, TournamentId, TournamentPhase,
};
