//! Tournament business logic: pairings, groups, brackets, formats, standings and the
//! steps that fill later stages from group results.

mod advancement;
mod bracket;
mod export;
mod formats;
mod pairing;
mod partition;
mod playoff_fill;
mod reclass;
mod setup;
mod standings;

pub use advancement::{advance_bracket, bracket_advancements, AdvancementUpdate};
pub use bracket::{
    bracket_rounds, bracket_size, elimination_bracket, elimination_bracket_with_rng, playoff_skeleton,
    QUALIFIERS_PER_GROUP,
};
pub use export::standings_to_csv;
pub use formats::{
    generate_for_format, group_playoff, group_playoff_with_rng, group_reclass, group_reclass_with_rng,
    round_robin, single_elimination, single_elimination_with_rng, ScheduleBundle, MIN_TEAMS,
};
pub use pairing::{round_robin_drafts, round_robin_rounds};
pub use partition::{group_count, partition_teams, partition_teams_with_rng, TARGET_GROUP_SIZE};
pub use playoff_fill::{fill_playoff, playoff_fill_updates, PlayoffSlotUpdate};
pub use reclass::{create_reclassification, reclassify, ReclassBundle, ReclassTier};
pub use setup::{generate_schedule, generate_schedule_with_rng};
pub use standings::{champion, compute_standings, group_standings, league_standings};
