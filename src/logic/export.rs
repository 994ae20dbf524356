//! CSV export of standings tables.

use crate::models::{Standing, TeamId, TournamentError};
use serde::Serialize;

#[derive(Serialize)]
struct StandingRow<'a> {
    rank: usize,
    team: &'a str,
    played: u32,
    won: u32,
    drawn: u32,
    lost: u32,
    goals_for: u32,
    goals_against: u32,
    goal_diff: i64,
    points: u32,
}

/// Render ranked standings as CSV with a header row. `team_name` maps ids to display names.
pub fn standings_to_csv<F>(standings: &[Standing], team_name: F) -> Result<String, TournamentError>
where
    F: Fn(TeamId) -> String,
{
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for (i, s) in standings.iter().enumerate() {
        let name = team_name(s.team_id);
        wtr.serialize(StandingRow {
            rank: i + 1,
            team: &name,
            played: s.played,
            won: s.won,
            drawn: s.drawn,
            lost: s.lost,
            goals_for: s.goals_for,
            goals_against: s.goals_against,
            goal_diff: s.goal_diff,
            points: s.points,
        })
        .map_err(|e| TournamentError::Export(e.to_string()))?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| TournamentError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| TournamentError::Export(e.to_string()))
}
