//! Single binary web server: JSON API over the scheduling engine plus an in-memory tournament store.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Env: HOST, PORT, TOURNAMENT_SEED (reproducible draws), INACTIVITY_HOURS (store eviction).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tournament_scheduler_web::{
    advance_bracket, champion, compute_standings, create_reclassification, fill_playoff,
    generate_for_format, generate_schedule_with_rng, group_standings, league_standings,
    playoff_fill_updates, reclassify, standings_to_csv, GameMatch, Group, GroupId, MatchId, TeamId,
    Tournament, TournamentError, TournamentFormat, TournamentId,
};
use uuid::Uuid;

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

/// In-memory store: tournaments by ID. Entries are removed after a period of inactivity.
type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

/// Settings read from the environment at startup.
#[derive(Clone, Debug)]
struct ServerConfig {
    host: String,
    port: u16,
    /// When set, every draw uses a `StdRng` seeded with this value.
    seed: Option<u64>,
    inactivity_timeout: Duration,
}

impl ServerConfig {
    fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or_else(default_port);
        let seed = std::env::var("TOURNAMENT_SEED")
            .ok()
            .and_then(|s| s.parse().ok());
        let hours: u64 = std::env::var("INACTIVITY_HOURS")
            .ok()
            .and_then(|h| h.parse().ok())
            .unwrap_or_else(default_inactivity_hours);
        Self {
            host,
            port,
            seed,
            inactivity_timeout: Duration::from_secs(hours * 3600),
        }
    }

    /// Random source for one generation request.
    fn rng(&self) -> Box<dyn RngCore> {
        match self.seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
            None => Box::new(rand::thread_rng()),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_inactivity_hours() -> u64 {
    12
}

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct ScheduleBody {
    format: TournamentFormat,
    team_ids: Vec<TeamId>,
    #[serde(default)]
    tournament_id: Option<TournamentId>,
}

#[derive(Deserialize)]
struct StandingsBody {
    team_ids: Vec<TeamId>,
    matches: Vec<GameMatch>,
}

#[derive(Deserialize)]
struct PlayoffFillBody {
    groups: Vec<Group>,
    group_matches: Vec<GameMatch>,
    playoff_matches: Vec<GameMatch>,
}

#[derive(Deserialize)]
struct ReclassifyBody {
    groups: Vec<Group>,
    group_matches: Vec<GameMatch>,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    #[serde(default)]
    format: TournamentFormat,
}

#[derive(Deserialize)]
struct AddTeamBody {
    name: String,
}

#[derive(Deserialize)]
struct ScoreBody {
    home_score: u32,
    away_score: u32,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

#[derive(Deserialize)]
struct TournamentTeamPath {
    id: TournamentId,
    team_id: TeamId,
}

#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: MatchId,
}

#[derive(Deserialize)]
struct TournamentGroupPath {
    id: TournamentId,
    group_id: GroupId,
}

fn bad_request(e: TournamentError) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

/// Run `f` against a stored tournament, refreshing its last activity. 404 if unknown.
fn with_tournament<F>(state: &AppState, id: TournamentId, f: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> HttpResponse,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            f(&mut entry.tournament)
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tournament-scheduler-web",
    })
}

/// Stateless: generate a schedule bundle for any format.
#[post("/api/engine/schedule")]
async fn api_engine_schedule(config: Data<ServerConfig>, body: Json<ScheduleBody>) -> HttpResponse {
    let tournament_id = body.tournament_id.unwrap_or_else(Uuid::new_v4);
    let mut rng = config.rng();
    match generate_for_format(body.format, &body.team_ids, tournament_id, &mut rng) {
        Ok(bundle) => HttpResponse::Ok().json(bundle),
        Err(e) => bad_request(e),
    }
}

/// Stateless: rank teams from a list of matches.
#[post("/api/engine/standings")]
async fn api_engine_standings(body: Json<StandingsBody>) -> HttpResponse {
    HttpResponse::Ok().json(compute_standings(&body.team_ids, &body.matches))
}

/// Stateless: playoff slot assignments from finished groups.
#[post("/api/engine/playoff-fill")]
async fn api_engine_playoff_fill(body: Json<PlayoffFillBody>) -> HttpResponse {
    let round1: Vec<GameMatch> = body
        .playoff_matches
        .iter()
        .filter(|m| m.round == 1)
        .cloned()
        .collect();
    HttpResponse::Ok().json(playoff_fill_updates(&body.groups, &body.group_matches, &round1))
}

/// Stateless: reclassification groups and matches from finished groups.
#[post("/api/engine/reclassify")]
async fn api_engine_reclassify(body: Json<ReclassifyBody>) -> HttpResponse {
    HttpResponse::Ok().json(reclassify(&body.groups, &body.group_matches))
}

/// Create a new tournament (returns it with id; client stores id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let tournament = Tournament::new(body.name.trim(), body.format);
    let id = tournament.id;
    let response = HttpResponse::Ok().json(&tournament);
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.insert(
        id,
        TournamentEntry {
            tournament,
            last_activity: Instant::now(),
        },
    );
    log::info!("Created tournament {} ({:?})", id, body.format);
    response
}

/// Get a tournament by id (404 if not found).
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| HttpResponse::Ok().json(t))
}

/// Current phase and, once decided, the champion.
#[get("/api/tournaments/{id}/phase")]
async fn api_get_phase(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        HttpResponse::Ok().json(serde_json::json!({
            "phase": t.phase(),
            "champion": champion(t),
        }))
    })
}

/// Register a team (only before the schedule is generated).
#[post("/api/tournaments/{id}/teams")]
async fn api_add_team(state: AppState, path: Path<TournamentPath>, body: Json<AddTeamBody>) -> HttpResponse {
    with_tournament(&state, path.id, |t| match t.add_team(body.name.trim()) {
        Ok(_) => HttpResponse::Ok().json(t),
        Err(e) => bad_request(e),
    })
}

/// Remove a team; its match slots are emptied.
#[delete("/api/tournaments/{id}/teams/{team_id}")]
async fn api_remove_team(state: AppState, path: Path<TournamentTeamPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| match t.remove_team(path.team_id) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => bad_request(e),
    })
}

/// Generate the schedule for the tournament's format.
#[post("/api/tournaments/{id}/generate")]
async fn api_generate(state: AppState, config: Data<ServerConfig>, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        let mut rng = config.rng();
        match generate_schedule_with_rng(t, &mut rng) {
            Ok(()) => HttpResponse::Ok().json(t),
            Err(e) => bad_request(e),
        }
    })
}

#[post("/api/tournaments/{id}/matches/{match_id}/start")]
async fn api_start_match(state: AppState, path: Path<TournamentMatchPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| match t.start_match(path.match_id) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => bad_request(e),
    })
}

/// Record a final score (completes the match).
#[put("/api/tournaments/{id}/matches/{match_id}/score")]
async fn api_record_score(state: AppState, path: Path<TournamentMatchPath>, body: Json<ScoreBody>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        match t.record_score(path.match_id, body.home_score, body.away_score) {
            Ok(()) => HttpResponse::Ok().json(t),
            Err(e) => bad_request(e),
        }
    })
}

#[delete("/api/tournaments/{id}/matches/{match_id}/score")]
async fn api_clear_score(state: AppState, path: Path<TournamentMatchPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| match t.clear_score(path.match_id) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => bad_request(e),
    })
}

/// Seed group qualifiers into the playoff bracket (group+playoff only, once).
#[post("/api/tournaments/{id}/playoff/fill")]
async fn api_fill_playoff(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| match fill_playoff(t) {
        Ok(updates) => HttpResponse::Ok().json(updates),
        Err(e) => bad_request(e),
    })
}

/// Create reclassification groups (group+reclassification only, once).
#[post("/api/tournaments/{id}/reclassify")]
async fn api_reclassify(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| match create_reclassification(t) {
        Ok(_) => HttpResponse::Ok().json(t),
        Err(e) => bad_request(e),
    })
}

/// Move winners of completed knockout matches into the next round.
#[post("/api/tournaments/{id}/bracket/advance")]
async fn api_advance_bracket(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| match advance_bracket(t) {
        Ok(updates) => HttpResponse::Ok().json(updates),
        Err(e) => bad_request(e),
    })
}

#[get("/api/tournaments/{id}/groups/{group_id}/standings")]
async fn api_group_standings(state: AppState, path: Path<TournamentGroupPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| match group_standings(t, path.group_id) {
        Ok(standings) => HttpResponse::Ok().json(standings),
        Err(e) => bad_request(e),
    })
}

#[get("/api/tournaments/{id}/groups/{group_id}/standings.csv")]
async fn api_group_standings_csv(state: AppState, path: Path<TournamentGroupPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        let csv = group_standings(t, path.group_id).and_then(|standings| {
            standings_to_csv(&standings, |id| {
                t.team(id).map(|team| team.name.clone()).unwrap_or_default()
            })
        });
        match csv {
            Ok(body) => HttpResponse::Ok()
                .content_type("text/csv; charset=utf-8")
                .body(body),
            Err(e) => bad_request(e),
        }
    })
}

/// League table (round-robin format).
#[get("/api/tournaments/{id}/standings")]
async fn api_league_standings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| HttpResponse::Ok().json(league_standings(t)))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    log::info!("Starting server at http://{}:{}", config.host, config.port);
    if let Some(seed) = config.seed {
        log::info!("Using fixed random seed {}", seed);
    }

    let state = Data::new(RwLock::new(HashMap::<TournamentId, TournamentEntry>::new()));

    // Background task: every 30 minutes, remove tournaments past the inactivity timeout
    let state_cleanup = state.clone();
    let inactivity_timeout = config.inactivity_timeout;
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < inactivity_timeout);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive tournament(s)", removed);
            }
        }
    });

    let bind = (config.host.clone(), config.port);
    let config = Data::new(config);
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(config.clone())
            .service(api_health)
            .service(api_engine_schedule)
            .service(api_engine_standings)
            .service(api_engine_playoff_fill)
            .service(api_engine_reclassify)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_get_phase)
            .service(api_add_team)
            .service(api_remove_team)
            .service(api_generate)
            .service(api_start_match)
            .service(api_record_score)
            .service(api_clear_score)
            .service(api_fill_playoff)
            .service(api_reclassify)
            .service(api_advance_bracket)
            .service(api_group_standings)
            .service(api_group_standings_csv)
            .service(api_league_standings)
    })
    .bind(bind)?
    .run()
    .await
}
