//! Single binary web server: JSON REST API over in-memory sessions.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env HOST / PORT, or point
//! CONFIG_FILE at a TOML file (see `court_rotation_web::config`).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use court_rotation_web::config::AppConfig;
use court_rotation_web::{
    add_player, export, persistence, rematch, remove_player, reset_session, shuffle_teams,
    start_session, submit_score, swap_player, update_score, CourtId, JoinPosition, RotationPolicy,
    SelectionStrategy, Session, SessionError, SessionId, SessionSettings, SkillTier, TeamSplit,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-session entry: session data + last activity time (for auto-cleanup).
struct SessionEntry {
    session: Session,
    last_activity: Instant,
}

impl SessionEntry {
    fn new(session: Session) -> Self {
        Self {
            session,
            last_activity: Instant::now(),
        }
    }
}

/// In-memory state: many sessions by ID. Every request holds the write lock
/// for its whole state transition, so two courts can never claim one player.
type AppState = Data<RwLock<HashMap<SessionId, SessionEntry>>>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Mutation response: the session after the change plus the operation's own result.
#[derive(Serialize)]
struct SessionReply<'a, T: Serialize> {
    session: &'a Session,
    outcome: T,
}

/// Court count plus any policies to change; omitted policies keep their value.
#[derive(Deserialize)]
struct ConfigureBody {
    court_count: u32,
    #[serde(default)]
    selection: Option<SelectionStrategy>,
    #[serde(default)]
    team_split: Option<TeamSplit>,
    #[serde(default)]
    rotation: Option<RotationPolicy>,
    #[serde(default)]
    join_position: Option<JoinPosition>,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
    skill: SkillTier,
    #[serde(default)]
    external_id: Option<String>,
}

#[derive(Deserialize)]
struct ScoreBody {
    score_a: u32,
    score_b: u32,
}

#[derive(Deserialize)]
struct LeaderboardQuery {
    #[serde(default)]
    skill: Option<String>,
}

#[derive(Deserialize)]
struct SwapBody {
    out_name: String,
    in_name: String,
}

/// Path segment: session id (e.g. /api/sessions/{id})
#[derive(Deserialize)]
struct SessionPath {
    id: SessionId,
}

/// Path segments: session id and player name
#[derive(Deserialize)]
struct SessionPlayerPath {
    id: SessionId,
    name: String,
}

/// Path segments: session id and court id
#[derive(Deserialize)]
struct SessionCourtPath {
    id: SessionId,
    court_id: CourtId,
}

fn error_response(e: &SessionError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        SessionError::PlayerNotFound(_) | SessionError::CourtNotFound(_) => {
            HttpResponse::NotFound().json(body)
        }
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn no_session() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" }))
}

fn save_snapshot(config: &AppConfig, session: &Session) {
    if let Some(dir) = &config.snapshot_dir {
        if let Err(e) = persistence::save(session, dir) {
            log::warn!("Could not save snapshot for session {}: {}", session.id, e);
        }
    }
}

/// Run `op` against one session under the write lock. On success the session
/// is snapshotted (if configured) and returned with the operation's outcome.
fn mutate_session<T, F>(state: &AppState, config: &AppConfig, id: SessionId, op: F) -> HttpResponse
where
    T: Serialize,
    F: FnOnce(&mut Session) -> Result<T, SessionError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return no_session(),
    };
    entry.last_activity = Instant::now();
    match op(&mut entry.session) {
        Ok(outcome) => {
            save_snapshot(config, &entry.session);
            HttpResponse::Ok().json(SessionReply {
                session: &entry.session,
                outcome,
            })
        }
        Err(e) => error_response(&e),
    }
}

/// Read one session under the lock. Touching it refreshes last_activity.
fn read_session<F>(state: &AppState, id: SessionId, view: F) -> HttpResponse
where
    F: FnOnce(&Session) -> HttpResponse,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            view(&entry.session)
        }
        None => no_session(),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "court-rotation-web",
    })
}

/// Create a new session (returns it with id; client stores id for subsequent requests).
#[post("/api/sessions")]
async fn api_create_session(
    state: AppState,
    config: Data<AppConfig>,
    body: Option<Json<SessionSettings>>,
) -> HttpResponse {
    let settings = body
        .map(Json::into_inner)
        .unwrap_or_else(|| config.session.clone());
    let mut session = Session::default();
    if let Err(e) = session.configure(settings) {
        return error_response(&e);
    }
    let id = session.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    save_snapshot(&config, &session);
    log::info!("Created session {}", id);
    let entry = g.entry(id).or_insert(SessionEntry::new(session));
    HttpResponse::Ok().json(&entry.session)
}

/// Get a session by id (404 if not found).
#[get("/api/sessions/{id}")]
async fn api_get_session(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    read_session(&state, path.id, |s| HttpResponse::Ok().json(s))
}

/// Fix the number of courts and, optionally, the session policies (Setup only).
#[put("/api/sessions/{id}/config")]
async fn api_configure_session(
    state: AppState,
    config: Data<AppConfig>,
    path: Path<SessionPath>,
    body: Json<ConfigureBody>,
) -> HttpResponse {
    mutate_session(&state, &config, path.id, |s| {
        let current = s.settings.clone();
        s.configure(SessionSettings {
            court_count: body.court_count,
            selection: body.selection.unwrap_or(current.selection),
            team_split: body.team_split.unwrap_or(current.team_split),
            rotation: body.rotation.unwrap_or(current.rotation),
            join_position: body.join_position.unwrap_or(current.join_position),
        })
    })
}

/// Add a player to the waiting line.
#[post("/api/sessions/{id}/players")]
async fn api_add_player(
    state: AppState,
    config: Data<AppConfig>,
    path: Path<SessionPath>,
    body: Json<AddPlayerBody>,
) -> HttpResponse {
    let body = body.into_inner();
    mutate_session(&state, &config, path.id, move |s| {
        add_player(s, &body.name, body.skill, body.external_id)
    })
}

/// Remove a player from the line or from their court.
#[delete("/api/sessions/{id}/players/{name}")]
async fn api_remove_player(
    state: AppState,
    config: Data<AppConfig>,
    path: Path<SessionPlayerPath>,
) -> HttpResponse {
    mutate_session(&state, &config, path.id, |s| remove_player(s, &path.name))
}

/// Start the session: create courts and fill them.
#[post("/api/sessions/{id}/start")]
async fn api_start_session(
    state: AppState,
    config: Data<AppConfig>,
    path: Path<SessionPath>,
) -> HttpResponse {
    mutate_session(&state, &config, path.id, start_session)
}

/// Reset the session: back to Setup with an empty line and no history.
#[post("/api/sessions/{id}/reset")]
async fn api_reset_session(
    state: AppState,
    config: Data<AppConfig>,
    path: Path<SessionPath>,
) -> HttpResponse {
    mutate_session(&state, &config, path.id, |s| {
        reset_session(s);
        Ok(())
    })
}

/// Record the running score of a court.
#[put("/api/sessions/{id}/courts/{court_id}/score")]
async fn api_update_score(
    state: AppState,
    config: Data<AppConfig>,
    path: Path<SessionCourtPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    mutate_session(&state, &config, path.id, |s| {
        update_score(s, path.court_id, body.score_a, body.score_b)
    })
}

/// Submit the final score: record the result, rotate players, refill the court.
#[post("/api/sessions/{id}/courts/{court_id}/submit")]
async fn api_submit_score(
    state: AppState,
    config: Data<AppConfig>,
    path: Path<SessionCourtPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    mutate_session(&state, &config, path.id, |s| {
        submit_score(s, path.court_id, body.score_a, body.score_b)
    })
}

/// Re-split the teams on a court at random.
#[post("/api/sessions/{id}/courts/{court_id}/shuffle")]
async fn api_shuffle_teams(
    state: AppState,
    config: Data<AppConfig>,
    path: Path<SessionCourtPath>,
) -> HttpResponse {
    mutate_session(&state, &config, path.id, |s| shuffle_teams(s, path.court_id))
}

/// Same teams again from 0-0.
#[post("/api/sessions/{id}/courts/{court_id}/rematch")]
async fn api_rematch(
    state: AppState,
    config: Data<AppConfig>,
    path: Path<SessionCourtPath>,
) -> HttpResponse {
    mutate_session(&state, &config, path.id, |s| rematch(s, path.court_id))
}

/// Swap a court player with a waiting player.
#[post("/api/sessions/{id}/courts/{court_id}/swap")]
async fn api_swap_player(
    state: AppState,
    config: Data<AppConfig>,
    path: Path<SessionCourtPath>,
    body: Json<SwapBody>,
) -> HttpResponse {
    mutate_session(&state, &config, path.id, |s| {
        swap_player(s, path.court_id, &body.out_name, &body.in_name)
    })
}

/// Registered players, most wins first. `?skill=novice` keeps one tier.
#[get("/api/sessions/{id}/leaderboard")]
async fn api_leaderboard(
    state: AppState,
    path: Path<SessionPath>,
    query: Query<LeaderboardQuery>,
) -> HttpResponse {
    let tier = match query.skill.as_deref().map(str::parse::<SkillTier>).transpose() {
        Ok(tier) => tier,
        Err(e) => {
            return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
        }
    };
    read_session(&state, path.id, |s| {
        HttpResponse::Ok().json(s.registry.leaderboard_for(tier))
    })
}

/// One leaderboard per skill tier.
#[get("/api/sessions/{id}/leaderboard/by-tier")]
async fn api_leaderboard_by_tier(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    read_session(&state, path.id, |s| {
        HttpResponse::Ok().json(s.registry.leaderboard_by_tier())
    })
}

fn csv_response(bytes: Result<Vec<u8>, export::ExportError>, filename: &str) -> HttpResponse {
    match bytes {
        Ok(bytes) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{filename}\""),
            ))
            .body(bytes),
        Err(e) => {
            log::error!("CSV export failed: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() }))
        }
    }
}

#[get("/api/sessions/{id}/export/matches.csv")]
async fn api_export_matches(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    read_session(&state, path.id, |s| {
        csv_response(export::matches_csv(&s.history), "matches.csv")
    })
}

#[get("/api/sessions/{id}/export/players.csv")]
async fn api_export_players(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    read_session(&state, path.id, |s| {
        csv_response(export::players_csv(&s.registry), "players.csv")
    })
}

/// Whole session as a JSON snapshot.
#[get("/api/sessions/{id}/snapshot")]
async fn api_get_snapshot(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    read_session(&state, path.id, |s| match persistence::to_json(s) {
        Ok(json) => HttpResponse::Ok()
            .content_type("application/json")
            .body(json),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() })),
    })
}

/// Restore a session from a snapshot (replaces any session with the same id).
#[post("/api/sessions/restore")]
async fn api_restore_snapshot(state: AppState, config: Data<AppConfig>, body: String) -> HttpResponse {
    let session = match persistence::from_json(&body) {
        Ok(s) => s,
        Err(e) => {
            return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
        }
    };
    let id = session.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    save_snapshot(&config, &session);
    log::info!("Restored session {}", id);
    g.insert(id, SessionEntry::new(session));
    match g.get(&id) {
        Some(entry) => HttpResponse::Ok().json(&entry.session),
        None => no_session(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let mut sessions = HashMap::<SessionId, SessionEntry>::new();
    if let Some(dir) = &config.snapshot_dir {
        match persistence::load_all(dir) {
            Ok(loaded) => {
                log::info!("Loaded {} session snapshot(s) from {}", loaded.len(), dir.display());
                sessions.extend(loaded.into_iter().map(|s| (s.id, SessionEntry::new(s))));
            }
            Err(e) => log::warn!("Could not read snapshots from {}: {}", dir.display(), e),
        }
    }

    let bind = (config.server.host.clone(), config.server.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(sessions));
    let config = Data::new(config);

    // Background task: every 30 minutes, remove sessions inactive past the timeout
    let state_cleanup = state.clone();
    let config_cleanup = config.clone();
    let inactivity_timeout = Duration::from_secs(config.inactivity_timeout_hours * 3600);
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let stale: Vec<SessionId> = g
                .iter()
                .filter(|(_, entry)| entry.last_activity.elapsed() >= inactivity_timeout)
                .map(|(id, _)| *id)
                .collect();
            for id in &stale {
                g.remove(id);
                if let Some(dir) = &config_cleanup.snapshot_dir {
                    if let Err(e) = persistence::remove(dir, *id) {
                        log::warn!("Could not delete snapshot for session {}: {}", id, e);
                    }
                }
            }
            if !stale.is_empty() {
                log::info!(
                    "Cleaned up {} inactive session(s) (no activity for {}h)",
                    stale.len(),
                    config_cleanup.inactivity_timeout_hours
                );
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(config.clone())
            .service(api_health)
            .service(api_create_session)
            .service(api_restore_snapshot)
            .service(api_get_session)
            .service(api_configure_session)
            .service(api_add_player)
            .service(api_remove_player)
            .service(api_start_session)
            .service(api_reset_session)
            .service(api_update_score)
            .service(api_submit_score)
            .service(api_shuffle_teams)
            .service(api_rematch)
            .service(api_swap_player)
            .service(api_leaderboard)
            .service(api_leaderboard_by_tier)
            .service(api_export_matches)
            .service(api_export_players)
            .service(api_get_snapshot)
    })
    .bind(bind)?
    .run()
    .await
}
