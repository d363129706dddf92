//! Single binary web server: HTML from templates/, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080), ADMIN_TOKEN
//! (bearer credential required by all mutating endpoints).

use actix_web::http::header;
use actix_web::{
    delete, get, post, put,
    web::{self, Data, Json, Path, Query},
    App, HttpRequest, HttpResponse, HttpServer, Responder,
};
use serde::Deserialize;
use std::sync::RwLock;
use tournament_web::{
    logic, MatchUpdate, NewChampion, NewCountry, NewGroup, NewMatch, NewPhase, NewTeam,
    PhaseUpdate, Store, TeamUpdate, TournamentError,
};
use uuid::Uuid;

/// Shared app state: every write (including standings recomputes) runs under
/// one write guard, so readers never see a half-updated table.
type AppState = Data<RwLock<Store>>;

/// Static bearer credential for admin mutations (from ADMIN_TOKEN).
struct AdminToken(String);

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Path segment: entity id (e.g. /api/teams/{id})
#[derive(Deserialize)]
struct IdPath {
    id: Uuid,
}

/// Path segments: group id and team id (e.g. /api/groups/{id}/teams/{team_id})
#[derive(Deserialize)]
struct GroupTeamPath {
    id: Uuid,
    team_id: Uuid,
}

#[derive(Deserialize)]
struct AddTeamBody {
    team_id: Uuid,
}

#[derive(Deserialize)]
struct LimitQuery {
    limit: Option<usize>,
}

fn json_error(e: &TournamentError) -> HttpResponse {
    use TournamentError::*;
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        CountryNotFound(_) | TeamNotFound(_) | PhaseNotFound(_) | GroupNotFound(_)
        | MatchNotFound(_) => HttpResponse::NotFound().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn is_admin(req: &HttpRequest, token: &AdminToken) -> bool {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t == token.0)
        .unwrap_or(false)
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(serde_json::json!({ "error": "Invalid token" }))
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tournament-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

// Countries

#[get("/api/countries")]
async fn api_list_countries(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    HttpResponse::Ok().json(g.list_countries())
}

#[post("/api/countries")]
async fn api_create_country(
    state: AppState,
    req: HttpRequest,
    token: Data<AdminToken>,
    body: Json<NewCountry>,
) -> HttpResponse {
    if !is_admin(&req, &token) {
        return unauthorized();
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.create_country(body.into_inner()) {
        Ok(country) => HttpResponse::Ok().json(country),
        Err(e) => json_error(&e),
    }
}

// Teams

#[get("/api/teams")]
async fn api_list_teams(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.list_teams() {
        Ok(teams) => HttpResponse::Ok().json(teams),
        Err(e) => json_error(&e),
    }
}

#[get("/api/teams/{id}")]
async fn api_get_team(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.team_with_country(path.id) {
        Ok(team) => HttpResponse::Ok().json(team),
        Err(e) => json_error(&e),
    }
}

#[post("/api/teams")]
async fn api_create_team(
    state: AppState,
    req: HttpRequest,
    token: Data<AdminToken>,
    body: Json<NewTeam>,
) -> HttpResponse {
    if !is_admin(&req, &token) {
        return unauthorized();
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.create_team(body.into_inner()) {
        Ok(team) => HttpResponse::Ok().json(team),
        Err(e) => json_error(&e),
    }
}

#[put("/api/teams/{id}")]
async fn api_update_team(
    state: AppState,
    req: HttpRequest,
    token: Data<AdminToken>,
    path: Path<IdPath>,
    body: Json<TeamUpdate>,
) -> HttpResponse {
    if !is_admin(&req, &token) {
        return unauthorized();
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.update_team(path.id, body.into_inner()) {
        Ok(team) => HttpResponse::Ok().json(team),
        Err(e) => json_error(&e),
    }
}

#[delete("/api/teams/{id}")]
async fn api_delete_team(
    state: AppState,
    req: HttpRequest,
    token: Data<AdminToken>,
    path: Path<IdPath>,
) -> HttpResponse {
    if !is_admin(&req, &token) {
        return unauthorized();
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.delete_team(path.id) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "message": "Team deleted" })),
        Err(e) => json_error(&e),
    }
}

// Phases

#[get("/api/phases")]
async fn api_list_phases(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    HttpResponse::Ok().json(g.list_phases())
}

#[post("/api/phases")]
async fn api_create_phase(
    state: AppState,
    req: HttpRequest,
    token: Data<AdminToken>,
    body: Json<NewPhase>,
) -> HttpResponse {
    if !is_admin(&req, &token) {
        return unauthorized();
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.create_phase(body.into_inner()) {
        Ok(phase) => HttpResponse::Ok().json(phase),
        Err(e) => json_error(&e),
    }
}

#[put("/api/phases/{id}")]
async fn api_update_phase(
    state: AppState,
    req: HttpRequest,
    token: Data<AdminToken>,
    path: Path<IdPath>,
    body: Json<PhaseUpdate>,
) -> HttpResponse {
    if !is_admin(&req, &token) {
        return unauthorized();
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.update_phase(path.id, body.into_inner()) {
        Ok(phase) => HttpResponse::Ok().json(phase),
        Err(e) => json_error(&e),
    }
}

// Groups and standings

#[get("/api/phases/{id}/groups")]
async fn api_groups_by_phase(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.phase(path.id) {
        Ok(_) => HttpResponse::Ok().json(g.groups_by_phase(path.id)),
        Err(e) => json_error(&e),
    }
}

#[post("/api/groups")]
async fn api_create_group(
    state: AppState,
    req: HttpRequest,
    token: Data<AdminToken>,
    body: Json<NewGroup>,
) -> HttpResponse {
    if !is_admin(&req, &token) {
        return unauthorized();
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.create_group(body.into_inner()) {
        Ok(group) => HttpResponse::Ok().json(group),
        Err(e) => json_error(&e),
    }
}

#[delete("/api/groups/{id}")]
async fn api_delete_group(
    state: AppState,
    req: HttpRequest,
    token: Data<AdminToken>,
    path: Path<IdPath>,
) -> HttpResponse {
    if !is_admin(&req, &token) {
        return unauthorized();
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.delete_group(path.id) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "message": "Group deleted" })),
        Err(e) => json_error(&e),
    }
}

#[post("/api/groups/{id}/teams")]
async fn api_add_team_to_group(
    state: AppState,
    req: HttpRequest,
    token: Data<AdminToken>,
    path: Path<IdPath>,
    body: Json<AddTeamBody>,
) -> HttpResponse {
    if !is_admin(&req, &token) {
        return unauthorized();
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.add_team_to_group(path.id, body.team_id) {
        Ok(standing) => HttpResponse::Ok().json(standing),
        Err(e) => json_error(&e),
    }
}

#[delete("/api/groups/{id}/teams/{team_id}")]
async fn api_remove_team_from_group(
    state: AppState,
    req: HttpRequest,
    token: Data<AdminToken>,
    path: Path<GroupTeamPath>,
) -> HttpResponse {
    if !is_admin(&req, &token) {
        return unauthorized();
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match logic::remove_team_from_group(&mut g, path.id, path.team_id) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "message": "Team removed" })),
        Err(e) => json_error(&e),
    }
}

#[get("/api/groups/{id}/standings")]
async fn api_group_standings(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.group_standings(path.id) {
        Ok(standings) => HttpResponse::Ok().json(standings),
        Err(e) => json_error(&e),
    }
}

// Matches

#[get("/api/matches")]
async fn api_list_matches(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.list_matches() {
        Ok(matches) => HttpResponse::Ok().json(matches),
        Err(e) => json_error(&e),
    }
}

#[get("/api/phases/{id}/matches")]
async fn api_matches_by_phase(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.matches_by_phase(path.id) {
        Ok(matches) => HttpResponse::Ok().json(matches),
        Err(e) => json_error(&e),
    }
}

#[get("/api/groups/{id}/matches")]
async fn api_matches_by_group(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.matches_by_group(path.id) {
        Ok(matches) => HttpResponse::Ok().json(matches),
        Err(e) => json_error(&e),
    }
}

/// Create a match. A played group match updates its group's table.
#[post("/api/matches")]
async fn api_create_match(
    state: AppState,
    req: HttpRequest,
    token: Data<AdminToken>,
    body: Json<NewMatch>,
) -> HttpResponse {
    if !is_admin(&req, &token) {
        return unauthorized();
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match logic::create_match(&mut g, body.into_inner()) {
        Ok(m) => HttpResponse::Ok().json(m),
        Err(e) => json_error(&e),
    }
}

/// Update a match. Entering or editing a group result recomputes the table.
#[put("/api/matches/{id}")]
async fn api_update_match(
    state: AppState,
    req: HttpRequest,
    token: Data<AdminToken>,
    path: Path<IdPath>,
    body: Json<MatchUpdate>,
) -> HttpResponse {
    if !is_admin(&req, &token) {
        return unauthorized();
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match logic::update_match(&mut g, path.id, body.into_inner()) {
        Ok(m) => HttpResponse::Ok().json(m),
        Err(e) => json_error(&e),
    }
}

#[delete("/api/matches/{id}")]
async fn api_delete_match(
    state: AppState,
    req: HttpRequest,
    token: Data<AdminToken>,
    path: Path<IdPath>,
) -> HttpResponse {
    if !is_admin(&req, &token) {
        return unauthorized();
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match logic::delete_match(&mut g, path.id) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "message": "Match deleted" })),
        Err(e) => json_error(&e),
    }
}

// Bracket

/// Seed the quarterfinals from the completed group tables.
#[post("/api/bracket/quarterfinals")]
async fn api_resolve_quarterfinals(
    state: AppState,
    req: HttpRequest,
    token: Data<AdminToken>,
) -> HttpResponse {
    if !is_admin(&req, &token) {
        return unauthorized();
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match logic::resolve_quarterfinals(&mut g) {
        Ok(matches) => HttpResponse::Ok().json(matches),
        Err(e) => json_error(&e),
    }
}

/// Advance every completed pair of a knockout phase into the next round.
#[post("/api/phases/{id}/advance")]
async fn api_advance_round(
    state: AppState,
    req: HttpRequest,
    token: Data<AdminToken>,
    path: Path<IdPath>,
) -> HttpResponse {
    if !is_admin(&req, &token) {
        return unauthorized();
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match logic::advance_round(&mut g, path.id) {
        Ok(matches) => HttpResponse::Ok().json(matches),
        Err(e) => json_error(&e),
    }
}

// Champions

#[get("/api/champions")]
async fn api_list_champions(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.list_champions() {
        Ok(champions) => HttpResponse::Ok().json(champions),
        Err(e) => json_error(&e),
    }
}

/// Manually create a champion record (historical editions).
#[post("/api/champions")]
async fn api_create_champion(
    state: AppState,
    req: HttpRequest,
    token: Data<AdminToken>,
    body: Json<NewChampion>,
) -> HttpResponse {
    if !is_admin(&req, &token) {
        return unauthorized();
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.create_champion(body.into_inner()) {
        Ok(champion) => HttpResponse::Ok().json(champion),
        Err(e) => json_error(&e),
    }
}

/// Record this edition's champion from the played Final.
#[post("/api/champions/record")]
async fn api_record_champion(
    state: AppState,
    req: HttpRequest,
    token: Data<AdminToken>,
) -> HttpResponse {
    if !is_admin(&req, &token) {
        return unauthorized();
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match logic::record_champion(&mut g) {
        Ok(champion) => HttpResponse::Ok().json(champion),
        Err(e) => json_error(&e),
    }
}

// Statistics

#[get("/api/teams/{id}/stats")]
async fn api_team_stats(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.team_stats(path.id) {
        Some(stats) => HttpResponse::Ok().json(stats),
        None => {
            HttpResponse::NotFound().json(serde_json::json!({ "error": "Team stats not found" }))
        }
    }
}

#[get("/api/stats/top-scorers")]
async fn api_top_scorers(state: AppState, query: Query<LimitQuery>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let limit = query.limit.unwrap_or(logic::DEFAULT_LEADERBOARD_SIZE);
    match logic::top_goal_scorers(&g, limit) {
        Ok(entries) => HttpResponse::Ok().json(entries),
        Err(e) => json_error(&e),
    }
}

#[get("/api/stats/top-defenders")]
async fn api_top_defenders(state: AppState, query: Query<LimitQuery>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let limit = query.limit.unwrap_or(logic::DEFAULT_LEADERBOARD_SIZE);
    match logic::top_defenders(&g, limit) {
        Ok(entries) => HttpResponse::Ok().json(entries),
        Err(e) => json_error(&e),
    }
}

/// Rebuild every cached team-stats row from match and champion history.
#[post("/api/stats/recompute")]
async fn api_recompute_stats(
    state: AppState,
    req: HttpRequest,
    token: Data<AdminToken>,
) -> HttpResponse {
    if !is_admin(&req, &token) {
        return unauthorized();
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match logic::recompute_team_stats(&mut g) {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => json_error(&e),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let admin_token = match std::env::var("ADMIN_TOKEN") {
        Ok(t) if !t.is_empty() => t,
        _ => {
            log::warn!("ADMIN_TOKEN not set; admin endpoints use the default dev token");
            "dev-admin-token".to_string()
        }
    };
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(Store::new()));
    let token = Data::new(AdminToken(admin_token));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(token.clone())
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_list_countries)
            .service(api_create_country)
            .service(api_list_teams)
            .service(api_get_team)
            .service(api_create_team)
            .service(api_update_team)
            .service(api_delete_team)
            .service(api_list_phases)
            .service(api_create_phase)
            .service(api_update_phase)
            .service(api_groups_by_phase)
            .service(api_create_group)
            .service(api_delete_group)
            .service(api_add_team_to_group)
            .service(api_remove_team_from_group)
            .service(api_group_standings)
            .service(api_list_matches)
            .service(api_matches_by_phase)
            .service(api_matches_by_group)
            .service(api_create_match)
            .service(api_update_match)
            .service(api_delete_match)
            .service(api_resolve_quarterfinals)
            .service(api_advance_round)
            .service(api_list_champions)
            .service(api_create_champion)
            .service(api_record_champion)
            .service(api_team_stats)
            .service(api_top_scorers)
            .service(api_top_defenders)
            .service(api_recompute_stats)
    })
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
