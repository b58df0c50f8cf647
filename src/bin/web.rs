//! Single binary web server: JSON API around the game engine and the leaderboard file.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! LEADERBOARD_PATH (default leaderboard.json) picks the leaderboard file;
//! WORD_POOL_PATH optionally replaces the built-in word categories.

use actix_web::{
    delete, get, post,
    web::{Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use undercover_party::{
    add_player, advance_card_phase, assign, compute_default_roles, continue_after_guess,
    eliminate, new_words, resolve_mister_white_guess, start_voting, Elimination,
    GameError, GameState, JsonFileRepository, PlayerId, RoleCounts, RoundOutcome, ScoreKeeper,
    WordPair, WordPool,
};
use uuid::Uuid;

/// Identifier of one game session on this server.
type GameId = Uuid;

/// Per-game entry: state + last activity time (for auto-cleanup).
struct GameEntry {
    game: GameState,
    last_activity: Instant,
}

/// Sessions in memory; leaderboard on disk. Sessions are removed after 12h inactivity.
struct AppState {
    games: RwLock<HashMap<GameId, GameEntry>>,
    scores: ScoreKeeper<JsonFileRepository>,
    words: WordPool,
}

type SharedState = Data<AppState>;

/// Inactivity threshold: games not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct DefaultRolesQuery {
    players: usize,
}

#[derive(Deserialize)]
struct CreateGameBody {
    player_count: usize,
    /// Defaults to the suggested distribution for `player_count`.
    roles: Option<RoleCounts>,
    /// Defaults to the General category.
    category: Option<String>,
    /// Used instead of the pool when both words are set.
    custom_word_pair: Option<WordPair>,
    #[serde(default)]
    names: Vec<String>,
}

#[derive(Deserialize)]
struct ConfirmCardBody {
    name: Option<String>,
}

#[derive(Deserialize)]
struct GuessBody {
    guess: String,
}

#[derive(Serialize)]
struct GuessResult {
    correct: bool,
}

/// Path segment: game id (e.g. /api/games/{id})
#[derive(Deserialize)]
struct GamePath {
    id: GameId,
}

/// Path segments: game id and player id (e.g. /api/games/{id}/players/{player_id})
#[derive(Deserialize)]
struct GamePlayerPath {
    id: GameId,
    player_id: PlayerId,
}

fn no_game() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No game" }))
}

/// Run `action` against one game and answer with the updated game plus the action's result.
///
/// `action` runs under the games write lock, so leaderboard writes made from it are
/// serialized. They are small synchronous file writes and block the worker while they run.
fn with_game<T, F>(state: &AppState, id: GameId, action: F) -> HttpResponse
where
    T: Serialize,
    F: FnOnce(&mut GameState, &ScoreKeeper<JsonFileRepository>) -> Result<T, GameError>,
{
    let mut g = match state.games.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return no_game(),
    };
    entry.last_activity = Instant::now();
    match action(&mut entry.game, &state.scores) {
        Ok(result) => HttpResponse::Ok().json(serde_json::json!({
            "id": id,
            "game": &entry.game,
            "result": result,
        })),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "undercover-party",
    })
}

/// Suggested role distribution for a player count.
#[get("/api/roles/default")]
async fn api_default_roles(query: Query<DefaultRolesQuery>) -> HttpResponse {
    HttpResponse::Ok().json(compute_default_roles(query.players))
}

/// Word categories available for new games.
#[get("/api/categories")]
async fn api_categories(state: SharedState) -> HttpResponse {
    HttpResponse::Ok().json(state.words.category_names())
}

/// Deal a new game (returns it with id; client keeps the id for later requests).
#[post("/api/games")]
async fn api_create_game(state: SharedState, body: Json<CreateGameBody>) -> HttpResponse {
    let body = body.into_inner();
    let roles = body
        .roles
        .unwrap_or_else(|| compute_default_roles(body.player_count));
    let mut rng = rand::thread_rng();
    let word_pair = match state
        .words
        .pair_for_game(body.custom_word_pair, body.category.as_deref(), &mut rng)
    {
        Some(pair) => pair,
        None => {
            return HttpResponse::InternalServerError()
                .json(serde_json::json!({ "error": "Word pool is empty" }))
        }
    };
    let game = match assign(body.player_count, roles, word_pair, &body.names, &mut rng) {
        Ok(game) => game,
        Err(e) => return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    };

    let id = Uuid::new_v4();
    let mut g = match state.games.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let response = serde_json::json!({ "id": id, "game": &game });
    g.insert(
        id,
        GameEntry {
            game,
            last_activity: Instant::now(),
        },
    );
    HttpResponse::Ok().json(response)
}

/// Get a game by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/games/{id}")]
async fn api_get_game(state: SharedState, path: Path<GamePath>) -> HttpResponse {
    with_game(&state, path.id, |_, _| Ok(()))
}

/// Quit a game without recording it.
#[delete("/api/games/{id}")]
async fn api_quit_game(state: SharedState, path: Path<GamePath>) -> HttpResponse {
    let mut g = match state.games.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.remove(&path.id) {
        Some(_) => HttpResponse::NoContent().finish(),
        None => no_game(),
    }
}

/// Current player has seen their card (optionally with their name).
#[post("/api/games/{id}/cards/confirm")]
async fn api_confirm_card(
    state: SharedState,
    path: Path<GamePath>,
    body: Json<ConfirmCardBody>,
) -> HttpResponse {
    with_game(&state, path.id, |game, _| {
        advance_card_phase(game, body.name.as_deref())
    })
}

/// Describing round done; start the vote.
#[post("/api/games/{id}/voting/start")]
async fn api_start_voting(state: SharedState, path: Path<GamePath>) -> HttpResponse {
    with_game(&state, path.id, |game, _| start_voting(game))
}

/// Vote a player out. A finished game is recorded on the leaderboard here.
#[post("/api/games/{id}/players/{player_id}/eliminate")]
async fn api_eliminate(state: SharedState, path: Path<GamePlayerPath>) -> HttpResponse {
    with_game(&state, path.id, |game, scores| {
        let outcome = eliminate(game, path.player_id)?;
        if let Elimination::Resolved(RoundOutcome::GameOver { .. }) = outcome {
            scores.record_game(game, false);
        }
        Ok(outcome)
    })
}

/// Eliminated Mister White guesses the Burger word.
#[post("/api/games/{id}/guess")]
async fn api_guess(state: SharedState, path: Path<GamePath>, body: Json<GuessBody>) -> HttpResponse {
    with_game(&state, path.id, |game, scores| {
        let correct = resolve_mister_white_guess(game, &body.guess)?;
        if correct {
            scores.record_game(game, true);
        }
        Ok(GuessResult { correct })
    })
}

/// After a wrong guess: check who wins or start the next round.
#[post("/api/games/{id}/continue")]
async fn api_continue(state: SharedState, path: Path<GamePath>) -> HttpResponse {
    with_game(&state, path.id, |game, scores| {
        let outcome = continue_after_guess(game)?;
        if matches!(outcome, RoundOutcome::GameOver { .. }) {
            scores.record_game(game, false);
        }
        Ok(outcome)
    })
}

/// Same roles, new words: back to the card phase.
#[post("/api/games/{id}/new-words")]
async fn api_new_words(state: SharedState, path: Path<GamePath>) -> HttpResponse {
    let words = &state.words;
    with_game(&state, path.id, |game, _| {
        new_words(game, words, &mut rand::thread_rng())
    })
}

/// Seat a latecomer as a Burger.
#[post("/api/games/{id}/players")]
async fn api_add_player(state: SharedState, path: Path<GamePath>) -> HttpResponse {
    with_game(&state, path.id, |game, _| add_player(game))
}

/// Leaderboard, highest score first.
#[get("/api/leaderboard")]
async fn api_leaderboard(state: SharedState) -> HttpResponse {
    HttpResponse::Ok().json(state.scores.leaderboard())
}

/// Names from earlier games (for autocomplete).
#[get("/api/leaderboard/names")]
async fn api_known_names(state: SharedState) -> HttpResponse {
    HttpResponse::Ok().json(state.scores.known_names())
}

/// Wipe all scores.
#[delete("/api/leaderboard")]
async fn api_reset_leaderboard(state: SharedState) -> HttpResponse {
    match state.scores.reset() {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() })),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_leaderboard_path() -> String {
    "leaderboard.json".to_string()
}

/// Built-in pool unless WORD_POOL_PATH points at a readable, non-empty pool.
fn load_word_pool() -> WordPool {
    let path = match std::env::var("WORD_POOL_PATH") {
        Ok(path) => path,
        Err(_) => return WordPool::builtin(),
    };
    match WordPool::from_json_file(&path) {
        Ok(pool) if !pool.is_empty() => {
            log::info!("Loaded word pool from {} ({:?})", path, pool.category_names());
            pool
        }
        Ok(_) => {
            log::warn!("Word pool {} is empty; using built-in words", path);
            WordPool::builtin()
        }
        Err(e) => {
            log::warn!("Could not read word pool {}: {}; using built-in words", path, e);
            WordPool::builtin()
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let leaderboard_path =
        std::env::var("LEADERBOARD_PATH").unwrap_or_else(|_| default_leaderboard_path());
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(AppState {
        games: RwLock::new(HashMap::new()),
        scores: ScoreKeeper::new(JsonFileRepository::new(leaderboard_path)),
        words: load_word_pool(),
    });
    log::info!("Leaderboard file: {}", state.scores.repository().path().display());

    // Background task: every 30 minutes, remove games inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.games.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive game(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_default_roles)
            .service(api_categories)
            .service(api_create_game)
            .service(api_get_game)
            .service(api_quit_game)
            .service(api_confirm_card)
            .service(api_start_voting)
            .service(api_eliminate)
            .service(api_guess)
            .service(api_continue)
            .service(api_new_words)
            .service(api_add_player)
            .service(api_leaderboard)
            .service(api_known_names)
            .service(api_reset_leaderboard)
    })
    .bind(bind)?
    .run()
    .await
}
