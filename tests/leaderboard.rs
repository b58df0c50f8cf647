//! Integration tests for the leaderboard: scoring, merging and the JSON file store.

use chrono::{DateTime, TimeZone, Utc};
use std::cell::Cell;
use std::path::PathBuf;
use undercover_party::{
    award, eliminate, evaluate_win_condition, resolve_mister_white_guess, GamePhase, GameState,
    JsonFileRepository, LeaderboardError, LeaderboardRepository, MemoryRepository, Player,
    PlayerId, PlayerStats, Role, RoundOutcome, ScoreKeeper, Winner, WordPair,
};

use undercover_party::Role::{Burger, MisterWhite, Undercover};

fn at(millis: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(millis).unwrap()
}

/// Voting-phase game with one seat per `(name, role)`, ids in order.
fn named_game(seats: &[(&str, Role)]) -> GameState {
    let pair = WordPair::new("Koffie", "Thee");
    let players = seats
        .iter()
        .enumerate()
        .map(|(i, &(name, role))| Player::new(i as PlayerId, name, role, pair.word_for(role)))
        .collect();
    let mut game = GameState::with_players(players, pair, 0);
    game.phase = GamePhase::Voting;
    game
}

fn stats_for<'a>(records: &'a [PlayerStats], name: &str) -> &'a PlayerStats {
    records.iter().find(|s| s.name == name).unwrap()
}

fn temp_store() -> PathBuf {
    std::env::temp_dir().join(format!("undercover-leaderboard-{}.json", uuid::Uuid::new_v4()))
}

/// Memory store that counts saves.
#[derive(Default)]
struct CountingRepository {
    inner: MemoryRepository,
    saves: Cell<usize>,
}

impl LeaderboardRepository for CountingRepository {
    fn load(&self) -> Result<Vec<PlayerStats>, LeaderboardError> {
        self.inner.load()
    }

    fn save(&self, records: &[PlayerStats]) -> Result<(), LeaderboardError> {
        self.saves.set(self.saves.get() + 1);
        self.inner.save(records)
    }

    fn clear(&self) -> Result<(), LeaderboardError> {
        self.inner.clear()
    }
}

#[test]
fn points_table() {
    assert_eq!(award(Winner::Burgers, Burger), Some(2));
    assert_eq!(award(Winner::Burgers, Undercover), None);
    assert_eq!(award(Winner::Burgers, MisterWhite), None);
    assert_eq!(award(Winner::Infiltrators, Undercover), Some(10));
    assert_eq!(award(Winner::Infiltrators, MisterWhite), Some(6));
    assert_eq!(award(Winner::Infiltrators, Burger), None);
    assert_eq!(award(Winner::MisterWhite, MisterWhite), Some(6));
    assert_eq!(award(Winner::MisterWhite, Undercover), None);
    assert_eq!(award(Winner::MisterWhite, Burger), None);
}

#[test]
fn infiltrators_win_scores_undercover_and_mister_white() {
    let mut game = named_game(&[
        ("Anna", Burger),
        ("Bram", Burger),
        ("Cas", Burger),
        ("Dewi", Undercover),
        ("Eva", MisterWhite),
    ]);
    game.players[0].eliminate();
    game.players[4].eliminate();
    game.players[1].eliminate();
    game.winner = Some(Winner::Infiltrators);
    game.phase = GamePhase::EndGame;

    let keeper = ScoreKeeper::new(MemoryRepository::new());
    keeper.record_game_at(&game, false, at(1_000));
    let records = keeper.leaderboard();

    let dewi = stats_for(&records, "Dewi");
    assert_eq!((dewi.score, dewi.wins, dewi.games_played), (10, 1, 1));
    assert_eq!(dewi.role_stats.undercover, 1);

    let eva = stats_for(&records, "Eva");
    assert_eq!((eva.score, eva.wins, eva.games_played), (6, 1, 1));
    assert_eq!(eva.role_stats.mister_white, 1);
    assert_eq!(eva.mister_white_guess_wins, 0);

    let anna = stats_for(&records, "Anna");
    assert_eq!((anna.score, anna.wins, anna.games_played), (0, 0, 1));
    assert_eq!(anna.role_stats.burger, 1);
    assert_eq!(anna.wrongly_eliminated_count, 1);
    assert_eq!(stats_for(&records, "Cas").wrongly_eliminated_count, 0);
    assert_eq!(anna.last_played, at(1_000));

    let order: Vec<&str> = records.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(&order[..2], ["Dewi", "Eva"]);
}

#[test]
fn mister_white_guess_is_counted() {
    let mut game = named_game(&[
        ("Anna", Burger),
        ("Bram", Burger),
        ("Cas", Burger),
        ("Dewi", Undercover),
        ("Eva", MisterWhite),
    ]);
    eliminate(&mut game, 4).unwrap();
    assert!(resolve_mister_white_guess(&mut game, "koffie").unwrap());

    let keeper = ScoreKeeper::new(MemoryRepository::new());
    keeper.record_game(&game, true);
    let records = keeper.leaderboard();

    let eva = stats_for(&records, "Eva");
    assert_eq!((eva.score, eva.wins, eva.mister_white_guess_wins), (6, 1, 1));
    assert_eq!(stats_for(&records, "Dewi").wins, 0);
    assert_eq!(stats_for(&records, "Anna").score, 0);
}

#[test]
fn burgers_win_counts_eliminated_burgers_as_winners() {
    let mut game = named_game(&[("Anna", Burger), ("Bram", Burger), ("Cas", Burger), ("Dewi", Undercover)]);
    eliminate(&mut game, 0).unwrap();
    game.phase = GamePhase::Voting;
    eliminate(&mut game, 3).unwrap();
    assert_eq!(game.winner, Some(Winner::Burgers));

    let keeper = ScoreKeeper::new(MemoryRepository::new());
    keeper.record_game(&game, false);
    let records = keeper.leaderboard();

    let anna = stats_for(&records, "Anna");
    assert_eq!((anna.score, anna.wins, anna.wrongly_eliminated_count), (2, 1, 1));
    assert_eq!(stats_for(&records, "Dewi").score, 0);
}

#[test]
fn unfinished_game_is_not_recorded() {
    let game = named_game(&[("Anna", Burger), ("Bram", Burger), ("Dewi", Undercover)]);
    let keeper = ScoreKeeper::new(CountingRepository::default());
    keeper.record_game(&game, false);
    assert_eq!(keeper.repository().saves.get(), 0);
    assert!(keeper.leaderboard().is_empty());
}

#[test]
fn game_is_recorded_once_per_finish() {
    let mut game = named_game(&[("Anna", Burger), ("Bram", Burger), ("Cas", Burger), ("Eva", MisterWhite)]);
    let keeper = ScoreKeeper::new(CountingRepository::default());
    eliminate(&mut game, 3).unwrap();
    assert!(!resolve_mister_white_guess(&mut game, "Thee").unwrap());

    // Host loop: record only on the transition into a finished game.
    for _ in 0..3 {
        let was_over = game.is_over();
        let outcome = evaluate_win_condition(&mut game).unwrap();
        assert_eq!(outcome, RoundOutcome::GameOver { winner: Winner::Burgers });
        if !was_over {
            keeper.record_game(&game, false);
        }
    }

    assert_eq!(keeper.repository().saves.get(), 1);
    let records = keeper.leaderboard();
    assert_eq!(stats_for(&records, "Anna").games_played, 1);
    assert_eq!(stats_for(&records, "Anna").score, 2);
    assert_eq!(stats_for(&records, "Eva").wins, 0);
}

#[test]
fn merge_is_case_insensitive_and_keeps_other_names() {
    let mut old_anna = PlayerStats::new("anna", at(0));
    old_anna.score = 4;
    old_anna.games_played = 3;
    old_anna.wins = 2;
    let mut zoe = PlayerStats::new("Zoe", at(0));
    zoe.score = 30;
    zoe.games_played = 5;
    let keeper = ScoreKeeper::new(MemoryRepository::with_records(vec![old_anna, zoe.clone()]));

    let mut game = named_game(&[("ANNA", Burger), ("Bram", Burger), ("Dewi", Undercover)]);
    game.winner = Some(Winner::Burgers);
    keeper.record_game_at(&game, false, at(5_000));

    let records = keeper.leaderboard();
    assert_eq!(records.len(), 4);
    let anna = stats_for(&records, "anna");
    assert_eq!((anna.score, anna.games_played, anna.wins), (6, 4, 3));
    assert_eq!(anna.last_played, at(5_000));
    assert_eq!(stats_for(&records, "Zoe"), &zoe);

    assert_eq!(keeper.known_names(), ["Zoe", "anna", "Bram", "Dewi"]);
}

#[test]
fn missing_newer_fields_default_to_zero() {
    let json = r#"[
        {"name": "Anna", "score": 12, "gamesPlayed": 4, "wins": 3, "lastPlayed": 1700000000000,
         "roleStats": {"burger": 3, "undercover": 1, "misterWhite": 0}}
    ]"#;
    let records: Vec<PlayerStats> = serde_json::from_str(json).unwrap();
    assert_eq!(records[0].wrongly_eliminated_count, 0);
    assert_eq!(records[0].mister_white_guess_wins, 0);
    assert_eq!(records[0].last_played, at(1_700_000_000_000));
    assert_eq!(records[0].role_stats.burger, 3);
}

#[test]
fn stored_layout_uses_camel_case_keys() {
    let mut stats = PlayerStats::new("Anna", at(42));
    stats.wrongly_eliminated_count = 1;
    let value = serde_json::to_value(&stats).unwrap();
    assert_eq!(value["gamesPlayed"], 0);
    assert_eq!(value["lastPlayed"], 42);
    assert_eq!(value["roleStats"]["misterWhite"], 0);
    assert_eq!(value["wronglyEliminatedCount"], 1);
    assert_eq!(value["misterWhiteGuessWins"], 0);
}

#[test]
fn json_file_store_round_trips_and_resets() {
    let path = temp_store();
    let keeper = ScoreKeeper::new(JsonFileRepository::new(&path));
    assert_eq!(keeper.repository().path(), path.as_path());
    assert!(keeper.leaderboard().is_empty());

    let mut game = named_game(&[("Anna", Burger), ("Bram", Burger), ("Dewi", Undercover)]);
    game.winner = Some(Winner::Infiltrators);
    keeper.record_game_at(&game, false, at(7_000));

    let reopened = ScoreKeeper::new(JsonFileRepository::new(&path));
    let records = reopened.leaderboard();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].name, "Dewi");
    assert_eq!(records[0].score, 10);
    assert_eq!(records[0].last_played, at(7_000));

    reopened.reset().unwrap();
    assert!(!path.exists());
    assert!(keeper.leaderboard().is_empty());
    // Resetting an empty store is fine.
    reopened.reset().unwrap();
}

#[test]
fn corrupt_store_is_treated_as_empty() {
    let path = temp_store();
    std::fs::write(&path, "not json at all").unwrap();
    let repo = JsonFileRepository::new(&path);
    assert!(matches!(repo.load(), Err(LeaderboardError::Json(_))));

    let keeper = ScoreKeeper::new(repo);
    assert!(keeper.leaderboard().is_empty());
    assert!(keeper.known_names().is_empty());

    let mut game = named_game(&[("Anna", Burger), ("Bram", Burger), ("Dewi", Undercover)]);
    game.winner = Some(Winner::Burgers);
    keeper.record_game(&game, false);
    assert_eq!(keeper.leaderboard().len(), 3);

    std::fs::remove_file(&path).unwrap();
}
