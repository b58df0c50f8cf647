//! Undercover party game: library with models, game rules and the leaderboard.

pub mod leaderboard;
pub mod logic;
pub mod models;

pub use leaderboard::{
    award, JsonFileRepository, LeaderboardError, LeaderboardRepository, MemoryRepository,
    PlayerStats, RoleStats, ScoreKeeper,
};
pub use logic::{
    add_player, advance_card_phase, assign, compute_default_roles, continue_after_guess,
    eliminate, evaluate_win_condition, is_correct_guess, new_words, next_starting_player,
    resolve_mister_white_guess, start_voting, validate_roles, Elimination, RoundOutcome,
};
pub use models::{
    ConfigError, GameError, GamePhase, GameState, Player, PlayerId, Role, RoleCounts, Winner,
    WordPair, WordPool, DEFAULT_CATEGORY, MAX_PLAYERS, MIN_PLAYERS,
};
