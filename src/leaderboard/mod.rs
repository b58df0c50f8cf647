//! Persistent leaderboard: per-name statistics, storage and score merging.

mod repository;
mod score_keeper;
mod stats;

pub use repository::{JsonFileRepository, LeaderboardError, LeaderboardRepository, MemoryRepository};
pub use score_keeper::ScoreKeeper;
pub use stats::{award, PlayerStats, RoleStats};
