//! ScoreKeeper: merges finished games into the leaderboard store.

use crate::leaderboard::repository::{LeaderboardError, LeaderboardRepository};
use crate::leaderboard::stats::PlayerStats;
use crate::models::GameState;
use chrono::{DateTime, Utc};

/// Reads and updates the leaderboard through an injected repository.
///
/// An unreadable or corrupt store is treated as empty and logged.
#[derive(Debug)]
pub struct ScoreKeeper<R> {
    repository: R,
}

impl<R: LeaderboardRepository> ScoreKeeper<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    fn load_or_empty(&self) -> Vec<PlayerStats> {
        match self.repository.load() {
            Ok(records) => records,
            Err(e) => {
                log::warn!("Starting from an empty leaderboard: {}", e);
                Vec::new()
            }
        }
    }

    /// All records, highest score first (ties keep stored order).
    pub fn leaderboard(&self) -> Vec<PlayerStats> {
        let mut records = self.load_or_empty();
        records.sort_by(|a, b| b.score.cmp(&a.score));
        records
    }

    /// Names seen in earlier games, in leaderboard order.
    pub fn known_names(&self) -> Vec<String> {
        self.leaderboard().into_iter().map(|s| s.name).collect()
    }

    /// Merge a finished game into the store. Does nothing while `state` has no winner.
    ///
    /// Call once per finished game; the engine does not detect repeats.
    pub fn record_game(&self, state: &GameState, mister_white_won_by_guess: bool) {
        self.record_game_at(state, mister_white_won_by_guess, Utc::now());
    }

    /// [`ScoreKeeper::record_game`] with an explicit timestamp for `lastPlayed`.
    pub fn record_game_at(&self, state: &GameState, mister_white_won_by_guess: bool, now: DateTime<Utc>) {
        let Some(winner) = state.winner else {
            return;
        };

        let mut records = self.load_or_empty();
        for player in &state.players {
            let key = player.name.to_lowercase();
            let idx = match records.iter().position(|s| s.key() == key) {
                Some(idx) => idx,
                None => {
                    records.push(PlayerStats::new(player.name.clone(), now));
                    records.len() - 1
                }
            };
            records[idx].record(player, winner, mister_white_won_by_guess, now);
        }
        records.sort_by(|a, b| b.score.cmp(&a.score));

        match self.repository.save(&records) {
            Ok(()) => log::info!(
                "Recorded {:?} win for {} players ({} names on the leaderboard)",
                winner,
                state.players.len(),
                records.len()
            ),
            Err(e) => log::warn!("Could not save leaderboard: {}", e),
        }
    }

    /// Wipe the leaderboard.
    pub fn reset(&self) -> Result<(), LeaderboardError> {
        self.repository.clear()?;
        log::info!("Leaderboard reset");
        Ok(())
    }
}
