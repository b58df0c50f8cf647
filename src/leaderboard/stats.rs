//! Persisted per-name statistics and the points table.

use crate::models::{Player, Role, Winner};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Points for a player with `role` when `winner` takes the game; `None` means the player lost.
///
/// Burgers 2, Undercover 10, Mister White 6 (with the Infiltrators or by guessing the word).
pub fn award(winner: Winner, role: Role) -> Option<u32> {
    match (winner, role) {
        (Winner::Burgers, Role::Burger) => Some(2),
        (Winner::Infiltrators, Role::Undercover) => Some(10),
        (Winner::Infiltrators, Role::MisterWhite) => Some(6),
        (Winner::MisterWhite, Role::MisterWhite) => Some(6),
        _ => None,
    }
}

/// How often a name was dealt each role.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleStats {
    pub burger: u32,
    pub undercover: u32,
    pub mister_white: u32,
}

impl RoleStats {
    pub fn increment(&mut self, role: Role) {
        match role {
            Role::Burger => self.burger += 1,
            Role::Undercover => self.undercover += 1,
            Role::MisterWhite => self.mister_white += 1,
        }
    }
}

/// Leaderboard record, keyed by case-insensitive name.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub name: String,
    pub score: u32,
    pub games_played: u32,
    pub wins: u32,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_played: DateTime<Utc>,
    #[serde(default)]
    pub role_stats: RoleStats,
    /// Times voted out while being a Burger. Display only.
    #[serde(default)]
    pub wrongly_eliminated_count: u32,
    #[serde(default)]
    pub mister_white_guess_wins: u32,
}

impl PlayerStats {
    /// Empty record for a name seen for the first time.
    pub fn new(name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            score: 0,
            games_played: 0,
            wins: 0,
            last_played: now,
            role_stats: RoleStats::default(),
            wrongly_eliminated_count: 0,
            mister_white_guess_wins: 0,
        }
    }

    /// Lower-cased name used to match records.
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    /// Fold one finished game into this record.
    pub fn record(&mut self, player: &Player, winner: Winner, mister_white_won_by_guess: bool, now: DateTime<Utc>) {
        self.games_played += 1;
        self.last_played = now;
        self.role_stats.increment(player.role);

        if player.role == Role::Burger && player.is_eliminated {
            self.wrongly_eliminated_count += 1;
        }

        if let Some(points) = award(winner, player.role) {
            self.wins += 1;
            self.score += points;
            if winner == Winner::MisterWhite && mister_white_won_by_guess {
                self.mister_white_guess_wins += 1;
            }
        }
    }
}
