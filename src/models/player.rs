//! Player and Role data structures.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Seat identifier, assigned at creation and stable for the whole game.
pub type PlayerId = u32;

/// Secret role dealt to a player.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Burger,
    Undercover,
    MisterWhite,
}

impl Role {
    /// Undercover and Mister White play together against the Burgers.
    pub fn is_infiltrator(self) -> bool {
        matches!(self, Role::Undercover | Role::MisterWhite)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Burger => write!(f, "Burger"),
            Role::Undercover => write!(f, "Undercover"),
            Role::MisterWhite => write!(f, "Mister White"),
        }
    }
}

/// A seat at the table.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub role: Role,
    /// Empty for Mister White.
    pub word: String,
    /// Never reverts to false within a game.
    pub is_eliminated: bool,
    pub has_seen_card: bool,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, role: Role, word: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            role,
            word: word.into(),
            is_eliminated: false,
            has_seen_card: false,
        }
    }

    /// Default seat name for the player at `index` (zero-based).
    pub fn default_name(index: usize) -> String {
        format!("Player {}", index + 1)
    }

    pub fn is_active(&self) -> bool {
        !self.is_eliminated
    }

    /// Mark the player as eliminated.
    pub fn eliminate(&mut self) {
        self.is_eliminated = true;
    }
}
