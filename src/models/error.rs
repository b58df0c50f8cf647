//! Errors raised by game setup and state transitions.

use crate::models::player::PlayerId;
use std::fmt;

/// Rejected game configuration (role counts, names, words).
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConfigError {
    /// Player count outside the supported range.
    PlayerCountOutOfRange { count: usize, min: usize, max: usize },
    /// Role counts do not add up to the player count.
    RoleCountMismatch { players: usize, roles: usize },
    /// At least one Undercover is required.
    NotEnoughUndercovers,
    /// At least two Burgers are required.
    NotEnoughBurgers,
    /// Both words of the pair must be non-empty.
    EmptyWord,
    /// Two seats resolve to the same name (case-insensitive).
    DuplicateName(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::PlayerCountOutOfRange { count, min, max } => {
                write!(f, "Player count {} is outside {}..={}", count, min, max)
            }
            ConfigError::RoleCountMismatch { players, roles } => {
                write!(f, "Roles add up to {} but there are {} players", roles, players)
            }
            ConfigError::NotEnoughUndercovers => write!(f, "Need at least 1 Undercover"),
            ConfigError::NotEnoughBurgers => write!(f, "Need at least 2 Burgers"),
            ConfigError::EmptyWord => write!(f, "Both words of the pair must be set"),
            ConfigError::DuplicateName(name) => write!(f, "Name \"{}\" is used twice", name),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors that can occur during game transitions.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GameError {
    /// Game is not in a phase that allows this action.
    InvalidState,
    /// No player with this id.
    PlayerNotFound(PlayerId),
    /// Player was already voted out.
    AlreadyEliminated(PlayerId),
    /// Another player already uses this name (case-insensitive).
    DuplicatePlayerName,
    /// Every candidate for the starting seat is Mister White or eliminated.
    NoEligibleStartingPlayer,
    Config(ConfigError),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidState => write!(f, "Invalid state for this action"),
            GameError::PlayerNotFound(id) => write!(f, "Player {} not found", id),
            GameError::AlreadyEliminated(id) => write!(f, "Player {} is already eliminated", id),
            GameError::DuplicatePlayerName => write!(f, "A player with this name already exists"),
            GameError::NoEligibleStartingPlayer => write!(f, "No player can open the round"),
            GameError::Config(e) => write!(f, "Invalid configuration: {}", e),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for GameError {
    fn from(e: ConfigError) -> Self {
        GameError::Config(e)
    }
}
