//! Data structures for the game: players, roles, words, game state.

mod error;
mod game;
mod player;
mod words;

pub use error::{ConfigError, GameError};
pub use game::{GamePhase, GameState, RoleCounts, Winner, MAX_PLAYERS, MIN_PLAYERS};
pub use player::{Player, PlayerId, Role};
pub use words::{WordPair, WordPool, DEFAULT_CATEGORY};
