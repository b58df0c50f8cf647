//! GameState, GamePhase, Winner and RoleCounts.

use crate::models::player::{Player, PlayerId, Role};
use crate::models::words::WordPair;
use serde::{Deserialize, Serialize};

/// Fewest players a game can be dealt for.
pub const MIN_PLAYERS: usize = 3;
/// Most players a game can be dealt for.
pub const MAX_PLAYERS: usize = 20;

/// How many seats get each role.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoleCounts {
    pub burgers: usize,
    pub undercovers: usize,
    pub mister_whites: usize,
}

impl RoleCounts {
    pub fn total(&self) -> usize {
        self.burgers + self.undercovers + self.mister_whites
    }

    pub fn count(&self, role: Role) -> usize {
        match role {
            Role::Burger => self.burgers,
            Role::Undercover => self.undercovers,
            Role::MisterWhite => self.mister_whites,
        }
    }
}

/// Current phase of the game.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// Choosing player count, roles and words; nothing dealt yet.
    #[default]
    Setup,
    /// Device passed around; each player privately views their card.
    CardPhase,
    /// Players describe their word out loud.
    GameRound,
    /// Table votes one player out.
    Voting,
    /// Winner decided.
    EndGame,
}

/// Winning side of a finished game.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    Burgers,
    /// Undercovers and Mister Whites together.
    Infiltrators,
    /// An eliminated Mister White guessed the Burger word.
    MisterWhite,
}

/// Full game state: seats, words, phase and outcome.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Seating order.
    pub players: Vec<Player>,
    pub word_pair: WordPair,
    pub phase: GamePhase,
    /// Seat whose card is being shown (card phase only).
    pub current_player_index: usize,
    /// Set once, never cleared.
    pub winner: Option<Winner>,
    /// Who opens the current or next round.
    pub starting_player_id: PlayerId,
    /// Eliminated Mister White who still gets to guess the Burger word.
    #[serde(default)]
    pub pending_guess: Option<PlayerId>,
    /// Mister White guessed wrong; the win check has not run yet.
    #[serde(default)]
    pub awaiting_verdict: bool,
}

impl GameState {
    /// State with the given seats, ready for the card phase.
    pub fn with_players(players: Vec<Player>, word_pair: WordPair, starting_player_id: PlayerId) -> Self {
        Self {
            players,
            word_pair,
            phase: GamePhase::CardPhase,
            current_player_index: 0,
            winner: None,
            starting_player_id,
            pending_guess: None,
            awaiting_verdict: false,
        }
    }

    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn get_player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Players not yet voted out, in seating order.
    pub fn active_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_active())
    }

    /// Active players holding `role`.
    pub fn active_count(&self, role: Role) -> usize {
        self.active_players().filter(|p| p.role == role).count()
    }

    /// Word handed to a player with `role` under the current pair.
    pub fn word_for(&self, role: Role) -> &str {
        self.word_pair.word_for(role)
    }

    /// A voted-out Mister White's guess or its verdict is still open.
    pub fn vote_unsettled(&self) -> bool {
        self.pending_guess.is_some() || self.awaiting_verdict
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Player whose card is currently shown, while in the card phase.
    pub fn current_card_holder(&self) -> Option<&Player> {
        if self.phase != GamePhase::CardPhase {
            return None;
        }
        self.players.get(self.current_player_index)
    }
}
