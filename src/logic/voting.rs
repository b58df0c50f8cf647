//! Voting: elimination, the Mister White guess, win detection and starting-player rotation.

use crate::models::{GameError, GamePhase, GameState, Player, PlayerId, Role, Winner};
use serde::{Deserialize, Serialize};

/// Result of checking the win condition after a vote.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RoundOutcome {
    /// Nobody won; a new round starts with this player.
    Continue { starting_player_id: PlayerId },
    GameOver { winner: Winner },
}

/// What happened after a player was voted out.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Elimination {
    /// A Mister White was voted out and gets one guess at the Burger word first.
    AwaitingGuess { player_id: PlayerId },
    Resolved(RoundOutcome),
}

/// Move from the describing round to the vote.
pub fn start_voting(state: &mut GameState) -> Result<(), GameError> {
    if state.phase != GamePhase::GameRound {
        return Err(GameError::InvalidState);
    }
    state.phase = GamePhase::Voting;
    Ok(())
}

/// Vote a player out.
///
/// Mister White is not evaluated yet: the state waits for [`resolve_mister_white_guess`].
/// Anyone else triggers [`evaluate_win_condition`] straight away.
pub fn eliminate(state: &mut GameState, player_id: PlayerId) -> Result<Elimination, GameError> {
    if state.phase != GamePhase::Voting || state.vote_unsettled() {
        return Err(GameError::InvalidState);
    }
    let player = state
        .get_player_mut(player_id)
        .ok_or(GameError::PlayerNotFound(player_id))?;
    if player.is_eliminated {
        return Err(GameError::AlreadyEliminated(player_id));
    }
    player.eliminate();
    let role = player.role;
    log::debug!("Player {} ({}) eliminated", player_id, role);

    if role == Role::MisterWhite {
        state.pending_guess = Some(player_id);
        return Ok(Elimination::AwaitingGuess { player_id });
    }
    evaluate_win_condition(state).map(Elimination::Resolved)
}

/// True when `guess` is the Burger word, ignoring case and surrounding whitespace.
pub fn is_correct_guess(state: &GameState, guess: &str) -> bool {
    guess.trim().to_lowercase() == state.word_pair.burger_word.trim().to_lowercase()
}

/// Settle the eliminated Mister White's guess.
///
/// A correct guess ends the game for Mister White regardless of who is left. A wrong guess
/// sets no winner; the caller shows the result and then calls [`continue_after_guess`].
/// Returns whether the guess was correct.
pub fn resolve_mister_white_guess(state: &mut GameState, guess: &str) -> Result<bool, GameError> {
    if state.phase != GamePhase::Voting {
        return Err(GameError::InvalidState);
    }
    let guesser = state.pending_guess.take().ok_or(GameError::InvalidState)?;

    if !is_correct_guess(state, guess) {
        state.awaiting_verdict = true;
        log::debug!("Mister White (player {}) guessed wrong", guesser);
        return Ok(false);
    }
    state.winner = Some(Winner::MisterWhite);
    state.phase = GamePhase::EndGame;
    log::info!("Mister White (player {}) guessed the word and wins", guesser);
    Ok(true)
}

/// Decide the game over the remaining players, or rotate the starter and play another round.
///
/// - No Undercover and no Mister White left: Burgers win.
/// - Otherwise one Burger or fewer left: Infiltrators win.
/// - Otherwise the starting seat moves on (see [`next_starting_player`]).
///
/// A finished game is returned as-is. Recording scores for the terminal transition is the
/// caller's job and must happen once.
pub fn evaluate_win_condition(state: &mut GameState) -> Result<RoundOutcome, GameError> {
    if let Some(winner) = state.winner {
        return Ok(RoundOutcome::GameOver { winner });
    }
    if state.phase != GamePhase::Voting || state.pending_guess.is_some() {
        return Err(GameError::InvalidState);
    }

    state.awaiting_verdict = false;

    let infiltrators = state.active_players().filter(|p| p.role.is_infiltrator()).count();
    let burgers = state.active_count(Role::Burger);

    let winner = if infiltrators == 0 {
        Some(Winner::Burgers)
    } else if burgers <= 1 {
        Some(Winner::Infiltrators)
    } else {
        None
    };

    if let Some(winner) = winner {
        state.winner = Some(winner);
        state.phase = GamePhase::EndGame;
        log::info!("Game over: {:?} win", winner);
        return Ok(RoundOutcome::GameOver { winner });
    }

    let next = next_starting_player(&state.players, state.starting_player_id)
        .ok_or(GameError::NoEligibleStartingPlayer)?;
    log::debug!("Starting player rotates {} -> {}", state.starting_player_id, next);
    state.starting_player_id = next;
    state.phase = GamePhase::GameRound;
    Ok(RoundOutcome::Continue {
        starting_player_id: next,
    })
}

/// Run the win check after Mister White guessed wrong.
///
/// Only valid right after [`resolve_mister_white_guess`] returned `false`, so a round
/// cannot be skipped without a vote.
pub fn continue_after_guess(state: &mut GameState) -> Result<RoundOutcome, GameError> {
    if state.phase != GamePhase::Voting || !state.awaiting_verdict {
        return Err(GameError::InvalidState);
    }
    evaluate_win_condition(state)
}

/// Next starting seat among active players ordered by id.
///
/// If `current` is still active the token moves one seat on; if `current` was eliminated it
/// passes to the first active id above it. Both wrap to the lowest active id.
pub fn next_starting_player(players: &[Player], current: PlayerId) -> Option<PlayerId> {
    let mut active: Vec<PlayerId> = players.iter().filter(|p| p.is_active()).map(|p| p.id).collect();
    active.sort_unstable();
    let lowest = *active.first()?;

    let next = match active.iter().position(|&id| id == current) {
        Some(idx) => active[(idx + 1) % active.len()],
        None => active.iter().copied().find(|&id| id > current).unwrap_or(lowest),
    };
    Some(next)
}
