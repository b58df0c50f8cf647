//! Card phase: each seat in turn privately views its card and confirms its name.

use crate::models::{GameError, GamePhase, GameState};

/// Confirm the current seat's card and move to the next seat.
///
/// A non-blank `name_input` (trimmed) renames the seat; otherwise the current name is kept.
/// Names must stay unique (case-insensitive). After the last seat the game moves to `GameRound`.
pub fn advance_card_phase(state: &mut GameState, name_input: Option<&str>) -> Result<(), GameError> {
    if state.phase != GamePhase::CardPhase {
        return Err(GameError::InvalidState);
    }
    let index = state.current_player_index;
    if index >= state.players.len() {
        return Err(GameError::InvalidState);
    }

    if let Some(name) = name_input.map(str::trim).filter(|n| !n.is_empty()) {
        let is_duplicate = state
            .players
            .iter()
            .enumerate()
            .any(|(i, p)| i != index && p.name.to_lowercase() == name.to_lowercase());
        if is_duplicate {
            return Err(GameError::DuplicatePlayerName);
        }
        state.players[index].name = name.to_string();
    }
    state.players[index].has_seen_card = true;

    if index + 1 < state.players.len() {
        state.current_player_index = index + 1;
    } else {
        state.phase = GamePhase::GameRound;
        log::debug!("All cards seen; player {} opens the round", state.starting_player_id);
    }
    Ok(())
}
