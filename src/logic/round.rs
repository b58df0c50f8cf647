//! Between rounds: redeal words to the same roles, or seat a latecomer.

use crate::logic::setup::pick_starting_player;
use crate::models::{GameError, GamePhase, GameState, Player, PlayerId, Role, WordPool};
use rand::Rng;

/// Draw a fresh word pair and send everyone back through the card phase.
///
/// Roles, names, ids and eliminations are kept; words follow each player's role and every
/// card is unseen again. A new starter is drawn among active non-Mister-White players.
pub fn new_words<R: Rng + ?Sized>(
    state: &mut GameState,
    pool: &WordPool,
    rng: &mut R,
) -> Result<(), GameError> {
    if !matches!(state.phase, GamePhase::GameRound | GamePhase::Voting) || state.vote_unsettled() {
        return Err(GameError::InvalidState);
    }
    let pair = pool
        .draw_other(&state.word_pair, rng)
        .ok_or(GameError::InvalidState)?;
    let starting_player_id =
        pick_starting_player(&state.players, rng).ok_or(GameError::NoEligibleStartingPlayer)?;

    for player in &mut state.players {
        player.word = pair.word_for(player.role).to_string();
        player.has_seen_card = false;
    }
    state.word_pair = pair;
    state.starting_player_id = starting_player_id;
    state.current_player_index = 0;
    state.phase = GamePhase::CardPhase;
    log::info!("New words dealt; player {} starts the next round", starting_player_id);
    Ok(())
}

/// Seat a latecomer as a Burger with the current Burger word.
///
/// Role ratios are deliberately not rebalanced. Returns the new player's id.
pub fn add_player(state: &mut GameState) -> Result<PlayerId, GameError> {
    if !matches!(
        state.phase,
        GamePhase::CardPhase | GamePhase::GameRound | GamePhase::Voting
    ) {
        return Err(GameError::InvalidState);
    }
    let id = state.players.iter().map(|p| p.id).max().map_or(0, |max| max + 1);
    let word = state.word_for(Role::Burger).to_string();
    // Default names can clash with a seat renamed during the card phase.
    let mut seat = id as usize;
    let name = loop {
        let candidate = Player::default_name(seat);
        let taken = state
            .players
            .iter()
            .any(|p| p.name.to_lowercase() == candidate.to_lowercase());
        if !taken {
            break candidate;
        }
        seat += 1;
    };
    state.players.push(Player::new(id, name, Role::Burger, word));
    log::debug!("Player {} joined as Burger", id);
    Ok(id)
}
