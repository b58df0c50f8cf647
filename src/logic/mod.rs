//! Game rules: dealing, card phase, voting and between-round actions.

mod card_phase;
mod round;
mod setup;
mod voting;

pub use card_phase::advance_card_phase;
pub use round::{add_player, new_words};
pub use setup::{assign, compute_default_roles, validate_roles};
pub use voting::{
    continue_after_guess, eliminate, evaluate_win_condition, is_correct_guess, next_starting_player,
    resolve_mister_white_guess, start_voting, Elimination, RoundOutcome,
};
