//! Setup phase: default role distribution and dealing roles, words and the first starter.

use crate::models::{
    ConfigError, GameState, Player, PlayerId, Role, RoleCounts, WordPair, MAX_PLAYERS, MIN_PLAYERS,
};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Player counts at which one more Undercover joins (on top of the first).
const EXTRA_UNDERCOVER_AT: [usize; 5] = [7, 10, 13, 16, 19];
/// Player count from which a Mister White is dealt.
const MISTER_WHITE_FROM: usize = 5;

/// Suggested roles for `player_count` (meant for 3..=20); callers may override before dealing.
///
/// One Undercover, one Mister White from 5 players, one extra Undercover at each of
/// 7, 10, 13, 16 and 19 players; everyone else is a Burger.
pub fn compute_default_roles(player_count: usize) -> RoleCounts {
    let undercovers = 1 + EXTRA_UNDERCOVER_AT
        .iter()
        .filter(|&&threshold| player_count >= threshold)
        .count();
    let mister_whites = usize::from(player_count >= MISTER_WHITE_FROM);
    RoleCounts {
        burgers: player_count.saturating_sub(undercovers + mister_whites),
        undercovers,
        mister_whites,
    }
}

/// Check a configuration before dealing: player count in range, roles add up,
/// at least one Undercover and two Burgers.
pub fn validate_roles(player_count: usize, roles: &RoleCounts) -> Result<(), ConfigError> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
        return Err(ConfigError::PlayerCountOutOfRange {
            count: player_count,
            min: MIN_PLAYERS,
            max: MAX_PLAYERS,
        });
    }
    if roles.total() != player_count {
        return Err(ConfigError::RoleCountMismatch {
            players: player_count,
            roles: roles.total(),
        });
    }
    if roles.undercovers < 1 {
        return Err(ConfigError::NotEnoughUndercovers);
    }
    if roles.burgers < 2 {
        return Err(ConfigError::NotEnoughBurgers);
    }
    Ok(())
}

/// Deal a new game.
///
/// 1. Validate counts and words (see [`validate_roles`]).
/// 2. Build the role list and shuffle it (backward Fisher–Yates).
/// 3. Seat ids `0..player_count`; name from `existing_names[i]` when given and non-blank,
///    else "Player {i+1}"; word by role (empty for Mister White).
/// 4. Pick a random starting player who is not Mister White.
///
/// Returns the state in `CardPhase` with the first seat up.
pub fn assign<R: Rng + ?Sized>(
    player_count: usize,
    roles: RoleCounts,
    word_pair: WordPair,
    existing_names: &[String],
    rng: &mut R,
) -> Result<GameState, ConfigError> {
    validate_roles(player_count, &roles)?;
    if !word_pair.is_complete() {
        return Err(ConfigError::EmptyWord);
    }

    let mut role_list: Vec<Role> = std::iter::repeat(Role::Burger)
        .take(roles.burgers)
        .chain(std::iter::repeat(Role::Undercover).take(roles.undercovers))
        .chain(std::iter::repeat(Role::MisterWhite).take(roles.mister_whites))
        .collect();
    role_list.shuffle(rng);

    let mut seen_names = HashSet::new();
    let mut players = Vec::with_capacity(player_count);
    for (index, role) in role_list.into_iter().enumerate() {
        let name = existing_names
            .get(index)
            .map(|n| n.trim())
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| Player::default_name(index));
        if !seen_names.insert(name.to_lowercase()) {
            return Err(ConfigError::DuplicateName(name));
        }
        let word = word_pair.word_for(role);
        players.push(Player::new(index as PlayerId, name, role, word));
    }

    // Validation guarantees at least two Burgers, so a starter always exists.
    let starting_player_id =
        pick_starting_player(&players, rng).ok_or(ConfigError::NotEnoughBurgers)?;

    log::info!(
        "Dealt {} players ({} burgers, {} undercovers, {} mister whites); player {} starts",
        player_count,
        roles.burgers,
        roles.undercovers,
        roles.mister_whites,
        starting_player_id
    );

    Ok(GameState::with_players(players, word_pair, starting_player_id))
}

/// Random seat that is active and not Mister White.
///
/// Starts at a uniformly random seat and scans forward, wrapping around.
pub(crate) fn pick_starting_player<R: Rng + ?Sized>(players: &[Player], rng: &mut R) -> Option<PlayerId> {
    let n = players.len();
    if n == 0 {
        return None;
    }
    let start = rng.gen_range(0..n);
    (0..n)
        .map(|offset| &players[(start + offset) % n])
        .find(|p| p.role != Role::MisterWhite && p.is_active())
        .map(|p| p.id)
}
