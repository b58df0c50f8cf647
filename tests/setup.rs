//! Integration tests for dealing: default roles, assignment and configuration errors.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use undercover_party::{
    assign, compute_default_roles, validate_roles, ConfigError, GamePhase, Role, RoleCounts,
    WordPair,
};

fn counts(burgers: usize, undercovers: usize, mister_whites: usize) -> RoleCounts {
    RoleCounts {
        burgers,
        undercovers,
        mister_whites,
    }
}

fn pair() -> WordPair {
    WordPair::new("Koffie", "Thee")
}

#[test]
fn default_roles_follow_thresholds() {
    assert_eq!(compute_default_roles(3), counts(2, 1, 0));
    assert_eq!(compute_default_roles(4), counts(3, 1, 0));
    assert_eq!(compute_default_roles(5), counts(3, 1, 1));
    assert_eq!(compute_default_roles(6), counts(4, 1, 1));
    assert_eq!(compute_default_roles(7), counts(4, 2, 1));
    assert_eq!(compute_default_roles(10), counts(6, 3, 1));
    assert_eq!(compute_default_roles(13), counts(8, 4, 1));
    assert_eq!(compute_default_roles(16), counts(10, 5, 1));
    assert_eq!(compute_default_roles(19), counts(12, 6, 1));
    assert_eq!(compute_default_roles(20), counts(13, 6, 1));
}

#[test]
fn default_roles_are_always_valid() {
    for n in 3..=20 {
        assert_eq!(validate_roles(n, &compute_default_roles(n)), Ok(()), "n = {n}");
    }
}

#[test]
fn assign_deals_configured_roles_and_ids() {
    let mut rng = StdRng::seed_from_u64(7);
    for n in 3..=20 {
        let roles = compute_default_roles(n);
        let game = assign(n, roles, pair(), &[], &mut rng).unwrap();

        assert_eq!(game.players.len(), n);
        for role in [Role::Burger, Role::Undercover, Role::MisterWhite] {
            let dealt = game.players.iter().filter(|p| p.role == role).count();
            assert_eq!(dealt, roles.count(role), "n = {n}, role = {role}");
        }
        let ids: HashSet<_> = game.players.iter().map(|p| p.id).collect();
        assert_eq!(ids, (0..n as u32).collect::<HashSet<_>>());
    }
}

#[test]
fn assign_hands_out_words_by_role() {
    let mut rng = StdRng::seed_from_u64(1);
    let game = assign(6, counts(3, 1, 2), pair(), &[], &mut rng).unwrap();

    assert_eq!(game.phase, GamePhase::CardPhase);
    assert_eq!(game.current_player_index, 0);
    assert_eq!(game.winner, None);
    for p in &game.players {
        let expected = match p.role {
            Role::Burger => "Koffie",
            Role::Undercover => "Thee",
            Role::MisterWhite => "",
        };
        assert_eq!(p.word, expected);
        assert!(!p.is_eliminated);
        assert!(!p.has_seen_card);
    }
}

#[test]
fn starting_player_is_never_mister_white() {
    // Two of five seats are Mister White, so a naive pick would hit one often.
    for seed in 0..500 {
        let mut rng = StdRng::seed_from_u64(seed);
        let game = assign(5, counts(2, 1, 2), pair(), &[], &mut rng).unwrap();
        let starter = game.get_player(game.starting_player_id).unwrap();
        assert_ne!(starter.role, Role::MisterWhite, "seed = {seed}");
    }
}

#[test]
fn same_seed_deals_the_same_game() {
    let a = assign(8, compute_default_roles(8), pair(), &[], &mut StdRng::seed_from_u64(42)).unwrap();
    let b = assign(8, compute_default_roles(8), pair(), &[], &mut StdRng::seed_from_u64(42)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn names_come_from_existing_names_then_defaults() {
    let names = vec!["Anna".to_string(), "  ".to_string(), " Bram ".to_string()];
    let mut rng = StdRng::seed_from_u64(3);
    let game = assign(4, counts(3, 1, 0), pair(), &names, &mut rng).unwrap();

    let got: Vec<&str> = game.players.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(got, ["Anna", "Player 2", "Bram", "Player 4"]);
}

#[test]
fn assign_rejects_bad_configuration() {
    let mut rng = StdRng::seed_from_u64(0);

    assert_eq!(
        assign(5, counts(3, 1, 0), pair(), &[], &mut rng),
        Err(ConfigError::RoleCountMismatch { players: 5, roles: 4 })
    );
    assert_eq!(
        assign(4, counts(4, 0, 0), pair(), &[], &mut rng),
        Err(ConfigError::NotEnoughUndercovers)
    );
    assert_eq!(
        assign(4, counts(1, 2, 1), pair(), &[], &mut rng),
        Err(ConfigError::NotEnoughBurgers)
    );
    assert!(matches!(
        assign(2, counts(1, 1, 0), pair(), &[], &mut rng),
        Err(ConfigError::PlayerCountOutOfRange { count: 2, .. })
    ));
    assert!(matches!(
        assign(21, counts(19, 1, 1), pair(), &[], &mut rng),
        Err(ConfigError::PlayerCountOutOfRange { count: 21, .. })
    ));
    assert_eq!(
        assign(3, counts(2, 1, 0), WordPair::new("Koffie", " "), &[], &mut rng),
        Err(ConfigError::EmptyWord)
    );
}

#[test]
fn assign_rejects_duplicate_names() {
    let mut rng = StdRng::seed_from_u64(0);
    let names = vec!["Anna".to_string(), "anna".to_string()];
    assert_eq!(
        assign(3, counts(2, 1, 0), pair(), &names, &mut rng),
        Err(ConfigError::DuplicateName("anna".to_string()))
    );

    // A given name may also clash with a generated default.
    let names = vec!["Player 2".to_string()];
    assert_eq!(
        assign(3, counts(2, 1, 0), pair(), &names, &mut rng),
        Err(ConfigError::DuplicateName("Player 2".to_string()))
    );
}
