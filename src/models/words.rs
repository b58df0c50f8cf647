//! Secret word pairs and the category pool they are drawn from.

use crate::models::player::Role;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// The Burger word and the close-but-different Undercover word.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct WordPair {
    pub burger_word: String,
    pub undercover_word: String,
}

impl WordPair {
    pub fn new(burger_word: impl Into<String>, undercover_word: impl Into<String>) -> Self {
        Self {
            burger_word: burger_word.into(),
            undercover_word: undercover_word.into(),
        }
    }

    /// Word dealt to `role`; Mister White gets none.
    pub fn word_for(&self, role: Role) -> &str {
        match role {
            Role::Burger => &self.burger_word,
            Role::Undercover => &self.undercover_word,
            Role::MisterWhite => "",
        }
    }

    /// Both words set (after trimming).
    pub fn is_complete(&self) -> bool {
        !self.burger_word.trim().is_empty() && !self.undercover_word.trim().is_empty()
    }
}

/// Category used when the caller does not pick one.
pub const DEFAULT_CATEGORY: &str = "General";

const BUILTIN: &[(&str, &[(&str, &str)])] = &[
    (
        DEFAULT_CATEGORY,
        &[
            ("Coffee", "Tea"),
            ("Beach", "Pool"),
            ("Guitar", "Violin"),
            ("Train", "Tram"),
            ("Pillow", "Blanket"),
            ("Sun", "Moon"),
            ("Book", "Magazine"),
            ("Bicycle", "Scooter"),
        ],
    ),
    (
        "Food",
        &[
            ("Burger", "Sandwich"),
            ("Pizza", "Lasagna"),
            ("Pancake", "Waffle"),
            ("Cheese", "Butter"),
            ("Apple", "Pear"),
            ("Fries", "Crisps"),
        ],
    ),
    (
        "Animals",
        &[
            ("Dog", "Wolf"),
            ("Cat", "Tiger"),
            ("Horse", "Donkey"),
            ("Frog", "Toad"),
            ("Dolphin", "Shark"),
        ],
    ),
    (
        "Places",
        &[
            ("Hospital", "Pharmacy"),
            ("Airport", "Train station"),
            ("Museum", "Library"),
            ("Cinema", "Theatre"),
            ("Forest", "Park"),
        ],
    ),
];

/// Named categories of word pairs.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordPool {
    categories: BTreeMap<String, Vec<WordPair>>,
}

impl Default for WordPool {
    fn default() -> Self {
        Self::builtin()
    }
}

impl WordPool {
    pub fn new(categories: BTreeMap<String, Vec<WordPair>>) -> Self {
        Self { categories }
    }

    /// Pool shipped with the game.
    pub fn builtin() -> Self {
        let categories = BUILTIN
            .iter()
            .map(|(name, pairs)| {
                let pairs = pairs.iter().map(|(b, u)| WordPair::new(*b, *u)).collect();
                (name.to_string(), pairs)
            })
            .collect();
        Self { categories }
    }

    /// Read a pool from a JSON object of `{"Category": [{"burger_word": .., "undercover_word": ..}]}`.
    pub fn from_json_file(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let pool: WordPool = serde_json::from_str(&data)?;
        Ok(pool)
    }

    pub fn category_names(&self) -> Vec<&str> {
        self.categories.keys().map(String::as_str).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.values().all(Vec::is_empty)
    }

    fn all_pairs(&self) -> impl Iterator<Item = &WordPair> {
        self.categories.values().flatten()
    }

    /// Random pair from `category`, or from [`DEFAULT_CATEGORY`] when none is given.
    ///
    /// Unknown or empty categories fall back to the whole pool.
    pub fn draw<R: Rng + ?Sized>(&self, category: Option<&str>, rng: &mut R) -> Option<WordPair> {
        let from_category = self
            .categories
            .get(category.unwrap_or(DEFAULT_CATEGORY))
            .filter(|pairs| !pairs.is_empty());
        match from_category {
            Some(pairs) => pairs.choose(rng).cloned(),
            None => {
                let all: Vec<&WordPair> = self.all_pairs().collect();
                all.choose(rng).copied().cloned()
            }
        }
    }

    /// Pair for a new game: `custom` when both of its words are set, else a draw from `category`.
    pub fn pair_for_game<R: Rng + ?Sized>(
        &self,
        custom: Option<WordPair>,
        category: Option<&str>,
        rng: &mut R,
    ) -> Option<WordPair> {
        match custom.filter(WordPair::is_complete) {
            Some(pair) => Some(pair),
            None => self.draw(category, rng),
        }
    }

    /// Random pair from the whole pool, avoiding `current` when anything else is available.
    pub fn draw_other<R: Rng + ?Sized>(&self, current: &WordPair, rng: &mut R) -> Option<WordPair> {
        let others: Vec<&WordPair> = self.all_pairs().filter(|p| *p != current).collect();
        if others.is_empty() {
            return self.all_pairs().next().cloned();
        }
        others.choose(rng).copied().cloned()
    }
}
