//! Shared fixtures for unit tests and the integration suites under `tests/`.
//!
//! Compiled for `cfg(test)` and behind the `test-support` feature.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::TokenVerifier;
use crate::domain::{Ingredient, RecipeDraft, RecipeType, UserId};

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    /// Freeze the clock at `instant`.
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }

    /// The frozen instant.
    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::at(
            Utc.with_ymd_and_hms(2026, 1, 5, 8, 0, 0)
                .single()
                .unwrap_or_default(),
        )
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.instant.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.instant
    }
}

/// Build a [`UserId`], panicking on invalid input.
///
/// # Panics
/// Panics when `raw` is not a valid identifier.
pub fn user(raw: &str) -> UserId {
    match UserId::new(raw) {
        Ok(id) => id,
        Err(err) => panic!("fixture user id {raw:?} is invalid: {err}"),
    }
}

fn ingredient(name: &str, amount: f64, unit: &str) -> Ingredient {
    Ingredient {
        name: name.to_owned(),
        amount,
        unit: unit.to_owned(),
    }
}

/// The pancake recipe used across suites.
pub fn pancakes_draft(user_id: UserId) -> RecipeDraft {
    RecipeDraft {
        user_id,
        name: "Pancakes".to_owned(),
        recipe_type: RecipeType::Food,
        ingredients: vec![
            ingredient("Flour", 2.0, "cups"),
            ingredient("Milk", 1.5, "cups"),
            ingredient("Eggs", 2.0, "pieces"),
        ],
        instructions: vec![
            "Whisk the dry ingredients.".to_owned(),
            "Beat in milk and eggs.".to_owned(),
            "Cook on a hot griddle.".to_owned(),
        ],
    }
}

/// A drink recipe for suites that need a second record.
pub fn lemonade_draft(user_id: UserId) -> RecipeDraft {
    RecipeDraft {
        user_id,
        name: "Lemonade".to_owned(),
        recipe_type: RecipeType::Drink,
        ingredients: vec![
            ingredient("Lemon juice", 0.5, "cups"),
            ingredient("Sugar", 0.25, "cups"),
            ingredient("Water", 4.0, "cups"),
        ],
        instructions: vec!["Stir until the sugar dissolves.".to_owned()],
    }
}

/// Verifier mapping fixed tokens to users, rejecting everything else.
#[derive(Debug, Clone, Default)]
pub struct TokenTable {
    tokens: HashMap<String, UserId>,
}

impl TokenTable {
    /// Accept `token` as `user_id`.
    pub fn with_token(mut self, token: &str, user_id: UserId) -> Self {
        self.tokens.insert(token.to_owned(), user_id);
        self
    }
}

#[async_trait]
impl TokenVerifier for TokenTable {
    async fn verify(&self, token: &str) -> Option<UserId> {
        self.tokens.get(token).cloned()
    }
}
