//! Snake and auction draft order generation

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::TeamId;
use crate::error::AppError;

/// How picks are distributed between teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DraftType {
    /// Order reverses every round: 1..n, n..1, 1..n, ...
    #[default]
    Snake,
    /// Nomination order, same direction every round
    Auction,
}

impl fmt::Display for DraftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftType::Snake => write!(f, "snake"),
            DraftType::Auction => write!(f, "auction"),
        }
    }
}

impl FromStr for DraftType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "snake" => Ok(DraftType::Snake),
            "auction" => Ok(DraftType::Auction),
            other => Err(AppError::invalid_input(format!(
                "Unknown draft type '{other}', expected 'snake' or 'auction'"
            ))),
        }
    }
}

/// The full pick sequence of a draft.
///
/// Pick `n` (1-indexed) belongs to `order[n - 1]`. Serialized as a plain JSON
/// array of team ids so the persistence layer never has to parse it by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct DraftOrder(Vec<TeamId>);

impl DraftOrder {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[TeamId] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TeamId> {
        self.0.iter()
    }

    /// Returns the picks of a 1-indexed round, or `None` past the last round.
    pub fn round(&self, round: u32, num_participants: usize) -> Option<&[TeamId]> {
        if round == 0 || num_participants == 0 {
            return None;
        }
        let start = (round as usize - 1) * num_participants;
        let end = start + num_participants;
        self.0.get(start..end)
    }
}

impl From<Vec<TeamId>> for DraftOrder {
    fn from(picks: Vec<TeamId>) -> Self {
        DraftOrder(picks)
    }
}

impl<'a> IntoIterator for &'a DraftOrder {
    type Item = &'a TeamId;
    type IntoIter = std::slice::Iter<'a, TeamId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Builds a snake draft order.
///
/// Even round indexes (0, 2, ...) use `participants` as given, odd ones use
/// it reversed. An empty participant list yields an empty order for any
/// round count.
///
/// # Example
/// ```
/// use liiga_fantasy::draft::generate_snake_order;
///
/// let teams = vec!["a".to_string(), "b".to_string(), "c".to_string()];
/// let order = generate_snake_order(&teams, 2);
/// assert_eq!(order.as_slice(), ["a", "b", "c", "c", "b", "a"]);
/// ```
pub fn generate_snake_order(participants: &[TeamId], rounds: u32) -> DraftOrder {
    let mut picks = Vec::with_capacity(participants.len() * rounds as usize);
    for round in 0..rounds {
        if round % 2 == 0 {
            picks.extend(participants.iter().cloned());
        } else {
            picks.extend(participants.iter().rev().cloned());
        }
    }
    DraftOrder(picks)
}

/// Builds an order that repeats `participants` in the same direction every
/// round. Used as the nomination order of auction drafts.
pub fn generate_linear_order(participants: &[TeamId], rounds: u32) -> DraftOrder {
    let mut picks = Vec::with_capacity(participants.len() * rounds as usize);
    for _ in 0..rounds {
        picks.extend(participants.iter().cloned());
    }
    DraftOrder(picks)
}

/// Builds the order for the given draft type.
pub fn generate_order(draft_type: DraftType, participants: &[TeamId], rounds: u32) -> DraftOrder {
    match draft_type {
        DraftType::Snake => generate_snake_order(participants, rounds),
        DraftType::Auction => generate_linear_order(participants, rounds),
    }
}

/// Returns a uniformly shuffled copy of `participants`. The input is left untouched.
pub fn shuffle(participants: &[TeamId]) -> Vec<TeamId> {
    shuffle_with(participants, &mut rand::rng())
}

/// Same as [`shuffle`] with a caller-supplied random source.
pub fn shuffle_with<R: Rng + ?Sized>(participants: &[TeamId], rng: &mut R) -> Vec<TeamId> {
    let mut shuffled = participants.to_vec();
    shuffled.shuffle(rng);
    shuffled
}
