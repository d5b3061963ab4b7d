//! Deck aggregate and the pure draw function.

use super::cards_types::Card;
use crate::errors::domain::{ConflictKind, DomainError};

/// A deck that has not been persisted yet (no id, no timestamps).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    pub shuffled: bool,
    pub cards: Vec<Card>,
}

impl Deck {
    pub fn new(shuffled: bool, cards: Vec<Card>) -> Self {
        Self { shuffled, cards }
    }

    /// Always derived from the live card sequence.
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
}

/// Split `cards` into the first `n` (drawn) and the rest (remaining).
///
/// The top of the deck is the front of the sequence. Fails without touching
/// `cards` when fewer than `n` cards are left. `n == 0` yields an empty draw;
/// rejecting non-positive counts is the caller's job.
pub fn draw(cards: &[Card], n: usize) -> Result<(Vec<Card>, Vec<Card>), DomainError> {
    if n > cards.len() {
        return Err(DomainError::conflict(
            ConflictKind::InsufficientCards,
            format!(
                "Cannot draw {n} card(s): only {} remaining",
                cards.len()
            ),
        ));
    }

    let (drawn, remaining) = cards.split_at(n);
    Ok((drawn.to_vec(), remaining.to_vec()))
}
