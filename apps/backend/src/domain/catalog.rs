//! Static card catalog: the canonical 52-card French deck and code lookup.
//!
//! Built once on first use and never mutated afterwards, so it is shared by
//! every caller without synchronization.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::cards_types::{Card, Rank, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

/// Canonical deck order: suits Spade, Diamond, Club, Heart; ranks Ace..King.
static CANONICAL: Lazy<Vec<Card>> = Lazy::new(|| {
    let mut deck = Vec::with_capacity(52);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            deck.push(Card::new(rank, suit));
        }
    }
    deck
});

static BY_CODE: Lazy<HashMap<String, Card>> =
    Lazy::new(|| CANONICAL.iter().map(|card| (card.code(), *card)).collect());

/// The 52 canonical cards in catalog order.
pub fn canonical_deck() -> Vec<Card> {
    CANONICAL.clone()
}

/// Look up a card by its short code. Codes are case-sensitive ("AS", "10H").
pub fn resolve(code: &str) -> Result<Card, DomainError> {
    BY_CODE.get(code).copied().ok_or_else(|| {
        DomainError::validation(
            ValidationKind::InvalidCardCode,
            format!("Invalid card code: {code}"),
        )
    })
}

/// Resolve every code in order, failing on the first unknown one.
pub fn resolve_all<I, S>(codes: I) -> Result<Vec<Card>, DomainError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    codes.into_iter().map(|code| resolve(code.as_ref())).collect()
}
