//! Deck domain service.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::shuffle::{self, CardShuffler, RandomGenerator};
use crate::domain::{catalog, Card, Deck};
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::decks::{DeckStore, StoredDeck};

/// Deck domain service.
///
/// Validates caller input, builds decks from the catalog and delegates all
/// persistence to the injected store.
#[derive(Clone)]
pub struct DeckService {
    store: Arc<dyn DeckStore>,
    generator: RandomGenerator,
    shuffler: CardShuffler,
}

impl fmt::Debug for DeckService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeckService").finish_non_exhaustive()
    }
}

impl DeckService {
    pub fn new(
        store: Arc<dyn DeckStore>,
        generator: RandomGenerator,
        shuffler: CardShuffler,
    ) -> Self {
        Self {
            store,
            generator,
            shuffler,
        }
    }

    /// Service with OS-seeded randomness and Fisher-Yates shuffling.
    pub fn with_store(store: Arc<dyn DeckStore>) -> Self {
        Self::new(
            store,
            shuffle::default_generator(),
            shuffle::default_shuffler(),
        )
    }

    /// Create and persist a deck.
    ///
    /// An empty `card_codes` list means the full canonical deck. Otherwise the
    /// codes are resolved in order and the first unknown code aborts the
    /// request before anything is stored.
    pub async fn create_deck(
        &self,
        shuffled: bool,
        card_codes: &[String],
    ) -> Result<StoredDeck, DomainError> {
        let mut cards = if card_codes.is_empty() {
            catalog::canonical_deck()
        } else {
            catalog::resolve_all(card_codes)?
        };

        if shuffled {
            let mut rng = (self.generator)();
            cards = (self.shuffler)(&mut rng, cards);
        }

        let stored = self.store.insert(Deck::new(shuffled, cards)).await?;
        info!(
            deck_id = %stored.id,
            shuffled,
            remaining = stored.remaining(),
            "Deck created"
        );
        Ok(stored)
    }

    pub async fn get_deck(&self, id: &str) -> Result<StoredDeck, DomainError> {
        let id = parse_deck_id(id)?;
        self.store.get_by_id(id).await
    }

    /// Draw `count` cards from the top of the deck.
    ///
    /// Non-positive counts are rejected here, before the store is contacted.
    pub async fn draw_cards(&self, id: &str, count: i64) -> Result<Vec<Card>, DomainError> {
        let id = parse_deck_id(id)?;
        if count <= 0 {
            return Err(DomainError::invalid_parameter(format!(
                "count must be a positive integer, got {count}"
            )));
        }
        // A count beyond usize cannot be satisfied by any deck.
        let count = usize::try_from(count).unwrap_or(usize::MAX);

        let drawn = self.store.draw_cards(id, count).await?;
        debug!(deck_id = %id, drawn = drawn.len(), "Draw complete");
        Ok(drawn)
    }
}

/// Blank ids are a caller error; anything else that is not a UUID cannot name
/// a stored deck.
fn parse_deck_id(raw: &str) -> Result<Uuid, DomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::invalid_parameter("deck id must not be empty"));
    }
    Uuid::parse_str(trimmed).map_err(|_| {
        DomainError::not_found(NotFoundKind::Deck, format!("Deck {trimmed} not found"))
    })
}
