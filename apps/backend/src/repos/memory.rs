//! Process-local deck store.
//!
//! Each deck sits behind its own mutex, so draws on one deck serialize while
//! different decks proceed independently. Guards are only taken in the sync
//! helpers below and never held across an await.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;
use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;

use super::decks::{deck_not_found, DeckStore, StoredDeck};
use crate::domain::{deck, Card, Deck};
use crate::errors::domain::DomainError;

type DeckSlot = Arc<Mutex<StoredDeck>>;

#[derive(Debug, Clone, Default)]
pub struct InMemoryDeckStore {
    decks: Arc<DashMap<Uuid, DeckSlot>>,
}

impl InMemoryDeckStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.decks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decks.is_empty()
    }

    fn slot(&self, id: Uuid) -> Result<DeckSlot, DomainError> {
        // Clone the Arc out so the shard lock is released immediately.
        self.decks
            .get(&id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| deck_not_found(id))
    }

    fn insert_sync(&self, deck: Deck) -> StoredDeck {
        let now = OffsetDateTime::now_utc();
        let stored = StoredDeck {
            id: Uuid::new_v4(),
            shuffled: deck.shuffled,
            cards: deck.cards,
            created_at: now,
            updated_at: now,
        };
        self.decks
            .insert(stored.id, Arc::new(Mutex::new(stored.clone())));
        stored
    }

    fn draw_sync(&self, id: Uuid, count: usize) -> Result<Vec<Card>, DomainError> {
        let slot = self.slot(id)?;
        let mut locked = slot.lock();

        let (drawn, remaining) = deck::draw(&locked.cards, count)?;
        locked.cards = remaining;
        locked.updated_at = OffsetDateTime::now_utc();

        debug!(
            deck_id = %id,
            drawn = drawn.len(),
            remaining = locked.remaining(),
            "Cards drawn"
        );
        Ok(drawn)
    }
}

#[async_trait]
impl DeckStore for InMemoryDeckStore {
    async fn insert(&self, deck: Deck) -> Result<StoredDeck, DomainError> {
        Ok(self.insert_sync(deck))
    }

    async fn get_by_id(&self, id: Uuid) -> Result<StoredDeck, DomainError> {
        let slot = self.slot(id)?;
        let snapshot = slot.lock().clone();
        Ok(snapshot)
    }

    async fn draw_cards(&self, id: Uuid, count: usize) -> Result<Vec<Card>, DomainError> {
        self.draw_sync(id, count)
    }
}
