//! DeckStore wrapper that records how often each operation is reached.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use backend::domain::{Card, Deck};
use backend::errors::domain::DomainError;
use backend::repos::decks::{DeckStore, StoredDeck};
use backend::repos::memory::InMemoryDeckStore;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct Calls {
    pub insert: AtomicUsize,
    pub get: AtomicUsize,
    pub draw: AtomicUsize,
}

impl Calls {
    pub fn total(&self) -> usize {
        self.insert.load(Ordering::SeqCst)
            + self.get.load(Ordering::SeqCst)
            + self.draw.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CountingStore {
    inner: InMemoryDeckStore,
    pub calls: Arc<Calls>,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DeckStore for CountingStore {
    async fn insert(&self, deck: Deck) -> Result<StoredDeck, DomainError> {
        self.calls.insert.fetch_add(1, Ordering::SeqCst);
        self.inner.insert(deck).await
    }

    async fn get_by_id(&self, id: Uuid) -> Result<StoredDeck, DomainError> {
        self.calls.get.fetch_add(1, Ordering::SeqCst);
        self.inner.get_by_id(id).await
    }

    async fn draw_cards(&self, id: Uuid, count: usize) -> Result<Vec<Card>, DomainError> {
        self.calls.draw.fetch_add(1, Ordering::SeqCst);
        self.inner.draw_cards(id, count).await
    }
}
