//! Postgres-backed deck store.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use tracing::debug;
use uuid::Uuid;

use crate::db::txn::with_txn;
use crate::domain::{deck, Card, Deck};
use crate::errors::domain::DomainError;
use crate::repos::decks::{deck_not_found, DeckStore, StoredDeck};

use super::DeckCreate;

/// SeaORM implementation of DeckStore.
///
/// Draws run in a transaction that row-locks the deck, so concurrent draws on
/// one deck are serialized while draws on different decks never wait on each
/// other.
#[derive(Debug, Clone)]
pub struct DeckStoreSea {
    db: Arc<DatabaseConnection>,
}

impl DeckStoreSea {
    /// Accepts an owned connection or one already shared with `AppState`.
    pub fn new(db: impl Into<Arc<DatabaseConnection>>) -> Self {
        Self { db: db.into() }
    }

    fn conn(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl DeckStore for DeckStoreSea {
    async fn insert(&self, deck: Deck) -> Result<StoredDeck, DomainError> {
        let row =
            super::create_deck(self.conn(), DeckCreate::new(deck.shuffled, deck.cards)).await?;
        let stored = StoredDeck::try_from(row)?;
        debug!(deck_id = %stored.id, remaining = stored.remaining(), "Deck inserted");
        Ok(stored)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<StoredDeck, DomainError> {
        let row = super::find_by_id(self.conn(), id)
            .await?
            .ok_or_else(|| deck_not_found(id))?;
        StoredDeck::try_from(row)
    }

    async fn draw_cards(&self, id: Uuid, count: usize) -> Result<Vec<Card>, DomainError> {
        with_txn(self.conn(), move |txn| {
            Box::pin(async move {
                let row = super::lock_by_id(txn, id)
                    .await?
                    .ok_or_else(|| deck_not_found(id))?;
                let locked = StoredDeck::try_from(row)?;

                // Insufficient cards aborts here, before any write.
                let (drawn, remaining) = deck::draw(&locked.cards, count)?;

                super::update_cards(txn, id, &remaining).await?;

                debug!(
                    deck_id = %id,
                    drawn = drawn.len(),
                    remaining = remaining.len(),
                    "Cards drawn"
                );
                Ok(drawn)
            })
        })
        .await
    }
}
