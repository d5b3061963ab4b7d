//! Deck store contract and the persisted deck record.

use async_trait::async_trait;
use serde::{Serialize, Serializer};
use time::OffsetDateTime;
use tracing::error;
use uuid::Uuid;

use crate::domain::{Card, Deck};
use crate::entities::decks;
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};

/// A deck as it exists in storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDeck {
    pub id: Uuid,
    pub shuffled: bool,
    /// Top of the deck first
    pub cards: Vec<Card>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl StoredDeck {
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
}

#[derive(Serialize)]
struct StoredDeckView<'a> {
    id: Uuid,
    shuffled: bool,
    remaining: usize,
    cards: &'a [Card],
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    updated_at: OffsetDateTime,
}

// `remaining` is emitted from the card sequence, never stored separately.
impl Serialize for StoredDeck {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        StoredDeckView {
            id: self.id,
            shuffled: self.shuffled,
            remaining: self.remaining(),
            cards: &self.cards,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
        .serialize(serializer)
    }
}

impl TryFrom<decks::Model> for StoredDeck {
    type Error = DomainError;

    fn try_from(model: decks::Model) -> Result<Self, Self::Error> {
        let cards: Vec<Card> = serde_json::from_value(model.cards).map_err(|e| {
            error!(deck_id = %model.id, error = %e, "Stored cards failed to decode");
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("Deck {} has corrupted card data", model.id),
            )
        })?;

        Ok(Self {
            id: model.id,
            shuffled: model.shuffled,
            cards,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

pub fn deck_not_found(id: Uuid) -> DomainError {
    DomainError::not_found(NotFoundKind::Deck, format!("Deck {id} not found"))
}

/// Durable deck storage.
///
/// `draw_cards` is atomic per deck: concurrent draws on the same deck behave
/// as if run one after another, and a failed draw leaves the deck unchanged.
#[async_trait]
pub trait DeckStore: Send + Sync {
    /// Persist a new deck under a freshly generated id.
    async fn insert(&self, deck: Deck) -> Result<StoredDeck, DomainError>;

    async fn get_by_id(&self, id: Uuid) -> Result<StoredDeck, DomainError>;

    /// Remove and return the top `count` cards.
    ///
    /// Fails with `Conflict(InsufficientCards)` when fewer than `count` cards
    /// remain, and with `NotFound(Deck)` when no deck has this id.
    async fn draw_cards(&self, id: Uuid, count: usize) -> Result<Vec<Card>, DomainError>;
}
